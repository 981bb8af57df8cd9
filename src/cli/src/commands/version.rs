//! Version command.

/// Version of this build.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Runs the version command.
pub async fn run() -> &'static str {
    VERSION
}
