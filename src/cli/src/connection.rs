//! Connecting to a beacon node.

use crate::config::Config;
use crate::errors::CliError;
use crate::output::Output;
use ethdo_beacon::{BeaconClient, BeaconError};
use tracing::debug;

/// Connects to the configured beacon node.
pub fn connect(config: &Config, out: &mut Output) -> Result<BeaconClient, CliError> {
    if config.connection.is_empty() {
        return Err(CliError::NoConnection);
    }
    out.debug(format!("Connecting to {}", config.connection));

    let client =
        BeaconClient::connect(&config.connection, config.timeout).map_err(|e| match e {
            BeaconError::NoConnection => CliError::NoConnection,
            other => CliError::Beacon(other),
        })?;
    debug!("Using beacon node at {}", client.address());
    Ok(client)
}
