//! Command line entry point for ethdo.

use anyhow::Result;
use ethdo::cli::{Command, Opt};
use ethdo::commands::{self, version};
use ethdo::{Config, Output};
use structopt::StructOpt;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Process exit code for any failure.
const EXIT_FAILURE: i32 = 1;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        println!("{}", e);
        std::process::exit(EXIT_FAILURE);
    }
}

async fn run() -> Result<()> {
    // Parse command line arguments
    let opt = Opt::from_args();

    // The version needs no configuration
    if let Command::Version = opt.cmd {
        println!("{}", version::run().await);
        return Ok(());
    }

    // Load configuration, rejecting conflicting flags before anything else
    let config = Config::load(&opt.flags, opt.cmd.transaction_flags())?;

    // Initialize logging
    let filter = if config.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Run the command
    let mut out = Output::from_config(&config);
    commands::execute(opt.cmd, &config, &mut out).await?;
    Ok(())
}
