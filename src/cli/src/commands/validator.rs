//! Validator commands.

use crate::errors::CliError;
use crate::output::Output;
use crate::signing::{generate_signing_root, sign};
use ethdo_beacon::{BeaconNode, ChainTime, ValidatorInfo};
use ethdo_core::types::{SignedVoluntaryExit, VoluntaryExit, DOMAIN_VOLUNTARY_EXIT};
use ethdo_core::{compute_domain, Epoch, PublicKey};
use ethdo_wallet::Account;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Gwei in one Ether.
const GWEI_PER_ETHER: u64 = 1_000_000_000;

/// Polls before waiting for an exit gives up; a little over a day of slots.
pub const DEFAULT_MAX_EXIT_POLLS: u32 = 8192;

/// Polls between reminders that an exit is still unscheduled.
const EXIT_POLL_WARN_INTERVAL: u32 = 32;

/// Options for the validator exit command.
#[derive(Clone, Debug, Default)]
pub struct ExitOptions {
    /// Exit epoch; the current epoch if unset
    pub epoch: Option<Epoch>,
    /// Only generate the exit, do not submit it
    pub generate: bool,
    /// Wait until the node reports the exit as scheduled
    pub wait: bool,
    /// Time between checks when waiting; one slot if unset
    pub poll_interval: Option<Duration>,
    /// Checks before giving up when waiting; [`DEFAULT_MAX_EXIT_POLLS`] if unset
    pub max_polls: Option<u32>,
}

/// Formats a balance in Gwei as Ether.
pub fn format_balance(gwei: u64) -> String {
    let whole = gwei / GWEI_PER_ETHER;
    let fraction = gwei % GWEI_PER_ETHER;
    if fraction == 0 {
        return format!("{} Ether", whole);
    }
    let fraction = format!("{:09}", fraction);
    format!("{}.{} Ether", whole, fraction.trim_end_matches('0'))
}

/// Runs the validator info command.
pub async fn info<N: BeaconNode>(node: &N, pubkey: &PublicKey) -> Result<ValidatorInfo, CliError> {
    let info = node.fetch_validator_info(pubkey).await?;
    debug!("Validator {} has index {}", pubkey, info.index);
    Ok(info)
}

/// Runs the validator exit command with an unlocked account.
pub async fn exit<N: BeaconNode>(
    node: &N,
    account: &Account,
    options: &ExitOptions,
    out: &mut Output,
) -> Result<SignedVoluntaryExit, CliError> {
    let pubkey = account.public_key();
    let validator = node.fetch_validator_info(pubkey).await?;
    if validator.validator.has_exit_epoch() {
        return Err(CliError::ValidatorExiting(pubkey.to_string()));
    }
    if !validator.status.is_active() {
        return Err(CliError::ValidatorNotActive(
            pubkey.to_string(),
            validator.status.to_string(),
        ));
    }

    let config = node.fetch_chain_config().await?;
    let genesis_time = node.fetch_genesis_time().await?;
    let clock = ChainTime::from_config(genesis_time, &config)?;
    let epoch = match options.epoch {
        Some(epoch) => epoch,
        None => clock.current_epoch(),
    };

    let fork = node.fetch_fork().await?;
    let genesis_validators_root = node.fetch_genesis_validators_root().await?;
    let domain = compute_domain(
        DOMAIN_VOLUNTARY_EXIT,
        fork.current_version,
        genesis_validators_root,
    );

    let message = VoluntaryExit {
        epoch,
        validator_index: validator.index,
    };
    let root = generate_signing_root(&message, domain, out);
    let signed = SignedVoluntaryExit {
        signature: sign(account, &root)?,
        message,
    };

    if options.generate {
        return Ok(signed);
    }

    node.submit_voluntary_exit(&signed).await?;
    info!("Submitted {}", signed.message);

    if options.wait {
        let interval = options
            .poll_interval
            .unwrap_or_else(|| Duration::from_secs(clock.seconds_per_slot()));
        let max_polls = options.max_polls.unwrap_or(DEFAULT_MAX_EXIT_POLLS);
        wait_for_exit(node, pubkey, interval, max_polls, out).await?;
    }
    Ok(signed)
}

/// Polls the node until the validator has an exit epoch, at most `max_polls`
/// times.
pub async fn wait_for_exit<N: BeaconNode>(
    node: &N,
    pubkey: &PublicKey,
    interval: Duration,
    max_polls: u32,
    out: &mut Output,
) -> Result<Epoch, CliError> {
    for poll in 1..=max_polls {
        let validator = node.fetch_validator(pubkey).await?;
        if validator.has_exit_epoch() {
            out.debug(format!("Exit scheduled for epoch {}", validator.exit_epoch));
            return Ok(validator.exit_epoch);
        }
        if poll % EXIT_POLL_WARN_INTERVAL == 0 {
            warn!("Exit for {} still not scheduled after {} checks", pubkey, poll);
        } else {
            debug!("Exit for {} not yet scheduled", pubkey);
        }
        if poll < max_polls {
            tokio::time::sleep(interval).await;
        }
    }
    Err(CliError::ExitNotScheduled(pubkey.to_string(), max_polls))
}
