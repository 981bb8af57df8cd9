//! Node commands.

use crate::errors::CliError;
use ethdo_beacon::{BeaconNode, NodeVersion, SyncStatus};

/// Version and sync state of a node.
#[derive(Debug)]
pub struct NodeInfo {
    pub version: NodeVersion,
    pub sync: SyncStatus,
}

/// Runs the node info command.
pub async fn info<N: BeaconNode>(node: &N) -> Result<NodeInfo, CliError> {
    let version = node.fetch_version().await?;
    let sync = node.fetch_sync_status().await?;
    Ok(NodeInfo { version, sync })
}
