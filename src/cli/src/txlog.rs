//! Log of transactions produced by ethdo, one JSON record per line.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use tracing::warn;

/// A logged transaction.
#[derive(Debug, Serialize)]
pub struct TxRecord<'a> {
    pub time: DateTime<Utc>,
    pub command: &'a str,
    pub account: &'a str,
    /// Whether the transaction was only generated, not sent
    pub generated: bool,
    pub data: serde_json::Value,
}

/// Appends `record` to the log at `path`.
pub fn append(path: &Path, record: &TxRecord<'_>) -> std::io::Result<()> {
    let mut line = serde_json::to_vec(record)?;
    line.push(b'\n');
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(&line)
}

/// Appends `record`, warning rather than failing if the log is unwritable.
pub fn record(path: &Path, record: &TxRecord<'_>) {
    if let Err(e) = append(path, record) {
        warn!("Failed to write transaction log {}: {}", path.display(), e);
    }
}
