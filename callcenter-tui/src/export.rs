//! JSON export of the visible call history.

use callcenter_core::{CallRecord, Timestamp};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub fn export_file_name(now: Timestamp) -> String {
    format!("call-history-{}.json", now.format("%Y%m%dT%H%M%SZ"))
}

/// Write `calls` as a pretty-printed JSON array into `dir`, returning the file path.
pub fn export_calls(
    dir: &Path,
    calls: &[&CallRecord],
    now: Timestamp,
) -> Result<PathBuf, ExportError> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(export_file_name(now));
    let contents = serde_json::to_string_pretty(calls)?;
    std::fs::write(&path, contents)?;
    Ok(path)
}
