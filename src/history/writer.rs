use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::info;

use super::reader::read_run_log;
use super::types::*;

/// Error types for run log operations
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("Failed to write run log: {0}")]
    WriteError(#[from] std::io::Error),

    #[error("Failed to serialize run log: {0}")]
    SerializeError(#[from] serde_json::Error),

    #[error("Failed to read run log: {0}")]
    ReadError(String),
}

/// Path of the run log for a run started at `at`, inside the scanned root
pub fn run_log_path(root: &Path, at: DateTime<Local>) -> PathBuf {
    root.join(run_log_filename(at))
}

/// Append one show's record to the run log, creating the log if needed.
///
/// Existing records are never dropped or rewritten.
pub fn append_show_record(path: &Path, record: ShowRecord) -> Result<usize, HistoryError> {
    let mut records = if path.exists() {
        read_run_log(path)?
    } else {
        Vec::new()
    };

    let added = record.entries.len();
    records.push(record);
    write_to_path(&records, path)?;

    info!("Logged {} renames to {:?}", added, path);

    Ok(records.len())
}

fn write_to_path(records: &[ShowRecord], path: &Path) -> Result<(), HistoryError> {
    // Write to temporary file first
    let temp_path = path.with_extension("json.tmp");

    {
        let file = File::create(&temp_path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, records)?;
    }

    // Atomic rename
    fs::rename(&temp_path, path)?;

    Ok(())
}
