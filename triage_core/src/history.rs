//! Append-only history of issued triage assessments.
//!
//! Records are appended to a JSONL (JSON Lines) file with file locking to
//! ensure safe concurrent access. Reading tolerates corrupt lines so one bad
//! record never hides the rest of the history.

use crate::{Result, TriageRecord};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// Record sink trait for persisting assessments
pub trait RecordSink {
    fn append(&mut self, record: &TriageRecord) -> Result<()>;
}

/// JSONL-based record sink with file locking
pub struct JsonlSink {
    path: PathBuf,
}

impl JsonlSink {
    /// Create a new JSONL sink for the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Ensure the parent directory exists
    fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}

impl RecordSink for JsonlSink {
    fn append(&mut self, record: &TriageRecord) -> Result<()> {
        self.ensure_parent_dir()?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        file.lock_exclusive()?;

        let mut writer = std::io::BufWriter::new(&file);
        let line = serde_json::to_string(record)?;
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        file.unlock()?;

        tracing::debug!("Appended triage record {} to history", record.id);
        Ok(())
    }
}

/// Read all records from a history file
pub fn read_records(path: &Path) -> Result<Vec<TriageRecord>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path)?;
    file.lock_shared()?;

    let reader = BufReader::new(&file);
    let mut records = Vec::new();

    for (line_num, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<TriageRecord>(&line) {
            Ok(record) => records.push(record),
            Err(e) => {
                tracing::warn!("Failed to parse record at line {}: {}", line_num + 1, e);
                // Continue reading, don't fail completely
            }
        }
    }

    file.unlock()?;
    tracing::debug!("Read {} records from history", records.len());
    Ok(records)
}

/// Load up to `limit` most recent records, newest first, optionally filtered
/// by user id.
pub fn load_recent(path: &Path, limit: usize, user_id: Option<&str>) -> Result<Vec<TriageRecord>> {
    let mut records = read_records(path)?;

    if let Some(user_id) = user_id {
        records.retain(|r| r.user_id.as_deref() == Some(user_id));
    }

    records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    records.truncate(limit);

    tracing::info!("Loaded {} recent triage record(s)", records.len());
    Ok(records)
}
