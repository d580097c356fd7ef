//! Feedback on previously issued recommendations.
//!
//! A pure pass-through to local persistence: ratings are validated at the
//! boundary and appended to their own JSONL log. The decision engine never
//! reads them; they accumulate for later analysis.

use crate::{Error, FeedbackRecord, Result};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

impl FeedbackRecord {
    /// Validate and construct a feedback record.
    ///
    /// Usefulness and clarity are rated 1-10, stars 1-5; identifiers must be
    /// non-empty.
    pub fn new(
        user_id: impl Into<String>,
        recommendation_id: impl Into<String>,
        applied: bool,
        usefulness: u8,
        clarity: u8,
        stars: u8,
        comment: Option<String>,
    ) -> Result<Self> {
        let user_id = user_id.into();
        let recommendation_id = recommendation_id.into();

        if user_id.trim().is_empty() {
            return Err(Error::Validation("missing required field: user_id".into()));
        }
        if recommendation_id.trim().is_empty() {
            return Err(Error::Validation(
                "missing required field: recommendation_id".into(),
            ));
        }
        validate_range("usefulness", usefulness, 1, 10)?;
        validate_range("clarity", clarity, 1, 10)?;
        validate_range("stars", stars, 1, 5)?;

        Ok(Self {
            id: uuid::Uuid::new_v4(),
            created_at: chrono::Utc::now(),
            user_id,
            recommendation_id,
            applied,
            usefulness,
            clarity,
            stars,
            comment: comment.unwrap_or_default(),
        })
    }
}

fn validate_range(name: &str, value: u8, min: u8, max: u8) -> Result<()> {
    if value < min || value > max {
        return Err(Error::Validation(format!(
            "{} must be between {} and {}, got {}",
            name, min, max, value
        )));
    }
    Ok(())
}

/// Append a feedback record to the JSONL log with exclusive locking
pub fn append_feedback(path: &Path, record: &FeedbackRecord) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    file.lock_exclusive()?;

    let mut writer = std::io::BufWriter::new(&file);
    let line = serde_json::to_string(record)?;
    writer.write_all(line.as_bytes())?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    file.unlock()?;

    tracing::debug!("Appended feedback {} for {}", record.id, record.recommendation_id);
    Ok(())
}

/// Read all feedback records from a log file
pub fn read_feedback(path: &Path) -> Result<Vec<FeedbackRecord>> {
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

        match serde_json::from_str::<FeedbackRecord>(&line) {
            Ok(record) => records.push(record),
            Err(e) => {
                tracing::warn!("Failed to parse feedback at line {}: {}", line_num + 1, e);
            }
        }
    }

    file.unlock()?;
    Ok(records)
}
