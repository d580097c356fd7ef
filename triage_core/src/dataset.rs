//! Training-case accumulation for classifier retraining.
//!
//! Every assessment appends one CSV row pairing the reported features with
//! the final injury type, mirroring the columns the model is trained on.
//! Headers are written once when the file is created.

use crate::{InjuryType, Result, SymptomReport};
use fs2::FileExt;
use std::fs::OpenOptions;
use std::path::Path;

/// A row in the retraining dataset
#[derive(Debug, serde::Serialize)]
struct CaseRow {
    age: Option<f64>,
    weight_kg: Option<f64>,
    height_m: Option<f64>,
    position: Option<String>,
    skill_level: Option<String>,
    weekly_sessions: Option<f64>,
    session_minutes: Option<f64>,
    surface: Option<String>,
    climate: Option<String>,
    trains_extra: Option<u8>,
    warms_up: Option<u8>,
    warmup_minutes: Option<f64>,
    sleep_hours: Option<f64>,
    hydration_ok: Option<u8>,
    recent_injuries: Option<f64>,
    recovery_weeks: Option<f64>,
    pain_level: u8,
    pain_duration_days: u32,
    pain_zone: String,
    injury_type: String,
}

impl CaseRow {
    fn from_assessment(report: &SymptomReport, injury: InjuryType) -> Self {
        Self {
            age: report.age,
            weight_kg: report.weight_kg,
            height_m: report.height_m,
            position: report.position.clone(),
            skill_level: report.skill_level.clone(),
            weekly_sessions: report.weekly_sessions,
            session_minutes: report.session_minutes,
            surface: report.surface.clone(),
            climate: report.climate.clone(),
            trains_extra: report.trains_extra.map(u8::from),
            warms_up: report.warms_up.map(u8::from),
            warmup_minutes: report.warmup_minutes,
            sleep_hours: report.sleep_hours,
            hydration_ok: report.hydration_ok.map(u8::from),
            recent_injuries: report.recent_injuries,
            recovery_weeks: report.recovery_weeks,
            pain_level: report.pain_level,
            pain_duration_days: report.pain_duration_days,
            pain_zone: report.pain_zone_raw.clone(),
            injury_type: injury.display_name().to_string(),
        }
    }
}

/// Append one labeled case to the retraining dataset
pub fn append_case(path: &Path, report: &SymptomReport, injury: InjuryType) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    file.lock_exclusive()?;

    // Headers only on first write
    let needs_headers = file.metadata()?.len() == 0;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(needs_headers)
        .from_writer(&file);

    writer.serialize(CaseRow::from_assessment(report, injury))?;
    writer.flush()?;
    drop(writer);

    file.unlock()?;

    tracing::debug!("Appended training case ({:?}) to {:?}", injury, path);
    Ok(())
}
