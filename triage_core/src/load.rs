//! Weekly training-load index.
//!
//! A bounded 0-100 score computed from session volume and recovery signals.
//! This branch is independent of the classifier and must never block on it.

use crate::{LoadCategory, LoadIndex, SymptomReport};

/// Reference weekly load: 480 minutes (8 hours) maps to 100 points
const REFERENCE_WEEKLY_MINUTES: f64 = 480.0;
/// Flat minute bonus for extra training outside matches
const EXTRA_TRAINING_MINUTES: f64 = 30.0;

const LOW_ADVICE: &str = "Your weekly load looks low or your recovery is not optimal. Build \
     volume and intensity progressively and look after sleep and warm-up.";

const MODERATE_ADVICE: &str = "Your weekly load is moderate. Keep the progression gradual, \
     respect rest days and watch for early signs of fatigue.";

const HIGH_ADVICE: &str = "Your weekly load is high. Watch persistent aches, back off the \
     intensity if you notice overload and reinforce recovery (sleep, hydration, stretching).";

/// Compute the weekly load index from the report's contextual fields.
///
/// Deterministic and pure: the same report always yields the same score.
/// Missing fields default to zero contribution; the result is clamped to
/// [0, 100].
pub fn estimate(report: &SymptomReport) -> LoadIndex {
    let sessions = report.weekly_sessions.unwrap_or(0.0);
    let minutes = report.session_minutes.unwrap_or(0.0);
    let extra = if report.trains_extra.unwrap_or(false) {
        EXTRA_TRAINING_MINUTES
    } else {
        0.0
    };
    let sleep_hours = report.sleep_hours.unwrap_or(0.0);
    let recent_injuries = report.recent_injuries.unwrap_or(0.0);

    let base_minutes = sessions * minutes + extra;
    let mut score = base_minutes / REFERENCE_WEEKLY_MINUTES * 100.0;

    if !score.is_finite() {
        score = 0.0;
    }

    // Recovery adjustments
    if sleep_hours >= 7.0 {
        score += 5.0;
    } else if sleep_hours > 0.0 && sleep_hours < 6.0 {
        score -= 10.0;
    }

    match report.hydration_ok {
        Some(true) => score += 3.0,
        Some(false) => score -= 5.0,
        None => {}
    }

    if recent_injuries >= 2.0 {
        score -= 5.0;
    }

    let score = score.clamp(0.0, 100.0).round() as u8;
    let category = categorize(score);

    tracing::debug!(
        "Load index: {} ({:?}) from {:.0} base minute(s)",
        score,
        category,
        base_minutes
    );

    LoadIndex {
        score,
        category,
        advice: advice(category).into(),
    }
}

fn categorize(score: u8) -> LoadCategory {
    if score < 50 {
        LoadCategory::Low
    } else if score < 75 {
        LoadCategory::Moderate
    } else {
        LoadCategory::High
    }
}

fn advice(category: LoadCategory) -> &'static str {
    match category {
        LoadCategory::Low => LOW_ADVICE,
        LoadCategory::Moderate => MODERATE_ADVICE,
        LoadCategory::High => HIGH_ADVICE,
    }
}
