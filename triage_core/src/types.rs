//! Core domain types for the injury triage system.
//!
//! This module defines the fundamental types used throughout the system:
//! - Normalized symptom reports
//! - Body zones and injury types
//! - Classifier outcomes
//! - Severity, referral and training-load results
//! - Persisted history and feedback records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Symptom Input Types
// ============================================================================

/// A normalized, request-scoped symptom snapshot.
///
/// Produced once by the input normalizer and immutable afterwards. The three
/// pain fields are mandatory at the request boundary; everything else is
/// optional context used by the load estimator and the external classifier.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SymptomReport {
    /// Self-reported pain intensity, clamped to 0-10
    pub pain_level: u8,
    /// How long the pain has persisted, in days
    pub pain_duration_days: u32,
    /// Trimmed, lower-cased free-text body zone description
    pub pain_zone_raw: String,

    // Optional contextual fitness data
    pub age: Option<f64>,
    pub weight_kg: Option<f64>,
    pub height_m: Option<f64>,
    pub position: Option<String>,
    pub skill_level: Option<String>,
    pub weekly_sessions: Option<f64>,
    pub session_minutes: Option<f64>,
    pub trains_extra: Option<bool>,
    pub warms_up: Option<bool>,
    pub warmup_minutes: Option<f64>,
    pub sleep_hours: Option<f64>,
    pub hydration_ok: Option<bool>,
    pub recent_injuries: Option<f64>,
    pub recovery_weeks: Option<f64>,
    pub surface: Option<String>,
    pub climate: Option<String>,
}

// ============================================================================
// Body Zones
// ============================================================================

/// Canonical body zone derived from free-text input.
///
/// Unrecognized non-empty input is carried verbatim instead of being
/// silently discarded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BodyZone {
    Ankle,
    Knee,
    Hamstring,
    Quadriceps,
    Thigh,
    Calf,
    Groin,
    Hip,
    Back,
    Shoulder,
    HandWrist,
    Foot,
    Unknown,
    /// Lower-cased input that matched no known zone
    Unrecognized(String),
}

impl BodyZone {
    /// Canonical tag for this zone (the verbatim input for unrecognized zones)
    pub fn as_str(&self) -> &str {
        match self {
            BodyZone::Ankle => "ankle",
            BodyZone::Knee => "knee",
            BodyZone::Hamstring => "hamstring",
            BodyZone::Quadriceps => "quadriceps",
            BodyZone::Thigh => "thigh",
            BodyZone::Calf => "calf",
            BodyZone::Groin => "groin",
            BodyZone::Hip => "hip",
            BodyZone::Back => "back",
            BodyZone::Shoulder => "shoulder",
            BodyZone::HandWrist => "hand_wrist",
            BodyZone::Foot => "foot",
            BodyZone::Unknown => "unknown",
            BodyZone::Unrecognized(raw) => raw,
        }
    }
}

impl std::fmt::Display for BodyZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Injury Types
// ============================================================================

/// Closed set of injury classifications the engine can produce
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum InjuryType {
    Sprain,
    Strain,
    Fracture,
    Dislocation,
    Other,
}

impl InjuryType {
    /// Human-readable name used in composed responses
    pub fn display_name(&self) -> &'static str {
        match self {
            InjuryType::Sprain => "Sprain",
            InjuryType::Strain => "Muscle strain",
            InjuryType::Fracture => "Fracture",
            InjuryType::Dislocation => "Dislocation",
            InjuryType::Other => "Other injury",
        }
    }

    /// Whether this injury type warrants urgent attention by definition
    pub fn is_urgent(&self) -> bool {
        matches!(self, InjuryType::Fracture | InjuryType::Dislocation)
    }
}

impl std::fmt::Display for InjuryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// Classifier Outcome
// ============================================================================

/// Why a classifier invocation produced no usable label
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FailureReason {
    /// The classifier process could not be started
    Launch(String),
    /// The process ran but exited with a non-zero status
    NonZeroExit(i32),
    /// The process exited cleanly but produced no output line
    EmptyOutput,
}

/// Terminal result of a single classifier invocation.
///
/// Produced exactly once per request; never retried.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClassifierOutcome {
    Succeeded(InjuryType),
    Failed(FailureReason),
    TimedOut,
}

// ============================================================================
// Triage Output Types
// ============================================================================

/// Three-tier severity grade derived from pain signals and injury type
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
        };
        write!(f, "{}", s)
    }
}

/// Specialist-referral verdict with a fixed justification string
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Referral {
    pub required: bool,
    pub urgent: bool,
    pub reason: String,
}

/// Weekly training-load category
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LoadCategory {
    Low,
    Moderate,
    High,
}

impl std::fmt::Display for LoadCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LoadCategory::Low => "Low",
            LoadCategory::Moderate => "Moderate",
            LoadCategory::High => "High",
        };
        write!(f, "{}", s)
    }
}

/// Bounded 0-100 weekly training-load estimate
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoadIndex {
    pub score: u8,
    pub category: LoadCategory,
    pub advice: String,
}

/// Pain signals echoed back to the caller
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PainSummary {
    pub level: u8,
    pub days: u32,
    pub zone: String,
}

/// The complete triage recommendation returned to the caller.
///
/// Constructed once by the response composer; immutable.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TriageResult {
    pub injury_type: InjuryType,
    pub injury_name: String,
    pub severity: Severity,
    pub referral: Referral,
    pub description: String,
    pub recommendations: Vec<String>,
    pub pain: PainSummary,
    pub load_index: LoadIndex,
    pub disclaimer: String,
    pub generated_at: DateTime<Utc>,
}

// ============================================================================
// Persisted Record Types
// ============================================================================

/// A triage assessment persisted to the local history log
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TriageRecord {
    pub id: Uuid,
    pub user_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub input: SymptomReport,
    pub result: TriageResult,
}

impl TriageRecord {
    /// Wrap an assessment for persistence
    pub fn new(user_id: Option<String>, input: SymptomReport, result: TriageResult) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            created_at: result.generated_at,
            input,
            result,
        }
    }
}

/// A rating of a previously issued recommendation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub user_id: String,
    pub recommendation_id: String,
    pub applied: bool,
    /// How useful the recommendation was for prevention, 1-10
    pub usefulness: u8,
    /// How clear the recommendation was, 1-10
    pub clarity: u8,
    /// Overall star rating, 1-5
    pub stars: u8,
    pub comment: String,
}
