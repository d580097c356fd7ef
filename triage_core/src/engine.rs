//! Triage engine: pipeline orchestration and response composition.
//!
//! This module wires the stages together:
//!
//! 1. Normalize the raw payload (the only step that can fail)
//! 2. Classify the body zone and estimate the training load (synchronous,
//!    independent of the classifier)
//! 3. Invoke the external classifier under its deadline
//! 4. Reconcile the suggestion against the clinical override rules
//! 5. Grade severity, decide the referral, attach guidance
//! 6. Compose the immutable [`TriageResult`]
//!
//! After validation the engine never fails outward: any classifier-stage
//! problem degrades to the zone-derived fallback and the caller always gets a
//! complete answer. The pipeline holds no shared mutable state, so any number
//! of requests may run concurrently.

use crate::{
    classifier::ClassifierAdapter, clinical, guidance, load, normalize::normalize, referral,
    severity, zone, BodyZone, Config, InjuryType, LoadIndex, PainSummary, Referral, Result,
    Severity, SymptomReport, TriageResult,
};
use serde_json::Value;

/// Fixed disclaimer attached to every composed response
pub const DISCLAIMER: &str = "Informational guidance based on reported symptoms. It is not a \
     medical diagnosis and does not replace a professional assessment.";

/// The injury-triage decision engine
pub struct TriageEngine {
    classifier: ClassifierAdapter,
}

impl TriageEngine {
    /// Build an engine from the application configuration
    pub fn new(config: &Config) -> Self {
        Self {
            classifier: ClassifierAdapter::from_config(&config.classifier),
        }
    }

    /// Build an engine around an explicit classifier adapter
    pub fn with_adapter(classifier: ClassifierAdapter) -> Self {
        Self { classifier }
    }

    /// Assess a raw request payload.
    ///
    /// Fails only on a missing mandatory field; every other problem degrades
    /// internally.
    pub async fn assess(&self, payload: &Value) -> Result<TriageResult> {
        let report = normalize(payload)?;
        Ok(self.assess_report(&report).await)
    }

    /// Run the pipeline on an already-normalized report. Infallible.
    pub async fn assess_report(&self, report: &SymptomReport) -> TriageResult {
        let zone = zone::classify(&report.pain_zone_raw);

        // Independent branch, computed before the classifier is awaited so it
        // can never block on it.
        let load_index = load::estimate(report);

        let outcome = self.classifier.classify(report).await;

        let injury = clinical::final_injury_type(
            &outcome,
            &zone,
            report.pain_level,
            report.pain_duration_days,
        );
        let severity = severity::grade(report.pain_level, report.pain_duration_days, injury);
        let referral = referral::advise(
            injury,
            severity,
            report.pain_level,
            report.pain_duration_days,
            &zone,
        );

        tracing::info!(
            "Triage: zone {:?}, injury {:?}, severity {:?}, referral required={}",
            zone.as_str(),
            injury,
            severity,
            referral.required
        );

        compose(report, &zone, injury, severity, referral, load_index)
    }
}

/// Pure aggregation of the stage outputs into the final result
fn compose(
    report: &SymptomReport,
    zone: &BodyZone,
    injury: InjuryType,
    severity: Severity,
    referral: Referral,
    load_index: LoadIndex,
) -> TriageResult {
    TriageResult {
        injury_type: injury,
        injury_name: format!(
            "Injury consistent with {}",
            injury.display_name().to_lowercase()
        ),
        severity,
        referral,
        description: guidance::description(
            injury,
            zone,
            report.pain_level,
            report.pain_duration_days,
        ),
        recommendations: guidance::recommendations(injury, severity),
        pain: PainSummary {
            level: report.pain_level,
            days: report.pain_duration_days,
            zone: zone.as_str().to_string(),
        },
        load_index,
        disclaimer: DISCLAIMER.into(),
        generated_at: chrono::Utc::now(),
    }
}
