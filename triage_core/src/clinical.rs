//! Clinical override rules reconciling the classifier with pain signals.
//!
//! The external model is trained on sparse data and over-predicts the severe
//! categories. These rules are a deterministic safety valve layered on top of
//! its suggestion: a severe label must be corroborated by the reported pain
//! before it is kept, and a missing or generic label is replaced by the
//! zone-derived fallback. The caller always gets an answer.

use crate::{zone, BodyZone, ClassifierOutcome, InjuryType};

/// Decide the final injury type from the classifier outcome, the canonical
/// zone and the reported pain signals.
pub fn final_injury_type(
    outcome: &ClassifierOutcome,
    zone: &BodyZone,
    pain_level: u8,
    pain_duration_days: u32,
) -> InjuryType {
    let suggested = match outcome {
        ClassifierOutcome::Succeeded(injury) => *injury,
        ClassifierOutcome::Failed(reason) => {
            tracing::debug!("Classifier unavailable ({:?}), using zone fallback", reason);
            return zone_fallback(zone);
        }
        ClassifierOutcome::TimedOut => {
            tracing::debug!("Classifier timed out, using zone fallback");
            return zone_fallback(zone);
        }
    };

    match suggested {
        // A generic label carries no information; prefer the zone suggestion.
        InjuryType::Other => zone_fallback(zone),

        InjuryType::Fracture => {
            if strong_fracture_suspicion(pain_level, pain_duration_days) {
                InjuryType::Fracture
            } else {
                tracing::info!(
                    "Downgrading fracture label: pain {}/10 over {} day(s) is not corroborating",
                    pain_level,
                    pain_duration_days
                );
                zone_fallback(zone)
            }
        }

        // Dislocations are assumed to be highly painful; low pain is treated
        // as a false positive.
        InjuryType::Dislocation if pain_level <= 5 => {
            tracing::info!(
                "Downgrading dislocation label: pain {}/10 is too low",
                pain_level
            );
            zone_fallback(zone)
        }

        InjuryType::Sprain | InjuryType::Strain | InjuryType::Dislocation => suggested,
    }
}

/// Strong suspicion of a fracture based on pain evidence:
/// very intense pain, intense and recent, or moderate-high and long-standing.
fn strong_fracture_suspicion(pain_level: u8, pain_duration_days: u32) -> bool {
    pain_level >= 8
        || (pain_level >= 7 && pain_duration_days <= 3)
        || (pain_level >= 6 && pain_duration_days >= 10)
}

/// The zone's default suggestion, or `Other` when the zone has nothing more
/// specific to offer.
fn zone_fallback(zone: &BodyZone) -> InjuryType {
    zone::default_injury(zone)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FailureReason;

    #[test]
    fn test_failed_classifier_falls_back_to_zone_default() {
        let outcome = ClassifierOutcome::Failed(FailureReason::EmptyOutput);
        assert_eq!(
            final_injury_type(&outcome, &BodyZone::Ankle, 4, 2),
            InjuryType::Sprain
        );
        assert_eq!(
            final_injury_type(&outcome, &BodyZone::Hamstring, 4, 2),
            InjuryType::Strain
        );
    }

    #[test]
    fn test_timeout_with_unknown_zone_is_other() {
        assert_eq!(
            final_injury_type(&ClassifierOutcome::TimedOut, &BodyZone::Unknown, 2, 1),
            InjuryType::Other
        );
    }

    #[test]
    fn test_generic_label_replaced_by_zone_suggestion() {
        let outcome = ClassifierOutcome::Succeeded(InjuryType::Other);
        assert_eq!(
            final_injury_type(&outcome, &BodyZone::Shoulder, 4, 2),
            InjuryType::Dislocation
        );
        // Zone with no specific default stays generic
        assert_eq!(
            final_injury_type(&outcome, &BodyZone::Back, 4, 2),
            InjuryType::Other
        );
    }

    #[test]
    fn test_fracture_kept_with_strong_suspicion() {
        let outcome = ClassifierOutcome::Succeeded(InjuryType::Fracture);

        // Very intense pain
        assert_eq!(
            final_injury_type(&outcome, &BodyZone::Ankle, 9, 1),
            InjuryType::Fracture
        );
        // Intense and recent
        assert_eq!(
            final_injury_type(&outcome, &BodyZone::Ankle, 7, 2),
            InjuryType::Fracture
        );
        // Moderate-high but long-standing
        assert_eq!(
            final_injury_type(&outcome, &BodyZone::Ankle, 6, 12),
            InjuryType::Fracture
        );
    }

    #[test]
    fn test_fracture_downgraded_without_corroborating_pain() {
        let outcome = ClassifierOutcome::Succeeded(InjuryType::Fracture);

        // Low pain over a month: no suspicion branch fires
        let downgraded = final_injury_type(&outcome, &BodyZone::Ankle, 3, 30);
        assert_ne!(downgraded, InjuryType::Fracture);
        assert_eq!(downgraded, InjuryType::Sprain);

        // Unmapped zone degrades all the way to Other
        assert_eq!(
            final_injury_type(&outcome, &BodyZone::Unknown, 3, 30),
            InjuryType::Other
        );
    }

    #[test]
    fn test_fracture_boundary_conditions() {
        let outcome = ClassifierOutcome::Succeeded(InjuryType::Fracture);

        // pain 7 at 4 days: recent branch misses, long branch misses
        assert_ne!(
            final_injury_type(&outcome, &BodyZone::Ankle, 7, 4),
            InjuryType::Fracture
        );
        // pain 6 at 9 days: long branch misses by one day
        assert_ne!(
            final_injury_type(&outcome, &BodyZone::Ankle, 6, 9),
            InjuryType::Fracture
        );
    }

    #[test]
    fn test_low_pain_dislocation_downgraded() {
        let outcome = ClassifierOutcome::Succeeded(InjuryType::Dislocation);

        assert_eq!(
            final_injury_type(&outcome, &BodyZone::Knee, 4, 2),
            InjuryType::Sprain
        );
        // High pain keeps the label
        assert_eq!(
            final_injury_type(&outcome, &BodyZone::Knee, 8, 2),
            InjuryType::Dislocation
        );
        // Boundary: pain 6 keeps it
        assert_eq!(
            final_injury_type(&outcome, &BodyZone::Knee, 6, 2),
            InjuryType::Dislocation
        );
    }

    #[test]
    fn test_specific_labels_kept_as_is() {
        assert_eq!(
            final_injury_type(
                &ClassifierOutcome::Succeeded(InjuryType::Sprain),
                &BodyZone::Hamstring,
                2,
                1
            ),
            InjuryType::Sprain
        );
        assert_eq!(
            final_injury_type(
                &ClassifierOutcome::Succeeded(InjuryType::Strain),
                &BodyZone::Ankle,
                9,
                30
            ),
            InjuryType::Strain
        );
    }
}
