//! Body-zone classification from free-text descriptions.
//!
//! Players describe where it hurts in their own words, in English or Spanish.
//! Classification is ordered substring matching: the first matching rule wins,
//! and specific terms are tested before general ones (quadriceps and hamstring
//! before bare thigh). Unrecognized non-empty input passes through verbatim so
//! the signal is not silently discarded.

use crate::{BodyZone, InjuryType};

/// Map trimmed free text to a canonical body zone.
///
/// Idempotent over canonical tags: classifying `"ankle"` yields
/// [`BodyZone::Ankle`], classifying an unrecognized string yields the same
/// string again.
pub fn classify(text: &str) -> BodyZone {
    let z = text.trim().to_lowercase();

    if z.is_empty() || z == "unknown" || z == "desconocida" {
        return BodyZone::Unknown;
    }

    // Order matters: several vocabularies overlap ("muslo anterior" must win
    // over bare "muslo").
    if contains_any(&z, &["tobillo", "ankle"]) {
        return BodyZone::Ankle;
    }
    if contains_any(&z, &["rodilla", "knee"]) {
        return BodyZone::Knee;
    }
    if contains_any(&z, &["isqui", "hamstring"]) {
        return BodyZone::Hamstring;
    }
    if contains_any(&z, &["cuad", "quad"]) || (z.contains("muslo") && z.contains("ant")) {
        return BodyZone::Quadriceps;
    }
    if contains_any(&z, &["muslo", "thigh"]) {
        return BodyZone::Thigh;
    }
    if contains_any(&z, &["pantorr", "gemelo", "calf"]) {
        return BodyZone::Calf;
    }
    if contains_any(&z, &["ingle", "aductor", "adductor", "groin"]) {
        return BodyZone::Groin;
    }
    if contains_any(&z, &["cadera", "hip"]) {
        return BodyZone::Hip;
    }
    if contains_any(&z, &["espalda", "lumba", "back"]) {
        return BodyZone::Back;
    }
    if contains_any(&z, &["hombro", "shoulder"]) {
        return BodyZone::Shoulder;
    }
    if contains_any(&z, &["muñec", "mano", "dedo", "wrist", "hand", "finger"]) {
        return BodyZone::HandWrist;
    }
    if contains_any(&z, &["pie", "foot"]) {
        return BodyZone::Foot;
    }

    BodyZone::Unrecognized(z)
}

/// Fallback injury suggestion for a zone, used when the classifier is
/// unavailable or too generic.
pub fn default_injury(zone: &BodyZone) -> InjuryType {
    match zone {
        BodyZone::Ankle | BodyZone::Knee => InjuryType::Sprain,
        BodyZone::Hamstring
        | BodyZone::Quadriceps
        | BodyZone::Thigh
        | BodyZone::Calf
        | BodyZone::Groin => InjuryType::Strain,
        BodyZone::Shoulder => InjuryType::Dislocation,
        BodyZone::Hip
        | BodyZone::Back
        | BodyZone::HandWrist
        | BodyZone::Foot
        | BodyZone::Unknown
        | BodyZone::Unrecognized(_) => InjuryType::Other,
    }
}

fn contains_any(text: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| text.contains(needle))
}
