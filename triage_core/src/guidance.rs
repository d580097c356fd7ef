//! Human-readable guidance: injury descriptions and recommendation lists.
//!
//! Static data owned by this module. Soft-tissue lists build on the shared
//! PRICE protocol (protect, rest, ice, compression, elevation); bone and
//! joint injuries get standalone do-not-move guidance.

use crate::{BodyZone, InjuryType, Severity};
use once_cell::sync::Lazy;
use std::collections::HashMap;

const PRICE_PROTOCOL: [&str; 5] = [
    "Protect the injured area: avoid impacts and movements that increase the pain.",
    "Relative rest: stay active, but do not force the painful area.",
    "Ice for 15-20 minutes every 2-3 hours during the first 48 hours (always wrapped, never directly on the skin).",
    "Light compression with an elastic bandage if possible, without cutting off circulation.",
    "Elevate the affected limb to help reduce swelling.",
];

/// Per-injury recommendation lists, built once and reused across requests
static RECOMMENDATIONS: Lazy<HashMap<InjuryType, Vec<&'static str>>> = Lazy::new(|| {
    let mut map = HashMap::new();

    map.insert(
        InjuryType::Sprain,
        with_price(&[
            "Avoid local heat and deep massage during the first 48-72 hours.",
            "Introduce gentle, progressive mobility once the pain allows it.",
            "Consider strength and proprioception work to prevent recurrence.",
        ]),
    );

    map.insert(
        InjuryType::Strain,
        with_price(&[
            "Avoid hard stretching of the injured muscle for the first 3-5 days.",
            "Reintroduce load progressively (walking, light jogging, sprints) as the pain tolerates.",
            "Consider guided physiotherapy if the pain limits your training.",
        ]),
    );

    map.insert(
        InjuryType::Fracture,
        vec![
            "Immobilize the area in the most comfortable position possible.",
            "Do not try to realign the joint or push the bone back into place.",
            "Apply wrapped ice if there is swelling, avoiding direct pressure on any deformity.",
            "Do not bear weight if a lower limb is suspected.",
            "Go to urgent care or get an immediate medical assessment.",
        ],
    );

    map.insert(
        InjuryType::Dislocation,
        vec![
            "Immobilize the joint exactly as it ended up after the injury.",
            "Do not attempt to put it back in place yourself.",
            "Apply wrapped ice around the joint.",
            "Go to urgent care immediately for reduction and assessment of associated tissue.",
        ],
    );

    map.insert(
        InjuryType::Other,
        with_price(&[
            "If pain or swelling does not improve within 48-72 hours, or limits your training, get a medical or physiotherapy assessment.",
        ]),
    );

    map
});

const HIGH_SEVERITY_CAUTION: &str = "The pain level or duration suggests a relevant injury. A \
     medical assessment is recommended to rule out structural damage.";

fn with_price(extra: &[&'static str]) -> Vec<&'static str> {
    PRICE_PROTOCOL.iter().copied().chain(extra.iter().copied()).collect()
}

/// Short description combining injury type, zone and pain context.
pub fn description(
    injury: InjuryType,
    zone: &BodyZone,
    pain_level: u8,
    pain_duration_days: u32,
) -> String {
    let base = match injury {
        InjuryType::Sprain => {
            "Ligament injury from twisting or joint instability, common in the ankle and knee."
        }
        InjuryType::Strain => {
            "Muscle-fibre injury (from mild overload to partial rupture), typical in the thigh, calf or groin."
        }
        InjuryType::Fracture => {
            "Possible broken bone. Usually comes with very intense pain, difficulty bearing weight and sometimes visible deformity."
        }
        InjuryType::Dislocation => {
            "Loss of joint congruence, usually very painful and with a marked loss of movement."
        }
        InjuryType::Other => {
            "Non-specific complaint (bruise, overload, tendinopathy or another soft-tissue problem)."
        }
    };

    let context = if *zone == BodyZone::Unknown {
        format!(
            " Intensity {}/10, {} day(s).",
            pain_level, pain_duration_days
        )
    } else {
        format!(
            " You report pain in the {} (intensity {}/10, {} day(s)).",
            zone, pain_level, pain_duration_days
        )
    };

    format!("{}{}", base, context)
}

/// Ordered recommendation list for the injury, escalated when a soft-tissue
/// injury still graded High.
pub fn recommendations(injury: InjuryType, severity: Severity) -> Vec<String> {
    let mut items: Vec<String> = RECOMMENDATIONS
        .get(&injury)
        .map(|list| list.iter().map(|s| s.to_string()).collect())
        .unwrap_or_default();

    if severity == Severity::High && !injury.is_urgent() {
        items.push(HIGH_SEVERITY_CAUTION.into());
    }

    items
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_injury_type_has_recommendations() {
        for injury in [
            InjuryType::Sprain,
            InjuryType::Strain,
            InjuryType::Fracture,
            InjuryType::Dislocation,
            InjuryType::Other,
        ] {
            assert!(
                !recommendations(injury, Severity::Low).is_empty(),
                "no recommendations for {:?}",
                injury
            );
        }
    }

    #[test]
    fn test_soft_tissue_lists_start_with_price() {
        for injury in [InjuryType::Sprain, InjuryType::Strain, InjuryType::Other] {
            let items = recommendations(injury, Severity::Low);
            assert!(items[0].starts_with("Protect"), "{:?}", injury);
            assert!(items.len() > PRICE_PROTOCOL.len());
        }
    }

    #[test]
    fn test_high_severity_appends_caution_for_soft_tissue() {
        let low = recommendations(InjuryType::Sprain, Severity::Low);
        let high = recommendations(InjuryType::Sprain, Severity::High);
        assert_eq!(high.len(), low.len() + 1);
        assert_eq!(high.last().unwrap(), HIGH_SEVERITY_CAUTION);
    }

    #[test]
    fn test_urgent_injuries_do_not_get_the_caution_line() {
        let items = recommendations(InjuryType::Fracture, Severity::High);
        assert!(!items.contains(&HIGH_SEVERITY_CAUTION.to_string()));
        assert!(items.iter().any(|i| i.contains("urgent care")));
    }

    #[test]
    fn test_description_mentions_known_zone() {
        let text = description(InjuryType::Sprain, &BodyZone::Ankle, 7, 2);
        assert!(text.contains("ankle"));
        assert!(text.contains("7/10"));
        assert!(text.contains("2 day(s)"));
    }

    #[test]
    fn test_description_without_zone_still_reports_pain() {
        let text = description(InjuryType::Other, &BodyZone::Unknown, 3, 5);
        assert!(!text.contains("unknown"));
        assert!(text.contains("3/10"));
    }

    #[test]
    fn test_description_keeps_unrecognized_zone_text() {
        let zone = BodyZone::Unrecognized("cabeza".into());
        let text = description(InjuryType::Other, &zone, 3, 5);
        assert!(text.contains("cabeza"));
    }
}
