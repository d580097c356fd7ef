//! Specialist-referral rules. First matching rule wins.

use crate::{BodyZone, InjuryType, Referral, Severity};

/// Persistent pain in one of these joints warrants a check even at lower
/// severity tiers.
const CRITICAL_JOINT_DURATION_DAYS: u32 = 10;

const URGENT_REASON: &str = "Suspected significant bone or joint damage. Seek urgent care or \
     immediate medical assessment, especially with visible deformity, inability to bear weight \
     or marked swelling.";

const PRIORITY_REASON: &str = "Very intense or persistent pain. A medical or physiotherapy \
     assessment within the next few days is recommended.";

const CRITICAL_JOINT_REASON: &str = "Persistent pain in a major joint. An assessment is \
     recommended to rule out structural damage.";

const SELF_CARE_REASON: &str = "Self-care measures look appropriate for now (relative rest, \
     ice, compression, elevation). If the pain worsens, deformity appears or you cannot bear \
     weight, get a medical assessment.";

/// Decide whether, and how urgently, a specialist visit is warranted.
pub fn advise(
    injury: InjuryType,
    severity: Severity,
    pain_level: u8,
    pain_duration_days: u32,
    zone: &BodyZone,
) -> Referral {
    if injury.is_urgent() {
        return Referral {
            required: true,
            urgent: true,
            reason: URGENT_REASON.into(),
        };
    }

    if severity == Severity::High || pain_level >= 8 {
        return Referral {
            required: true,
            urgent: false,
            reason: PRIORITY_REASON.into(),
        };
    }

    if is_critical_joint(zone) && pain_duration_days >= CRITICAL_JOINT_DURATION_DAYS {
        return Referral {
            required: true,
            urgent: false,
            reason: CRITICAL_JOINT_REASON.into(),
        };
    }

    Referral {
        required: false,
        urgent: false,
        reason: SELF_CARE_REASON.into(),
    }
}

fn is_critical_joint(zone: &BodyZone) -> bool {
    matches!(zone, BodyZone::Knee | BodyZone::Shoulder | BodyZone::Ankle)
}
