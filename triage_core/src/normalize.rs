//! Request payload normalization.
//!
//! Raw payloads arrive as loosely-typed JSON from the API layer. This module
//! validates presence of the mandatory pain fields, coerces numeric values
//! (numbers or numeric strings; anything else falls back to 0), and trims
//! and lower-cases free text. The result is an immutable [`SymptomReport`].
//!
//! Both the native field names and the legacy wire names used by the original
//! frontend are accepted, native names taking precedence.

use crate::{Error, Result, SymptomReport};
use serde_json::Value;

/// Normalize a raw request payload into a [`SymptomReport`].
///
/// A missing mandatory field (`pain_level`, `pain_zone`, `pain_duration_days`)
/// is the only hard failure in the entire pipeline and is surfaced as
/// [`Error::Validation`] naming the field.
pub fn normalize(payload: &Value) -> Result<SymptomReport> {
    let pain_level = require(payload, "pain_level", &["pain_level", "dolor_nivel"])?;
    let pain_zone = require(payload, "pain_zone", &["pain_zone", "dolor_zona"])?;
    let pain_days = require(
        payload,
        "pain_duration_days",
        &["pain_duration_days", "dolor_dias"],
    )?;

    let pain_level = coerce_number(pain_level).round().clamp(0.0, 10.0) as u8;
    let pain_duration_days = coerce_number(pain_days).round().max(0.0) as u32;
    let pain_zone_raw = value_to_text(pain_zone);

    let report = SymptomReport {
        pain_level,
        pain_duration_days,
        pain_zone_raw,
        age: opt_number(payload, &["age", "edad"]),
        weight_kg: opt_number(payload, &["weight_kg", "peso"]),
        height_m: opt_number(payload, &["height_m", "estatura_m"]),
        position: opt_text(payload, &["position", "posicion"]),
        skill_level: opt_text(payload, &["skill_level", "nivel"]),
        weekly_sessions: opt_number(payload, &["weekly_sessions", "frecuencia_juego_semana"]),
        session_minutes: opt_number(payload, &["session_minutes", "duracion_partido_min"]),
        trains_extra: opt_flag(payload, &["trains_extra", "entrena"]),
        warms_up: opt_flag(payload, &["warms_up", "calienta"]),
        warmup_minutes: opt_number(payload, &["warmup_minutes", "calentamiento_min"]),
        sleep_hours: opt_number(payload, &["sleep_hours", "horas_sueno"]),
        hydration_ok: opt_flag(payload, &["hydration_ok", "hidratacion_ok"]),
        recent_injuries: opt_number(payload, &["recent_injuries", "lesiones_ultimo_anno"]),
        recovery_weeks: opt_number(payload, &["recovery_weeks", "recuperacion_sem"]),
        surface: opt_text(payload, &["surface", "superficie"]),
        climate: opt_text(payload, &["climate", "clima"]),
    };

    tracing::debug!(
        "Normalized report: pain {}/10, {} day(s), zone {:?}",
        report.pain_level,
        report.pain_duration_days,
        report.pain_zone_raw
    );

    Ok(report)
}

/// Look up the first present, non-null value among the accepted key aliases
fn field<'a>(payload: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .find_map(|key| payload.get(key))
        .filter(|value| !value.is_null())
}

fn require<'a>(payload: &'a Value, name: &str, keys: &[&str]) -> Result<&'a Value> {
    field(payload, keys)
        .ok_or_else(|| Error::Validation(format!("missing required field: {}", name)))
}

/// Coerce a JSON value to a number; unparseable input becomes 0
fn coerce_number(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        Value::Bool(true) => 1.0,
        _ => 0.0,
    }
}

/// Render a JSON value as trimmed, lower-cased text
fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_lowercase(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

fn opt_number(payload: &Value, keys: &[&str]) -> Option<f64> {
    field(payload, keys)
        .map(coerce_number)
        .filter(|n| n.is_finite())
}

fn opt_text(payload: &Value, keys: &[&str]) -> Option<String> {
    field(payload, keys)
        .map(value_to_text)
        .filter(|s| !s.is_empty())
}

fn opt_flag(payload: &Value, keys: &[&str]) -> Option<bool> {
    field(payload, keys).and_then(|value| match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|x| x != 0.0),
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "1" | "true" | "yes" | "si" => Some(true),
            "0" | "false" | "no" => Some(false),
            _ => None,
        },
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mandatory_fields_present() {
        let payload = json!({
            "pain_level": 7,
            "pain_zone": "  Ankle ",
            "pain_duration_days": 3
        });

        let report = normalize(&payload).unwrap();
        assert_eq!(report.pain_level, 7);
        assert_eq!(report.pain_duration_days, 3);
        assert_eq!(report.pain_zone_raw, "ankle");
    }

    #[test]
    fn test_missing_pain_level_fails() {
        let payload = json!({
            "pain_zone": "knee",
            "pain_duration_days": 3
        });

        let err = normalize(&payload).unwrap_err();
        assert!(err.to_string().contains("pain_level"));
    }

    #[test]
    fn test_missing_zone_fails() {
        let payload = json!({ "pain_level": 5, "pain_duration_days": 1 });
        let err = normalize(&payload).unwrap_err();
        assert!(err.to_string().contains("pain_zone"));
    }

    #[test]
    fn test_missing_duration_fails() {
        let payload = json!({ "pain_level": 5, "pain_zone": "knee" });
        let err = normalize(&payload).unwrap_err();
        assert!(err.to_string().contains("pain_duration_days"));
    }

    #[test]
    fn test_legacy_field_names_accepted() {
        let payload = json!({
            "dolor_nivel": "8",
            "dolor_zona": "Tobillo",
            "dolor_dias": "2",
            "frecuencia_juego_semana": 3,
            "horas_sueno": 7.5,
            "hidratacion_ok": 1
        });

        let report = normalize(&payload).unwrap();
        assert_eq!(report.pain_level, 8);
        assert_eq!(report.pain_duration_days, 2);
        assert_eq!(report.pain_zone_raw, "tobillo");
        assert_eq!(report.weekly_sessions, Some(3.0));
        assert_eq!(report.sleep_hours, Some(7.5));
        assert_eq!(report.hydration_ok, Some(true));
    }

    #[test]
    fn test_numeric_coercion_from_strings() {
        let payload = json!({
            "pain_level": "6",
            "pain_zone": "knee",
            "pain_duration_days": "14",
            "session_minutes": "90"
        });

        let report = normalize(&payload).unwrap();
        assert_eq!(report.pain_level, 6);
        assert_eq!(report.pain_duration_days, 14);
        assert_eq!(report.session_minutes, Some(90.0));
    }

    #[test]
    fn test_non_numeric_pain_coerces_to_zero() {
        let payload = json!({
            "pain_level": "quite a lot",
            "pain_zone": "knee",
            "pain_duration_days": 2
        });

        let report = normalize(&payload).unwrap();
        assert_eq!(report.pain_level, 0);
    }

    #[test]
    fn test_out_of_range_values_clamped() {
        let payload = json!({
            "pain_level": 15,
            "pain_zone": "knee",
            "pain_duration_days": -4
        });

        let report = normalize(&payload).unwrap();
        assert_eq!(report.pain_level, 10);
        assert_eq!(report.pain_duration_days, 0);
    }

    #[test]
    fn test_empty_zone_is_allowed() {
        let payload = json!({
            "pain_level": 2,
            "pain_zone": "",
            "pain_duration_days": 1
        });

        let report = normalize(&payload).unwrap();
        assert_eq!(report.pain_zone_raw, "");
    }

    #[test]
    fn test_null_mandatory_field_fails() {
        let payload = json!({
            "pain_level": null,
            "pain_zone": "knee",
            "pain_duration_days": 2
        });

        assert!(normalize(&payload).is_err());
    }

    #[test]
    fn test_flags_accept_mixed_encodings() {
        let payload = json!({
            "pain_level": 1,
            "pain_zone": "knee",
            "pain_duration_days": 1,
            "trains_extra": true,
            "warms_up": "no",
            "hidratacion_ok": 0
        });

        let report = normalize(&payload).unwrap();
        assert_eq!(report.trains_extra, Some(true));
        assert_eq!(report.warms_up, Some(false));
        assert_eq!(report.hydration_ok, Some(false));
    }
}
