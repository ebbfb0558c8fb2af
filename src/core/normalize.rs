//! Payload normalization: turns the two observed wire shapes (flat schedule
//! fields vs. a nested `dias` object) into the canonical `HourPackage`.
//!
//! Normalization is total: it never fails and never panics. Missing or
//! malformed fields degrade to defaults so an incomplete package can still
//! be listed; deciding whether such a package is acceptable is up to the
//! caller.

use crate::domain::model::{
    HourPackage, PackageType, RawPackageRecord, RawTeamRecord, ScheduleFragment, TeamProfile,
};
use serde_json::Value;
use std::collections::BTreeSet;

/// Resolve one schedule field: flat wins when present and non-null, then the
/// nested `dias` field, then nothing.
fn pick<'a>(flat: Option<&'a Value>, nested: Option<&'a Value>) -> Option<&'a Value> {
    flat.filter(|v| !v.is_null())
        .or_else(|| nested.filter(|v| !v.is_null()))
}

fn text_of(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn int_of(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

fn flag_of(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_i64().map(|v| v != 0).unwrap_or(false),
        _ => false,
    }
}

fn hours_of(value: Option<&Value>) -> f64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed {
        Some(h) if h.is_finite() => h,
        _ => 0.0,
    }
}

/// Deduplicate and sort the cycle weeks; non-positive or non-numeric entries
/// are dropped.
fn weeks_of(value: Option<&Value>) -> Vec<u8> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };
    let weeks: BTreeSet<u8> = items
        .iter()
        .filter_map(|item| int_of(Some(item)))
        .filter(|w| *w > 0)
        .filter_map(|w| u8::try_from(w).ok())
        .collect();
    weeks.into_iter().collect()
}

/// Truncate a wall-clock time to exactly `HH:MM`. Seconds, when present,
/// are cut off rather than rounded; anything shorter than five characters
/// degrades to the empty string.
fn normalize_time(value: Option<&Value>) -> String {
    text_of(value)
        .and_then(|s| s.get(0..5).map(str::to_string))
        .unwrap_or_default()
}

fn day_of(value: Option<&Value>) -> Option<u8> {
    int_of(value).and_then(|d| u8::try_from(d).ok())
}

/// Normalize one raw record into the canonical model.
pub fn normalize(raw: &RawPackageRecord) -> HourPackage {
    let nested = raw.dias.as_ref();

    let day = pick(
        raw.dia_semana.as_ref(),
        nested.and_then(|d| d.dia_semana.as_ref()),
    );
    let start = pick(
        raw.hora_inicio.as_ref(),
        nested.and_then(|d| d.hora_inicio.as_ref()),
    );
    let end = pick(
        raw.hora_fin.as_ref(),
        nested.and_then(|d| d.hora_fin.as_ref()),
    );
    let recurring_field = pick(
        raw.rotativo.as_ref(),
        nested.and_then(|d| d.rotativo.as_ref()),
    );
    let weeks_field = pick(raw.semanas.as_ref(), nested.and_then(|d| d.semanas.as_ref()));

    let recurring = flag_of(recurring_field);
    // Backends occasionally send week numbers on non-recurring packages;
    // they carry no meaning there and must not influence ordering or
    // aggregation.
    let cycle_weeks = if recurring {
        weeks_of(weeks_field)
    } else {
        Vec::new()
    };

    let package_type = PackageType::from_label(&text_of(raw.tipo.as_ref()).unwrap_or_default());
    let school_ref = if package_type.is_school() {
        text_of(raw.colegio.as_ref())
    } else {
        None
    };

    HourPackage {
        id: text_of(raw.id.as_ref()).unwrap_or_default(),
        quantity_hours: hours_of(raw.cantidad.as_ref()),
        professional_ref: text_of(raw.profesional.as_ref()).unwrap_or_default(),
        team_ref: text_of(raw.equipo.as_ref()).unwrap_or_default(),
        school_ref,
        package_type,
        schedule: ScheduleFragment {
            day_of_week: day_of(day),
            start_time: normalize_time(start),
            end_time: normalize_time(end),
            recurring,
            cycle_weeks,
        },
    }
}

/// Render a canonical package back into the flat wire shape, e.g. when
/// posting an edit to the persistence API. `normalize(&to_wire(&p)) == p`
/// for any canonical `p`.
pub fn to_wire(pkg: &HourPackage) -> RawPackageRecord {
    RawPackageRecord {
        id: Some(Value::String(pkg.id.clone())),
        tipo: Some(Value::String(pkg.package_type.label().to_string())),
        cantidad: serde_json::Number::from_f64(pkg.quantity_hours).map(Value::Number),
        profesional: Some(Value::String(pkg.professional_ref.clone())),
        equipo: Some(Value::String(pkg.team_ref.clone())),
        colegio: pkg.school_ref.clone().map(Value::String),
        dia_semana: pkg
            .schedule
            .day_of_week
            .map(|d| Value::Number(u64::from(d).into())),
        hora_inicio: Some(Value::String(pkg.schedule.start_time.clone())),
        hora_fin: Some(Value::String(pkg.schedule.end_time.clone())),
        rotativo: Some(Value::Bool(pkg.schedule.recurring)),
        semanas: Some(Value::Array(
            pkg.schedule
                .cycle_weeks
                .iter()
                .map(|w| Value::Number(u64::from(*w).into()))
                .collect(),
        )),
        dias: None,
    }
}

/// Normalize a raw team record. `fallback_id` is the id the caller asked
/// for, used when the API response carries none.
pub fn normalize_team(raw: &RawTeamRecord, fallback_id: &str) -> TeamProfile {
    let school_ids = match raw.colegios.as_ref() {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                // Either a bare id or an object carrying one
                Value::Object(obj) => text_of(obj.get("id")),
                other => text_of(Some(other)),
            })
            .collect(),
        _ => BTreeSet::new(),
    };

    TeamProfile {
        id: text_of(raw.id.as_ref()).unwrap_or_else(|| fallback_id.to_string()),
        name: text_of(raw.nombre.as_ref()).unwrap_or_default(),
        school_ids,
    }
}
