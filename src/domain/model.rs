use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;

/// One raw hour-package record as served by the persistence API.
///
/// The API is loosely typed: identifiers may arrive as numbers or strings,
/// `cantidad` may be a number, a numeric string, or garbage, and the schedule
/// fields may appear flat at the top level, nested once under `dias`, or as a
/// mixture of both. Every field is optional so deserialization never fails on
/// an incomplete record; the normalizer resolves the mess into `HourPackage`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RawPackageRecord {
    pub id: Option<Value>,
    pub tipo: Option<Value>,
    pub cantidad: Option<Value>,
    pub profesional: Option<Value>,
    pub equipo: Option<Value>,
    pub colegio: Option<Value>,
    #[serde(rename = "diaSemana")]
    pub dia_semana: Option<Value>,
    #[serde(rename = "horaInicio")]
    pub hora_inicio: Option<Value>,
    #[serde(rename = "horaFin")]
    pub hora_fin: Option<Value>,
    pub rotativo: Option<Value>,
    pub semanas: Option<Value>,
    pub dias: Option<RawScheduleBlock>,
}

/// The nested variant of the schedule fragment (`dias` object). Same field
/// names as the flat variant; flat fields win when both are present.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RawScheduleBlock {
    #[serde(rename = "diaSemana")]
    pub dia_semana: Option<Value>,
    #[serde(rename = "horaInicio")]
    pub hora_inicio: Option<Value>,
    #[serde(rename = "horaFin")]
    pub hora_fin: Option<Value>,
    pub rotativo: Option<Value>,
    pub semanas: Option<Value>,
}

/// Raw team record; only consulted for the list of linked schools, which
/// supplies the divisor for the per-school average.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawTeamRecord {
    pub id: Option<Value>,
    pub nombre: Option<Value>,
    pub colegios: Option<Value>,
}

/// Closed set of package type labels. Only the school type may carry a
/// school reference. Unrecognized backend labels are preserved as `Other`
/// rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PackageType {
    School,
    GeiLoad,
    InterdisciplinaryWork,
    Other(String),
}

impl PackageType {
    pub fn from_label(label: &str) -> Self {
        match label {
            "School" => PackageType::School,
            "GEI-Load" => PackageType::GeiLoad,
            "Interdisciplinary-Work" => PackageType::InterdisciplinaryWork,
            other => PackageType::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            PackageType::School => "School",
            PackageType::GeiLoad => "GEI-Load",
            PackageType::InterdisciplinaryWork => "Interdisciplinary-Work",
            PackageType::Other(label) => label,
        }
    }

    pub fn is_school(&self) -> bool {
        matches!(self, PackageType::School)
    }
}

impl From<String> for PackageType {
    fn from(label: String) -> Self {
        PackageType::from_label(&label)
    }
}

impl From<PackageType> for String {
    fn from(t: PackageType) -> String {
        t.label().to_string()
    }
}

/// The weekly slot of a package, embedded in `HourPackage`.
///
/// `cycle_weeks` is always deduplicated and sorted ascending; empty means
/// "active every week". When `recurring` is false it is forced empty, even
/// if the backend sent week numbers anyway.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleFragment {
    pub day_of_week: Option<u8>,
    pub start_time: String,
    pub end_time: String,
    pub recurring: bool,
    pub cycle_weeks: Vec<u8>,
}

/// Canonical hour package: the single shape the comparator and aggregator
/// work against. Produced exclusively by `core::normalize`; the collection
/// is rebuilt from scratch on every fetch, never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourPackage {
    pub id: String,
    pub package_type: PackageType,
    pub quantity_hours: f64,
    pub professional_ref: String,
    pub team_ref: String,
    pub school_ref: Option<String>,
    pub schedule: ScheduleFragment,
}

/// Canonical view of a team: identity plus the full set of linked schools.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamProfile {
    pub id: String,
    pub name: String,
    pub school_ids: BTreeSet<String>,
}

/// Workload metrics for one team (or one professional), derived by
/// `core::workload::summarize`. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkloadSnapshot {
    pub total_hours: f64,
    pub baseline_week_packages: Vec<HourPackage>,
    pub hours_in_schools: f64,
    pub schools_with_baseline_hours: BTreeSet<String>,
    pub school_count: usize,
    pub average_hours_per_school: f64,
}

/// Raw extraction result for one requested team.
#[derive(Debug, Clone, Default)]
pub struct TeamExtraction {
    pub requested_id: String,
    pub team: RawTeamRecord,
    pub packages: Vec<RawPackageRecord>,
}

/// Final per-team report: canonical packages in display order plus the
/// workload snapshot, stamped at generation time.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamReport {
    pub team: TeamProfile,
    pub packages: Vec<HourPackage>,
    pub workload: WorkloadSnapshot,
    pub generated_at: chrono::DateTime<chrono::Utc>,
}
