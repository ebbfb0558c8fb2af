pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{cli::LocalStorage, CliConfig};

pub use crate::core::normalize::{normalize, normalize_team, to_wire};
pub use crate::core::order::{compare_packages, natural_cmp, sort_packages};
pub use crate::core::workload::{is_active_in_baseline_week, summarize};
pub use crate::core::{engine::WorkloadEngine, pipeline::WorkloadPipeline};
pub use crate::domain::model::{
    HourPackage, PackageType, RawPackageRecord, RawScheduleBlock, RawTeamRecord, ScheduleFragment,
    TeamExtraction, TeamProfile, TeamReport, WorkloadSnapshot,
};
pub use crate::utils::error::{EngineError, Result};
