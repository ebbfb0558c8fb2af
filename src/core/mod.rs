pub mod engine;
pub mod normalize;
pub mod order;
pub mod pipeline;
pub mod workload;

pub use crate::domain::model::{
    HourPackage, PackageType, RawPackageRecord, RawTeamRecord, ScheduleFragment, TeamExtraction,
    TeamProfile, TeamReport, WorkloadSnapshot,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
