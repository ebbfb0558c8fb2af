#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "carga-horaria")]
#[command(about = "Workload reports for hour packages of school-staffing teams")]
pub struct CliConfig {
    #[arg(long, default_value = "https://api.example.org/v1")]
    pub api_endpoint: String,

    /// Team ids to report on, comma separated
    #[arg(long, value_delimiter = ',')]
    pub teams: Vec<String>,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    /// TOML config file; when set it replaces the flags above
    #[arg(long)]
    pub config: Option<String>,

    #[arg(long, help = "Enable system monitoring")]
    pub monitor: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log in JSON format")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    fn team_ids(&self) -> &[String] {
        &self.teams
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("api_endpoint", &self.api_endpoint)?;
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_team_ids("teams", &self.teams)?;
        Ok(())
    }
}
