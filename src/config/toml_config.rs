use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File-based alternative to the CLI flags, selected with `--config`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub report: ReportConfig,
    pub source: SourceConfig,
    pub load: LoadConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    pub name: String,
    pub description: Option<String>,
    pub teams: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub endpoint: String,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    pub output_path: String,
}

impl TomlConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: TomlConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }
}

impl ConfigProvider for TomlConfig {
    fn api_endpoint(&self) -> &str {
        &self.source.endpoint
    }

    fn team_ids(&self) -> &[String] {
        &self.report.teams
    }

    fn output_path(&self) -> &str {
        &self.load.output_path
    }

    fn request_timeout_seconds(&self) -> u64 {
        self.source.timeout_seconds.unwrap_or(30)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("source.endpoint", &self.source.endpoint)?;
        validation::validate_path("load.output_path", &self.load.output_path)?;
        validation::validate_team_ids("report.teams", &self.report.teams)?;
        if let Some(timeout) = self.source.timeout_seconds {
            validation::validate_range("source.timeout_seconds", timeout, 1, 300)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_CONFIG: &str = r#"
[report]
name = "weekly-workload"
description = "Per-team workload bundles"
teams = ["4", "7"]

[source]
endpoint = "https://api.example.org/v1"
timeout_seconds = 10

[load]
output_path = "./output"
"#;

    #[test]
    fn test_parse_valid_config() {
        let config: TomlConfig = toml::from_str(VALID_CONFIG).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.team_ids(), ["4".to_string(), "7".to_string()].as_slice());
        assert_eq!(config.request_timeout_seconds(), 10);
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.toml");
        std::fs::write(&path, VALID_CONFIG).unwrap();

        let config = TomlConfig::from_file(&path).unwrap();
        assert_eq!(config.report.name, "weekly-workload");
        assert_eq!(config.output_path(), "./output");
    }

    #[test]
    fn test_invalid_endpoint_rejected() {
        let content = VALID_CONFIG.replace("https://api.example.org/v1", "not a url");
        let config: TomlConfig = toml::from_str(&content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_teams_rejected() {
        let content = VALID_CONFIG.replace(r#"teams = ["4", "7"]"#, "teams = []");
        let config: TomlConfig = toml::from_str(&content).unwrap();
        assert!(config.validate().is_err());
    }
}
