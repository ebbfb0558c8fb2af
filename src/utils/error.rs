use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV report error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Missing configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid configuration value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Report processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Io,
    Data,
    Config,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl EngineError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EngineError::ApiError(_) => ErrorCategory::Network,
            EngineError::IoError(_) | EngineError::ZipError(_) => ErrorCategory::Io,
            EngineError::CsvError(_)
            | EngineError::SerializationError(_)
            | EngineError::ProcessingError { .. } => ErrorCategory::Data,
            EngineError::TomlError(_)
            | EngineError::MissingConfigError { .. }
            | EngineError::InvalidConfigValueError { .. } => ErrorCategory::Config,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Config => ErrorSeverity::High,
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EngineError::ApiError(_) => {
                "Could not reach the staffing API. Check the endpoint and your connection."
                    .to_string()
            }
            EngineError::MissingConfigError { field } => {
                format!("Configuration is missing the required field '{}'", field)
            }
            EngineError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration field '{}' is invalid: {}", field, reason)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Verify the API endpoint URL and retry",
            ErrorCategory::Io => "Check that the output path exists and is writable",
            ErrorCategory::Data => "Inspect the raw API payload for unexpected structure",
            ErrorCategory::Config => "Fix the CLI flags or the TOML config file and rerun",
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
