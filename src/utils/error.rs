use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Settings file error: {0}")]
    SettingsError(#[from] toml::de::Error),

    #[error("Environment file error: {0}")]
    EnvFileError(#[from] dotenvy::Error),

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ('{value}'): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid response document {file}: {source}")]
    InvalidDocument {
        file: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{} of {total} uploads failed: {}", .failed.len(), .failed.join(", "))]
    UploadBatchError { failed: Vec<String>, total: usize },

    #[error("{} track file(s) have no response: {}", .missing.len(), .missing.join(", "))]
    IncompleteResponsesError { missing: Vec<String> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Network,
    Input,
    Processing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::ApiError(_) => ErrorCategory::Network,
            EtlError::SettingsError(_)
            | EtlError::EnvFileError(_)
            | EtlError::MissingConfigError { .. }
            | EtlError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            EtlError::IoError(_)
            | EtlError::InvalidDocument { .. }
            | EtlError::IncompleteResponsesError { .. } => ErrorCategory::Input,
            EtlError::CsvError(_) | EtlError::UploadBatchError { .. } => {
                ErrorCategory::Processing
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::Critical,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Input | ErrorCategory::Processing => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            EtlError::ApiError(e) if e.is_timeout() => {
                "The tolling API timed out; retry or raise --timeout_secs".to_string()
            }
            EtlError::ApiError(_) => {
                "Check network access to the tolling API and retry".to_string()
            }
            EtlError::MissingConfigError { field } => format!(
                "Set {} in the environment, in .env or in the settings file",
                field
            ),
            EtlError::InvalidConfigValueError { field, .. } => {
                format!("Correct the value of {}", field)
            }
            EtlError::SettingsError(_) => {
                "Make sure the settings file is valid TOML".to_string()
            }
            EtlError::EnvFileError(_) => {
                "Make sure .env holds KEY=value lines".to_string()
            }
            EtlError::IoError(_) => {
                "Check that the input directory exists and the output directory is writable"
                    .to_string()
            }
            EtlError::InvalidDocument { .. } => {
                "Remove or re-fetch the broken response file, or rerun with --skip_invalid"
                    .to_string()
            }
            EtlError::UploadBatchError { .. } => {
                "Rerun the upload for the listed track files".to_string()
            }
            EtlError::IncompleteResponsesError { .. } => {
                "Rerun the upload before extracting tolls".to_string()
            }
            EtlError::CsvError(_) => {
                "Inspect the logs with --verbose for details".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Network => format!("Could not reach the tolling API: {}", self),
            ErrorCategory::Input => format!("Bad input: {}", self),
            ErrorCategory::Processing => format!("Processing failed: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_errors_are_critical() {
        let err = EtlError::MissingConfigError {
            field: "TOLLGURU_API_KEY".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(err.severity().exit_code(), 3);
        assert!(err.recovery_suggestion().contains("TOLLGURU_API_KEY"));
    }

    #[test]
    fn test_batch_error_lists_failed_files() {
        let err = EtlError::UploadBatchError {
            failed: vec!["a.csv".to_string(), "b.csv".to_string()],
            total: 5,
        };
        assert_eq!(err.to_string(), "2 of 5 uploads failed: a.csv, b.csv");
        assert_eq!(err.severity().exit_code(), 1);
    }
}
