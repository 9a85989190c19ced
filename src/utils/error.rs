use thiserror::Error;

#[derive(Error, Debug)]
pub enum HostsError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Failed to write artifacts: {}", .failures.join("; "))]
    ArtifactWriteError { failures: Vec<String> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl HostsError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            HostsError::ConfigError { .. } | HostsError::InvalidConfigValueError { .. } => {
                ErrorSeverity::High
            }
            HostsError::SerializationError(_) => ErrorSeverity::Medium,
            HostsError::IoError(_) | HostsError::ArtifactWriteError { .. } => {
                ErrorSeverity::Critical
            }
        }
    }

    /// 對應到程序退出碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            HostsError::IoError(e) => format!("File system error: {}", e),
            HostsError::SerializationError(e) => format!("Could not parse domain list: {}", e),
            HostsError::ConfigError { message } => format!("Configuration problem: {}", message),
            HostsError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            HostsError::ArtifactWriteError { failures } => {
                format!("{} hosts file(s) could not be written", failures.len())
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            HostsError::IoError(_) => "Check that the output directory exists and is writable",
            HostsError::SerializationError(_) => {
                "The domain file must be a JSON object mapping group names to domain arrays"
            }
            HostsError::ConfigError { .. } | HostsError::InvalidConfigValueError { .. } => {
                "Fix the configuration value and run again"
            }
            HostsError::ArtifactWriteError { .. } => {
                "Check free disk space and permissions on the output path"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, HostsError>;
