use crate::core::gate::ValidationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShuffleError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Upstream rejected request ({status}): {message}")]
    Upstream { status: u16, message: String },

    #[error("Network error: {message}")]
    Network { message: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Upstream,
    Network,
    Configuration,
    Internal,
}

impl ShuffleError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ShuffleError::Validation(_) => ErrorCategory::Validation,
            ShuffleError::Upstream { .. } => ErrorCategory::Upstream,
            ShuffleError::Network { .. } => ErrorCategory::Network,
            ShuffleError::Http(e) if e.is_connect() || e.is_timeout() => ErrorCategory::Network,
            ShuffleError::Config { .. }
            | ShuffleError::InvalidConfigValue { .. } => ErrorCategory::Configuration,
            ShuffleError::Http(_) | ShuffleError::Io(_) | ShuffleError::Serialization(_) => {
                ErrorCategory::Internal
            }
        }
    }

    /// Message suitable for showing to an end user. Validation and upstream
    /// messages pass through verbatim; transport detail never does.
    pub fn user_friendly_message(&self) -> String {
        match self {
            ShuffleError::Validation(e) => e.to_string(),
            ShuffleError::Upstream { message, .. } => message.clone(),
            ShuffleError::Config { .. }
            | ShuffleError::InvalidConfigValue { .. } => self.to_string(),
            _ => match self.category() {
                ErrorCategory::Network => "failed to reach shuffle service".to_string(),
                _ => "unexpected error".to_string(),
            },
        }
    }

    /// Process exit code for the binaries.
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Validation | ErrorCategory::Upstream => 2,
            ErrorCategory::Configuration => 1,
            ErrorCategory::Network => 3,
            ErrorCategory::Internal => 4,
        }
    }
}

pub type Result<T> = std::result::Result<T, ShuffleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        let err = ShuffleError::from(ValidationError::MinimumParticipants { min: 4 });
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert_eq!(err.user_friendly_message(), "at least 4 participants required");

        let err = ShuffleError::Network {
            message: "connection refused (os error 111)".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Network);
        assert_eq!(err.user_friendly_message(), "failed to reach shuffle service");
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_config_errors_share_category() {
        let err = ShuffleError::InvalidConfigValue {
            field: "backend.url".to_string(),
            value: "ftp://x".to_string(),
            reason: "Unsupported URL scheme: ftp".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.exit_code(), 1);
        assert!(err.user_friendly_message().contains("backend.url"));

        let err = ShuffleError::Config {
            message: "TOML parsing error".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
    }

    #[test]
    fn test_upstream_message_passes_through() {
        let err = ShuffleError::Upstream {
            status: 400,
            message: "num_groups must be between 1 and 4".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Upstream);
        assert_eq!(err.user_friendly_message(), "num_groups must be between 1 and 4");
    }
}
