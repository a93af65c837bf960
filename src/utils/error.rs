use thiserror::Error;

#[derive(Error, Debug)]
pub enum PalError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// 遠端拒絕請求 (HTTP 狀態碼不是 200)，錯誤欄位來自回應本體
    #[error("{error_type} {error_code} {message}")]
    ApiError {
        status: u16,
        error_type: String,
        error_code: String,
        message: String,
        psp_reference: Option<String>,
    },

    /// HTTP-POST adapter 回傳 500 時，回應本體就是錯誤訊息
    #[error("{body}")]
    ServerError { body: String },

    #[error("Unexpected response status: {status_line}")]
    UnexpectedStatus { status_line: String, body: String },

    #[error("Malformed response: {message}")]
    MalformedResponse { message: String },

    #[error("Signing error: {message}")]
    SigningError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid configuration value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Remote,
    Data,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl PalError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PalError::HttpError(_) => ErrorCategory::Network,
            PalError::ApiError { .. }
            | PalError::ServerError { .. }
            | PalError::UnexpectedStatus { .. } => ErrorCategory::Remote,
            PalError::SerializationError(_)
            | PalError::MalformedResponse { .. }
            | PalError::SigningError { .. }
            | PalError::ValidationError { .. } => ErrorCategory::Data,
            PalError::ConfigError { .. }
            | PalError::MissingConfigError { .. }
            | PalError::InvalidConfigValueError { .. }
            | PalError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            PalError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            PalError::HttpError(e) if e.is_timeout() || e.is_connect() => ErrorSeverity::Medium,
            PalError::ServerError { .. } => ErrorSeverity::Medium,
            PalError::UnexpectedStatus { status_line, .. } if status_line.starts_with('5') => {
                ErrorSeverity::Medium
            }
            PalError::IoError(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            PalError::HttpError(_) => {
                "Check network connectivity and the configured endpoint".to_string()
            }
            PalError::ApiError { status: 401, .. } | PalError::ApiError { status: 403, .. } => {
                "Check the web service user and password, and that the user has API permissions"
                    .to_string()
            }
            PalError::ApiError { .. } => {
                "Inspect the error code and fix the offending request field".to_string()
            }
            PalError::ServerError { .. } | PalError::UnexpectedStatus { .. } => {
                "The payment platform rejected the request; try again later or contact support"
                    .to_string()
            }
            PalError::MalformedResponse { .. } | PalError::SerializationError(_) => {
                "The response did not match the expected format; check the API version".to_string()
            }
            PalError::SigningError { .. } => {
                "Check that the HMAC key is the hex string shown for the skin".to_string()
            }
            PalError::ConfigError { .. }
            | PalError::MissingConfigError { .. }
            | PalError::InvalidConfigValueError { .. }
            | PalError::ConfigValidationError { .. } => {
                "Fix the configuration file or command line flags".to_string()
            }
            PalError::ValidationError { .. } => "Fix the request input".to_string(),
            PalError::IoError(_) => "Check file permissions and free disk space".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PalError::ApiError { status, .. } => {
                format!("Request rejected by the payment platform (HTTP {}): {}", status, self)
            }
            PalError::ServerError { body } => format!("Payment platform fault: {}", body),
            PalError::HttpError(_) => "Could not reach the payment platform".to_string(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_displays_fault_string() {
        let err = PalError::ApiError {
            status: 422,
            error_type: "validation".to_string(),
            error_code: "101".to_string(),
            message: "Invalid card number".to_string(),
            psp_reference: None,
        };

        assert_eq!(err.to_string(), "validation 101 Invalid card number");
        assert_eq!(err.category(), ErrorCategory::Remote);
        assert_eq!(err.severity(), ErrorSeverity::High);
    }

    #[test]
    fn test_server_error_is_retryable_severity() {
        let err = PalError::ServerError {
            body: "validation 101 Invalid card number".to_string(),
        };

        assert_eq!(err.to_string(), "validation 101 Invalid card number");
        assert_eq!(err.severity(), ErrorSeverity::Medium);
    }

    #[test]
    fn test_config_errors_are_configuration_category() {
        let err = PalError::MissingConfigError {
            field: "credentials.ws_user".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
    }

    #[test]
    fn test_every_error_maps_to_a_failing_severity() {
        let io = PalError::IoError(std::io::ErrorKind::PermissionDenied.into());
        assert_eq!(io.severity(), ErrorSeverity::Critical);

        let status = PalError::UnexpectedStatus {
            status_line: "503 Service Unavailable".to_string(),
            body: String::new(),
        };
        assert_eq!(status.severity(), ErrorSeverity::Medium);

        let validation = PalError::ValidationError {
            message: "bad input".to_string(),
        };
        assert!(validation.severity() >= ErrorSeverity::Medium);
    }
}
