use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("CliError: {0}")]
    Cli(#[from] CliError),
    #[error("ApiError: {0}")]
    Api(#[from] ApiError),
    #[error("ConfigError: {0}")]
    Config(#[from] ConfigError),
    #[error("StorageError: {0}")]
    Storage(#[from] StorageError),
    #[error("DataError: {0}")]
    Data(#[from] DataError),
    #[error("DisplayError: {0}")]
    Display(#[from] DisplayError),
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
    #[error("Missing input: {what}")]
    MissingInput { what: String },
}

/// Transport failure (no usable response) and application failure (the
/// server answered with a structured error body) are distinct kinds.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Request to {endpoint} failed: {message}")]
    Transport { endpoint: String, message: String },
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64, endpoint: String },
    #[error("Server error: {status} {message}")]
    Server {
        status: u16,
        endpoint: String,
        message: String,
    },
    #[error("Malformed response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Profile '{name}' not found")]
    ProfileNotFound { name: String, hint: String },
    #[error("Invalid configuration value for '{field}': {value}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
    #[error("Unknown configuration key: {key}")]
    UnknownKey { key: String },
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("File I/O error at {path}: {source}")]
    FileIo {
        path: String,
        source: std::io::Error,
    },
    #[error("Configuration parse error: {message}")]
    ConfigParseError { message: String },
    #[error("Configuration save failed: {message}")]
    ConfigSaveFailed { message: String },
    #[error("Configuration directory not found")]
    ConfigDirNotFound,
}

#[derive(Error, Debug)]
pub enum DataError {
    #[error("Failed to parse report {source_name}: {message}")]
    Parse {
        source_name: String,
        message: String,
    },
    #[error("Report {source_name} is not a JSON array of objects")]
    NotAnArray { source_name: String },
}

#[derive(Error, Debug)]
pub enum DisplayError {
    #[error("Table formatting failed: {0}")]
    TableFormat(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ErrorSeverity {
    Critical,
    High,
    Medium,
    Low,
}

impl ErrorSeverity {
    pub fn emoji(&self) -> &'static str {
        match self {
            ErrorSeverity::Critical => "🚨",
            ErrorSeverity::High => "❌",
            ErrorSeverity::Medium => "⚠️",
            ErrorSeverity::Low => "ℹ️",
        }
    }
}

impl AppError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AppError::Cli(_) => ErrorSeverity::Medium,
            AppError::Api(api_error) => match api_error {
                ApiError::Transport { .. } => ErrorSeverity::High,
                ApiError::Timeout { .. } => ErrorSeverity::Medium,
                ApiError::Server { status, .. } if *status >= 500 => ErrorSeverity::High,
                _ => ErrorSeverity::Medium,
            },
            AppError::Config(_) => ErrorSeverity::High,
            AppError::Storage(_) => ErrorSeverity::Medium,
            AppError::Data(_) => ErrorSeverity::Medium,
            AppError::Display(_) => ErrorSeverity::Low,
        }
    }

    pub fn troubleshooting_hint(&self) -> Option<String> {
        match self {
            AppError::Api(ApiError::Transport { .. } | ApiError::Timeout { .. }) => {
                Some("Check that the BOTMETA server is reachable and try again".to_string())
            }
            AppError::Config(ConfigError::ProfileNotFound { hint, .. }) => Some(hint.clone()),
            AppError::Config(ConfigError::UnknownKey { .. }) => Some(
                "Valid keys: default_profile, server_url, timeout_seconds".to_string(),
            ),
            AppError::Data(_) => {
                Some("The report must be a JSON array of flat objects".to_string())
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_error_display() {
        let cli_err = CliError::InvalidArguments("no file paths given".to_string());
        assert_eq!(
            format!("{}", cli_err),
            "Invalid arguments: no file paths given"
        );
        let cli_err = CliError::MissingInput {
            what: "metadata document".to_string(),
        };
        assert_eq!(format!("{}", cli_err), "Missing input: metadata document");
    }

    #[test]
    fn test_api_error_display() {
        let api_err = ApiError::Server {
            status: 400,
            endpoint: "/render".to_string(),
            message: "invalid path".to_string(),
        };
        assert_eq!(format!("{}", api_err), "Server error: 400 invalid path");

        let api_err = ApiError::Transport {
            endpoint: "/current".to_string(),
            message: "connection refused".to_string(),
        };
        assert_eq!(
            format!("{}", api_err),
            "Request to /current failed: connection refused"
        );

        let api_err = ApiError::Timeout {
            timeout_secs: 30,
            endpoint: "/render".to_string(),
        };
        assert_eq!(format!("{}", api_err), "Request timed out after 30s");
    }

    #[test]
    fn test_transport_and_server_errors_are_distinct() {
        let transport = AppError::Api(ApiError::Transport {
            endpoint: "/render".to_string(),
            message: "dns failure".to_string(),
        });
        let server = AppError::Api(ApiError::Server {
            status: 400,
            endpoint: "/render".to_string(),
            message: "invalid path".to_string(),
        });
        assert!(matches!(transport, AppError::Api(ApiError::Transport { .. })));
        assert!(matches!(server, AppError::Api(ApiError::Server { .. })));
        assert_eq!(transport.severity(), ErrorSeverity::High);
        assert_eq!(server.severity(), ErrorSeverity::Medium);
    }

    #[test]
    fn test_severity_classification() {
        let err = AppError::Api(ApiError::Server {
            status: 500,
            endpoint: "/render".to_string(),
            message: "boom".to_string(),
        });
        assert_eq!(err.severity(), ErrorSeverity::High);

        let err = AppError::Display(DisplayError::TableFormat("bad width".to_string()));
        assert_eq!(err.severity(), ErrorSeverity::Low);

        let err = AppError::Config(ConfigError::UnknownKey {
            key: "bogus".to_string(),
        });
        assert_eq!(err.severity(), ErrorSeverity::High);
    }

    #[test]
    fn test_troubleshooting_hints() {
        let err = AppError::Api(ApiError::Transport {
            endpoint: "/current".to_string(),
            message: "refused".to_string(),
        });
        assert!(err.troubleshooting_hint().is_some());

        let err = AppError::Config(ConfigError::UnknownKey {
            key: "bogus".to_string(),
        });
        let hint = err.troubleshooting_hint().expect("hint expected");
        assert!(hint.contains("server_url"));

        let err = AppError::Display(DisplayError::TableFormat("x".to_string()));
        assert!(err.troubleshooting_hint().is_none());
    }
}
