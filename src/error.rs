use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Main error type for webtop
#[derive(Debug, Error)]
pub enum WebtopError {
    /// Terminal initialization or operation failed
    #[error("Terminal error: {0}")]
    Terminal(#[from] io::Error),

    /// Configuration parsing failed
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Configuration file is invalid
    #[error("Invalid configuration file {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    /// Request never produced a response (connect error, timeout, broken body)
    #[error("Request to {endpoint} failed: {reason}")]
    Transport { endpoint: String, reason: String },

    /// Server answered with a non-2xx status
    #[error("Request to {endpoint} returned HTTP {status}")]
    HttpStatus { endpoint: String, status: u16 },

    /// Response body was not the expected JSON
    #[error("Malformed response from {endpoint}: {reason}")]
    Decode { endpoint: String, reason: String },

    /// Invalid argument provided
    #[error("Invalid argument: {argument}")]
    InvalidArgument { argument: String },

    /// Log sink could not be opened
    #[error("Logging setup failed for {path}: {reason}")]
    Logging { path: PathBuf, reason: String },
}

impl WebtopError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        WebtopError::Config {
            message: message.into(),
        }
    }

    /// Create a transport error
    pub fn transport(endpoint: impl Into<String>, reason: impl Into<String>) -> Self {
        WebtopError::Transport {
            endpoint: endpoint.into(),
            reason: reason.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(endpoint: impl Into<String>, status: u16) -> Self {
        WebtopError::HttpStatus {
            endpoint: endpoint.into(),
            status,
        }
    }

    /// Create a decode error
    pub fn decode(endpoint: impl Into<String>, reason: impl Into<String>) -> Self {
        WebtopError::Decode {
            endpoint: endpoint.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(argument: impl Into<String>) -> Self {
        WebtopError::InvalidArgument {
            argument: argument.into(),
        }
    }

    /// Create a config not found error
    pub fn config_not_found(path: PathBuf) -> Self {
        WebtopError::ConfigNotFound { path }
    }

    /// Create a config invalid error
    pub fn config_invalid(path: PathBuf, reason: impl Into<String>) -> Self {
        WebtopError::ConfigInvalid {
            path,
            reason: reason.into(),
        }
    }

    /// Create a logging setup error
    pub fn logging(path: PathBuf, reason: impl Into<String>) -> Self {
        WebtopError::Logging {
            path,
            reason: reason.into(),
        }
    }
}

/// Result type alias for webtop operations
pub type Result<T> = std::result::Result<T, WebtopError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = WebtopError::transport("/gpu", "connection refused");
        assert!(err.to_string().contains("/gpu"));
        assert!(err.to_string().contains("connection refused"));
        assert!(matches!(err, WebtopError::Transport { .. }));
    }

    #[test]
    fn test_error_creation_helpers() {
        let err = WebtopError::http_status("/proc", 503);
        assert!(
            matches!(err, WebtopError::HttpStatus { ref endpoint, status } if endpoint == "/proc" && status == 503)
        );
        assert_eq!(err.to_string(), "Request to /proc returned HTTP 503");

        let err = WebtopError::invalid_argument("--tick-ms");
        assert!(matches!(err, WebtopError::InvalidArgument { argument } if argument == "--tick-ms"));
    }
}
