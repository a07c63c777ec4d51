//! Error types and handling for Weatherwise

use thiserror::Error;

/// Main error type for Weatherwise
///
/// Expected absence of data is not an error: provider lookups that come back
/// "bad request" or "not found" surface as `Ok(None)`. `NotFound` exists for
/// the boundary, where an empty lookup has to become a response.
#[derive(Error, Debug)]
pub enum WeatherwiseError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Non-success provider status or an undecodable provider payload
    #[error("Upstream provider error: {message}")]
    Upstream {
        message: String,
        status: Option<u16>,
    },

    /// The request was aborted by a timeout or by the caller
    #[error("Request cancelled: {message}")]
    Cancelled { message: String },

    /// Nothing matched the query
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl WeatherwiseError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new upstream error, optionally carrying the provider's HTTP status
    pub fn upstream<S: Into<String>>(message: S, status: Option<u16>) -> Self {
        Self::Upstream {
            message: message.into(),
            status,
        }
    }

    /// Create a new cancellation error
    pub fn cancelled<S: Into<String>>(message: S) -> Self {
        Self::Cancelled {
            message: message.into(),
        }
    }

    /// Create a new not-found error
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            WeatherwiseError::Config { .. } => {
                "Configuration error. Please check your config file and API key.".to_string()
            }
            WeatherwiseError::Upstream { .. } => {
                "The weather provider is currently unavailable. Please try again later."
                    .to_string()
            }
            WeatherwiseError::Cancelled { .. } => {
                "The weather provider did not answer in time.".to_string()
            }
            WeatherwiseError::NotFound { message } => message.clone(),
            WeatherwiseError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            WeatherwiseError::Io { .. } => "Internal I/O failure.".to_string(),
        }
    }

    /// HTTP status the boundary answers with
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            WeatherwiseError::NotFound { .. } => 404,
            WeatherwiseError::Validation { .. } => 400,
            WeatherwiseError::Upstream { .. } => 502,
            WeatherwiseError::Cancelled { .. } => 504,
            WeatherwiseError::Config { .. } | WeatherwiseError::Io { .. } => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = WeatherwiseError::config("missing API key");
        assert!(matches!(config_err, WeatherwiseError::Config { .. }));

        let upstream_err = WeatherwiseError::upstream("bad gateway", Some(502));
        assert!(matches!(
            upstream_err,
            WeatherwiseError::Upstream {
                status: Some(502),
                ..
            }
        ));

        let cancelled_err = WeatherwiseError::cancelled("timed out");
        assert!(matches!(cancelled_err, WeatherwiseError::Cancelled { .. }));
    }

    #[test]
    fn test_user_messages() {
        let upstream_err = WeatherwiseError::upstream("status 500", Some(500));
        assert!(upstream_err.user_message().contains("unavailable"));
        assert!(!upstream_err.user_message().contains("500"));

        let not_found = WeatherwiseError::not_found("No weather data for 'Atlantis'");
        assert_eq!(not_found.user_message(), "No weather data for 'Atlantis'");

        let validation_err = WeatherwiseError::validation("location cannot be empty");
        assert!(validation_err.user_message().contains("location cannot be empty"));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(WeatherwiseError::not_found("x").status_code(), 404);
        assert_eq!(WeatherwiseError::validation("x").status_code(), 400);
        assert_eq!(WeatherwiseError::upstream("x", Some(503)).status_code(), 502);
        assert_eq!(WeatherwiseError::cancelled("x").status_code(), 504);
        assert_eq!(WeatherwiseError::config("x").status_code(), 500);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::AddrInUse, "port taken");
        let err: WeatherwiseError = io_err.into();
        assert!(matches!(err, WeatherwiseError::Io { .. }));
    }
}
