//! Error types and handling for Ampora
//!
//! This module defines the error types used throughout the application,
//! providing consistent error handling and reporting.

use thiserror::Error;

/// Result type alias for Ampora operations
pub type Result<T> = std::result::Result<T, AmporaError>;

/// Main error type for Ampora
#[derive(Debug, Error)]
pub enum AmporaError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Routing/backend API errors
    #[error("API error: {message}")]
    Api { message: String },

    /// Network-related errors
    #[error("Network error: {message}")]
    Network { message: String },

    /// Streaming feed errors
    #[error("Stream error: {message}")]
    Stream { message: String },

    /// Payment gateway interaction errors
    #[error("Payment error: {message}")]
    Payment { message: String },

    /// Serialization/deserialization errors
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// File I/O errors
    #[error("I/O error: {message}")]
    Io { message: String },

    /// Authentication/authorization errors
    #[error("Authentication error: {message}")]
    Auth { message: String },

    /// Validation errors
    #[error("Validation error: {field} - {message}")]
    Validation { field: String, message: String },

    /// Timeout errors
    #[error("Timeout error: {message}")]
    Timeout { message: String },

    /// Generic errors with context
    #[error("Error: {message}")]
    Generic { message: String },
}

impl AmporaError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        AmporaError::Config {
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        AmporaError::Api {
            message: message.into(),
        }
    }

    /// Create a new network error
    pub fn network<S: Into<String>>(message: S) -> Self {
        AmporaError::Network {
            message: message.into(),
        }
    }

    /// Create a new stream error
    pub fn stream<S: Into<String>>(message: S) -> Self {
        AmporaError::Stream {
            message: message.into(),
        }
    }

    /// Create a new payment error
    pub fn payment<S: Into<String>>(message: S) -> Self {
        AmporaError::Payment {
            message: message.into(),
        }
    }

    /// Create a new I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        AmporaError::Io {
            message: message.into(),
        }
    }

    /// Create a new auth error
    pub fn auth<S: Into<String>>(message: S) -> Self {
        AmporaError::Auth {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(field: S, message: S) -> Self {
        AmporaError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new timeout error
    pub fn timeout<S: Into<String>>(message: S) -> Self {
        AmporaError::Timeout {
            message: message.into(),
        }
    }

    /// Create a new generic error
    pub fn generic<S: Into<String>>(message: S) -> Self {
        AmporaError::Generic {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for AmporaError {
    fn from(err: std::io::Error) -> Self {
        AmporaError::io(err.to_string())
    }
}

impl From<serde_yaml::Error> for AmporaError {
    fn from(err: serde_yaml::Error) -> Self {
        AmporaError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for AmporaError {
    fn from(err: serde_json::Error) -> Self {
        AmporaError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<reqwest::Error> for AmporaError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AmporaError::timeout(err.to_string())
        } else {
            AmporaError::network(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = AmporaError::config("test config error");
        assert!(matches!(err, AmporaError::Config { .. }));

        let err = AmporaError::stream("test stream error");
        assert!(matches!(err, AmporaError::Stream { .. }));

        let err = AmporaError::validation("field", "test validation error");
        assert!(matches!(err, AmporaError::Validation { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = AmporaError::config("test error");
        let error_string = format!("{}", err);
        assert_eq!(error_string, "Configuration error: test error");

        let err = AmporaError::validation("test_field", "invalid value");
        let error_string = format!("{}", err);
        assert_eq!(error_string, "Validation error: test_field - invalid value");
    }
}
