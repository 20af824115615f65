//! Error types for acceluav.
//!
//! Quote calculation itself never fails: bad input degrades to a zero quote.
//! The variants here cover everything around it, from loading configuration
//! and rate cards to validating catalog records and running the asset server.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for acceluav operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Pricing Errors ===
    /// A rate card file could not be read or parsed.
    #[error("failed to load rate card from {}: {message}", path.display())]
    RateCardLoad {
        /// Path to the rate card file.
        path: PathBuf,
        /// Description of what went wrong.
        message: String,
    },

    /// A rate card violates the tier ordering rules.
    #[error("invalid rate card for '{service}': {message}")]
    RateCard {
        /// Service key whose tiers are invalid.
        service: String,
        /// Description of the violation.
        message: String,
    },

    // === Catalog Errors ===
    /// A required field on a catalog record was empty.
    #[error("{collection}: required field '{field}' is empty")]
    Validation {
        /// Collection the record belongs to.
        collection: &'static str,
        /// Name of the empty field.
        field: &'static str,
    },

    /// The bundled seed data could not be parsed.
    #[error("failed to parse seed data: {0}")]
    Seed(String),

    // === Server Errors ===
    /// Failed to bind the asset server listener.
    #[error("failed to bind asset server to {addr}: {source}")]
    Bind {
        /// Address the server tried to bind.
        addr: String,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The asset server stopped with an error.
    #[error("asset server error: {0}")]
    Server(String),

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for acceluav operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a rate card ordering error.
    #[must_use]
    pub fn rate_card(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::RateCard {
            service: service.into(),
            message: message.into(),
        }
    }

    /// Create a rate card load error.
    #[must_use]
    pub fn rate_card_load(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::RateCardLoad {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a validation error for an empty required field.
    #[must_use]
    pub fn validation(collection: &'static str, field: &'static str) -> Self {
        Self::Validation { collection, field }
    }

    /// Create a server error.
    #[must_use]
    pub fn server(message: impl Into<String>) -> Self {
        Self::Server(message.into())
    }

    /// Check if this error came from record validation.
    #[must_use]
    pub fn is_validation_error(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = Error::validation("jobs", "title");
        assert_eq!(err.to_string(), "jobs: required field 'title' is empty");
        assert!(err.is_validation_error());
    }

    #[test]
    fn test_rate_card_error_display() {
        let err = Error::rate_card("ortho", "tiers must be sorted by limit");
        let msg = err.to_string();
        assert!(msg.contains("ortho"));
        assert!(msg.contains("sorted"));
        assert!(!err.is_validation_error());
    }

    #[test]
    fn test_rate_card_load_error_display() {
        let err = Error::rate_card_load("/tmp/rates.toml", "missing file");
        let msg = err.to_string();
        assert!(msg.contains("/tmp/rates.toml"));
        assert!(msg.contains("missing file"));
    }

    #[test]
    fn test_server_error() {
        let err = Error::server("listener closed");
        assert_eq!(err.to_string(), "asset server error: listener closed");
    }

    #[test]
    fn test_bind_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::AddrInUse, "address in use");
        let err = Error::Bind {
            addr: "0.0.0.0:5000".to_string(),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("0.0.0.0:5000"));
        assert!(msg.contains("address in use"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_from_json_error() {
        let json_result: std::result::Result<i32, serde_json::Error> =
            serde_json::from_str("not valid json");
        if let Err(json_err) = json_result {
            let err: Error = json_err.into();
            assert!(matches!(err, Error::Json(_)));
        }
    }

    #[test]
    fn test_config_validation_error_display() {
        let err = Error::ConfigValidation {
            message: "port must be greater than 0".to_string(),
        };
        assert!(err.to_string().contains("port must be greater than 0"));
    }

    #[test]
    fn test_seed_error_display() {
        let err = Error::Seed("expected value at line 1".to_string());
        assert!(err.to_string().starts_with("failed to parse seed data"));
    }
}
