//! Domain-specific error types for risk-cascade

use thiserror::Error;

/// Main error type for risk-cascade operations
#[derive(Error, Debug)]
pub enum RiskCascadeError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Graph error: {message}")]
    Graph { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl From<serde_json::Error> for RiskCascadeError {
    fn from(err: serde_json::Error) -> Self {
        RiskCascadeError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for RiskCascadeError {
    fn from(err: toml::de::Error) -> Self {
        RiskCascadeError::Config {
            message: err.to_string(),
        }
    }
}

/// Result type alias for risk-cascade operations
pub type Result<T> = std::result::Result<T, RiskCascadeError>;
