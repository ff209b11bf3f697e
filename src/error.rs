//! Error handling for the pricing display
//!
//! The controller never surfaces these to the page; they describe failures of
//! the injected capabilities so callers can log them and fall back.

/// Capability error type
#[derive(Debug, thiserror::Error)]
pub enum PricingError {
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    #[error("Preference file {path} is not a JSON object")]
    MalformedPreferences { path: String },
}

pub type Result<T> = std::result::Result<T, PricingError>;
