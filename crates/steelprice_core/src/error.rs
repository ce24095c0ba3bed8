//! Error types for the pricing module.

use thiserror::Error;

/// Result type alias for pricing operations.
pub type PricingResult<T> = Result<T, PricingError>;

/// Errors that can occur while building a price sheet or computing an estimate.
#[derive(Error, Debug)]
pub enum PricingError {
    #[error("Invalid composition: {0}")]
    InvalidComposition(String),

    #[error("Unknown element: {0}")]
    UnknownElement(String),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Invalid category selection: {0}")]
    InvalidCategorySelection(String),

    #[error("Invalid numeric input: {0}")]
    InvalidNumericInput(String),

    #[error("Invalid multiplier band: min={min}, max={max}")]
    InvalidMultiplier { min: f64, max: f64 },

    #[error("Invalid price sheet: {0}")]
    InvalidPriceSheet(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
