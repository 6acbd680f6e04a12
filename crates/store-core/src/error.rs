//! # Store Error Types
//!
//! Typed error handling for the COMPIA store engine.
//! All fallible store operations return `Result<T, StoreError>`.

use thiserror::Error;

/// Core error type for all store operations
#[derive(Debug, Error)]
pub enum StoreError {
    /// Configuration errors (missing env vars, invalid config)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Postal code is not a valid 8-digit CEP
    #[error("Invalid CEP: {cep}")]
    InvalidCep { cep: String },

    /// Product not found in the catalog
    #[error("Product not found: {product_id}")]
    ProductNotFound { product_id: String },

    /// Price mismatch or invalid amount
    #[error("Invalid price: {message}")]
    InvalidPrice { message: String },

    /// Lookup service returned an error response
    #[error("Lookup error [{service}]: {message}")]
    LookupFailed { service: String, message: String },

    /// Network/HTTP error communicating with a lookup service
    #[error("Network error: {0}")]
    Network(String),

    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl StoreError {
    /// Returns true if this error came from an external lookup and the
    /// caller may safely degrade to region-unknown pricing
    pub fn is_lookup_failure(&self) -> bool {
        matches!(
            self,
            StoreError::Network(_) | StoreError::LookupFailed { .. }
        )
    }

    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            StoreError::Configuration(_) => 500,
            StoreError::InvalidRequest(_) => 400,
            StoreError::InvalidCep { .. } => 400,
            StoreError::ProductNotFound { .. } => 404,
            StoreError::InvalidPrice { .. } => 400,
            StoreError::LookupFailed { .. } => 502,
            StoreError::Network(_) => 503,
            StoreError::Internal(_) => 500,
            StoreError::Serialization(_) => 500,
        }
    }
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;
