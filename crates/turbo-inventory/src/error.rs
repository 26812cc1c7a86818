//! Inventory error types.

use thiserror::Error;

/// Result type for inventory operations.
pub type InventoryResult<T> = Result<T, InventoryError>;

/// Errors that can occur in inventory operations.
#[derive(Error, Debug)]
pub enum InventoryError {
    /// Stock backend could not be queried.
    #[error("Stock storage error: {0}")]
    Storage(String),

    /// Stored stock status value is not recognized.
    #[error("Invalid stock status: {0}")]
    InvalidStatus(String),

    /// Low stock threshold is negative or not a number.
    #[error("Invalid stock threshold: {0}")]
    InvalidThreshold(f64),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for InventoryError {
    fn from(e: serde_json::Error) -> Self {
        InventoryError::Serialization(e.to_string())
    }
}
