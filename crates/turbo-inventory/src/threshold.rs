//! Low stock ("only X left in stock") rule.

use crate::error::{InventoryError, InventoryResult};

/// Quantity to surface to shoppers when stock runs low.
///
/// A threshold of `0` disables the rule. Otherwise the quantity is returned when
/// it is at or below the threshold.
pub fn only_x_left(qty: f64, threshold: f64) -> Option<f64> {
    if threshold == 0.0 {
        return None;
    }
    (qty <= threshold).then_some(qty)
}

/// Validate a configured threshold.
///
/// Negative thresholds are allowed; they only match negative (backordered)
/// quantities.
pub fn validate_threshold(threshold: f64) -> InventoryResult<f64> {
    if !threshold.is_finite() {
        return Err(InventoryError::InvalidThreshold(threshold));
    }
    Ok(threshold)
}
