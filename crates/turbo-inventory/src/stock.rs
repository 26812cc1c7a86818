//! Stock status types.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::InventoryError;
use crate::ids::{ProductId, ScopeId};

/// Whether a product is sellable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StockStatus {
    /// Product can be ordered.
    InStock,
    /// Product cannot be ordered.
    #[default]
    OutOfStock,
}

impl StockStatus {
    /// GraphQL enum value.
    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::InStock => "IN_STOCK",
            StockStatus::OutOfStock => "OUT_OF_STOCK",
        }
    }

    /// Numeric value as stored by the stock index (`1` in stock, `0` out).
    pub fn as_code(&self) -> u8 {
        match self {
            StockStatus::InStock => 1,
            StockStatus::OutOfStock => 0,
        }
    }

    pub fn from_code(code: u64) -> Option<Self> {
        match code {
            1 => Some(StockStatus::InStock),
            0 => Some(StockStatus::OutOfStock),
            _ => None,
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "IN_STOCK" | "1" => Some(StockStatus::InStock),
            "OUT_OF_STOCK" | "0" => Some(StockStatus::OutOfStock),
            _ => None,
        }
    }

    pub fn is_in_stock(&self) -> bool {
        *self == StockStatus::InStock
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for StockStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawStatus {
    Flag(bool),
    Code(u64),
    Name(String),
}

impl RawStatus {
    fn into_status(self) -> Result<StockStatus, InventoryError> {
        match self {
            RawStatus::Flag(true) => Ok(StockStatus::InStock),
            RawStatus::Flag(false) => Ok(StockStatus::OutOfStock),
            RawStatus::Code(code) => {
                StockStatus::from_code(code).ok_or_else(|| InventoryError::InvalidStatus(code.to_string()))
            }
            RawStatus::Name(name) => {
                StockStatus::from_str(&name).ok_or(InventoryError::InvalidStatus(name))
            }
        }
    }
}

impl<'de> Deserialize<'de> for StockStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawStatus::deserialize(deserializer)?;
        raw.into_status().map_err(serde::de::Error::custom)
    }
}

fn default_stock_id() -> u32 {
    1
}

/// Indexed stock status of one product in one scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockStatusRecord {
    /// Product this record belongs to.
    pub product_id: ProductId,
    /// Website scope of the record.
    #[serde(default, alias = "website_id")]
    pub scope_id: ScopeId,
    /// Stock the record was indexed from.
    #[serde(default = "default_stock_id")]
    pub stock_id: u32,
    /// Salable quantity.
    #[serde(default)]
    pub qty: f64,
    /// Sellable state.
    #[serde(alias = "stock_status")]
    pub status: StockStatus,
}

impl StockStatusRecord {
    /// Create a record in the default scope.
    pub fn new(product_id: impl Into<ProductId>, qty: f64, status: StockStatus) -> Self {
        Self {
            product_id: product_id.into(),
            scope_id: ScopeId::DEFAULT,
            stock_id: default_stock_id(),
            qty,
            status,
        }
    }

    pub fn with_scope(mut self, scope_id: ScopeId) -> Self {
        self.scope_id = scope_id;
        self
    }

    pub fn is_in_stock(&self) -> bool {
        self.status.is_in_stock()
    }
}
