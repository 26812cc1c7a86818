//! Stock status domain types for TurboCommerce.
//!
//! This crate provides the inventory side of storefront product listings:
//!
//! - **Stock**: per-product stock status records and the `IN_STOCK` / `OUT_OF_STOCK` states
//! - **Criteria**: search criteria for batch stock lookups
//! - **Repository**: the lookup seam plus an in-memory implementation
//! - **Threshold**: the "only X left in stock" rule
//!
//! # Example
//!
//! ```rust,ignore
//! use turbo_inventory::prelude::*;
//!
//! let repo = InMemoryStockStatusRepository::from_records(vec![
//!     StockStatusRecord::new("42", 3.0, StockStatus::InStock),
//! ]);
//!
//! let criteria = StockStatusCriteria::new()
//!     .with_products(vec![ProductId::new("42")])
//!     .with_scope(ScopeId::DEFAULT);
//!
//! let records = repo.get_list(&criteria)?;
//! assert_eq!(only_x_left(records[0].qty, 5.0), Some(3.0));
//! ```

pub mod configuration;
pub mod criteria;
pub mod error;
pub mod ids;
pub mod repository;
pub mod stock;
pub mod threshold;

pub use configuration::StockConfiguration;
pub use criteria::StockStatusCriteria;
pub use error::{InventoryError, InventoryResult};
pub use ids::{ProductId, ScopeId};
pub use repository::{InMemoryStockStatusRepository, StockStatusRepository};
pub use stock::{StockStatus, StockStatusRecord};
pub use threshold::{only_x_left, validate_threshold};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::configuration::StockConfiguration;
    pub use crate::criteria::StockStatusCriteria;
    pub use crate::error::{InventoryError, InventoryResult};
    pub use crate::ids::{ProductId, ScopeId};
    pub use crate::repository::{InMemoryStockStatusRepository, StockStatusRepository};
    pub use crate::stock::{StockStatus, StockStatusRecord};
    pub use crate::threshold::{only_x_left, validate_threshold};
}
