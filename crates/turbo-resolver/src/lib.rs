//! Product listing post-processing for the TurboCommerce GraphQL layer.
//!
//! A listing resolver loads a page of products, then hands the batch to a set
//! of [`ProductsDataPostProcessor`]s. Each processor inspects the client's
//! selection through [`ResolveInfo`], loads what it needs for the whole batch
//! and returns a [`ProductDataMutator`] that the resolver applies to every
//! output record.
//!
//! # Example
//!
//! ```rust,ignore
//! use turbo_resolver::prelude::*;
//!
//! let info = ResolveInfo::parse("{ products { items { sku stock_status } } }")?;
//! let processor = StocksPostProcessor::new(repo, StockConfiguration::default(), store_config);
//!
//! let mutator = processor.process(&products, "products/items", &info, &ProcessorOptions::new())?;
//! let mut items: Vec<ProductData> = products.iter().map(ProductRecord::to_data).collect();
//! mutator.apply_all(&mut items);
//! ```

pub mod config;
pub mod error;
pub mod processor;
pub mod product;
pub mod resolve_info;
pub mod stocks;

pub use config::{ConfigValue, ScopeConfig, ScopeType, StoreConfig};
pub use error::{ResolverError, ResolverResult};
pub use processor::{ProcessorOptions, ProductDataMutator, ProductsDataPostProcessor};
pub use product::{product_id_of, ProductData, ProductRecord, ENTITY_ID};
pub use resolve_info::ResolveInfo;
pub use stocks::{ProductStock, StocksPostProcessor};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::{ConfigValue, ScopeConfig, ScopeType, StoreConfig};
    pub use crate::error::{ResolverError, ResolverResult};
    pub use crate::processor::{ProcessorOptions, ProductDataMutator, ProductsDataPostProcessor};
    pub use crate::product::{ProductData, ProductRecord};
    pub use crate::resolve_info::ResolveInfo;
    pub use crate::stocks::StocksPostProcessor;

    pub use turbo_inventory::prelude::*;
}
