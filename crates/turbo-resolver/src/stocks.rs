//! Stock status post-processor.
//!
//! Adds `stock_status` and `only_x_left_in_stock` to product listing output.
//! Stock is looked up once for the whole batch, and only when the client
//! selected at least one of the two fields.

use std::collections::{BTreeSet, HashMap};

use serde_json::Value;
use tracing::{debug, info};
use turbo_inventory::{
    only_x_left, ProductId, StockConfiguration, StockStatus, StockStatusCriteria,
    StockStatusRepository,
};

use crate::config::{ScopeConfig, ScopeType};
use crate::error::ResolverResult;
use crate::processor::{ProcessorOptions, ProductDataMutator, ProductsDataPostProcessor};
use crate::product::{product_id_of, ProductData, ProductRecord};
use crate::resolve_info::ResolveInfo;

/// Output field with the sellable state.
pub const STOCK_STATUS: &str = "stock_status";

/// Output field with the low stock quantity.
pub const ONLY_X_LEFT_IN_STOCK: &str = "only_x_left_in_stock";

pub const IN_STOCK: &str = "IN_STOCK";

pub const OUT_OF_STOCK: &str = "OUT_OF_STOCK";

/// Config path of the "only X left" threshold.
pub const STOCK_THRESHOLD_QTY_PATH: &str = "cataloginventory/options/stock_threshold_qty";

const STOCK_FIELDS: [&str; 2] = [ONLY_X_LEFT_IN_STOCK, STOCK_STATUS];

/// Stock values computed for one product.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProductStock {
    pub stock_status: StockStatus,
    pub only_x_left_in_stock: Option<f64>,
}

impl ProductStock {
    fn write_into(&self, data: &mut ProductData) {
        data.insert(STOCK_STATUS.to_string(), Value::from(self.stock_status.as_str()));
        data.insert(
            ONLY_X_LEFT_IN_STOCK.to_string(),
            self.only_x_left_in_stock.map_or(Value::Null, Value::from),
        );
    }
}

/// Fills stock fields from a [`StockStatusRepository`].
pub struct StocksPostProcessor<R, C> {
    repository: R,
    stock_configuration: StockConfiguration,
    scope_config: C,
    store_code: Option<String>,
}

impl<R, C> StocksPostProcessor<R, C>
where
    R: StockStatusRepository,
    C: ScopeConfig,
{
    pub fn new(repository: R, stock_configuration: StockConfiguration, scope_config: C) -> Self {
        Self {
            repository,
            stock_configuration,
            scope_config,
            store_code: None,
        }
    }

    /// Read store-scope config for this store instead of the default table.
    pub fn with_store(mut self, store_code: impl Into<String>) -> Self {
        self.store_code = Some(store_code.into());
        self
    }

    /// Stock fields selected under `resolve_path`.
    pub fn requested_stock_fields(
        &self,
        info: &ResolveInfo,
        resolve_path: &str,
    ) -> ResolverResult<BTreeSet<&'static str>> {
        let requested = info.requested_fields(resolve_path)?;
        Ok(STOCK_FIELDS
            .into_iter()
            .filter(|field| requested.contains(*field))
            .collect())
    }

    /// Configured low stock threshold; `0` when unset.
    ///
    /// Negative values are kept so backordered quantities can match.
    pub fn threshold_qty(&self) -> f64 {
        self.scope_config
            .get_f64(
                STOCK_THRESHOLD_QTY_PATH,
                ScopeType::Store,
                self.store_code.as_deref(),
            )
            .unwrap_or(0.0)
    }
}

impl<R, C> ProductsDataPostProcessor for StocksPostProcessor<R, C>
where
    R: StockStatusRepository,
    C: ScopeConfig,
{
    fn process(
        &self,
        products: &[ProductRecord],
        resolve_path: &str,
        info: &ResolveInfo,
        _options: &ProcessorOptions,
    ) -> ResolverResult<ProductDataMutator> {
        let fields = self.requested_stock_fields(info, resolve_path)?;
        if fields.is_empty() {
            debug!(path = resolve_path, "stock fields not requested, skipping");
            return Ok(ProductDataMutator::noop());
        }

        let criteria = StockStatusCriteria::new()
            .with_products(products.iter().map(|p| p.id.clone()))
            .with_scope(self.stock_configuration.default_scope_id());
        let records = self.repository.get_list(&criteria)?;

        let threshold = if fields.contains(ONLY_X_LEFT_IN_STOCK) {
            self.threshold_qty()
        } else {
            0.0
        };

        if records.is_empty() {
            debug!(products = products.len(), "no stock records found");
            return Ok(ProductDataMutator::noop());
        }

        let stocks: HashMap<ProductId, ProductStock> = records
            .into_iter()
            .map(|record| {
                let stock = ProductStock {
                    stock_status: record.status,
                    only_x_left_in_stock: only_x_left(record.qty, threshold),
                };
                (record.product_id, stock)
            })
            .collect();

        info!(
            path = resolve_path,
            products = products.len(),
            stocked = stocks.len(),
            threshold,
            "resolved product stock"
        );

        Ok(ProductDataMutator::new(move |data| {
            let Some(product_id) = product_id_of(data) else {
                return;
            };
            if let Some(stock) = stocks.get(&product_id) {
                stock.write_into(data);
            }
        }))
    }
}
