//! Stock status lookups.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use tracing::debug;

use crate::criteria::StockStatusCriteria;
use crate::error::InventoryResult;
use crate::ids::{ProductId, ScopeId};
use crate::stock::StockStatusRecord;

/// Stock status backend trait.
///
/// Implementations return the records matching the criteria's product and scope
/// filters, ordered by the products filter. Products without a record are
/// simply absent from the result.
pub trait StockStatusRepository: Send + Sync {
    /// Fetch all stock records matching `criteria`.
    fn get_list(&self, criteria: &StockStatusCriteria) -> InventoryResult<Vec<StockStatusRecord>>;
}

impl<R: StockStatusRepository + ?Sized> StockStatusRepository for Arc<R> {
    fn get_list(&self, criteria: &StockStatusCriteria) -> InventoryResult<Vec<StockStatusRecord>> {
        (**self).get_list(criteria)
    }
}

impl<R: StockStatusRepository + ?Sized> StockStatusRepository for &R {
    fn get_list(&self, criteria: &StockStatusCriteria) -> InventoryResult<Vec<StockStatusRecord>> {
        (**self).get_list(criteria)
    }
}

/// In-memory stock index, keyed by product then scope.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStockStatusRepository {
    records: HashMap<ProductId, BTreeMap<ScopeId, StockStatusRecord>>,
}

impl InMemoryStockStatusRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a repository from a list of records.
    ///
    /// A later record for the same product and scope replaces an earlier one.
    pub fn from_records(records: impl IntoIterator<Item = StockStatusRecord>) -> Self {
        let mut repo = Self::new();
        for record in records {
            repo.insert(record);
        }
        repo
    }

    /// Load records from a JSON array.
    pub fn from_json_str(json: &str) -> InventoryResult<Self> {
        let records: Vec<StockStatusRecord> = serde_json::from_str(json)?;
        Ok(Self::from_records(records))
    }

    /// Insert or replace a record. Returns the replaced record, if any.
    pub fn insert(&mut self, record: StockStatusRecord) -> Option<StockStatusRecord> {
        self.records
            .entry(record.product_id.clone())
            .or_default()
            .insert(record.scope_id, record)
    }

    /// Get the record for a product in a scope.
    pub fn get(&self, product_id: &ProductId, scope_id: ScopeId) -> Option<&StockStatusRecord> {
        self.records.get(product_id).and_then(|scopes| scopes.get(&scope_id))
    }

    /// Total number of records across all scopes.
    pub fn len(&self) -> usize {
        self.records.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl StockStatusRepository for InMemoryStockStatusRepository {
    fn get_list(&self, criteria: &StockStatusCriteria) -> InventoryResult<Vec<StockStatusRecord>> {
        let mut found = Vec::new();

        for product_id in &criteria.product_ids {
            let Some(scopes) = self.records.get(product_id) else {
                continue;
            };

            match criteria.scope_id {
                Some(scope_id) => found.extend(scopes.get(&scope_id).cloned()),
                None => found.extend(scopes.values().cloned()),
            }
        }

        debug!(
            requested = criteria.product_ids.len(),
            found = found.len(),
            scope = ?criteria.scope_id,
            "stock status lookup"
        );

        Ok(found)
    }
}
