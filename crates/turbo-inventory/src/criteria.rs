//! Search criteria for batch stock lookups.

use std::collections::HashSet;

use crate::ids::{ProductId, ScopeId};

/// Filter passed to [`StockStatusRepository::get_list`](crate::StockStatusRepository::get_list).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StockStatusCriteria {
    /// Products to look up. Empty matches nothing.
    pub product_ids: Vec<ProductId>,
    /// Restrict results to one scope.
    pub scope_id: Option<ScopeId>,
}

impl StockStatusCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the products filter. Duplicate ids are dropped, first occurrence wins.
    pub fn with_products(mut self, ids: impl IntoIterator<Item = ProductId>) -> Self {
        let mut seen = HashSet::new();
        self.product_ids = ids
            .into_iter()
            .filter(|id| seen.insert(id.clone()))
            .collect();
        self
    }

    pub fn with_scope(mut self, scope_id: ScopeId) -> Self {
        self.scope_id = Some(scope_id);
        self
    }

    /// Check whether a record in `scope_id` passes the scope filter.
    pub fn matches_scope(&self, scope_id: ScopeId) -> bool {
        self.scope_id.map_or(true, |s| s == scope_id)
    }

    pub fn is_empty(&self) -> bool {
        self.product_ids.is_empty()
    }
}
