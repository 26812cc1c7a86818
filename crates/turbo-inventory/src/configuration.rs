//! Stock configuration.

use serde::{Deserialize, Serialize};

use crate::ids::ScopeId;

/// Settings that decide which stock index storefront listings read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StockConfiguration {
    /// Scope used for storefront stock lookups.
    #[serde(default)]
    pub default_scope_id: ScopeId,
}

impl StockConfiguration {
    pub fn new(default_scope_id: ScopeId) -> Self {
        Self { default_scope_id }
    }

    pub fn default_scope_id(&self) -> ScopeId {
        self.default_scope_id
    }
}
