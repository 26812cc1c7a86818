//! Post-processing seam for product listing resolvers.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::ResolverResult;
use crate::product::{ProductData, ProductRecord};
use crate::resolve_info::ResolveInfo;

/// Free-form options forwarded from the resolver to each processor.
pub type ProcessorOptions = BTreeMap<String, serde_json::Value>;

/// Callback that fills extra fields into one product output record.
pub struct ProductDataMutator(Box<dyn Fn(&mut ProductData) + Send + Sync>);

impl ProductDataMutator {
    pub fn new(f: impl Fn(&mut ProductData) + Send + Sync + 'static) -> Self {
        Self(Box::new(f))
    }

    /// Mutator that leaves every record untouched.
    pub fn noop() -> Self {
        Self::new(|_| {})
    }

    /// Apply to one record.
    pub fn apply(&self, data: &mut ProductData) {
        (self.0)(data)
    }

    /// Apply to every record of a listing page.
    pub fn apply_all(&self, items: &mut [ProductData]) {
        for data in items {
            self.apply(data);
        }
    }
}

impl Default for ProductDataMutator {
    fn default() -> Self {
        Self::noop()
    }
}

impl fmt::Debug for ProductDataMutator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ProductDataMutator")
    }
}

/// A processor that loads data for a whole product batch at once and returns
/// a mutator to merge it into each output record.
///
/// Processors must not do any lookups when `info` shows that none of their
/// fields were selected under `resolve_path`.
pub trait ProductsDataPostProcessor: Send + Sync {
    fn process(
        &self,
        products: &[ProductRecord],
        resolve_path: &str,
        info: &ResolveInfo,
        options: &ProcessorOptions,
    ) -> ResolverResult<ProductDataMutator>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_noop_leaves_record() {
        let mut data = ProductData::new();
        data.insert("sku".to_string(), json!("MB-01"));
        let before = data.clone();

        ProductDataMutator::noop().apply(&mut data);
        assert_eq!(data, before);
    }

    #[test]
    fn test_apply_all() {
        let mutator = ProductDataMutator::new(|data| {
            data.insert("seen".to_string(), json!(true));
        });
        let mut items = vec![ProductData::new(), ProductData::new()];

        mutator.apply_all(&mut items);
        assert!(items.iter().all(|d| d.get("seen") == Some(&json!(true))));
    }
}
