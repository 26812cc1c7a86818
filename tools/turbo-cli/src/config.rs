//! CLI configuration.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use turbo_inventory::{validate_threshold, StockConfiguration};
use turbo_resolver::stocks::STOCK_THRESHOLD_QTY_PATH;
use turbo_resolver::{ScopeConfig, ScopeType, StoreConfig};

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Stock lookup configuration.
    #[serde(default)]
    pub stock: StockConfiguration,

    /// Resolver configuration.
    #[serde(default)]
    pub resolver: ResolverConfig,

    /// Scoped store configuration values.
    #[serde(default)]
    pub store_config: StoreConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        Self::parse(&content, path.ends_with(".json"))
            .with_context(|| format!("Failed to parse config file: {}", path))
    }

    /// Parse config content as JSON or TOML.
    pub fn parse(content: &str, json: bool) -> Result<Self> {
        if json {
            Ok(serde_json::from_str(content)?)
        } else {
            Ok(toml::from_str(content)?)
        }
    }

    /// Store code used for store-scope config lookups.
    pub fn store_code(&self) -> Option<&str> {
        self.resolver.store.as_deref()
    }

    /// Check values that are only read lazily at request time.
    pub fn validate(&self) -> Result<()> {
        if self.resolver.path.split('/').all(str::is_empty) {
            bail!("resolver.path must name at least one field");
        }

        let mut stores: Vec<Option<&str>> = vec![None];
        stores.extend(self.store_config.stores.keys().map(|code| Some(code.as_str())));

        for store in stores {
            let threshold = self
                .store_config
                .try_get_f64(STOCK_THRESHOLD_QTY_PATH, ScopeType::Store, store)
                .with_context(|| format!("store {}", store.unwrap_or("default")))?
                .unwrap_or(0.0);
            validate_threshold(threshold)
                .with_context(|| format!("store {}", store.unwrap_or("default")))?;
        }

        Ok(())
    }
}

/// Resolver settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Resolve path of the product items node.
    #[serde(default = "default_path")]
    pub path: String,

    /// Current store code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store: Option<String>,
}

fn default_path() -> String {
    "products/items".to_string()
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            store: None,
        }
    }
}

/// Generate a default turbo-stock.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# Listing post-processor configuration

[stock]
default_scope_id = 0

[resolver]
path = "{path}"
# store = "default"

[store_config.default]
"{threshold}" = 0

# [store_config.stores.default]
# "{threshold}" = 5
"#,
        path = default_path(),
        threshold = STOCK_THRESHOLD_QTY_PATH,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use turbo_inventory::ScopeId;

    #[test]
    fn test_default_config_parses() {
        let config = CliConfig::parse(&generate_default_config(), false).unwrap();
        assert_eq!(config.stock.default_scope_id, ScopeId::DEFAULT);
        assert_eq!(config.resolver.path, "products/items");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_toml() {
        let config = CliConfig::parse(
            r#"
            [stock]
            default_scope_id = 1

            [resolver]
            store = "outlet"

            [store_config.stores.outlet]
            "cataloginventory/options/stock_threshold_qty" = 3
            "#,
            false,
        )
        .unwrap();

        assert_eq!(config.stock.default_scope_id, ScopeId(1));
        assert_eq!(config.store_code(), Some("outlet"));
        assert_eq!(
            config
                .store_config
                .get_f64(STOCK_THRESHOLD_QTY_PATH, ScopeType::Store, config.store_code()),
            Some(3.0)
        );
    }

    #[test]
    fn test_parse_json() {
        let config = CliConfig::parse(r#"{"resolver": {"path": "category/products/items"}}"#, true).unwrap();
        assert_eq!(config.resolver.path, "category/products/items");
    }

    #[test]
    fn test_validate_rejects_bad_threshold() {
        let config = CliConfig::parse(
            r#"
            [store_config.default]
            "cataloginventory/options/stock_threshold_qty" = "plenty"
            "#,
            false,
        )
        .unwrap();
        assert!(config.validate().is_err());

        let config = CliConfig::parse(
            r#"
            [store_config.stores.outlet]
            "cataloginventory/options/stock_threshold_qty" = "5 items"
            "#,
            false,
        )
        .unwrap();
        let err = config.validate().unwrap_err();
        assert!(format!("{:#}", err).contains("store outlet"));

        let config = CliConfig::parse(
            r#"
            [store_config.default]
            "cataloginventory/options/stock_threshold_qty" = "1e999"
            "#,
            false,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_negative_threshold() {
        let config = CliConfig::parse(
            r#"
            [store_config.stores.outlet]
            "cataloginventory/options/stock_threshold_qty" = -1
            "#,
            false,
        )
        .unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_path() {
        let mut config = CliConfig::default();
        config.resolver.path = "/".to_string();
        assert!(config.validate().is_err());
    }
}
