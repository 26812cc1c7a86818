//! Scoped store configuration.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ResolverError, ResolverResult};

/// Level a configuration value is read at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScopeType {
    Default,
    Website,
    Store,
}

impl ScopeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScopeType::Default => "default",
            ScopeType::Website => "website",
            ScopeType::Store => "store",
        }
    }
}

/// Read access to configuration values by path (e.g. `section/group/field`).
pub trait ScopeConfig: Send + Sync {
    /// Raw value at `path` for the given scope. `code` selects the website or
    /// store; `None` means the current one.
    fn get_value(&self, path: &str, scope: ScopeType, code: Option<&str>) -> Option<String>;

    /// Numeric value at `path`. Missing or empty values read as `None`.
    ///
    /// A value that is not a plain number reads as its leading number
    /// (`"5 items"` is `5`), or `0` when it has none.
    fn get_f64(&self, path: &str, scope: ScopeType, code: Option<&str>) -> Option<f64> {
        let raw = self.get_value(path, scope, code)?;
        let value = raw.trim();
        if value.is_empty() {
            return None;
        }

        let prefix = numeric_prefix(value);
        let number = prefix.parse::<f64>().unwrap_or(0.0);
        if prefix.len() != value.len() {
            warn!(path, raw = %raw, number, "config value is not a number");
        }
        Some(number)
    }

    /// Numeric value at `path`, rejecting anything that is not a plain number.
    fn try_get_f64(
        &self,
        path: &str,
        scope: ScopeType,
        code: Option<&str>,
    ) -> ResolverResult<Option<f64>> {
        let Some(raw) = self.get_value(path, scope, code) else {
            return Ok(None);
        };
        let value = raw.trim();
        if value.is_empty() {
            return Ok(None);
        }

        if numeric_prefix(value).len() != value.len() {
            return Err(ResolverError::InvalidConfig {
                path: path.to_string(),
                message: format!("{raw:?} is not a number"),
            });
        }
        value.parse::<f64>().map(Some).map_err(|e| ResolverError::InvalidConfig {
            path: path.to_string(),
            message: format!("{raw:?} is not a number: {e}"),
        })
    }
}

/// Longest leading decimal number of `s`: sign, digits, fraction, exponent.
fn numeric_prefix(s: &str) -> &str {
    let bytes = s.as_bytes();
    let digits_from = |start: usize| {
        start + bytes[start..].iter().take_while(|b| b.is_ascii_digit()).count()
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_end = digits_from(end);
    let mut has_digits = int_end > end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        if has_digits || frac_end > end + 1 {
            has_digits = true;
            end = frac_end;
        }
    }
    if !has_digits {
        return "";
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }

    &s[..end]
}

/// A configuration value as written in TOML or JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Bool(b) => write!(f, "{}", if *b { "1" } else { "0" }),
            ConfigValue::Int(i) => write!(f, "{}", i),
            ConfigValue::Float(x) => write!(f, "{}", x),
            ConfigValue::Text(s) => f.write_str(s),
        }
    }
}

/// Table of config paths to values.
pub type ConfigTable = BTreeMap<String, ConfigValue>;

/// File-backed store configuration.
///
/// Website and store tables override the default table; anything they don't
/// set falls back to `default`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub default: ConfigTable,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub websites: BTreeMap<String, ConfigTable>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub stores: BTreeMap<String, ConfigTable>,
}

impl StoreConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a default-scope value.
    pub fn with_default(mut self, path: impl Into<String>, value: ConfigValue) -> Self {
        self.default.insert(path.into(), value);
        self
    }

    /// Set a store-scope value.
    pub fn with_store_value(
        mut self,
        store: impl Into<String>,
        path: impl Into<String>,
        value: ConfigValue,
    ) -> Self {
        self.stores.entry(store.into()).or_default().insert(path.into(), value);
        self
    }

    fn scoped_table(&self, scope: ScopeType, code: Option<&str>) -> Option<&ConfigTable> {
        let code = code?;
        match scope {
            ScopeType::Default => None,
            ScopeType::Website => self.websites.get(code),
            ScopeType::Store => self.stores.get(code),
        }
    }
}

impl ScopeConfig for StoreConfig {
    fn get_value(&self, path: &str, scope: ScopeType, code: Option<&str>) -> Option<String> {
        self.scoped_table(scope, code)
            .and_then(|table| table.get(path))
            .or_else(|| self.default.get(path))
            .map(ToString::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PATH: &str = "cataloginventory/options/stock_threshold_qty";

    #[test]
    fn test_store_falls_back_to_default() {
        let config = StoreConfig::new()
            .with_default(PATH, ConfigValue::Int(5))
            .with_store_value("de", PATH, ConfigValue::Float(2.5));

        assert_eq!(config.get_value(PATH, ScopeType::Store, Some("de")).as_deref(), Some("2.5"));
        assert_eq!(config.get_value(PATH, ScopeType::Store, Some("fr")).as_deref(), Some("5"));
        assert_eq!(config.get_value(PATH, ScopeType::Store, None).as_deref(), Some("5"));
        assert_eq!(config.get_value("missing/path/here", ScopeType::Default, None), None);
    }

    #[test]
    fn test_get_f64() {
        let config = StoreConfig::new()
            .with_default(PATH, ConfigValue::Text(" 3 ".to_string()))
            .with_store_value("empty", PATH, ConfigValue::Text(String::new()))
            .with_store_value("negative", PATH, ConfigValue::Int(-1));

        assert_eq!(config.get_f64(PATH, ScopeType::Store, None), Some(3.0));
        assert_eq!(config.get_f64(PATH, ScopeType::Store, Some("empty")), None);
        assert_eq!(config.get_f64(PATH, ScopeType::Store, Some("negative")), Some(-1.0));
        assert_eq!(config.get_f64("other/path/x", ScopeType::Store, None), None);
    }

    #[test]
    fn test_get_f64_reads_leading_number() {
        let config = StoreConfig::new()
            .with_store_value("units", PATH, ConfigValue::Text("5 items".to_string()))
            .with_store_value("words", PATH, ConfigValue::Text("abc".to_string()))
            .with_store_value("fraction", PATH, ConfigValue::Text(".5x".to_string()))
            .with_store_value("exponent", PATH, ConfigValue::Text("1e2e".to_string()))
            .with_store_value("inf", PATH, ConfigValue::Text("inf".to_string()));

        let read = |store| config.get_f64(PATH, ScopeType::Store, Some(store));
        assert_eq!(read("units"), Some(5.0));
        assert_eq!(read("words"), Some(0.0));
        assert_eq!(read("fraction"), Some(0.5));
        assert_eq!(read("exponent"), Some(100.0));
        assert_eq!(read("inf"), Some(0.0));
    }

    #[test]
    fn test_try_get_f64() {
        let config = StoreConfig::new()
            .with_default(PATH, ConfigValue::Float(2.5))
            .with_store_value("units", PATH, ConfigValue::Text("5 items".to_string()))
            .with_store_value("negative", PATH, ConfigValue::Text("-3".to_string()));

        assert_eq!(config.try_get_f64(PATH, ScopeType::Store, None).unwrap(), Some(2.5));
        assert_eq!(
            config.try_get_f64(PATH, ScopeType::Store, Some("negative")).unwrap(),
            Some(-3.0)
        );
        assert!(matches!(
            config.try_get_f64(PATH, ScopeType::Store, Some("units")),
            Err(ResolverError::InvalidConfig { .. })
        ));
        assert_eq!(config.try_get_f64("other/path/x", ScopeType::Store, None).unwrap(), None);
    }

    #[test]
    fn test_numeric_prefix() {
        assert_eq!(numeric_prefix("-12.5abc"), "-12.5");
        assert_eq!(numeric_prefix("+7"), "+7");
        assert_eq!(numeric_prefix("3."), "3.");
        assert_eq!(numeric_prefix("."), "");
        assert_eq!(numeric_prefix("-"), "");
        assert_eq!(numeric_prefix("2e"), "2");
    }

    #[test]
    fn test_deserialize_toml() {
        let config: StoreConfig = toml::from_str(
            r#"
            [default]
            "cataloginventory/options/stock_threshold_qty" = 4

            [stores.default]
            "cataloginventory/options/stock_threshold_qty" = "1.5"
            "#,
        )
        .unwrap();

        assert_eq!(config.default.get(PATH), Some(&ConfigValue::Int(4)));
        assert_eq!(
            config.get_f64(PATH, ScopeType::Store, Some("default")),
            Some(1.5)
        );
    }
}
