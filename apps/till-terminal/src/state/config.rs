//! # Configuration State
//!
//! Settings loaded once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command-line flags (`--tax-rate`, also read from `TILL_TAX_RATE` by clap)
//! 2. Environment variables (`TILL_STORE_NAME`, `TILL_CURRENCY_SYMBOL`)
//! 3. Config file (`--config till.toml`)
//! 4. Defaults (this file)
//!
//! ## Config File Format
//! ```toml
//! storeName = "Corner Coffee"
//! currencySymbol = "$"
//! taxRateBps = 1300
//!
//! [[products]]
//! id = "P001"
//! name = "Specialty coffee 340g"
//! price = "7.50"
//! stock = 25
//! ```
//!
//! When `products` is absent the built-in catalog is used.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use till_core::validation::validate_tax_rate_bps;
use till_core::{Catalog, CoreError, Money, Product, TaxRate, DEFAULT_TAX_RATE_BPS};

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Invalid catalog: {0}")]
    Catalog(#[from] CoreError),
}

/// A product entry in the config file. `price` is a decimal string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductConfig {
    pub id: String,
    pub name: String,
    pub price: String,
    pub stock: i64,
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigState {
    /// Shown in the banner and on the invoice header.
    pub store_name: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Number of decimal places for currency
    pub currency_decimals: u8,

    /// Tax rate in basis points, e.g. 1300 = 13%
    pub tax_rate_bps: u32,

    /// Catalog override. `None` means the built-in catalog.
    pub products: Option<Vec<ProductConfig>>,
}

impl Default for ConfigState {
    fn default() -> Self {
        ConfigState {
            store_name: "Till POS Demo Store".to_string(),
            currency_symbol: "$".to_string(),
            currency_decimals: 2,
            tax_rate_bps: DEFAULT_TAX_RATE_BPS,
            products: None,
        }
    }
}

impl ConfigState {
    /// Loads defaults, then the file at `path` if given, then environment
    /// overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => ConfigState::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Reads and parses a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: ConfigState = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Applies `TILL_*` overrides using `lookup` to read variables.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(store_name) = lookup("TILL_STORE_NAME") {
            self.store_name = store_name;
        }

        if let Some(symbol) = lookup("TILL_CURRENCY_SYMBOL") {
            self.currency_symbol = symbol;
        }
    }

    /// Overrides the tax rate with a percentage such as `13` or `8.25`.
    pub fn set_tax_percentage(&mut self, pct: f64) -> Result<(), ConfigError> {
        if !pct.is_finite() || pct < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "tax rate must be a non-negative percentage, got {}",
                pct
            )));
        }

        let bps = TaxRate::from_percentage(pct).bps();
        validate_tax_rate_bps(bps).map_err(|e| ConfigError::Invalid(e.to_string()))?;
        self.tax_rate_bps = bps;
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        validate_tax_rate_bps(self.tax_rate_bps).map_err(|e| ConfigError::Invalid(e.to_string()))?;

        if self.currency_decimals > 4 {
            return Err(ConfigError::Invalid(
                "currencyDecimals must be between 0 and 4".to_string(),
            ));
        }

        Ok(())
    }

    pub fn tax_rate(&self) -> TaxRate {
        TaxRate::from_bps(self.tax_rate_bps)
    }

    /// Builds the catalog from `products`, or the built-in one.
    pub fn catalog(&self) -> Result<Catalog, ConfigError> {
        let Some(entries) = &self.products else {
            return Ok(Catalog::default_catalog());
        };

        let products = entries
            .iter()
            .map(|entry| {
                let price: Money = entry.price.parse().map_err(CoreError::from)?;
                Ok(Product::new(entry.id.clone(), entry.name.clone(), price, entry.stock))
            })
            .collect::<Result<Vec<_>, CoreError>>()?;

        let catalog = Catalog::new(products)?;
        if catalog.is_empty() {
            return Err(ConfigError::Invalid(
                "products must list at least one product".to_string(),
            ));
        }
        Ok(catalog)
    }

    /// Formats an amount with the configured symbol and decimals.
    ///
    /// Amounts are stored in cents; with `currency_decimals` other than 2
    /// the cents are rescaled for display.
    ///
    /// ## Example
    /// ```rust
    /// use till_core::Money;
    /// use till_terminal::state::ConfigState;
    ///
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(Money::from_cents(1695)), "$16.95");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        let cents = amount.cents();
        let sign = if cents < 0 { "-" } else { "" };
        let abs = cents.unsigned_abs();
        let whole = abs / 100;
        let frac = abs % 100;

        if self.currency_decimals == 0 {
            return format!("{}{}{}", sign, self.currency_symbol, whole);
        }

        let digits: String = format!("{:02}", frac)
            .chars()
            .chain(std::iter::repeat('0'))
            .take(self.currency_decimals as usize)
            .collect();
        format!("{}{}{}.{}", sign, self.currency_symbol, whole, digits)
    }

    /// Tax rate label for the totals block, e.g. `13%` or `8.25%`.
    pub fn tax_label(&self) -> String {
        let bps = self.tax_rate_bps;
        if bps % 100 == 0 {
            format!("{}%", bps / 100)
        } else {
            format!("{}%", self.tax_rate().percentage())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ConfigState::default();
        assert_eq!(config.tax_rate().bps(), 1300);
        assert_eq!(config.tax_label(), "13%");
        assert_eq!(config.catalog().unwrap().len(), 5);
    }

    #[test]
    fn test_format_currency() {
        let config = ConfigState::default();
        assert_eq!(config.format_currency(Money::from_cents(750)), "$7.50");
        assert_eq!(config.format_currency(Money::from_cents(1)), "$0.01");
        assert_eq!(config.format_currency(Money::zero()), "$0.00");
        assert_eq!(config.format_currency(Money::from_cents(-1234)), "-$12.34");
        assert_eq!(config.format_currency(Money::from_cents(123456789)), "$1234567.89");
    }

    #[test]
    fn test_format_currency_other_decimals() {
        let mut config = ConfigState::default();
        config.currency_symbol = "€".to_string();
        config.currency_decimals = 0;
        assert_eq!(config.format_currency(Money::from_cents(1695)), "€16");

        config.currency_decimals = 3;
        assert_eq!(config.format_currency(Money::from_cents(1695)), "€16.950");
    }

    #[test]
    fn test_from_toml_with_catalog() {
        let config = ConfigState::from_toml(
            r#"
            storeName = "Corner Coffee"
            taxRateBps = 825

            [[products]]
            id = "B01"
            name = "Bagel"
            price = "2.5"
            stock = 12
            "#,
        )
        .unwrap();

        assert_eq!(config.store_name, "Corner Coffee");
        assert_eq!(config.currency_symbol, "$");
        assert_eq!(config.tax_label(), "8.25%");

        let catalog = config.catalog().unwrap();
        let bagel = catalog.get("B01").unwrap();
        assert_eq!(bagel.unit_price.cents(), 250);
        assert_eq!(bagel.stock, 12);
    }

    #[test]
    fn test_from_toml_rejects_bad_values() {
        assert!(matches!(
            ConfigState::from_toml("taxRateBps = 20000"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            ConfigState::from_toml("taxRateBps = \"lots\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_catalog_rejects_bad_products() {
        let config = ConfigState::from_toml(
            r#"
            [[products]]
            id = "X1"
            name = "Broken"
            price = "seven"
            stock = 1
            "#,
        )
        .unwrap();
        assert!(matches!(config.catalog(), Err(ConfigError::Catalog(_))));

        let config = ConfigState::from_toml(
            r#"
            [[products]]
            id = "X1"
            name = "One"
            price = "1.00"
            stock = 1

            [[products]]
            id = "X1"
            name = "Two"
            price = "2.00"
            stock = 1
            "#,
        )
        .unwrap();
        assert!(matches!(config.catalog(), Err(ConfigError::Catalog(_))));
    }

    #[test]
    fn test_catalog_rejects_empty_product_list() {
        let config = ConfigState::from_toml("products = []").unwrap();
        assert!(matches!(config.catalog(), Err(ConfigError::Invalid(_))));
        assert!(crate::state::Session::new(config).is_err());
    }

    #[test]
    fn test_apply_env() {
        let mut config = ConfigState::default();
        config.apply_env(|key| match key {
            "TILL_STORE_NAME" => Some("Night Shift".to_string()),
            _ => None,
        });
        assert_eq!(config.store_name, "Night Shift");
        assert_eq!(config.currency_symbol, "$");
    }

    #[test]
    fn test_set_tax_percentage() {
        let mut config = ConfigState::default();
        config.set_tax_percentage(8.25).unwrap();
        assert_eq!(config.tax_rate_bps, 825);

        assert!(config.set_tax_percentage(-1.0).is_err());
        assert!(config.set_tax_percentage(150.0).is_err());
        assert_eq!(config.tax_rate_bps, 825);
    }

    #[test]
    fn test_load_missing_file() {
        let result = ConfigState::load(Some(Path::new("/nonexistent/till.toml")));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
