//! CLI configuration.

use anyhow::{anyhow, Context, Result};
use market_core::catalog::StockThresholds;
use market_core::records::SaleStatus;
use market_core::registry::RecordStatus;
use market_core::Currency;
use serde::{Deserialize, Serialize};

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarketConfig {
    /// Store identity.
    #[serde(default)]
    pub store: StoreConfig,

    /// Default stock thresholds for seeded items.
    #[serde(default)]
    pub stock: StockConfig,

    /// Log output.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Seed data. The built-in demo data is used when empty.
    #[serde(default, skip_serializing_if = "SeedConfig::is_empty")]
    pub seed: SeedConfig,
}

impl MarketConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &str) -> Result<()> {
        let content = if path.ends_with(".json") {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path))
    }
}

/// Store identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Store name shown in headers.
    #[serde(default = "default_store_name")]
    pub name: String,

    /// ISO currency code every price is in.
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Operator recorded on sales rung up from the CLI.
    #[serde(default = "default_operator")]
    pub operator: String,
}

fn default_store_name() -> String {
    "Market".to_string()
}

fn default_currency() -> String {
    "BRL".to_string()
}

fn default_operator() -> String {
    "Cashier".to_string()
}

impl StoreConfig {
    pub fn currency(&self) -> Result<Currency> {
        Currency::from_code(&self.currency)
            .ok_or_else(|| anyhow!("Unknown currency code: {}", self.currency))
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            name: default_store_name(),
            currency: default_currency(),
            operator: default_operator(),
        }
    }
}

/// Default stock thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockConfig {
    /// Low-stock threshold.
    #[serde(default = "default_min_stock")]
    pub min_stock: i64,

    /// Overstock threshold.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_stock: Option<i64>,
}

fn default_min_stock() -> i64 {
    StockThresholds::default().min_stock
}

impl StockConfig {
    pub fn thresholds(&self) -> StockThresholds {
        StockThresholds::new(self.min_stock, self.max_stock)
    }
}

impl Default for StockConfig {
    fn default() -> Self {
        let thresholds = StockThresholds::default();
        Self {
            min_stock: thresholds.min_stock,
            max_stock: thresholds.max_stock,
        }
    }
}

/// Log output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum level (`error`, `warn`, `info`, `debug`, `trace`).
    #[serde(default = "default_level")]
    pub level: String,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

fn default_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable format (for terminals).
    #[default]
    Human,
    /// JSON format (for log aggregation).
    Json,
}

/// Seed records, one list per registry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedConfig {
    #[serde(default)]
    pub categories: Vec<CategorySeed>,
    #[serde(default)]
    pub items: Vec<ItemSeed>,
    #[serde(default)]
    pub customers: Vec<CustomerSeed>,
    #[serde(default)]
    pub suppliers: Vec<SupplierSeed>,
    #[serde(default)]
    pub sales: Vec<SaleSeed>,
}

impl SeedConfig {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
            && self.items.is_empty()
            && self.customers.is_empty()
            && self.suppliers.is_empty()
            && self.sales.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySeed {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub status: RecordStatus,
}

/// A catalog item. Prices are decimals in the store currency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemSeed {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub barcode: String,
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub cost: f64,
    #[serde(default)]
    pub stock: i64,
    /// Falls back to `[stock] min_stock`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_stock: Option<i64>,
    /// Falls back to `[stock] max_stock`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_stock: Option<i64>,
    #[serde(default)]
    pub status: RecordStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerSeed {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub document: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub postal_code: String,
    /// `YYYY-MM-DD`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registered_at: Option<String>,
    /// `YYYY-MM-DD`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_purchase: Option<String>,
    #[serde(default)]
    pub total_purchases: f64,
    #[serde(default)]
    pub status: RecordStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplierSeed {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub contact: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub document: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub status: RecordStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleSeed {
    pub id: String,
    /// `YYYY-MM-DD HH:MM` (UTC).
    pub timestamp: String,
    /// `cash` or `card`.
    pub payment: String,
    #[serde(default)]
    pub operator: String,
    #[serde(default)]
    pub status: SaleStatus,
    pub lines: Vec<SaleLineSeed>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleLineSeed {
    pub product: String,
    pub quantity: i64,
    pub price: f64,
}

/// Generate a default market.toml config file, including the demo seed.
pub fn generate_default_config(name: &str) -> String {
    format!(
        r#"# Market configuration

[store]
name = "{name}"
currency = "BRL"
operator = "Cashier"

[stock]
min_stock = 5
max_stock = 100

[logging]
level = "warn"
format = "human"

{seed}"#,
        name = name,
        seed = crate::demo::DEMO_SEED
    )
}
