//! In-memory store built from the configured seed.

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use market_core::catalog::{Catalog, CatalogItem, Category, StockThresholds};
use market_core::checkout::PaymentMethod;
use market_core::records::{Customer, SaleLine, SaleRecord, Supplier};
use market_core::registry::Registry;
use market_core::{Currency, Money};
use tracing::{debug, info};

use crate::config::{
    CategorySeed, CustomerSeed, ItemSeed, MarketConfig, SaleSeed, SeedConfig, SupplierSeed,
};
use crate::demo;

/// Everything a command can look at for one run.
pub struct Store {
    pub name: String,
    pub operator: String,
    pub catalog: Catalog,
    pub categories: Registry<Category>,
    pub customers: Registry<Customer>,
    pub suppliers: Registry<Supplier>,
    pub sales: Registry<SaleRecord>,
}

impl Store {
    /// Build the store from the config seed, or the demo data when the
    /// config has none.
    pub fn from_config(config: &MarketConfig) -> Result<Self> {
        let currency = config.store.currency()?;
        let demo_seed;
        let seed = if config.seed.is_empty() {
            debug!("no seed configured, using demo data");
            demo_seed = demo::seed()?;
            &demo_seed
        } else {
            &config.seed
        };

        let store = Self::from_seed(
            seed,
            currency,
            config.stock.thresholds(),
            &config.store.name,
            &config.store.operator,
        )?;
        info!(
            store = %store.name,
            items = store.catalog.len(),
            customers = store.customers.len(),
            sales = store.sales.len(),
            "store loaded"
        );
        Ok(store)
    }

    fn from_seed(
        seed: &SeedConfig,
        currency: Currency,
        thresholds: StockThresholds,
        name: &str,
        operator: &str,
    ) -> Result<Self> {
        let catalog = Catalog::from_items(
            currency,
            seed.items.iter().map(|s| item(s, currency, thresholds)),
        )
        .context("Invalid seed items")?;

        let categories =
            Registry::from_records(seed.categories.iter().map(category)).context("Invalid seed categories")?;

        let customers = seed
            .customers
            .iter()
            .map(|s| customer(s, currency))
            .collect::<Result<Vec<_>>>()?;
        let customers = Registry::from_records(customers).context("Invalid seed customers")?;

        let suppliers =
            Registry::from_records(seed.suppliers.iter().map(supplier)).context("Invalid seed suppliers")?;

        let sales = seed
            .sales
            .iter()
            .map(|s| sale(s, currency))
            .collect::<Result<Vec<_>>>()?;
        let sales = Registry::from_records(sales).context("Invalid seed sales")?;

        Ok(Self {
            name: name.to_string(),
            operator: operator.to_string(),
            catalog,
            categories,
            customers,
            suppliers,
            sales,
        })
    }

    pub fn currency(&self) -> Currency {
        self.catalog.currency()
    }
}

fn item(seed: &ItemSeed, currency: Currency, defaults: StockThresholds) -> CatalogItem {
    let mut item = CatalogItem::new(
        seed.id.as_str(),
        seed.name.as_str(),
        Money::from_decimal(seed.price, currency),
        seed.stock,
    )
    .with_barcode(seed.barcode.as_str())
    .with_category(seed.category.as_str())
    .with_cost(Money::from_decimal(seed.cost, currency))
    .with_thresholds(StockThresholds::new(
        seed.min_stock.unwrap_or(defaults.min_stock),
        seed.max_stock.or(defaults.max_stock),
    ))
    .with_status(seed.status);

    item.brand = seed.brand.clone();
    item.description = seed.description.clone();
    item.supplier = seed.supplier.clone();
    item
}

fn category(seed: &CategorySeed) -> Category {
    let mut category = Category::new(seed.id.as_str(), seed.name.as_str());
    category.description = seed.description.clone();
    category.status = seed.status;
    category
}

fn customer(seed: &CustomerSeed, currency: Currency) -> Result<Customer> {
    let mut customer = Customer::new(seed.id.as_str(), seed.name.as_str(), currency)
        .with_email(seed.email.as_str())
        .with_phone(seed.phone.as_str())
        .with_document(seed.document.as_str())
        .with_address(
            seed.address.as_str(),
            seed.city.as_str(),
            seed.state.as_str(),
            seed.postal_code.as_str(),
        );

    if let Some(date) = &seed.registered_at {
        customer.registered_at = parse_timestamp(date)
            .with_context(|| format!("Customer {}: bad registered_at", seed.id))?;
    }
    customer.last_purchase = seed
        .last_purchase
        .as_deref()
        .map(parse_timestamp)
        .transpose()
        .with_context(|| format!("Customer {}: bad last_purchase", seed.id))?;
    customer.total_purchases = Money::from_decimal(seed.total_purchases, currency);
    customer.status = seed.status;
    customer.notes = seed.notes.clone();
    Ok(customer)
}

fn supplier(seed: &SupplierSeed) -> Supplier {
    let mut supplier = Supplier::new(seed.id.as_str(), seed.name.as_str())
        .with_contact(seed.contact.as_str())
        .with_email(seed.email.as_str())
        .with_phone(seed.phone.as_str())
        .with_document(seed.document.as_str())
        .with_category(seed.category.as_str());
    supplier.status = seed.status;
    supplier
}

fn sale(seed: &SaleSeed, currency: Currency) -> Result<SaleRecord> {
    let payment: PaymentMethod = seed
        .payment
        .parse()
        .with_context(|| format!("Sale {}", seed.id))?;
    let timestamp =
        parse_timestamp(&seed.timestamp).with_context(|| format!("Sale {}: bad timestamp", seed.id))?;
    let lines = seed
        .lines
        .iter()
        .map(|l| SaleLine::new(l.product.as_str(), l.quantity, Money::from_decimal(l.price, currency)))
        .collect();

    let record = SaleRecord::new(seed.id.as_str(), timestamp, lines, payment, seed.operator.as_str())
        .with_context(|| format!("Sale {}", seed.id))?;
    Ok(record.with_status(seed.status))
}

/// Parse `YYYY-MM-DD HH:MM` or `YYYY-MM-DD` as a UTC unix timestamp.
pub fn parse_timestamp(value: &str) -> Result<i64> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M") {
        return Ok(dt.and_utc().timestamp());
    }
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .with_context(|| format!("Expected YYYY-MM-DD or YYYY-MM-DD HH:MM, got '{}'", value))?;
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .with_context(|| format!("Invalid date: {}", value))?;
    Ok(midnight.and_utc().timestamp())
}
