//! Sellable catalog items.

use crate::catalog::inventory::{classify, StockLevel, StockStatus, StockThresholds};
use crate::error::MarketError;
use crate::ids::ItemId;
use crate::money::Money;
use crate::registry::{Record, RecordStatus};
use serde::{Deserialize, Serialize};

/// An item that can be sold and stocked.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogItem {
    /// Unique item identifier.
    pub id: ItemId,
    /// Display name.
    pub name: String,
    /// EAN/barcode, searchable alongside the name.
    pub barcode: String,
    /// Category name.
    pub category: String,
    /// Brand (optional).
    pub brand: Option<String>,
    /// Longer description.
    pub description: Option<String>,
    /// Supplier name.
    pub supplier: Option<String>,
    /// Sale price per unit.
    pub unit_price: Money,
    /// Purchase cost per unit.
    pub cost: Money,
    /// Units on hand.
    pub available_stock: i64,
    /// At or below this the item is low on stock.
    pub min_stock: i64,
    /// At or above this the item is overstocked, when modeled.
    pub max_stock: Option<i64>,
    /// Whether the item is offered.
    pub status: RecordStatus,
    /// Unix timestamp of the last stock movement.
    pub last_movement: Option<i64>,
    /// Unix timestamp of creation.
    pub created_at: i64,
}

impl CatalogItem {
    /// Create an item with default thresholds and no cost.
    pub fn new(
        id: impl Into<ItemId>,
        name: impl Into<String>,
        unit_price: Money,
        available_stock: i64,
    ) -> Self {
        let thresholds = StockThresholds::default();
        Self {
            id: id.into(),
            name: name.into(),
            barcode: String::new(),
            category: String::new(),
            brand: None,
            description: None,
            supplier: None,
            unit_price,
            cost: Money::zero(unit_price.currency),
            available_stock,
            min_stock: thresholds.min_stock,
            max_stock: thresholds.max_stock,
            status: RecordStatus::Active,
            last_movement: None,
            created_at: crate::current_timestamp(),
        }
    }

    pub fn with_barcode(mut self, barcode: impl Into<String>) -> Self {
        self.barcode = barcode.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_supplier(mut self, supplier: impl Into<String>) -> Self {
        self.supplier = Some(supplier.into());
        self
    }

    pub fn with_cost(mut self, cost: Money) -> Self {
        self.cost = cost;
        self
    }

    pub fn with_thresholds(mut self, thresholds: StockThresholds) -> Self {
        self.min_stock = thresholds.min_stock;
        self.max_stock = thresholds.max_stock;
        self
    }

    pub fn with_status(mut self, status: RecordStatus) -> Self {
        self.status = status;
        self
    }

    /// Low / normal / high relative to this item's thresholds.
    pub fn stock_status(&self) -> StockStatus {
        classify(self.available_stock, self.min_stock, self.max_stock)
    }

    pub fn stock_level(&self) -> StockLevel {
        StockLevel::of(self.available_stock, self.min_stock)
    }

    pub fn is_low_stock(&self) -> bool {
        self.stock_status() == StockStatus::Low
    }

    pub fn is_out_of_stock(&self) -> bool {
        self.available_stock <= 0
    }

    /// Stock valued at sale price.
    pub fn retail_value(&self) -> Option<Money> {
        self.unit_price.try_multiply(self.available_stock)
    }

    /// Stock valued at cost.
    pub fn cost_value(&self) -> Option<Money> {
        self.cost.try_multiply(self.available_stock)
    }

    /// Unit margin (price minus cost).
    pub fn margin(&self) -> Option<Money> {
        self.unit_price.try_subtract(&self.cost)
    }
}

impl Record for CatalogItem {
    type Id = ItemId;

    fn id(&self) -> &ItemId {
        &self.id
    }

    fn validate(&self) -> Result<(), MarketError> {
        if self.name.trim().is_empty() {
            return Err(MarketError::Validation("name is required".to_string()));
        }
        if self.unit_price.is_negative() || self.cost.is_negative() {
            return Err(MarketError::Validation(format!(
                "{}: prices must not be negative",
                self.id
            )));
        }
        if self.unit_price.currency != self.cost.currency {
            return Err(MarketError::CurrencyMismatch {
                expected: self.unit_price.currency.code().to_string(),
                got: self.cost.currency.code().to_string(),
            });
        }
        if self.available_stock < 0 || self.min_stock < 0 || self.max_stock.is_some_and(|m| m < 0)
        {
            return Err(MarketError::Validation(format!(
                "{}: stock and thresholds must not be negative",
                self.id
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn rice() -> CatalogItem {
        CatalogItem::new("1", "Brown Rice 5kg", Money::new(2590, Currency::BRL), 50)
            .with_barcode("7891234567890")
            .with_category("Grains")
            .with_cost(Money::new(1850, Currency::BRL))
            .with_thresholds(StockThresholds::new(10, Some(100)))
    }

    #[test]
    fn test_item_defaults() {
        let item = CatalogItem::new("9", "Soap", Money::new(280, Currency::BRL), 60);
        assert_eq!(item.min_stock, 5);
        assert_eq!(item.max_stock, Some(100));
        assert!(item.status.is_active());
        assert!(item.cost.is_zero());
    }

    #[test]
    fn test_stock_status() {
        let mut item = rice();
        assert_eq!(item.stock_status(), StockStatus::Normal);

        item.available_stock = 5;
        assert!(item.is_low_stock());

        item.available_stock = 100;
        assert_eq!(item.stock_status(), StockStatus::High);
    }

    #[test]
    fn test_values() {
        let item = rice();
        assert_eq!(item.retail_value().unwrap().amount_cents, 129_500);
        assert_eq!(item.cost_value().unwrap().amount_cents, 92_500);
        assert_eq!(item.margin().unwrap().amount_cents, 740);
    }

    #[test]
    fn test_validation() {
        assert!(rice().validate().is_ok());

        let mut item = rice();
        item.name = "  ".to_string();
        assert!(item.validate().is_err());

        let mut item = rice();
        item.available_stock = -1;
        assert!(item.validate().is_err());

        let item = rice().with_cost(Money::new(100, Currency::USD));
        assert!(matches!(
            item.validate(),
            Err(MarketError::CurrencyMismatch { .. })
        ));
    }
}
