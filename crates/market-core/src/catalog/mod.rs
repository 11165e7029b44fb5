//! Product catalog module.
//!
//! Contains the sellable items, categories and stock rules, plus the
//! [`Catalog`] that owns the item list.

mod category;
mod inventory;
mod item;

pub use category::Category;
pub use inventory::{
    classify, MovementKind, Replenishment, StockLevel, StockMovement, StockStatus,
    StockThresholds,
};
pub use item::CatalogItem;

use crate::error::MarketError;
use crate::ids::ItemId;
use crate::money::Currency;
use crate::registry::Registry;
use crate::search::Filter;
use serde::Serialize;
use tracing::{debug, info};

/// The item list of one store, all priced in one currency.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Catalog {
    currency: Currency,
    items: Registry<CatalogItem>,
}

impl Catalog {
    pub fn new(currency: Currency) -> Self {
        Self {
            currency,
            items: Registry::new(),
        }
    }

    /// Build a catalog from seed items.
    pub fn from_items(
        currency: Currency,
        items: impl IntoIterator<Item = CatalogItem>,
    ) -> Result<Self, MarketError> {
        let mut catalog = Self::new(currency);
        for item in items {
            catalog.insert(item)?;
        }
        Ok(catalog)
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Add an item.
    pub fn insert(&mut self, item: CatalogItem) -> Result<(), MarketError> {
        self.check_currency(&item)?;
        self.items.insert(item)
    }

    /// Replace an item. Unknown ids are a no-op returning `false`.
    pub fn update(&mut self, item: CatalogItem) -> Result<bool, MarketError> {
        self.check_currency(&item)?;
        self.items.update(item)
    }

    /// Delete an item. Unknown ids are a no-op.
    pub fn remove(&mut self, id: &ItemId) -> Option<CatalogItem> {
        self.items.remove(id)
    }

    pub fn get(&self, id: &ItemId) -> Option<&CatalogItem> {
        self.items.get(id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CatalogItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Lazily search the catalog, keeping catalog order.
    pub fn search<'s>(
        &'s self,
        filter: &'s Filter<CatalogItem>,
    ) -> impl Iterator<Item = &'s CatalogItem> + 's {
        self.items.filter(filter)
    }

    /// Add (`delta > 0`) or remove (`delta < 0`) units of stock.
    ///
    /// Stock never goes below zero. Returns `None` for an unknown id.
    pub fn adjust_stock(&mut self, id: &ItemId, delta: i64) -> Option<StockMovement> {
        let Some(item) = self.items.get_mut(id) else {
            debug!(item_id = %id, "stock adjustment ignored, unknown item");
            return None;
        };
        let movement = StockMovement::apply(
            item.id.clone(),
            item.available_stock,
            delta,
            crate::current_timestamp(),
        );
        item.available_stock = movement.stock_after;
        item.last_movement = Some(movement.timestamp);
        info!(
            item_id = %id,
            kind = movement.kind.as_str(),
            quantity = movement.quantity,
            stock = movement.stock_after,
            "stock adjusted"
        );
        Some(movement)
    }

    /// Items at or below their minimum stock.
    pub fn low_stock(&self) -> impl Iterator<Item = &CatalogItem> + '_ {
        self.items.iter().filter(|item| item.is_low_stock())
    }

    /// Reorder suggestions for every low-stock item.
    pub fn replenishment(&self) -> Vec<Replenishment> {
        self.low_stock()
            .map(|item| {
                Replenishment::new(
                    item.id.clone(),
                    item.name.clone(),
                    item.category.clone(),
                    item.available_stock,
                    item.min_stock,
                )
            })
            .collect()
    }

    /// Distinct category names in order of first appearance.
    pub fn category_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for item in self.items.iter() {
            if !item.category.is_empty() && !names.contains(&item.category.as_str()) {
                names.push(item.category.as_str());
            }
        }
        names
    }

    fn check_currency(&self, item: &CatalogItem) -> Result<(), MarketError> {
        if item.unit_price.currency != self.currency {
            return Err(MarketError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: item.unit_price.currency.code().to_string(),
            });
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a CatalogItem;
    type IntoIter = std::slice::Iter<'a, CatalogItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
