//! Catalog query builder.

use crate::catalog::{CatalogItem, StockStatus};
use crate::registry::RecordStatus;
use crate::search::{Filter, Selection};
use serde::{Deserialize, Serialize};

/// A catalog search: free text over name and barcode, plus optional
/// category, stock status and record status restrictions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogQuery {
    /// Text query (matched against name and barcode).
    pub text: String,
    /// Category restriction.
    pub category: Selection<String>,
    /// Stock status restriction (inventory view).
    pub stock: Selection<StockStatus>,
    /// Active/inactive restriction.
    pub status: Selection<RecordStatus>,
}

impl CatalogQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the text query.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Restrict to one category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Selection::Only(category.into());
        self
    }

    pub fn with_category_selection(mut self, category: Selection<String>) -> Self {
        self.category = category;
        self
    }

    pub fn with_stock(mut self, stock: Selection<StockStatus>) -> Self {
        self.stock = stock;
        self
    }

    pub fn with_status(mut self, status: Selection<RecordStatus>) -> Self {
        self.status = status;
        self
    }

    /// Build the predicate for [`crate::catalog::Catalog::search`].
    pub fn to_filter(&self) -> Filter<CatalogItem> {
        let filter = Filter::new()
            .text(&self.text)
            .field(|item: &CatalogItem| item.name.as_str())
            .field(|item: &CatalogItem| item.barcode.as_str())
            .select(self.category.clone(), |item: &CatalogItem| &item.category)
            .select(self.status.clone(), |item: &CatalogItem| &item.status);

        match self.stock {
            Selection::All => filter,
            Selection::Only(stock) => filter.when(move |item| item.stock_status() == stock),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::{Currency, Money};

    #[test]
    fn test_query_builder() {
        let query = CatalogQuery::new()
            .with_text("rice")
            .with_category("Grains")
            .with_stock(Selection::Only(StockStatus::Low));

        assert_eq!(query.text, "rice");
        assert_eq!(query.category, Selection::Only("Grains".to_string()));
        assert!(query.status.is_all());
    }

    #[test]
    fn test_stock_filter() {
        let low = CatalogItem::new("1", "Milk", Money::new(550, Currency::BRL), 3);
        let normal = CatalogItem::new("2", "Oil", Money::new(690, Currency::BRL), 25);
        let items = vec![low, normal];

        let filter = CatalogQuery::new()
            .with_stock(Selection::Only(StockStatus::Low))
            .to_filter();
        let ids: Vec<_> = filter.apply(&items).map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["1"]);
    }

    #[test]
    fn test_inactive_items_can_be_hidden() {
        let active = CatalogItem::new("1", "Milk", Money::new(550, Currency::BRL), 30);
        let inactive = CatalogItem::new("2", "Old Milk", Money::new(550, Currency::BRL), 30)
            .with_status(RecordStatus::Inactive);
        let items = vec![active, inactive];

        let filter = CatalogQuery::new()
            .with_text("milk")
            .with_status(Selection::Only(RecordStatus::Active))
            .to_filter();
        assert_eq!(filter.count(&items), 1);
    }
}
