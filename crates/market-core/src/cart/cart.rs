//! Cart and cart line types.

use crate::cart::{compute_totals, CartTotals};
use crate::catalog::CatalogItem;
use crate::error::MarketError;
use crate::ids::ItemId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Outcome of a cart mutation, for the caller to turn into a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "change")]
pub enum CartChange {
    /// A new line was created.
    Added { quantity: i64 },
    /// An existing line changed quantity.
    Updated { quantity: i64 },
    /// A line was deleted.
    Removed,
    /// Nothing to do (e.g., unknown item).
    Unchanged,
}

/// An in-progress sale.
///
/// Lines are unique by item id, always have a positive quantity, and never
/// exceed the item's stock as known at the time of the mutation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    currency: Currency,
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new(currency: Currency) -> Self {
        Self {
            currency,
            lines: Vec::new(),
        }
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Add one unit of `item`.
    ///
    /// Creates a line with quantity 1 or increments the existing line.
    /// Rejected with `InsufficientStock` when that would exceed the item's
    /// available stock; the cart is left unchanged.
    pub fn add(&mut self, item: &CatalogItem) -> Result<CartChange, MarketError> {
        self.check_currency(item)?;

        if let Some(line) = self.lines.iter_mut().find(|l| l.item_id == item.id) {
            let requested = line.quantity + 1;
            if requested > item.available_stock {
                warn!(item_id = %item.id, requested, available = item.available_stock, "insufficient stock");
                return Err(insufficient(item, requested));
            }
            line.quantity = requested;
            debug!(item_id = %item.id, quantity = requested, "cart line incremented");
            return Ok(CartChange::Updated {
                quantity: requested,
            });
        }

        if item.available_stock < 1 {
            warn!(item_id = %item.id, available = item.available_stock, "item out of stock");
            return Err(insufficient(item, 1));
        }

        self.lines.push(CartLine::new(item));
        debug!(item_id = %item.id, "cart line added");
        Ok(CartChange::Added { quantity: 1 })
    }

    /// Set the quantity of an existing line.
    ///
    /// `quantity <= 0` removes the line. A quantity above the item's stock
    /// is rejected and the line is kept as it was. Items without a line are
    /// left alone.
    pub fn set_quantity(
        &mut self,
        item: &CatalogItem,
        quantity: i64,
    ) -> Result<CartChange, MarketError> {
        if quantity <= 0 {
            return Ok(self.remove(&item.id));
        }

        let Some(line) = self.lines.iter_mut().find(|l| l.item_id == item.id) else {
            debug!(item_id = %item.id, "quantity change ignored, item not in cart");
            return Ok(CartChange::Unchanged);
        };

        if quantity > item.available_stock {
            warn!(item_id = %item.id, requested = quantity, available = item.available_stock, "insufficient stock");
            return Err(insufficient(item, quantity));
        }

        line.quantity = quantity;
        debug!(item_id = %item.id, quantity, "cart line updated");
        Ok(CartChange::Updated { quantity })
    }

    /// Remove a line. Unknown ids are a no-op.
    pub fn remove(&mut self, item_id: &ItemId) -> CartChange {
        let len_before = self.lines.len();
        self.lines.retain(|l| &l.item_id != item_id);
        if self.lines.len() < len_before {
            debug!(item_id = %item_id, "cart line removed");
            CartChange::Removed
        } else {
            CartChange::Unchanged
        }
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn get(&self, item_id: &ItemId) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.item_id == item_id)
    }

    /// Quantity of `item_id` in the cart, zero when absent.
    pub fn quantity_of(&self, item_id: &ItemId) -> i64 {
        self.get(item_id).map(|l| l.quantity).unwrap_or(0)
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of quantities.
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Item count and total.
    pub fn totals(&self) -> Result<CartTotals, MarketError> {
        compute_totals(self)
    }

    pub(crate) fn take_lines(&mut self) -> Vec<CartLine> {
        std::mem::take(&mut self.lines)
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

impl Default for Cart {
    fn default() -> Self {
        Self::new(Currency::default())
    }
}

/// A line in the cart.
///
/// Name and unit price are captured when the line is created; later
/// catalog price changes do not affect it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    /// Catalog item this line refers to.
    pub item_id: ItemId,
    /// Item name (denormalized for display).
    pub name: String,
    /// Unit price at add-time.
    pub unit_price: Money,
    /// Quantity, always >= 1.
    pub quantity: i64,
}

impl CartLine {
    fn new(item: &CatalogItem) -> Self {
        Self {
            item_id: item.id.clone(),
            name: item.name.clone(),
            unit_price: item.unit_price,
            quantity: 1,
        }
    }

    /// unit_price * quantity.
    pub fn subtotal(&self) -> Result<Money, MarketError> {
        self.unit_price
            .try_multiply(self.quantity)
            .ok_or(MarketError::Overflow)
    }
}

fn insufficient(item: &CatalogItem, requested: i64) -> MarketError {
    MarketError::InsufficientStock {
        item_id: item.id.to_string(),
        requested,
        available: item.available_stock,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rice(stock: i64) -> CatalogItem {
        CatalogItem::new("1", "Rice 5kg", Money::from_decimal(25.90, Currency::BRL), stock)
    }

    #[test]
    fn test_add_creates_then_increments() {
        let item = rice(2);
        let mut cart = Cart::new(Currency::BRL);

        assert_eq!(cart.add(&item).unwrap(), CartChange::Added { quantity: 1 });
        assert_eq!(cart.add(&item).unwrap(), CartChange::Updated { quantity: 2 });

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.totals().unwrap().total.display_amount(), "51.80");
    }

    #[test]
    fn test_add_beyond_stock_rejected() {
        let item = rice(2);
        let mut cart = Cart::new(Currency::BRL);
        cart.add(&item).unwrap();
        cart.add(&item).unwrap();
        let before = cart.clone();

        let err = cart.add(&item).unwrap_err();
        assert_eq!(
            err,
            MarketError::InsufficientStock {
                item_id: "1".to_string(),
                requested: 3,
                available: 2,
            }
        );
        assert_eq!(cart, before);
        assert_eq!(cart.totals().unwrap().total.amount_cents, 5180);
    }

    #[test]
    fn test_add_out_of_stock_rejected() {
        let mut cart = Cart::new(Currency::BRL);
        let err = cart.add(&rice(0)).unwrap_err();
        assert_eq!(err.code(), "insufficient_stock");
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity() {
        let item = rice(10);
        let mut cart = Cart::new(Currency::BRL);
        cart.add(&item).unwrap();

        assert_eq!(
            cart.set_quantity(&item, 7).unwrap(),
            CartChange::Updated { quantity: 7 }
        );
        assert_eq!(cart.quantity_of(&item.id), 7);
    }

    #[test]
    fn test_set_quantity_above_stock_keeps_line() {
        let item = rice(3);
        let mut cart = Cart::new(Currency::BRL);
        cart.add(&item).unwrap();

        assert!(cart.set_quantity(&item, 4).is_err());
        assert_eq!(cart.quantity_of(&item.id), 1);
    }

    #[test]
    fn test_set_quantity_zero_matches_remove() {
        let item = rice(3);
        let other = CatalogItem::new("2", "Beans", Money::new(850, Currency::BRL), 3);
        let mut cart = Cart::new(Currency::BRL);
        cart.add(&item).unwrap();
        cart.add(&other).unwrap();

        let mut removed = cart.clone();
        assert_eq!(removed.remove(&item.id), CartChange::Removed);

        assert_eq!(cart.set_quantity(&item, 0).unwrap(), CartChange::Removed);
        assert_eq!(cart, removed);

        // negative quantities behave the same
        let mut cart = removed.clone();
        assert_eq!(cart.set_quantity(&other, -3).unwrap(), CartChange::Removed);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_unknown_line_is_noop() {
        let item = rice(3);
        let mut cart = Cart::new(Currency::BRL);
        assert_eq!(cart.set_quantity(&item, 2).unwrap(), CartChange::Unchanged);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let item = rice(3);
        let mut cart = Cart::new(Currency::BRL);
        cart.add(&item).unwrap();
        let before = cart.clone();

        assert_eq!(cart.remove(&ItemId::new("nope")), CartChange::Unchanged);
        assert_eq!(cart, before);
    }

    #[test]
    fn test_price_is_snapshotted() {
        let mut item = rice(5);
        let mut cart = Cart::new(Currency::BRL);
        cart.add(&item).unwrap();

        item.unit_price = Money::new(9999, Currency::BRL);
        cart.add(&item).unwrap();

        let line = cart.get(&item.id).unwrap();
        assert_eq!(line.unit_price.amount_cents, 2590);
        assert_eq!(line.quantity, 2);
    }

    #[test]
    fn test_currency_mismatch() {
        let item = CatalogItem::new("1", "Tea", Money::new(100, Currency::USD), 5);
        let mut cart = Cart::new(Currency::BRL);
        assert!(matches!(
            cart.add(&item),
            Err(MarketError::CurrencyMismatch { .. })
        ));
    }
}
