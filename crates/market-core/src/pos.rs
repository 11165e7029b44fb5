//! Point-of-sale session.

use crate::cart::{Cart, CartChange, CartTotals};
use crate::catalog::{Catalog, CatalogItem};
use crate::checkout::{checkout, PaymentMethod, SaleSummary};
use crate::error::MarketError;
use crate::ids::ItemId;
use crate::search::Filter;
use tracing::debug;

/// A counter session: the store catalog, the cart being rung up and the
/// payment method picked for it.
///
/// Items are addressed by id. Ids missing from the catalog are ignored
/// and reported as [`CartChange::Unchanged`].
#[derive(Debug, Clone)]
pub struct PointOfSale {
    catalog: Catalog,
    cart: Cart,
    payment_method: Option<PaymentMethod>,
}

impl PointOfSale {
    pub fn new(catalog: Catalog) -> Self {
        let cart = Cart::new(catalog.currency());
        Self {
            catalog,
            cart,
            payment_method: None,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut Catalog {
        &mut self.catalog
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Catalog items matching `filter`, in catalog order.
    pub fn search<'s>(
        &'s self,
        filter: &'s Filter<CatalogItem>,
    ) -> impl Iterator<Item = &'s CatalogItem> + 's {
        self.catalog.search(filter)
    }

    /// Add one unit of an item.
    pub fn add_to_cart(&mut self, item_id: &ItemId) -> Result<CartChange, MarketError> {
        match self.catalog.get(item_id) {
            Some(item) => self.cart.add(item),
            None => Ok(unknown(item_id)),
        }
    }

    /// Set an item's quantity; `quantity <= 0` removes it.
    pub fn set_quantity(
        &mut self,
        item_id: &ItemId,
        quantity: i64,
    ) -> Result<CartChange, MarketError> {
        if quantity <= 0 {
            return Ok(self.cart.remove(item_id));
        }
        match self.catalog.get(item_id) {
            Some(item) => self.cart.set_quantity(item, quantity),
            None => Ok(unknown(item_id)),
        }
    }

    /// One more unit of an item already in the cart.
    pub fn increment(&mut self, item_id: &ItemId) -> Result<CartChange, MarketError> {
        let current = self.cart.quantity_of(item_id);
        if current == 0 {
            return Ok(CartChange::Unchanged);
        }
        self.set_quantity(item_id, current + 1)
    }

    /// One less unit; the line goes away at zero.
    pub fn decrement(&mut self, item_id: &ItemId) -> Result<CartChange, MarketError> {
        let current = self.cart.quantity_of(item_id);
        if current == 0 {
            return Ok(CartChange::Unchanged);
        }
        self.set_quantity(item_id, current - 1)
    }

    pub fn remove_from_cart(&mut self, item_id: &ItemId) -> CartChange {
        self.cart.remove(item_id)
    }

    /// Empty the cart without selling.
    pub fn clear_cart(&mut self) {
        self.cart.clear();
    }

    pub fn totals(&self) -> Result<CartTotals, MarketError> {
        self.cart.totals()
    }

    pub fn payment_method(&self) -> Option<PaymentMethod> {
        self.payment_method
    }

    pub fn select_payment(&mut self, method: Option<PaymentMethod>) {
        self.payment_method = method;
    }

    /// Finalize the cart with the selected payment method.
    ///
    /// On success the cart is empty and the payment selection is reset.
    /// On failure nothing changes.
    pub fn checkout(&mut self) -> Result<SaleSummary, MarketError> {
        let summary = checkout(&mut self.cart, self.payment_method)?;
        self.payment_method = None;
        Ok(summary)
    }
}

fn unknown(item_id: &ItemId) -> CartChange {
    debug!(item_id = %item_id, "unknown item, cart unchanged");
    CartChange::Unchanged
}
