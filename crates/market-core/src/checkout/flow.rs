//! Checkout of a cart.

use crate::cart::{Cart, CartLine};
use crate::checkout::PaymentMethod;
use crate::error::MarketError;
use crate::money::Money;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Result of a successful checkout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SaleSummary {
    /// Amount charged.
    pub total: Money,
    /// Units sold.
    pub item_count: i64,
    pub payment_method: PaymentMethod,
    /// Lines as they were in the cart.
    pub lines: Vec<CartLine>,
    /// Unix timestamp of the checkout.
    pub completed_at: i64,
}

/// Finalize `cart` into a sale summary and empty it.
///
/// Fails with `EmptyCart` when there is nothing to sell and with
/// `MissingPaymentMethod` when no method was chosen; in both cases the cart
/// is untouched. Catalog stock is not decremented and no sale record is
/// written; callers that keep a history build a
/// [`crate::records::SaleRecord`] from the summary.
pub fn checkout(
    cart: &mut Cart,
    payment_method: Option<PaymentMethod>,
) -> Result<SaleSummary, MarketError> {
    if cart.is_empty() {
        warn!("checkout rejected, cart is empty");
        return Err(MarketError::EmptyCart);
    }
    let Some(payment_method) = payment_method else {
        warn!("checkout rejected, no payment method");
        return Err(MarketError::MissingPaymentMethod);
    };

    let totals = cart.totals()?;
    let lines = cart.take_lines();

    info!(
        total = %totals.total,
        items = totals.item_count,
        payment = payment_method.as_str(),
        "sale completed"
    );

    Ok(SaleSummary {
        total: totals.total,
        item_count: totals.item_count,
        payment_method,
        lines,
        completed_at: crate::current_timestamp(),
    })
}
