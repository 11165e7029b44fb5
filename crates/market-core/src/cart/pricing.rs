//! Cart totals.

use crate::cart::Cart;
use crate::error::MarketError;
use crate::ids::ItemId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Aggregates derived from the cart lines. Never stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartTotals {
    /// Sum of line quantities.
    pub item_count: i64,
    /// Sum of `quantity * unit_price`.
    pub total: Money,
    /// Per-line breakdown.
    pub lines: Vec<LineTotal>,
}

impl CartTotals {
    pub fn is_empty(&self) -> bool {
        self.item_count == 0
    }
}

/// Total for a single cart line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineTotal {
    pub item_id: ItemId,
    pub unit_price: Money,
    pub quantity: i64,
    /// unit_price * quantity.
    pub subtotal: Money,
}

/// Compute item count and total for a cart.
///
/// All arithmetic is done in integer minor units; overflow is reported
/// instead of wrapping.
pub fn compute_totals(cart: &Cart) -> Result<CartTotals, MarketError> {
    let mut lines = Vec::with_capacity(cart.len());
    let mut item_count: i64 = 0;
    let mut total = Money::zero(cart.currency());

    for line in cart.lines() {
        let subtotal = line.subtotal()?;
        item_count = item_count
            .checked_add(line.quantity)
            .ok_or(MarketError::Overflow)?;
        total = total.try_add(&subtotal).ok_or(MarketError::Overflow)?;
        lines.push(LineTotal {
            item_id: line.item_id.clone(),
            unit_price: line.unit_price,
            quantity: line.quantity,
            subtotal,
        });
    }

    Ok(CartTotals {
        item_count,
        total,
        lines,
    })
}
