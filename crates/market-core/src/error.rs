//! Market error types.

use thiserror::Error;

/// Errors returned by catalog, cart and registry operations.
///
/// None of these are fatal: the caller turns them into a notification and
/// carries on with unchanged state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarketError {
    /// Requested quantity exceeds the item's available stock.
    #[error("Insufficient stock for {item_id}: requested {requested}, available {available}")]
    InsufficientStock {
        item_id: String,
        requested: i64,
        available: i64,
    },

    /// Checkout attempted on a cart with no lines.
    #[error("Cart is empty")]
    EmptyCart,

    /// Checkout attempted without a selected payment method.
    #[error("No payment method selected")]
    MissingPaymentMethod,

    /// Payment method outside the accepted set.
    #[error("Unsupported payment method: {0}")]
    UnsupportedPaymentMethod(String),

    /// Referenced record does not exist.
    ///
    /// Reserved for callers that need a hard lookup failure. Cart, catalog
    /// and registry operations treat unknown ids as no-ops and never
    /// return it.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A record with the same id already exists.
    #[error("Duplicate id: {0}")]
    Duplicate(String),

    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// A required field is missing or out of range.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,
}

impl MarketError {
    /// Stable snake_case reason for display layers.
    pub fn code(&self) -> &'static str {
        match self {
            MarketError::InsufficientStock { .. } => "insufficient_stock",
            MarketError::EmptyCart => "empty_cart",
            MarketError::MissingPaymentMethod => "missing_payment_method",
            MarketError::UnsupportedPaymentMethod(_) => "unsupported_payment_method",
            MarketError::NotFound(_) => "not_found",
            MarketError::Duplicate(_) => "duplicate",
            MarketError::InvalidQuantity(_) => "invalid_quantity",
            MarketError::Validation(_) => "validation",
            MarketError::CurrencyMismatch { .. } => "currency_mismatch",
            MarketError::Overflow => "overflow",
        }
    }

    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        MarketError::Validation(msg.into())
    }
}
