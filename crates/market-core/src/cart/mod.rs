//! Cart module.
//!
//! Contains the cart, its lines and totals.

#[allow(clippy::module_inception)]
mod cart;
mod pricing;

pub use cart::{Cart, CartChange, CartLine};
pub use pricing::{compute_totals, CartTotals, LineTotal};
