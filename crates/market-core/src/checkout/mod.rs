//! Checkout module.
//!
//! Contains payment methods and the checkout that turns a cart into a
//! sale summary.

mod flow;
mod payment;

pub use flow::{checkout, SaleSummary};
pub use payment::PaymentMethod;
