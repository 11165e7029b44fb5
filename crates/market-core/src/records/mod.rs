//! Back-office records kept next to the catalog.
//!
//! Customers, suppliers and the sales history are plain [`Record`] types
//! stored in a [`crate::registry::Registry`].
//!
//! [`Record`]: crate::registry::Record

mod customer;
mod sale;
mod supplier;

pub use customer::{Customer, CUSTOMER_ID_PREFIX};
pub use sale::{SaleLine, SaleRecord, SaleStatus, SALE_ID_PREFIX};
pub use supplier::Supplier;
