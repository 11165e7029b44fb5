//! Catalog, cart and back-office logic for a small market.
//!
//! This crate holds the business rules behind a store dashboard:
//!
//! - **Catalog**: Sellable items, categories, stock status and adjustments
//! - **Cart**: Stock-bounded cart lines and totals
//! - **Checkout**: Payment methods and sale summaries
//! - **Records**: Customers, suppliers and the sales history
//! - **Search**: One filter combinator shared by every list
//! - **Report**: Dashboard metrics
//!
//! # Example
//!
//! ```rust
//! use market_core::prelude::*;
//!
//! let catalog = Catalog::from_items(
//!     Currency::BRL,
//!     vec![CatalogItem::new("1", "Rice 5kg", Money::new(2590, Currency::BRL), 2)],
//! )
//! .unwrap();
//!
//! let mut pos = PointOfSale::new(catalog);
//! let rice = ItemId::new("1");
//! pos.add_to_cart(&rice).unwrap();
//! pos.add_to_cart(&rice).unwrap();
//! assert!(pos.add_to_cart(&rice).is_err());
//!
//! pos.select_payment(Some(PaymentMethod::Cash));
//! let sale = pos.checkout().unwrap();
//! assert_eq!(sale.total.display(), "R$51.80");
//! ```

pub mod error;
pub mod ids;
pub mod money;
pub mod registry;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod pos;
pub mod records;
pub mod report;
pub mod search;

pub use error::MarketError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::MarketError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};
    pub use crate::registry::{Record, RecordStatus, Registry};

    // Catalog
    pub use crate::catalog::{
        classify, Catalog, CatalogItem, Category, MovementKind, Replenishment, StockLevel,
        StockMovement, StockStatus, StockThresholds,
    };

    // Cart
    pub use crate::cart::{compute_totals, Cart, CartChange, CartLine, CartTotals};

    // Checkout
    pub use crate::checkout::{checkout, PaymentMethod, SaleSummary};
    pub use crate::pos::PointOfSale;

    // Records
    pub use crate::records::{Customer, SaleLine, SaleRecord, SaleStatus, Supplier};

    // Search
    pub use crate::search::{CatalogQuery, Filter, Selection};

    // Report
    pub use crate::report::{CatalogSummary, CustomerSummary, DashboardMetrics, SalesSummary};
}

/// Get current Unix timestamp.
pub(crate) fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
