//! Search module.
//!
//! Contains the generic filter combinator and the catalog query builder.

mod filter;
mod query;

pub use filter::{Filter, Selection, TextField, TextQuery, ALL};
pub use query::CatalogQuery;
