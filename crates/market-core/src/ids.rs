//! Newtype IDs for type-safe identifiers.
//!
//! Using newtypes prevents accidentally mixing up different ID types,
//! e.g., passing a CustomerId where an ItemId is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate newtype ID structs.
macro_rules! define_id {
    ($name:ident) => {
        /// A unique identifier.
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Build a prefixed, zero-padded sequential ID (e.g., `C005`).
            pub fn sequential(prefix: &str, n: usize) -> Self {
                Self(format!("{}{:03}", prefix, n))
            }

            /// Next sequential ID after the highest one in `existing` with
            /// the same prefix. IDs that don't follow the scheme are skipped.
            /// At `usize::MAX` the counter saturates, so the returned ID is
            /// already taken and a registry insert reports `Duplicate`.
            pub fn next_sequential<'a>(
                prefix: &str,
                existing: impl IntoIterator<Item = &'a $name>,
            ) -> Self {
                let last = existing
                    .into_iter()
                    .filter_map(|id| id.0.strip_prefix(prefix)?.parse::<usize>().ok())
                    .max()
                    .unwrap_or(0);
                Self::sequential(prefix, last.saturating_add(1))
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(ItemId);
define_id!(CategoryId);
define_id!(CustomerId);
define_id!(SupplierId);
define_id!(SaleId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let id = ItemId::new("1");
        assert_eq!(id.as_str(), "1");
    }

    #[test]
    fn test_next_sequential_saturates() {
        let ids = vec![CustomerId::new(format!("C{}", usize::MAX))];
        let next = CustomerId::next_sequential("C", &ids);
        assert_eq!(next, ids[0]);
    }

    #[test]
    fn test_sequential_id() {
        assert_eq!(CustomerId::sequential("C", 5).as_str(), "C005");
        assert_eq!(SaleId::sequential("V", 1234).as_str(), "V1234");
    }

    #[test]
    fn test_next_sequential_skips_gaps() {
        let ids = vec![
            CustomerId::new("C001"),
            CustomerId::new("C004"),
            CustomerId::new("legacy"),
        ];
        assert_eq!(CustomerId::next_sequential("C", &ids).as_str(), "C005");
        assert_eq!(CustomerId::next_sequential("C", std::iter::empty()).as_str(), "C001");
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let json = serde_json::to_string(&ItemId::new("7")).unwrap();
        assert_eq!(json, "\"7\"");
    }
}
