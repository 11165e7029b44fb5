//! Supplier records.

use crate::error::MarketError;
use crate::ids::SupplierId;
use crate::registry::{Record, RecordStatus};
use crate::search::{Filter, Selection};
use serde::{Deserialize, Serialize};

/// A company the store buys from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Supplier {
    pub id: SupplierId,
    /// Company name.
    pub name: String,
    /// Contact person.
    pub contact: String,
    pub email: String,
    pub phone: String,
    /// Company tax document.
    pub document: String,
    /// Category of goods supplied.
    pub category: String,
    pub status: RecordStatus,
}

impl Supplier {
    pub fn new(id: impl Into<SupplierId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            contact: String::new(),
            email: String::new(),
            phone: String::new(),
            document: String::new(),
            category: String::new(),
            status: RecordStatus::Active,
        }
    }

    pub fn with_contact(mut self, contact: impl Into<String>) -> Self {
        self.contact = contact.into();
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    pub fn with_document(mut self, document: impl Into<String>) -> Self {
        self.document = document.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Filter by company, contact or document, optionally by status.
    pub fn filter(query: &str, status: Selection<RecordStatus>) -> Filter<Supplier> {
        Filter::new()
            .text(query)
            .field(|s: &Supplier| s.name.as_str())
            .field(|s: &Supplier| s.contact.as_str())
            .field(|s: &Supplier| s.document.as_str())
            .select(status, |s: &Supplier| &s.status)
    }
}

impl Record for Supplier {
    type Id = SupplierId;

    fn id(&self) -> &SupplierId {
        &self.id
    }

    fn validate(&self) -> Result<(), MarketError> {
        if self.name.trim().is_empty() {
            return Err(MarketError::validation("supplier name is required"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;

    #[test]
    fn test_supplier_crud() {
        let mut registry = Registry::new();
        registry
            .insert(Supplier::new("S001", "Grain Distributors Ltd").with_contact("Robert Lima"))
            .unwrap();
        registry
            .insert(Supplier::new("S002", "Dairy Valley").with_category("Dairy"))
            .unwrap();

        let duplicate = registry.insert(Supplier::new("S001", "Other"));
        assert!(matches!(duplicate, Err(MarketError::Duplicate(_))));

        let updated = Supplier::new("S002", "Dairy Valley Co").with_category("Dairy");
        assert!(registry.update(updated).unwrap());
        assert!(!registry.update(Supplier::new("S404", "Ghost")).unwrap());

        let filter = Supplier::filter("robert", Selection::All);
        let ids: Vec<_> = registry.filter(&filter).map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["S001"]);

        assert!(registry.remove(&SupplierId::new("S001")).is_some());
        assert!(registry.remove(&SupplierId::new("S001")).is_none());
        assert_eq!(registry.len(), 1);
    }
}
