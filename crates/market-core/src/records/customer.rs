//! Customer records.

use crate::error::MarketError;
use crate::ids::CustomerId;
use crate::money::{Currency, Money};
use crate::registry::{Record, RecordStatus, Registry};
use crate::search::{Filter, Selection};
use serde::{Deserialize, Serialize};

/// Prefix of sequential customer ids (`C001`).
pub const CUSTOMER_ID_PREFIX: &str = "C";

/// A registered customer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Customer {
    pub id: CustomerId,
    /// Full name.
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Tax document number.
    pub document: String,
    /// Street address.
    pub address: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    /// Unix timestamp of registration.
    pub registered_at: i64,
    /// Unix timestamp of the last purchase, if any.
    pub last_purchase: Option<i64>,
    /// Lifetime purchases.
    pub total_purchases: Money,
    pub status: RecordStatus,
    /// Free-form notes.
    pub notes: Option<String>,
}

impl Customer {
    /// New active customer with no purchases.
    pub fn new(id: impl Into<CustomerId>, name: impl Into<String>, currency: Currency) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: String::new(),
            phone: String::new(),
            document: String::new(),
            address: String::new(),
            city: String::new(),
            state: String::new(),
            postal_code: String::new(),
            registered_at: crate::current_timestamp(),
            last_purchase: None,
            total_purchases: Money::zero(currency),
            status: RecordStatus::Active,
            notes: None,
        }
    }

    /// Register a new customer under the next free `C###` id.
    pub fn register(
        registry: &Registry<Customer>,
        name: impl Into<String>,
        currency: Currency,
    ) -> Self {
        let id = CustomerId::next_sequential(CUSTOMER_ID_PREFIX, registry.iter().map(|c| &c.id));
        Self::new(id, name, currency)
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

    /// Set street address, city, state and postal code.
    pub fn with_address(
        mut self,
        address: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        postal_code: impl Into<String>,
    ) -> Self {
        self.address = address.into();
        self.city = city.into();
        self.state = state.into();
        self.postal_code = postal_code.into();
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Add a completed purchase to the customer's history.
    pub fn record_purchase(&mut self, amount: Money, timestamp: i64) -> Result<(), MarketError> {
        if amount.currency != self.total_purchases.currency {
            return Err(MarketError::CurrencyMismatch {
                expected: self.total_purchases.currency.code().to_string(),
                got: amount.currency.code().to_string(),
            });
        }
        self.total_purchases = self
            .total_purchases
            .try_add(&amount)
            .ok_or(MarketError::Overflow)?;
        self.last_purchase = Some(timestamp);
        Ok(())
    }

    /// Filter by name, email or document, optionally by status.
    pub fn filter(query: &str, status: Selection<RecordStatus>) -> Filter<Customer> {
        Filter::new()
            .text(query)
            .field(|c: &Customer| c.name.as_str())
            .field(|c: &Customer| c.email.as_str())
            .field(|c: &Customer| c.document.as_str())
            .select(status, |c: &Customer| &c.status)
    }
}

impl Record for Customer {
    type Id = CustomerId;

    fn id(&self) -> &CustomerId {
        &self.id
    }

    fn validate(&self) -> Result<(), MarketError> {
        if self.name.trim().is_empty() {
            return Err(MarketError::validation("customer name is required"));
        }
        if self.total_purchases.is_negative() {
            return Err(MarketError::validation("total purchases cannot be negative"));
        }
        Ok(())
    }
}
