//! Sales history.

use crate::checkout::{PaymentMethod, SaleSummary};
use crate::error::MarketError;
use crate::ids::SaleId;
use crate::money::{Currency, Money};
use crate::registry::{Record, Registry};
use crate::search::{Filter, Selection};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Prefix of sequential sale ids (`V001`).
pub const SALE_ID_PREFIX: &str = "V";

/// Outcome of a recorded sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SaleStatus {
    #[default]
    Completed,
    Cancelled,
}

impl SaleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SaleStatus::Completed => "completed",
            SaleStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for SaleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SaleStatus {
    type Err = MarketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "completed" => Ok(SaleStatus::Completed),
            "cancelled" | "canceled" => Ok(SaleStatus::Cancelled),
            other => Err(MarketError::validation(format!("unknown sale status '{}'", other))),
        }
    }
}

/// A product line of a recorded sale.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SaleLine {
    /// Product name at the time of sale.
    pub product: String,
    pub quantity: i64,
    pub unit_price: Money,
}

impl SaleLine {
    pub fn new(product: impl Into<String>, quantity: i64, unit_price: Money) -> Self {
        Self {
            product: product.into(),
            quantity,
            unit_price,
        }
    }

    pub fn subtotal(&self) -> Result<Money, MarketError> {
        self.unit_price
            .try_multiply(self.quantity)
            .ok_or(MarketError::Overflow)
    }
}

/// An entry of the sales history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SaleRecord {
    pub id: SaleId,
    /// Unix timestamp of the sale.
    pub timestamp: i64,
    pub lines: Vec<SaleLine>,
    /// Sum of the line subtotals.
    pub total: Money,
    pub payment_method: PaymentMethod,
    pub status: SaleStatus,
    /// Cashier who rang up the sale.
    pub operator: String,
}

impl SaleRecord {
    /// Build a completed sale, computing the total from `lines`.
    pub fn new(
        id: impl Into<SaleId>,
        timestamp: i64,
        lines: Vec<SaleLine>,
        payment_method: PaymentMethod,
        operator: impl Into<String>,
    ) -> Result<Self, MarketError> {
        let currency = lines
            .first()
            .map(|l| l.unit_price.currency)
            .unwrap_or_default();
        let total = sum_lines(&lines, currency)?;
        Ok(Self {
            id: id.into(),
            timestamp,
            lines,
            total,
            payment_method,
            status: SaleStatus::Completed,
            operator: operator.into(),
        })
    }

    /// Record a checkout under the next free `V###` id of `history`.
    pub fn from_summary(
        history: &Registry<SaleRecord>,
        summary: &SaleSummary,
        operator: impl Into<String>,
    ) -> Self {
        let id = SaleId::next_sequential(SALE_ID_PREFIX, history.iter().map(|s| &s.id));
        Self {
            id,
            timestamp: summary.completed_at,
            lines: summary
                .lines
                .iter()
                .map(|l| SaleLine::new(l.name.clone(), l.quantity, l.unit_price))
                .collect(),
            total: summary.total,
            payment_method: summary.payment_method,
            status: SaleStatus::Completed,
            operator: operator.into(),
        }
    }

    pub fn with_status(mut self, status: SaleStatus) -> Self {
        self.status = status;
        self
    }

    pub fn is_completed(&self) -> bool {
        self.status == SaleStatus::Completed
    }

    /// Mark the sale as cancelled. Returns `false` if it already was.
    pub fn cancel(&mut self) -> bool {
        if self.status == SaleStatus::Cancelled {
            return false;
        }
        self.status = SaleStatus::Cancelled;
        true
    }

    /// Units sold across all lines.
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Filter by sale id or operator, optionally by status and payment method.
    pub fn filter(
        query: &str,
        status: Selection<SaleStatus>,
        payment: Selection<PaymentMethod>,
    ) -> Filter<SaleRecord> {
        Filter::new()
            .text(query)
            .field(|s: &SaleRecord| s.id.as_str())
            .field(|s: &SaleRecord| s.operator.as_str())
            .select(status, |s: &SaleRecord| &s.status)
            .select(payment, |s: &SaleRecord| &s.payment_method)
    }
}

impl Record for SaleRecord {
    type Id = SaleId;

    fn id(&self) -> &SaleId {
        &self.id
    }

    fn validate(&self) -> Result<(), MarketError> {
        if self.lines.is_empty() {
            return Err(MarketError::validation("sale has no lines"));
        }
        if let Some(line) = self.lines.iter().find(|l| l.quantity <= 0) {
            return Err(MarketError::InvalidQuantity(line.quantity));
        }
        let currency = self.total.currency;
        if let Some(line) = self.lines.iter().find(|l| l.unit_price.currency != currency) {
            return Err(MarketError::CurrencyMismatch {
                expected: currency.code().to_string(),
                got: line.unit_price.currency.code().to_string(),
            });
        }
        Ok(())
    }
}

fn sum_lines(lines: &[SaleLine], currency: Currency) -> Result<Money, MarketError> {
    lines.iter().try_fold(Money::zero(currency), |acc, line| {
        acc.try_add(&line.subtotal()?).ok_or(MarketError::Overflow)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::Cart;
    use crate::catalog::CatalogItem;
    use crate::checkout::checkout;

    fn brl(cents: i64) -> Money {
        Money::new(cents, Currency::BRL)
    }

    fn history() -> Registry<SaleRecord> {
        Registry::from_records(vec![
            SaleRecord::new(
                "V001",
                1_755_594_900,
                vec![
                    SaleLine::new("Rice 5kg", 2, brl(2590)),
                    SaleLine::new("Beans 1kg", 1, brl(850)),
                ],
                PaymentMethod::Card,
                "John Silva",
            )
            .unwrap(),
            SaleRecord::new(
                "V002",
                1_755_599_520,
                vec![SaleLine::new("Cola 2L", 3, brl(750))],
                PaymentMethod::Cash,
                "Mary Santos",
            )
            .unwrap(),
            SaleRecord::new(
                "V004",
                1_755_530_400,
                vec![SaleLine::new("Sugar 1kg", 1, brl(520))],
                PaymentMethod::Cash,
                "Mary Santos",
            )
            .unwrap()
            .with_status(SaleStatus::Cancelled),
        ])
        .unwrap()
    }

    #[test]
    fn test_total_from_lines() {
        let history = history();
        let sale = history.get(&SaleId::new("V001")).unwrap();
        assert_eq!(sale.total.display_amount(), "60.30");
        assert_eq!(sale.item_count(), 3);
    }

    #[test]
    fn test_filter_by_operator_status_payment() {
        let history = history();

        let filter = SaleRecord::filter("mary", Selection::All, Selection::All);
        assert_eq!(history.filter(&filter).count(), 2);

        let filter = SaleRecord::filter(
            "mary",
            Selection::Only(SaleStatus::Completed),
            Selection::Only(PaymentMethod::Cash),
        );
        let ids: Vec<_> = history.filter(&filter).map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["V002"]);

        let filter = SaleRecord::filter("v00", Selection::All, Selection::Only(PaymentMethod::Card));
        let ids: Vec<_> = history.filter(&filter).map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["V001"]);
    }

    #[test]
    fn test_from_summary() {
        let history = history();
        let rice = CatalogItem::new("1", "Rice 5kg", brl(2590), 5);
        let mut cart = Cart::new(Currency::BRL);
        cart.add(&rice).unwrap();
        let summary = checkout(&mut cart, Some(PaymentMethod::Card)).unwrap();

        let record = SaleRecord::from_summary(&history, &summary, "John Silva");
        assert_eq!(record.id.as_str(), "V005");
        assert_eq!(record.total, summary.total);
        assert_eq!(record.lines[0].product, "Rice 5kg");
        assert!(record.is_completed());
        assert!(record.validate().is_ok());
    }

    #[test]
    fn test_cancel() {
        let mut history = history();
        let sale = history.get_mut(&SaleId::new("V002")).unwrap();
        assert!(sale.cancel());
        assert!(!sale.cancel());
        assert_eq!(sale.status, SaleStatus::Cancelled);
    }

    #[test]
    fn test_empty_sale_rejected() {
        let sale = SaleRecord::new("V010", 0, vec![], PaymentMethod::Cash, "x").unwrap();
        assert!(sale.validate().is_err());
    }

    #[test]
    fn test_parse_status() {
        assert_eq!("Cancelled".parse::<SaleStatus>().unwrap(), SaleStatus::Cancelled);
        assert!("refunded".parse::<SaleStatus>().is_err());
    }
}
