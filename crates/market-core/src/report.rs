//! Dashboard metrics.
//!
//! Aggregates are recomputed from the owned lists on every call; nothing
//! here is cached.

use crate::catalog::{Catalog, Replenishment};
use crate::error::MarketError;
use crate::money::{Currency, Money};
use crate::records::{Customer, SaleRecord, SaleStatus};
use serde::Serialize;

/// Catalog and inventory figures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogSummary {
    pub total_items: usize,
    pub active_items: usize,
    pub low_stock: usize,
    pub out_of_stock: usize,
    /// Σ unit_price × stock.
    pub retail_value: Money,
    /// Σ cost × stock.
    pub cost_value: Money,
}

impl CatalogSummary {
    pub fn from_catalog(catalog: &Catalog) -> Result<Self, MarketError> {
        let currency = catalog.currency();
        let mut summary = Self {
            total_items: catalog.len(),
            active_items: 0,
            low_stock: 0,
            out_of_stock: 0,
            retail_value: Money::zero(currency),
            cost_value: Money::zero(currency),
        };

        for item in catalog {
            if item.status.is_active() {
                summary.active_items += 1;
            }
            if item.is_low_stock() {
                summary.low_stock += 1;
            }
            if item.is_out_of_stock() {
                summary.out_of_stock += 1;
            }
            summary.retail_value = add(summary.retail_value, item.retail_value())?;
            summary.cost_value = add(summary.cost_value, item.cost_value())?;
        }

        Ok(summary)
    }

    /// retail_value - cost_value.
    pub fn potential_margin(&self) -> Option<Money> {
        self.retail_value.try_subtract(&self.cost_value)
    }
}

/// Sales history figures. Only completed sales count towards revenue.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesSummary {
    pub completed: usize,
    pub cancelled: usize,
    pub revenue: Money,
    /// revenue / completed, zero when there are no completed sales.
    pub average_ticket: Money,
}

impl SalesSummary {
    pub fn from_sales<'a>(
        sales: impl IntoIterator<Item = &'a SaleRecord>,
        currency: Currency,
    ) -> Result<Self, MarketError> {
        let mut completed = 0;
        let mut cancelled = 0;
        let mut revenue = Money::zero(currency);

        for sale in sales {
            match sale.status {
                SaleStatus::Completed => {
                    completed += 1;
                    revenue = add(revenue, Some(sale.total))?;
                }
                SaleStatus::Cancelled => cancelled += 1,
            }
        }

        Ok(Self {
            completed,
            cancelled,
            revenue,
            average_ticket: revenue.average_over(completed as i64),
        })
    }
}

/// Customer base figures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerSummary {
    pub total: usize,
    pub active: usize,
    /// Σ lifetime purchases.
    pub total_purchases: Money,
    /// total_purchases / total, zero for an empty base.
    pub average_per_customer: Money,
}

impl CustomerSummary {
    pub fn from_customers<'a>(
        customers: impl IntoIterator<Item = &'a Customer>,
        currency: Currency,
    ) -> Result<Self, MarketError> {
        let mut total = 0;
        let mut active = 0;
        let mut total_purchases = Money::zero(currency);

        for customer in customers {
            total += 1;
            if customer.status.is_active() {
                active += 1;
            }
            total_purchases = add(total_purchases, Some(customer.total_purchases))?;
        }

        Ok(Self {
            total,
            active,
            total_purchases,
            average_per_customer: total_purchases.average_over(total as i64),
        })
    }
}

/// Everything the overview screen shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardMetrics {
    pub catalog: CatalogSummary,
    pub sales: SalesSummary,
    pub customers: CustomerSummary,
    /// Reorder suggestions for low-stock items.
    pub low_stock: Vec<Replenishment>,
    /// Most recent sales, newest first.
    pub recent_sales: Vec<SaleRecord>,
}

impl DashboardMetrics {
    pub fn collect<'a>(
        catalog: &Catalog,
        sales: impl IntoIterator<Item = &'a SaleRecord> + Clone,
        customers: impl IntoIterator<Item = &'a Customer>,
        recent: usize,
    ) -> Result<Self, MarketError> {
        let currency = catalog.currency();
        Ok(Self {
            catalog: CatalogSummary::from_catalog(catalog)?,
            sales: SalesSummary::from_sales(sales.clone(), currency)?,
            customers: CustomerSummary::from_customers(customers, currency)?,
            low_stock: catalog.replenishment(),
            recent_sales: recent_sales(sales, recent),
        })
    }
}

/// The `limit` newest sales, any status. Ties keep history order.
pub fn recent_sales<'a>(
    sales: impl IntoIterator<Item = &'a SaleRecord>,
    limit: usize,
) -> Vec<SaleRecord> {
    let mut sales: Vec<&SaleRecord> = sales.into_iter().collect();
    sales.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    sales.into_iter().take(limit).cloned().collect()
}

fn add(acc: Money, value: Option<Money>) -> Result<Money, MarketError> {
    value
        .and_then(|v| acc.try_add(&v))
        .ok_or(MarketError::Overflow)
}
