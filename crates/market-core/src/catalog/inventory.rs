//! Stock classification and inventory movements.

use crate::ids::ItemId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::MarketError;

/// Stock status of an item relative to its thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockStatus {
    Low,
    Normal,
    High,
}

impl StockStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::Low => "low",
            StockStatus::Normal => "normal",
            StockStatus::High => "high",
        }
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StockStatus {
    type Err = MarketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(StockStatus::Low),
            "normal" => Ok(StockStatus::Normal),
            "high" => Ok(StockStatus::High),
            other => Err(MarketError::Validation(format!(
                "unknown stock status '{}'",
                other
            ))),
        }
    }
}

/// Classify on-hand stock.
///
/// `low` wins over `high` when the thresholds overlap. Without a maximum
/// the result is never `high`.
pub fn classify(stock: i64, min_stock: i64, max_stock: Option<i64>) -> StockStatus {
    if stock <= min_stock {
        return StockStatus::Low;
    }
    match max_stock {
        Some(max) if stock >= max => StockStatus::High,
        _ => StockStatus::Normal,
    }
}

/// Coarse stock level shown in product listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockLevel {
    OutOfStock,
    Low,
    Normal,
}

impl StockLevel {
    pub fn of(stock: i64, min_stock: i64) -> Self {
        if stock <= 0 {
            StockLevel::OutOfStock
        } else if stock <= min_stock {
            StockLevel::Low
        } else {
            StockLevel::Normal
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StockLevel::OutOfStock => "out_of_stock",
            StockLevel::Low => "low",
            StockLevel::Normal => "normal",
        }
    }
}

/// Min/max thresholds applied to newly created items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockThresholds {
    pub min_stock: i64,
    pub max_stock: Option<i64>,
}

impl StockThresholds {
    pub fn new(min_stock: i64, max_stock: Option<i64>) -> Self {
        Self {
            min_stock,
            max_stock,
        }
    }
}

impl Default for StockThresholds {
    fn default() -> Self {
        Self {
            min_stock: 5,
            max_stock: Some(100),
        }
    }
}

/// Direction of a stock movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementKind {
    Inbound,
    Outbound,
}

impl MovementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementKind::Inbound => "inbound",
            MovementKind::Outbound => "outbound",
        }
    }
}

/// Result of a manual stock adjustment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockMovement {
    pub item_id: ItemId,
    pub kind: MovementKind,
    /// Units actually added or removed after clamping at zero.
    pub quantity: i64,
    pub stock_before: i64,
    pub stock_after: i64,
    /// Unix timestamp of the movement.
    pub timestamp: i64,
}

impl StockMovement {
    /// Apply `delta` to `stock`, never going below zero.
    pub fn apply(item_id: ItemId, stock: i64, delta: i64, timestamp: i64) -> Self {
        let stock_after = stock.saturating_add(delta).max(0);
        let kind = if delta >= 0 {
            MovementKind::Inbound
        } else {
            MovementKind::Outbound
        };
        Self {
            item_id,
            kind,
            quantity: (stock_after - stock).abs(),
            stock_before: stock,
            stock_after,
            timestamp,
        }
    }
}

/// A low-stock item together with how much to reorder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replenishment {
    pub item_id: ItemId,
    pub name: String,
    pub category: String,
    pub current: i64,
    pub minimum: i64,
    /// `minimum - current`, never negative.
    pub reorder: i64,
}

impl Replenishment {
    pub fn new(
        item_id: ItemId,
        name: impl Into<String>,
        category: impl Into<String>,
        current: i64,
        minimum: i64,
    ) -> Self {
        Self {
            item_id,
            name: name.into(),
            category: category.into(),
            current,
            minimum,
            reorder: (minimum - current).max(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_examples() {
        assert_eq!(classify(5, 10, None), StockStatus::Low);
        assert_eq!(classify(50, 10, Some(40)), StockStatus::High);
        assert_eq!(classify(20, 10, Some(40)), StockStatus::Normal);
    }

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(classify(10, 10, Some(40)), StockStatus::Low);
        assert_eq!(classify(40, 10, Some(40)), StockStatus::High);
        assert_eq!(classify(0, 0, None), StockStatus::Low);
        assert_eq!(classify(1, 0, None), StockStatus::Normal);
        assert_eq!(classify(1_000, 0, None), StockStatus::Normal);
    }

    #[test]
    fn test_classify_overlapping_thresholds() {
        // min above max: low takes precedence
        assert_eq!(classify(30, 50, Some(20)), StockStatus::Low);
        assert_eq!(classify(60, 50, Some(20)), StockStatus::High);
    }

    #[test]
    fn test_stock_level() {
        assert_eq!(StockLevel::of(0, 5), StockLevel::OutOfStock);
        assert_eq!(StockLevel::of(2, 10), StockLevel::Low);
        assert_eq!(StockLevel::of(24, 5), StockLevel::Normal);
    }

    #[test]
    fn test_movement_clamps_at_zero() {
        let m = StockMovement::apply(ItemId::new("1"), 3, -5, 0);
        assert_eq!(m.kind, MovementKind::Outbound);
        assert_eq!(m.stock_after, 0);
        assert_eq!(m.quantity, 3);

        let m = StockMovement::apply(ItemId::new("1"), 3, 4, 0);
        assert_eq!(m.kind, MovementKind::Inbound);
        assert_eq!(m.stock_after, 7);
        assert_eq!(m.quantity, 4);
    }

    #[test]
    fn test_replenishment_quantity() {
        let r = Replenishment::new(ItemId::new("1"), "Whole Milk 1L", "Dairy", 5, 10);
        assert_eq!(r.reorder, 5);
        let r = Replenishment::new(ItemId::new("2"), "Bread", "Bakery", 12, 10);
        assert_eq!(r.reorder, 0);
    }

    #[test]
    fn test_status_parse() {
        assert_eq!("HIGH".parse::<StockStatus>().unwrap(), StockStatus::High);
        assert!("empty".parse::<StockStatus>().is_err());
    }
}
