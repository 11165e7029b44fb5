//! Property-based tests for the cart.
//!
//! These check the cart invariants over arbitrary stock levels, prices and
//! sequences of counter actions.

use market_core::prelude::*;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Action {
    Add(usize),
    Set(usize, i64),
    Remove(usize),
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        (0..4usize).prop_map(Action::Add),
        (0..4usize, -3..15i64).prop_map(|(i, q)| Action::Set(i, q)),
        (0..4usize).prop_map(Action::Remove),
    ]
}

fn items(stocks: &[i64], prices: &[i64]) -> Vec<CatalogItem> {
    stocks
        .iter()
        .zip(prices)
        .enumerate()
        .map(|(i, (stock, price))| {
            CatalogItem::new(
                i.to_string(),
                format!("Item {}", i),
                Money::new(*price, Currency::BRL),
                *stock,
            )
        })
        .collect()
}

fn apply(cart: &mut Cart, items: &[CatalogItem], action: &Action) {
    // rejections leave the cart as it was; the invariants are checked after
    let _ = match action {
        Action::Add(i) => cart.add(&items[*i]),
        Action::Set(i, q) => cart.set_quantity(&items[*i], *q),
        Action::Remove(i) => Ok(cart.remove(&items[*i].id)),
    };
}

proptest! {
    /// Property: lines always stay within 1..=stock and totals match the lines
    #[test]
    fn test_cart_invariants_hold(
        stocks in prop::collection::vec(0..8i64, 4),
        prices in prop::collection::vec(0..100_000i64, 4),
        actions in prop::collection::vec(action(), 0..40)
    ) {
        let items = items(&stocks, &prices);
        let mut cart = Cart::new(Currency::BRL);

        for action in &actions {
            apply(&mut cart, &items, action);
        }

        for line in cart.lines() {
            let item = items.iter().find(|i| i.id == line.item_id).unwrap();
            prop_assert!(line.quantity >= 1);
            prop_assert!(line.quantity <= item.available_stock);
        }

        let totals = cart.totals().unwrap();
        let quantity: i64 = cart.lines().iter().map(|l| l.quantity).sum();
        let total: i64 = cart
            .lines()
            .iter()
            .map(|l| l.quantity * l.unit_price.amount_cents)
            .sum();
        prop_assert_eq!(totals.item_count, quantity);
        prop_assert_eq!(totals.total.amount_cents, total);
    }

    /// Property: an out-of-stock item never gets a line
    #[test]
    fn test_out_of_stock_never_added(price in 0..100_000i64, attempts in 1..10usize) {
        let item = CatalogItem::new("x", "Empty shelf", Money::new(price, Currency::BRL), 0);
        let mut cart = Cart::new(Currency::BRL);

        for _ in 0..attempts {
            prop_assert!(cart.add(&item).is_err());
        }
        prop_assert!(cart.is_empty());
    }

    /// Property: setting quantity to zero or below is the same as removing
    #[test]
    fn test_set_non_positive_equals_remove(
        stock in 1..20i64,
        adds in 1..20usize,
        quantity in -5..=0i64
    ) {
        let item = CatalogItem::new("1", "Rice", Money::new(2590, Currency::BRL), stock);
        let other = CatalogItem::new("2", "Beans", Money::new(850, Currency::BRL), 5);
        let mut cart = Cart::new(Currency::BRL);
        for _ in 0..adds {
            let _ = cart.add(&item);
        }
        cart.add(&other).unwrap();

        let mut removed = cart.clone();
        removed.remove(&item.id);
        cart.set_quantity(&item, quantity).unwrap();
        prop_assert_eq!(cart, removed);
    }

    /// Property: removing an id that is not in the cart changes nothing
    #[test]
    fn test_remove_missing_is_noop(id in "[a-z]{3,8}") {
        let item = CatalogItem::new("1", "Rice", Money::new(2590, Currency::BRL), 3);
        let mut cart = Cart::new(Currency::BRL);
        cart.add(&item).unwrap();
        let before = cart.clone();

        prop_assert_eq!(cart.remove(&ItemId::new(id)), CartChange::Unchanged);
        prop_assert_eq!(cart, before);
    }

    /// Property: classify is total and agrees with the threshold rules
    #[test]
    fn test_classify_total(stock in 0..500i64, min in 0..100i64, max in prop::option::of(0..500i64)) {
        let status = classify(stock, min, max);
        if stock <= min {
            prop_assert_eq!(status, StockStatus::Low);
        } else if max.is_some_and(|m| stock >= m) {
            prop_assert_eq!(status, StockStatus::High);
        } else {
            prop_assert_eq!(status, StockStatus::Normal);
        }
    }
}
