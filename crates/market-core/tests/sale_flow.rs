//! End-to-end counter flow: search, fill the cart, check out, record.

use market_core::prelude::*;

fn brl(cents: i64) -> Money {
    Money::new(cents, Currency::BRL)
}

fn store() -> Catalog {
    Catalog::from_items(
        Currency::BRL,
        vec![
            CatalogItem::new("1", "Rice 5kg", brl(2590), 2)
                .with_barcode("7891234567890")
                .with_category("Grains")
                .with_thresholds(StockThresholds::new(1, None)),
            CatalogItem::new("2", "Black Beans 1kg", brl(850), 5)
                .with_barcode("7891234567891")
                .with_category("Grains")
                .with_thresholds(StockThresholds::new(15, Some(80))),
            CatalogItem::new("3", "Cola 2L", brl(750), 60)
                .with_barcode("7891234567892")
                .with_category("Drinks")
                .with_thresholds(StockThresholds::new(10, Some(40))),
        ],
    )
    .unwrap()
}

#[test]
fn test_rice_stock_bound() {
    let mut pos = PointOfSale::new(store());
    let rice = ItemId::new("1");

    assert_eq!(pos.add_to_cart(&rice).unwrap(), CartChange::Added { quantity: 1 });
    assert_eq!(pos.add_to_cart(&rice).unwrap(), CartChange::Updated { quantity: 2 });

    let totals = pos.totals().unwrap();
    assert_eq!(pos.cart().len(), 1);
    assert_eq!(totals.item_count, 2);
    assert_eq!(totals.total.display(), "R$51.80");

    let before = pos.cart().clone();
    let err = pos.add_to_cart(&rice).unwrap_err();
    assert!(matches!(err, MarketError::InsufficientStock { requested: 3, available: 2, .. }));
    assert_eq!(pos.cart(), &before);
}

#[test]
fn test_classify_examples() {
    assert_eq!(classify(5, 10, None), StockStatus::Low);
    assert_eq!(classify(50, 10, Some(40)), StockStatus::High);
    assert_eq!(classify(20, 10, Some(40)), StockStatus::Normal);
}

#[test]
fn test_cash_checkout_empties_cart() {
    let mut pos = PointOfSale::new(store());
    pos.add_to_cart(&ItemId::new("3")).unwrap();
    pos.set_quantity(&ItemId::new("3"), 3).unwrap();
    pos.select_payment(Some(PaymentMethod::Cash));

    let sale = pos.checkout().unwrap();
    assert_eq!(sale.total.amount_cents, 2250);
    assert_eq!(sale.payment_method, PaymentMethod::Cash);
    assert_eq!(pos.cart().item_count(), 0);

    // a second checkout has nothing to sell
    pos.select_payment(Some(PaymentMethod::Cash));
    assert_eq!(pos.checkout(), Err(MarketError::EmptyCart));
}

#[test]
fn test_search_then_sell_then_record() {
    let mut pos = PointOfSale::new(store());

    let filter = CatalogQuery::new().with_category("Grains").to_filter();
    let found: Vec<ItemId> = pos.search(&filter).map(|i| i.id.clone()).collect();
    assert_eq!(found, vec![ItemId::new("1"), ItemId::new("2")]);

    for id in &found {
        pos.add_to_cart(id).unwrap();
    }
    pos.select_payment(Some(PaymentMethod::Card));
    let summary = pos.checkout().unwrap();

    let mut history: Registry<SaleRecord> = Registry::new();
    let record = SaleRecord::from_summary(&history, &summary, "John Silva");
    history.insert(record).unwrap();

    let metrics = DashboardMetrics::collect(pos.catalog(), &history, &Registry::<Customer>::new(), 5)
        .unwrap();
    assert_eq!(metrics.sales.completed, 1);
    assert_eq!(metrics.sales.revenue.amount_cents, 2590 + 850);
    assert_eq!(metrics.recent_sales[0].id.as_str(), "V001");

    // checkout leaves stock alone, so beans are still flagged low
    assert_eq!(metrics.low_stock.len(), 1);
    assert_eq!(metrics.low_stock[0].reorder, 10);
}

#[test]
fn test_inventory_adjustment_feeds_cart_bound() {
    let mut pos = PointOfSale::new(store());
    let rice = ItemId::new("1");

    pos.catalog_mut().adjust_stock(&rice, 1).unwrap();
    for _ in 0..3 {
        pos.add_to_cart(&rice).unwrap();
    }
    assert_eq!(pos.cart().quantity_of(&rice), 3);

    let movement = pos.catalog_mut().adjust_stock(&rice, -10).unwrap();
    assert_eq!(movement.stock_after, 0);
    assert!(pos.add_to_cart(&rice).is_err());
}
