//! Store overview.

use anyhow::Result;
use market_core::report::DashboardMetrics;

use super::DashboardArgs;
use crate::context::Context;
use crate::output::{format_timestamp, status_badge};

/// Run the dashboard command.
pub fn run(args: DashboardArgs, ctx: &Context) -> Result<()> {
    let store = ctx.store()?;
    let metrics = DashboardMetrics::collect(
        &store.catalog,
        &store.sales,
        &store.customers,
        args.recent,
    )?;

    if ctx.output.is_json() {
        ctx.output.json(&metrics);
        return Ok(());
    }

    ctx.output.header(&format!("{} overview", store.name));

    let catalog = &metrics.catalog;
    ctx.output.kv(
        "Items",
        &format!("{} ({} active)", catalog.total_items, catalog.active_items),
    );
    ctx.output.kv(
        "Stock alerts",
        &format!(
            "{} low, {} out of stock",
            catalog.low_stock, catalog.out_of_stock
        ),
    );
    ctx.output.kv("Stock at retail", &catalog.retail_value.display());
    ctx.output.kv("Stock at cost", &catalog.cost_value.display());
    if let Some(margin) = catalog.potential_margin() {
        ctx.output.kv("Potential margin", &margin.display());
    }

    let sales = &metrics.sales;
    ctx.output.kv("Revenue", &sales.revenue.display());
    ctx.output.kv(
        "Sales",
        &format!("{} completed, {} cancelled", sales.completed, sales.cancelled),
    );
    ctx.output.kv("Average ticket", &sales.average_ticket.display());

    let customers = &metrics.customers;
    ctx.output.kv(
        "Customers",
        &format!("{} ({} active)", customers.total, customers.active),
    );

    ctx.output.header("Low stock");
    if metrics.low_stock.is_empty() {
        ctx.output.success("Every item is above its minimum.");
    }
    for need in &metrics.low_stock {
        ctx.output.list_item(&format!(
            "{} {}: {} left, reorder {}",
            need.item_id, need.name, need.current, need.reorder
        ));
    }

    ctx.output.header("Recent sales");
    if metrics.recent_sales.is_empty() {
        ctx.output.info("No sales yet.");
    }
    for sale in &metrics.recent_sales {
        ctx.output.list_item(&format!(
            "{} {} {} {} ({})",
            sale.id,
            format_timestamp(sale.timestamp),
            sale.total.display(),
            sale.payment_method.display_name(),
            status_badge(sale.status.as_str())
        ));
    }

    Ok(())
}
