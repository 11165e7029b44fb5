//! Inventory commands.

use anyhow::{bail, Result};
use market_core::catalog::MovementKind;
use market_core::search::CatalogQuery;
use market_core::ItemId;

use super::{StockArgs, StockCommand};
use crate::context::Context;
use crate::output::{format_date, status_badge};

/// Run the stock command.
pub fn run(args: StockArgs, ctx: &Context) -> Result<()> {
    match args.command {
        Some(StockCommand::Alerts) => alerts(ctx),
        Some(StockCommand::Adjust { ref id, delta }) => adjust(id, delta, ctx),
        None => list(&args, ctx),
    }
}

fn list(args: &StockArgs, ctx: &Context) -> Result<()> {
    let store = ctx.store()?;
    let filter = CatalogQuery::new()
        .with_text(&args.query)
        .with_category_selection(args.category.clone())
        .with_stock(args.level.clone())
        .to_filter();
    let items: Vec<_> = store.catalog.search(&filter).collect();

    if ctx.output.is_json() {
        ctx.output.json(&items);
        return Ok(());
    }

    ctx.output.header("Inventory");
    if items.is_empty() {
        ctx.output.info("No items match.");
        return Ok(());
    }

    let widths = [4, 22, 10, 6, 5, 5, 8, 12];
    ctx.output.table_header(
        &["ID", "NAME", "CATEGORY", "STOCK", "MIN", "MAX", "STATUS", "LAST MOVE"],
        &widths,
    );
    for item in &items {
        let max = item
            .max_stock
            .map(|m| m.to_string())
            .unwrap_or_else(|| "-".to_string());
        ctx.output.table_row(
            &[
                item.id.as_str(),
                &item.name,
                &item.category,
                &item.available_stock.to_string(),
                &item.min_stock.to_string(),
                &max,
                &status_badge(item.stock_status().as_str()),
                &format_date(item.last_movement),
            ],
            &widths,
        );
    }

    Ok(())
}

fn alerts(ctx: &Context) -> Result<()> {
    let store = ctx.store()?;
    let needs = store.catalog.replenishment();

    if ctx.output.is_json() {
        ctx.output.json(&needs);
        return Ok(());
    }

    ctx.output.header("Low stock");
    if needs.is_empty() {
        ctx.output.success("Every item is above its minimum.");
        return Ok(());
    }

    let widths = [4, 22, 10, 8, 8, 8];
    ctx.output.table_header(
        &["ID", "NAME", "CATEGORY", "CURRENT", "MINIMUM", "REORDER"],
        &widths,
    );
    for need in &needs {
        ctx.output.table_row(
            &[
                need.item_id.as_str(),
                &need.name,
                &need.category,
                &need.current.to_string(),
                &need.minimum.to_string(),
                &need.reorder.to_string(),
            ],
            &widths,
        );
    }
    ctx.output.info("");
    ctx.output
        .warn(&format!("{} item(s) need replenishment", needs.len()));

    Ok(())
}

fn adjust(id: &str, delta: i64, ctx: &Context) -> Result<()> {
    let mut store = ctx.store()?;
    let id = ItemId::new(id);

    let Some(movement) = store.catalog.adjust_stock(&id, delta) else {
        bail!("Unknown item: {}", id);
    };

    if ctx.output.is_json() {
        ctx.output.json(&movement);
        return Ok(());
    }

    let verb = match movement.kind {
        MovementKind::Inbound => "Added",
        MovementKind::Outbound => "Removed",
    };
    ctx.output.success(&format!(
        "{} {} unit(s) of {}: {} -> {}",
        verb, movement.quantity, id, movement.stock_before, movement.stock_after
    ));
    if movement.quantity < delta.abs() {
        ctx.output
            .warn("Stock cannot go below zero; the removal was capped.");
    }
    if let Some(item) = store.catalog.get(&id) {
        ctx.output
            .kv("Status", &status_badge(item.stock_status().as_str()));
    }
    ctx.output
        .debug("Adjustments apply to this run only; edit the config seed to keep them.");

    Ok(())
}
