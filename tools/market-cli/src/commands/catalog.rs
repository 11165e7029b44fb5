//! Catalog listing.

use anyhow::Result;
use market_core::search::CatalogQuery;

use super::CatalogArgs;
use crate::context::Context;
use crate::output::status_badge;

const WIDTHS: [usize; 7] = [4, 22, 14, 10, 10, 6, 12];

/// Run the catalog command.
pub fn run(args: CatalogArgs, ctx: &Context) -> Result<()> {
    let store = ctx.store()?;
    let filter = CatalogQuery::new()
        .with_text(&args.query)
        .with_category_selection(args.category)
        .with_status(args.status)
        .to_filter();
    let items: Vec<_> = store.catalog.search(&filter).collect();

    if ctx.output.is_json() {
        ctx.output.json(&items);
        return Ok(());
    }

    ctx.output.header(&format!("{} catalog", store.name));
    if items.is_empty() {
        ctx.output.info("No items match.");
        return Ok(());
    }

    ctx.output.table_header(
        &["ID", "NAME", "BARCODE", "CATEGORY", "PRICE", "STOCK", "LEVEL"],
        &WIDTHS,
    );
    for item in &items {
        let level = if item.status.is_active() {
            status_badge(item.stock_level().as_str())
        } else {
            status_badge(item.status.as_str())
        };
        ctx.output.table_row(
            &[
                item.id.as_str(),
                &item.name,
                &item.barcode,
                &item.category,
                &item.unit_price.display(),
                &item.available_stock.to_string(),
                &level,
            ],
            &WIDTHS,
        );
    }

    ctx.output.info("");
    ctx.output.info(&format!(
        "{} of {} item(s); categories: {}",
        items.len(),
        store.catalog.len(),
        store.catalog.category_names().join(", ")
    ));

    Ok(())
}
