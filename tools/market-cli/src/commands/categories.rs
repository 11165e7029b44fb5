//! Category listing.

use anyhow::Result;
use market_core::catalog::Category;
use serde::Serialize;

use super::ListArgs;
use crate::context::Context;
use crate::output::status_badge;

#[derive(Serialize)]
struct CategoryRow<'a> {
    #[serde(flatten)]
    category: &'a Category,
    items: usize,
}

/// Run the categories command.
pub fn run(args: ListArgs, ctx: &Context) -> Result<()> {
    let store = ctx.store()?;
    let filter = Category::filter(&args.query, args.status);
    let rows: Vec<CategoryRow> = store
        .categories
        .filter(&filter)
        .map(|category| CategoryRow {
            category,
            items: store
                .catalog
                .iter()
                .filter(|item| item.category == category.name)
                .count(),
        })
        .collect();

    if ctx.output.is_json() {
        ctx.output.json(&rows);
        return Ok(());
    }

    ctx.output.header("Categories");
    if rows.is_empty() {
        ctx.output.info("No categories match.");
        return Ok(());
    }

    let widths = [5, 16, 32, 6, 10];
    ctx.output
        .table_header(&["ID", "NAME", "DESCRIPTION", "ITEMS", "STATUS"], &widths);
    for row in &rows {
        ctx.output.table_row(
            &[
                row.category.id.as_str(),
                &row.category.name,
                row.category.description.as_deref().unwrap_or("-"),
                &row.items.to_string(),
                &status_badge(row.category.status.as_str()),
            ],
            &widths,
        );
    }

    Ok(())
}
