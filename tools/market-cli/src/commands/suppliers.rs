//! Supplier listing.

use anyhow::Result;
use market_core::records::Supplier;

use super::ListArgs;
use crate::context::Context;
use crate::output::status_badge;

/// Run the suppliers command.
pub fn run(args: ListArgs, ctx: &Context) -> Result<()> {
    let store = ctx.store()?;
    let filter = Supplier::filter(&args.query, args.status);
    let suppliers: Vec<&Supplier> = store.suppliers.filter(&filter).collect();

    if ctx.output.is_json() {
        ctx.output.json(&suppliers);
        return Ok(());
    }

    ctx.output.header("Suppliers");
    if suppliers.is_empty() {
        ctx.output.info("No suppliers match.");
        return Ok(());
    }

    let widths = [5, 24, 18, 16, 12, 10];
    ctx.output.table_header(
        &["ID", "COMPANY", "CONTACT", "PHONE", "CATEGORY", "STATUS"],
        &widths,
    );
    for supplier in &suppliers {
        ctx.output.table_row(
            &[
                supplier.id.as_str(),
                &supplier.name,
                &supplier.contact,
                &supplier.phone,
                &supplier.category,
                &status_badge(supplier.status.as_str()),
            ],
            &widths,
        );
    }

    Ok(())
}
