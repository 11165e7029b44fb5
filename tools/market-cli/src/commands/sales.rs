//! Sales history.

use anyhow::Result;
use market_core::records::SaleRecord;
use market_core::report::{recent_sales, SalesSummary};
use serde::Serialize;

use super::SalesArgs;
use crate::context::Context;
use crate::output::{format_timestamp, status_badge};

const WIDTHS: [usize; 7] = [5, 20, 5, 10, 8, 10, 12];

#[derive(Serialize)]
struct SalesReport {
    summary: SalesSummary,
    sales: Vec<SaleRecord>,
}

/// Run the sales command.
pub fn run(args: SalesArgs, ctx: &Context) -> Result<()> {
    let store = ctx.store()?;
    let filter = SaleRecord::filter(&args.query, args.status, args.payment);
    let matches: Vec<&SaleRecord> = store.sales.filter(&filter).collect();

    let summary = SalesSummary::from_sales(matches.iter().copied(), store.currency())?;
    let limit = args.limit.unwrap_or(matches.len());
    let sales = recent_sales(matches, limit);

    if ctx.output.is_json() {
        ctx.output.json(&SalesReport { summary, sales });
        return Ok(());
    }

    ctx.output.header("Sales");
    if sales.is_empty() {
        ctx.output.info("No sales match.");
        return Ok(());
    }

    ctx.output.table_header(
        &["ID", "TIME", "ITEMS", "TOTAL", "PAYMENT", "STATUS", "OPERATOR"],
        &WIDTHS,
    );
    for sale in &sales {
        ctx.output.table_row(
            &[
                sale.id.as_str(),
                &format_timestamp(sale.timestamp),
                &sale.item_count().to_string(),
                &sale.total.display(),
                sale.payment_method.display_name(),
                &status_badge(sale.status.as_str()),
                &sale.operator,
            ],
            &WIDTHS,
        );
    }

    ctx.output.info("");
    ctx.output.kv("Completed", &summary.completed.to_string());
    ctx.output.kv("Cancelled", &summary.cancelled.to_string());
    ctx.output.kv("Revenue", &summary.revenue.display());
    ctx.output.kv("Average ticket", &summary.average_ticket.display());

    Ok(())
}
