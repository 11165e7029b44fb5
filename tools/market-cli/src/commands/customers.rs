//! Customer listing.

use anyhow::Result;
use market_core::records::Customer;
use market_core::report::CustomerSummary;
use serde::Serialize;

use super::ListArgs;
use crate::context::Context;
use crate::output::{format_date, status_badge};

const WIDTHS: [usize; 7] = [5, 22, 26, 16, 12, 12, 10];

#[derive(Serialize)]
struct CustomerReport<'a> {
    summary: CustomerSummary,
    customers: Vec<&'a Customer>,
}

/// Run the customers command.
pub fn run(args: ListArgs, ctx: &Context) -> Result<()> {
    let store = ctx.store()?;
    let filter = Customer::filter(&args.query, args.status);
    let customers: Vec<&Customer> = store.customers.filter(&filter).collect();
    let summary = CustomerSummary::from_customers(customers.iter().copied(), store.currency())?;

    if ctx.output.is_json() {
        ctx.output.json(&CustomerReport { summary, customers });
        return Ok(());
    }

    ctx.output.header("Customers");
    if customers.is_empty() {
        ctx.output.info("No customers match.");
        return Ok(());
    }

    ctx.output.table_header(
        &["ID", "NAME", "EMAIL", "CITY", "LAST BUY", "PURCHASES", "STATUS"],
        &WIDTHS,
    );
    for customer in &customers {
        let city = if customer.state.is_empty() {
            customer.city.clone()
        } else {
            format!("{}/{}", customer.city, customer.state)
        };
        ctx.output.table_row(
            &[
                customer.id.as_str(),
                &customer.name,
                &customer.email,
                &city,
                &format_date(customer.last_purchase),
                &customer.total_purchases.display(),
                &status_badge(customer.status.as_str()),
            ],
            &WIDTHS,
        );
    }

    ctx.output.info("");
    ctx.output.kv(
        "Active",
        &format!("{} of {}", summary.active, summary.total),
    );
    ctx.output.kv("Purchases", &summary.total_purchases.display());
    ctx.output
        .kv("Average per customer", &summary.average_per_customer.display());

    Ok(())
}
