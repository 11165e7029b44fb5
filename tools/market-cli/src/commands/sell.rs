//! Point-of-sale command.

use anyhow::{bail, Context as _, Result};
use dialoguer::Select;
use market_core::cart::CartChange;
use market_core::checkout::PaymentMethod;
use market_core::pos::PointOfSale;
use market_core::records::SaleRecord;
use market_core::{ItemId, MarketError};
use serde::Serialize;
use tracing::debug;

use super::SellArgs;
use crate::context::Context;
use crate::output::format_timestamp;

/// One cart action from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum CartAction {
    /// `ID`: one more unit.
    Add(ItemId),
    /// `ID=QTY`: exact quantity.
    Set(ItemId, i64),
}

impl CartAction {
    fn parse(token: &str) -> Result<Self> {
        match token.split_once('=') {
            Some((id, qty)) => {
                let qty = qty
                    .trim()
                    .parse()
                    .with_context(|| format!("Invalid quantity in '{}'", token))?;
                Ok(CartAction::Set(ItemId::new(id.trim()), qty))
            }
            None if token.trim().is_empty() => bail!("Empty cart action"),
            None => Ok(CartAction::Add(ItemId::new(token.trim()))),
        }
    }
}

#[derive(Serialize)]
struct SellReport<'a> {
    sale: &'a SaleRecord,
    rejected: &'a [String],
}

/// Run the sell command.
pub fn run(args: SellArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.store()?;
    let actions = args
        .actions
        .iter()
        .map(|t| CartAction::parse(t))
        .collect::<Result<Vec<_>>>()?;

    let mut pos = PointOfSale::new(store.catalog);
    let mut rejected = Vec::new();

    for action in &actions {
        if let Err(e) = apply(&mut pos, action, ctx) {
            ctx.output.warn(&format!("{} ({})", e, e.code()));
            rejected.push(e.to_string());
        }
    }

    show_cart(&pos, ctx)?;

    if args.dry_run {
        ctx.output.info("Dry run: cart not checked out.");
        return Ok(());
    }

    let payment = match args.payment.as_deref() {
        Some(method) => Some(method.parse::<PaymentMethod>()?),
        None if !pos.cart().is_empty() && ctx.output.is_interactive() => Some(prompt_payment()?),
        None => None,
    };
    pos.select_payment(payment);

    let summary = pos.checkout()?;
    let record = SaleRecord::from_summary(&store.sales, &summary, &store.operator);
    store.sales.insert(record.clone())?;
    debug!(sale = %record.id, "sale added to this run's history");

    if ctx.output.is_json() {
        ctx.output.json(&SellReport {
            sale: &record,
            rejected: &rejected,
        });
        return Ok(());
    }

    ctx.output.success(&format!(
        "Sale {} completed: {} paid by {}",
        record.id,
        summary.total.display(),
        summary.payment_method.display_name()
    ));
    ctx.output.kv("Items", &summary.item_count.to_string());
    ctx.output.kv("Operator", &record.operator);
    ctx.output.kv("Time", &format_timestamp(record.timestamp));

    Ok(())
}

/// Apply one action. `ID=QTY` on an item not yet in the cart adds it first
/// and rolls the add back if the quantity is rejected.
fn apply(pos: &mut PointOfSale, action: &CartAction, ctx: &Context) -> Result<(), MarketError> {
    let change = match action {
        CartAction::Add(id) => pos.add_to_cart(id)?,
        CartAction::Set(id, qty) if *qty > 0 && pos.cart().get(id).is_none() => {
            // Checked up front so the error carries the requested quantity
            // rather than the single unit of the internal add.
            if let Some(item) = pos.catalog().get(id) {
                if *qty > item.available_stock {
                    return Err(MarketError::InsufficientStock {
                        item_id: id.to_string(),
                        requested: *qty,
                        available: item.available_stock,
                    });
                }
            }
            if pos.add_to_cart(id)? == CartChange::Unchanged {
                CartChange::Unchanged
            } else {
                match pos.set_quantity(id, *qty) {
                    Ok(_) => CartChange::Added { quantity: *qty },
                    Err(e) => {
                        pos.remove_from_cart(id);
                        return Err(e);
                    }
                }
            }
        }
        CartAction::Set(id, qty) => pos.set_quantity(id, *qty)?,
    };

    let id = match action {
        CartAction::Add(id) | CartAction::Set(id, _) => id,
    };
    match change {
        CartChange::Added { quantity } | CartChange::Updated { quantity } => {
            ctx.output.debug(&format!("{} x{}", id, quantity))
        }
        CartChange::Removed => ctx.output.debug(&format!("{} removed", id)),
        CartChange::Unchanged => ctx.output.warn(&format!("Unknown item: {}", id)),
    }
    Ok(())
}

fn show_cart(pos: &PointOfSale, ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        return Ok(());
    }

    ctx.output.header("Cart");
    if pos.cart().is_empty() {
        ctx.output.info("Cart is empty.");
        return Ok(());
    }

    let widths = [4, 22, 10, 4, 10];
    ctx.output
        .table_header(&["ID", "NAME", "PRICE", "QTY", "SUBTOTAL"], &widths);
    let totals = pos.totals()?;
    for (line, total) in pos.cart().lines().iter().zip(&totals.lines) {
        ctx.output.table_row(
            &[
                line.item_id.as_str(),
                &line.name,
                &line.unit_price.display(),
                &line.quantity.to_string(),
                &total.subtotal.display(),
            ],
            &widths,
        );
    }
    ctx.output.info("");
    ctx.output.kv("Items", &totals.item_count.to_string());
    ctx.output.kv("Total", &totals.total.display());

    Ok(())
}

fn prompt_payment() -> Result<PaymentMethod> {
    let items: Vec<&str> = PaymentMethod::ALL.iter().map(|m| m.display_name()).collect();
    let selection = Select::new()
        .with_prompt("Payment method")
        .items(&items)
        .default(0)
        .interact()?;
    Ok(PaymentMethod::ALL[selection])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MarketConfig;
    use crate::output::Output;
    use market_core::catalog::{Catalog, CatalogItem};
    use market_core::{Currency, Money};

    fn context() -> Context {
        Context {
            config: MarketConfig::default(),
            config_path: None,
            output: Output::new(false, true),
            cwd: std::env::temp_dir(),
        }
    }

    fn pos() -> PointOfSale {
        let catalog = Catalog::from_items(
            Currency::BRL,
            vec![
                CatalogItem::new("1", "Brown Rice 5kg", Money::new(2590, Currency::BRL), 2),
                CatalogItem::new("5", "Sugar 1kg", Money::new(450, Currency::BRL), 0),
            ],
        )
        .unwrap();
        PointOfSale::new(catalog)
    }

    fn set(pos: &mut PointOfSale, token: &str) -> Result<(), MarketError> {
        let ctx = context();
        apply(pos, &CartAction::parse(token).unwrap(), &ctx)
    }

    #[test]
    fn test_set_over_stock_leaves_cart_empty() {
        let mut pos = pos();
        let err = set(&mut pos, "1=5").unwrap_err();
        assert!(matches!(
            err,
            MarketError::InsufficientStock {
                requested: 5,
                available: 2,
                ..
            }
        ));
        assert!(pos.cart().is_empty());
    }

    #[test]
    fn test_set_creates_line() {
        let mut pos = pos();
        set(&mut pos, "1=2").unwrap();
        assert_eq!(pos.cart().quantity_of(&ItemId::new("1")), 2);
        assert_eq!(pos.cart().len(), 1);
    }

    #[test]
    fn test_set_unknown_item_is_noop() {
        let mut pos = pos();
        set(&mut pos, "1=1").unwrap();
        let before = pos.cart().clone();
        set(&mut pos, "404=3").unwrap();
        assert_eq!(pos.cart(), &before);
    }

    #[test]
    fn test_set_out_of_stock_reports_requested_quantity() {
        let mut pos = pos();
        let err = set(&mut pos, "5=3").unwrap_err();
        assert!(matches!(
            err,
            MarketError::InsufficientStock {
                requested: 3,
                available: 0,
                ..
            }
        ));
        assert!(pos.cart().is_empty());
    }

    #[test]
    fn test_parse_actions() {
        assert_eq!(
            CartAction::parse("1").unwrap(),
            CartAction::Add(ItemId::new("1"))
        );
        assert_eq!(
            CartAction::parse("3=4").unwrap(),
            CartAction::Set(ItemId::new("3"), 4)
        );
        assert_eq!(
            CartAction::parse("3=0").unwrap(),
            CartAction::Set(ItemId::new("3"), 0)
        );
        assert!(CartAction::parse("3=lots").is_err());
        assert!(CartAction::parse(" ").is_err());
    }
}
