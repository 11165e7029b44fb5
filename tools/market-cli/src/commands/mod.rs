//! CLI command implementations.

pub mod catalog;
pub mod categories;
pub mod config;
pub mod customers;
pub mod dashboard;
pub mod sales;
pub mod sell;
pub mod stock;
pub mod suppliers;

use clap::{Args, Subcommand};
use market_core::catalog::StockStatus;
use market_core::checkout::PaymentMethod;
use market_core::records::SaleStatus;
use market_core::registry::RecordStatus;
use market_core::search::Selection;

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    /// Text matched against item name and barcode.
    #[arg(default_value = "")]
    pub query: String,

    /// Category name, or "all".
    #[arg(short, long, default_value = "all")]
    pub category: Selection<String>,

    /// active, inactive or all.
    #[arg(short, long, default_value = "all")]
    pub status: Selection<RecordStatus>,
}

/// Arguments for the stock command.
#[derive(Args)]
pub struct StockArgs {
    #[command(subcommand)]
    pub command: Option<StockCommand>,

    /// Text matched against item name and barcode.
    #[arg(default_value = "")]
    pub query: String,

    /// Category name, or "all".
    #[arg(short, long, default_value = "all")]
    pub category: Selection<String>,

    /// low, normal, high or all.
    #[arg(short, long, default_value = "all")]
    pub level: Selection<StockStatus>,
}

#[derive(Subcommand)]
pub enum StockCommand {
    /// List items at or below their minimum, with reorder quantities.
    Alerts,
    /// Add or remove units of an item.
    Adjust {
        /// Item ID.
        id: String,
        /// Units to add (positive) or remove (negative).
        #[arg(allow_hyphen_values = true)]
        delta: i64,
    },
}

/// Arguments for the sell command.
#[derive(Args)]
pub struct SellArgs {
    /// Cart actions, applied in order: `ID` adds one unit, `ID=QTY` sets the
    /// quantity (0 removes the line).
    pub actions: Vec<String>,

    /// Payment method (cash or card). Prompted for when omitted.
    #[arg(short, long)]
    pub payment: Option<String>,

    /// Show the cart without checking out.
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the sales command.
#[derive(Args)]
pub struct SalesArgs {
    /// Text matched against sale ID and operator.
    #[arg(default_value = "")]
    pub query: String,

    /// completed, cancelled or all.
    #[arg(short, long, default_value = "all")]
    pub status: Selection<SaleStatus>,

    /// cash, card or all.
    #[arg(short, long, default_value = "all")]
    pub payment: Selection<PaymentMethod>,

    /// Show only the N most recent matches.
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Arguments for the customers, suppliers and categories commands.
#[derive(Args)]
pub struct ListArgs {
    /// Text query.
    #[arg(default_value = "")]
    pub query: String,

    /// active, inactive or all.
    #[arg(short, long, default_value = "all")]
    pub status: Selection<RecordStatus>,
}

/// Arguments for the dashboard command.
#[derive(Args)]
pub struct DashboardArgs {
    /// Number of recent sales to show.
    #[arg(short, long, default_value = "5")]
    pub recent: usize,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Write a market.toml with the demo seed.
    Init {
        /// Store name.
        #[arg(short, long, default_value = "Market")]
        name: String,

        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Check that the config and its seed load.
    Validate,
}
