//! Market CLI - point of sale and back office for a small grocery store.
//!
//! Commands:
//! - `market catalog` - Search the product catalog
//! - `market stock` - Inventory levels, alerts and adjustments
//! - `market sell` - Ring up a sale
//! - `market sales` - Sales history
//! - `market customers` - Customer registry
//! - `market suppliers` - Supplier registry
//! - `market categories` - Product categories
//! - `market dashboard` - Store overview
//! - `market config` - Manage configuration

mod commands;
mod config;
mod context;
mod demo;
mod logging;
mod output;
mod store;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{
    CatalogArgs, ConfigArgs, DashboardArgs, ListArgs, SalesArgs, SellArgs, StockArgs,
};

/// Market CLI - Run the store from the terminal
#[derive(Parser)]
#[command(name = "market")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the product catalog
    Catalog(CatalogArgs),

    /// Show inventory levels, alerts and adjustments
    Stock(StockArgs),

    /// Build a cart and check it out
    Sell(SellArgs),

    /// Browse the sales history
    Sales(SalesArgs),

    /// List customers
    Customers(ListArgs),

    /// List suppliers
    Suppliers(ListArgs),

    /// List product categories
    Categories(ListArgs),

    /// Show the store overview
    Dashboard(DashboardArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, output)?;

    logging::init(&ctx.config.logging, ctx.output.is_verbose());

    // Execute command
    let result = match cli.command {
        Commands::Catalog(args) => commands::catalog::run(args, &ctx),
        Commands::Stock(args) => commands::stock::run(args, &ctx),
        Commands::Sell(args) => commands::sell::run(args, &ctx),
        Commands::Sales(args) => commands::sales::run(args, &ctx),
        Commands::Customers(args) => commands::customers::run(args, &ctx),
        Commands::Suppliers(args) => commands::suppliers::run(args, &ctx),
        Commands::Categories(args) => commands::categories::run(args, &ctx),
        Commands::Dashboard(args) => commands::dashboard::run(args, &ctx),
        Commands::Config(args) => commands::config::run(args, &ctx),
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
