//! Configuration commands.

use anyhow::{bail, Result};
use serde_json::json;

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::Context;

/// Run the config command.
pub fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show(ctx),
        ConfigCommand::Init { name, force } => init(&name, force, ctx),
        ConfigCommand::Validate => validate(ctx),
    }
}

fn show(ctx: &Context) -> Result<()> {
    let config = &ctx.config;
    let source = ctx
        .config_path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(defaults)".to_string());
    let seed = if config.seed.is_empty() {
        "built-in demo".to_string()
    } else {
        format!(
            "{} items, {} categories, {} customers, {} suppliers, {} sales",
            config.seed.items.len(),
            config.seed.categories.len(),
            config.seed.customers.len(),
            config.seed.suppliers.len(),
            config.seed.sales.len()
        )
    };

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "path": ctx.config_path,
            "store": config.store,
            "stock": config.stock,
            "logging": config.logging,
            "seed": seed,
        }));
        return Ok(());
    }

    ctx.output.header("Configuration");
    ctx.output.kv("Source", &source);
    ctx.output.kv("Store", &config.store.name);
    ctx.output.kv("Currency", &config.store.currency);
    ctx.output.kv("Operator", &config.store.operator);
    ctx.output
        .kv("Default min stock", &config.stock.min_stock.to_string());
    ctx.output.kv(
        "Default max stock",
        &config
            .stock
            .max_stock
            .map(|m| m.to_string())
            .unwrap_or_else(|| "-".to_string()),
    );
    ctx.output.kv(
        "Logging",
        &format!("{} ({:?})", config.logging.level, config.logging.format),
    );
    ctx.output.kv("Seed", &seed);

    Ok(())
}

fn init(name: &str, force: bool, ctx: &Context) -> Result<()> {
    let path = ctx.cwd.join("market.toml");

    if path.exists() && !force {
        bail!(
            "{} already exists. Use --force to overwrite.",
            path.display()
        );
    }

    std::fs::write(&path, generate_default_config(name))?;
    ctx.output
        .success(&format!("Created {}", path.display()));
    ctx.output.info("Edit the [seed] tables to load your own data.");

    Ok(())
}

fn validate(ctx: &Context) -> Result<()> {
    let store = ctx.store()?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "valid": true,
            "items": store.catalog.len(),
            "categories": store.categories.len(),
            "customers": store.customers.len(),
            "suppliers": store.suppliers.len(),
            "sales": store.sales.len(),
        }));
        return Ok(());
    }

    ctx.output.success("Configuration is valid");
    ctx.output.kv("Currency", store.currency().code());
    ctx.output.kv("Items", &store.catalog.len().to_string());
    ctx.output.kv("Sales", &store.sales.len().to_string());

    Ok(())
}
