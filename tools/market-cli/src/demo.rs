//! Built-in demo data.

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::config::SeedConfig;

/// Demo seed in config-file form, also written out by `market config init`.
pub const DEMO_SEED: &str = include_str!("demo.toml");

#[derive(Deserialize)]
struct DemoFile {
    seed: SeedConfig,
}

/// Parse the demo seed.
pub fn seed() -> Result<SeedConfig> {
    let file: DemoFile = toml::from_str(DEMO_SEED).context("Built-in demo data is malformed")?;
    Ok(file.seed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_seed_parses() {
        let seed = seed().unwrap();
        assert_eq!(seed.categories.len(), 6);
        assert_eq!(seed.items.len(), 8);
        assert_eq!(seed.customers.len(), 4);
        assert_eq!(seed.suppliers.len(), 3);
        assert_eq!(seed.sales.len(), 4);
    }
}
