//! Command implementations.

pub mod check;
pub mod sites;

use anyhow::{Context, Result};
use usergator_core::AppConfig;
use usergator_sites::{SiteLoader, SiteRegistry};

/// Load the site list named in the config, or the built-in table.
pub fn load_registry(config: &AppConfig) -> Result<SiteRegistry> {
    match &config.sites.file {
        Some(path) => {
            let loader = SiteLoader::new(path)?;
            loader
                .load()
                .with_context(|| format!("failed to load site list {}", path.display()))
        }
        None => SiteRegistry::builtin().context("built-in site table is invalid"),
    }
}
