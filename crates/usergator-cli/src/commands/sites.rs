//! `usergator sites`

use anyhow::Result;
use usergator_core::AppConfig;

use crate::display;

/// Lists every site and its URL template.
pub fn run(config: &AppConfig) -> Result<()> {
    let registry = super::load_registry(config)?;

    println!();
    display::sites_table(&registry);
    println!("Total: {} site(s)", registry.len());

    Ok(())
}
