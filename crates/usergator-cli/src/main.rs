//! usergator CLI
//!
//! Command-line interface for checking whether a username exists on a
//! curated set of public platforms.

mod commands;
mod display;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use usergator_core::AppConfig;

#[derive(Parser)]
#[command(name = "usergator")]
#[command(version, about = "OSINT username footprint investigator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (default: ~/.config/usergator/config.toml)
    #[arg(long, global = true, env = "USERGATOR_CONFIG")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv debug for dependencies too)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// List the site patterns that will be checked
    Sites {
        /// TOML site list replacing the built-in table
        #[arg(long)]
        sites_file: Option<PathBuf>,
    },

    /// Check a username across the site list
    Check {
        /// Username to check
        username: String,

        /// Write results to a JSON file
        #[arg(long, visible_alias = "json")]
        json_out: Option<PathBuf>,

        /// Maximum concurrent requests (1-64)
        #[arg(long)]
        concurrency: Option<usize>,

        /// Per-request timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,

        /// TOML site list replacing the built-in table
        #[arg(long)]
        sites_file: Option<PathBuf>,

        /// Report 4xx/5xx statuses other than 404 as UNKNOWN instead of NOT FOUND
        #[arg(long)]
        strict_status: bool,
    },
}

/// Filter used when `RUST_LOG` is unset.
fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn,usergator=info",
        1 => "warn,usergator=debug",
        _ => "debug",
    }
}

fn init_tracing(verbose: u8) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    match path {
        Some(path) => {
            let mut config = AppConfig::load_from(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?;
            config.apply_env_overrides(|key| std::env::var(key).ok());
            Ok(config)
        }
        None => AppConfig::load_with_env().context("failed to load config"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    tracing::debug!("Starting usergator v{}", env!("CARGO_PKG_VERSION"));

    let mut config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Sites { sites_file } => {
            if sites_file.is_some() {
                config.sites.file = sites_file;
            }
            commands::sites::run(&config)?;
        }
        Commands::Check {
            username,
            json_out,
            concurrency,
            timeout,
            sites_file,
            strict_status,
        } => {
            let options = commands::check::CheckOptions {
                concurrency,
                timeout_secs: timeout,
                sites_file,
                strict_status,
                json_out,
            };
            commands::check::run(&username, options, &mut config).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_check() {
        let cli = Cli::try_parse_from([
            "usergator",
            "check",
            "alice",
            "--concurrency",
            "4",
            "--json",
            "out.json",
            "-vv",
        ])
        .expect("parse check command");

        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Check {
                username,
                concurrency,
                json_out,
                strict_status,
                ..
            } => {
                assert_eq!(username, "alice");
                assert_eq!(concurrency, Some(4));
                assert_eq!(json_out, Some(PathBuf::from("out.json")));
                assert!(!strict_status);
            }
            Commands::Sites { .. } => panic!("expected check command"),
        }
    }

    #[test]
    fn test_default_directive_by_verbosity() {
        assert_eq!(default_directive(0), "warn,usergator=info");
        assert_eq!(default_directive(1), "warn,usergator=debug");
        assert_eq!(default_directive(3), "debug");
    }

    #[test]
    fn test_check_requires_username() {
        assert!(Cli::try_parse_from(["usergator", "check"]).is_err());
    }
}
