//! Usergator Core - Foundation crate for the usergator username checker.
//!
//! This crate provides the configuration, error types and shared newtypes that
//! the site registry, the probe engine and the command-line front end depend on.
//!
//! # Modules
//!
//! - [`error`] - Central error types using thiserror
//! - [`config`] - TOML-based configuration with XDG paths
//! - [`types`] - Shared newtypes (`Username`)
//!
//! # Example
//!
//! ```rust
//! use usergator_core::{AppConfig, Username};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::default();
//! assert_eq!(config.probe.concurrency, 8);
//!
//! let username = Username::new("alice")?;
//! assert_eq!(username.as_str(), "alice");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{
    AppConfig, ProbeConfig, SitesConfig, UnexpectedStatus, MAX_CONCURRENCY, MIN_CONCURRENCY,
};
pub use error::{ConfigError, ConfigResult, CoreError, Result};
pub use types::Username;
