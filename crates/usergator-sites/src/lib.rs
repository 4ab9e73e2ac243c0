//! Usergator Sites - The registry of platforms a username is checked against.
//!
//! This crate provides the site table consumed by the probe engine. A site is
//! a human-readable platform name plus a profile URL template with a single
//! `{u}` placeholder for the username.
//!
//! # Architecture
//!
//! - **Definition Types** ([`definition`]): `SiteEntry` and placeholder rendering
//! - **Registry** ([`registry`]): Validated, ordered, read-only site table
//! - **Loader** ([`loader`]): TOML site lists that replace the built-in table
//! - **Errors** ([`error`]): Site-specific error types
//!
//! # Example
//!
//! ```rust
//! use usergator_sites::SiteRegistry;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = SiteRegistry::builtin()?;
//!
//! let github = registry.get("GitHub").expect("GitHub is built in");
//! assert_eq!(github.render("alice"), "https://github.com/alice");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod definition;
pub mod error;
pub mod loader;
pub mod registry;

// Re-export commonly used types
pub use definition::{SiteEntry, USERNAME_PLACEHOLDER};
pub use error::{Result, SiteError};
pub use loader::SiteLoader;
pub use registry::SiteRegistry;
