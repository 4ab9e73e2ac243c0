//! Error types for the site registry.

use thiserror::Error;

/// Errors that can occur while building or loading a site registry.
///
/// All of these are configuration errors: they are raised before any
/// network I/O and are fatal to the whole run.
#[derive(Error, Debug)]
pub enum SiteError {
    /// The registry would contain no sites
    #[error("site registry is empty")]
    Empty,

    /// Invalid site entry (validation failed)
    #[error("invalid site entry {site:?}: {reason}")]
    ValidationError {
        /// Name of the offending site
        site: String,
        /// Reason for validation failure
        reason: String,
    },

    /// Two entries share the same name
    #[error("duplicate site name: {site}")]
    DuplicateName {
        /// The repeated site name
        site: String,
    },

    /// Site list file not found
    #[error("site list not found at {path}")]
    FileNotFound {
        /// Expected file path
        path: String,
    },

    /// Failed to read a site list file
    #[error("failed to load site list from {path}: {source}")]
    LoadError {
        /// Path to the site list
        path: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse site list TOML
    #[error("failed to parse site list TOML in {path}: {source}")]
    ParseError {
        /// Path to the site list
        path: String,
        /// TOML parse error
        #[source]
        source: toml::de::Error,
    },
}

/// Result type for site registry operations.
pub type Result<T> = std::result::Result<T, SiteError>;
