//! Site list loading from TOML files.
//!
//! A site list replaces the built-in table. Its shape is fixed:
//!
//! ```toml
//! [[sites]]
//! name = "GitHub"
//! url_template = "https://github.com/{u}"
//! ```

use crate::{
    definition::SiteEntry,
    error::{Result, SiteError},
    registry::SiteRegistry,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// On-disk shape of a site list.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SiteList {
    #[serde(default)]
    sites: Vec<SiteEntry>,
}

/// Loader for site lists stored as TOML files.
pub struct SiteLoader {
    /// Path to the site list
    path: PathBuf,
}

impl SiteLoader {
    /// Create a new loader for the given file.
    ///
    /// # Errors
    /// Returns error if the file doesn't exist.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if !path.is_file() {
            return Err(SiteError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        Ok(Self { path })
    }

    /// Path this loader reads from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read, parse and validate the site list.
    ///
    /// Unlike a directory of definitions, a site list is all-or-nothing: one
    /// invalid entry fails the whole load.
    pub fn load(&self) -> Result<SiteRegistry> {
        let contents = std::fs::read_to_string(&self.path).map_err(|e| SiteError::LoadError {
            path: self.path.display().to_string(),
            source: e,
        })?;

        let registry = Self::parse(&contents, &self.path)?;

        info!(
            count = registry.len(),
            path = %self.path.display(),
            "loaded site list"
        );

        Ok(registry)
    }

    /// Parse site list TOML. `origin` is only used in error messages.
    pub fn parse(contents: &str, origin: &Path) -> Result<SiteRegistry> {
        let list: SiteList = toml::from_str(contents).map_err(|e| SiteError::ParseError {
            path: origin.display().to_string(),
            source: e,
        })?;

        SiteRegistry::from_entries(list.sites)
    }
}
