//! Ordered, validated site registry.

use crate::{
    definition::SiteEntry,
    error::{Result, SiteError},
};
use std::collections::HashSet;
use tracing::{debug, info};

/// Curated list of public profile URL patterns shipped with usergator.
const BUILTIN_SITES: &[(&str, &str)] = &[
    ("GitHub", "https://github.com/{u}"),
    ("X", "https://x.com/{u}"),
    ("Reddit", "https://www.reddit.com/user/{u}"),
    ("Instagram", "https://www.instagram.com/{u}/"),
    ("TikTok", "https://www.tiktok.com/@{u}"),
    ("LinkedIn (public)", "https://www.linkedin.com/in/{u}/"),
    ("Stack Overflow", "https://stackoverflow.com/users/{u}"),
];

/// Read-only table of sites in a fixed iteration order.
///
/// A registry can only be built through [`SiteRegistry::from_entries`] (or
/// the constructors that delegate to it), so every registry is non-empty,
/// has unique names, and has templates that render valid absolute URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteRegistry {
    entries: Vec<SiteEntry>,
}

impl SiteRegistry {
    /// Load the built-in site table.
    ///
    /// # Errors
    /// Returns error if the built-in table fails validation.
    pub fn builtin() -> Result<Self> {
        let entries = BUILTIN_SITES
            .iter()
            .map(|(name, template)| SiteEntry::new(*name, *template))
            .collect();

        Self::from_entries(entries)
    }

    /// Build a registry from entries, keeping their order.
    ///
    /// # Errors
    /// Returns error if the list is empty, a name repeats, or an entry is invalid.
    pub fn from_entries(entries: Vec<SiteEntry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(SiteError::Empty);
        }

        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            entry.validate()?;

            if !seen.insert(entry.name.as_str()) {
                return Err(SiteError::DuplicateName {
                    site: entry.name.clone(),
                });
            }

            debug!(site = %entry.name, template = %entry.url_template, "registered site");
        }

        info!(count = entries.len(), "loaded site registry");

        Ok(Self { entries })
    }

    /// All entries in registry order.
    #[must_use]
    pub fn entries(&self) -> &[SiteEntry] {
        &self.entries
    }

    /// Iterate over entries in registry order.
    pub fn iter(&self) -> std::slice::Iter<'_, SiteEntry> {
        self.entries.iter()
    }

    /// Look up a site by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&SiteEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// Site names in registry order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|entry| entry.name.as_str()).collect()
    }

    /// Number of sites in the registry.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false` for a constructed registry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a SiteRegistry {
    type Item = &'a SiteEntry;
    type IntoIter = std::slice::Iter<'a, SiteEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
