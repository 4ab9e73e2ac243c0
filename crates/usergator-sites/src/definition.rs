//! Site entry types.

use crate::error::{Result, SiteError};
use serde::{Deserialize, Serialize};
use url::Url;

/// Token in a URL template that is replaced by the username.
pub const USERNAME_PLACEHOLDER: &str = "{u}";

/// Username substituted into templates when checking that they render a valid URL.
const VALIDATION_USERNAME: &str = "usergator";

/// A platform and the URL pattern of its public profile pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteEntry {
    /// Human-readable platform name, unique within a registry
    pub name: String,

    /// Profile URL with exactly one `{u}` placeholder (e.g., `https://github.com/{u}`)
    pub url_template: String,
}

impl SiteEntry {
    /// Create a new site entry. The entry is not validated until it joins a registry.
    #[must_use]
    pub fn new(name: impl Into<String>, url_template: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url_template: url_template.into(),
        }
    }

    /// Substitute `username` into the template.
    ///
    /// The username is inserted verbatim, without URL escaping.
    #[must_use]
    pub fn render(&self, username: &str) -> String {
        self.url_template.replacen(USERNAME_PLACEHOLDER, username, 1)
    }

    /// Validate the entry for completeness and correctness.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(SiteError::ValidationError {
                site: self.name.clone(),
                reason: "site name cannot be empty".to_string(),
            });
        }

        let placeholders = self.url_template.matches(USERNAME_PLACEHOLDER).count();
        if placeholders != 1 {
            return Err(SiteError::ValidationError {
                site: self.name.clone(),
                reason: format!(
                    "URL template must contain exactly one {USERNAME_PLACEHOLDER} placeholder, found {placeholders}"
                ),
            });
        }

        let rendered = self.render(VALIDATION_USERNAME);
        let url = Url::parse(&rendered).map_err(|e| SiteError::ValidationError {
            site: self.name.clone(),
            reason: format!("URL template does not render an absolute URL: {e}"),
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(SiteError::ValidationError {
                site: self.name.clone(),
                reason: format!("URL scheme must be http or https, got {}", url.scheme()),
            });
        }

        if url.host_str().is_none() {
            return Err(SiteError::ValidationError {
                site: self.name.clone(),
                reason: "URL template has no host".to_string(),
            });
        }

        Ok(())
    }
}
