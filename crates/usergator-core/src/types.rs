//! Shared types used across usergator.

use crate::error::CoreError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Newtype for usernames that are safe to substitute into a URL path.
///
/// The probe engine substitutes usernames verbatim, so callers that accept
/// untrusted input go through this type first. Usernames must be 1-100
/// characters with no whitespace, control characters, `/`, `?` or `#`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Create a new `Username` from a string.
    ///
    /// # Errors
    /// Returns error if the username is empty, too long, or contains
    /// characters that would change the structure of a URL.
    pub fn new(username: impl Into<String>) -> Result<Self, CoreError> {
        let username = username.into();
        Self::validate(&username)?;
        Ok(Self(username))
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(username: &str) -> Result<(), CoreError> {
        static USERNAME_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = USERNAME_REGEX
            .get_or_init(|| Regex::new(r"^[^\s\p{Cc}/?#]+$").expect("valid regex"));

        if username.is_empty() {
            return Err(CoreError::Validation(
                "invalid username: cannot be empty".to_string(),
            ));
        }

        let len = username.chars().count();
        if len > 100 {
            return Err(CoreError::Validation(format!(
                "invalid username: must be at most 100 characters, got {len} characters"
            )));
        }

        if regex.is_match(username) {
            Ok(())
        } else {
            Err(CoreError::Validation(format!(
                "invalid username: must not contain whitespace, '/', '?' or '#', got '{username}'"
            )))
        }
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Username {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Username> for String {
    fn from(username: Username) -> Self {
        username.0
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
