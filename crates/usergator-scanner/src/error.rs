//! Error types for the probe engine.
//!
//! Only batch-level failures live here. A single site that cannot be reached
//! is not an error of the batch; it becomes an `Unknown` outcome.

use std::time::Duration;
use thiserror::Error;

/// Errors that abort a whole `probe_all` call.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// Caller-supplied input violates a precondition
    #[error("invalid input for {field}: {reason}")]
    InvalidInput {
        /// Offending parameter
        field: &'static str,
        /// Why it was rejected
        reason: String,
    },

    /// The site registry is missing, empty, or malformed
    #[error("site registry error: {0}")]
    Config(#[from] usergator_sites::SiteError),

    /// The shared HTTP client could not be built
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// The dispatch or collection machinery failed
    #[error("probe engine failure: {0}")]
    Engine(String),

    /// The batch deadline expired before every probe finished
    #[error("probe batch exceeded its deadline of {deadline:?}")]
    DeadlineExceeded {
        /// The configured batch deadline
        deadline: Duration,
    },
}

/// Result type for probe engine operations.
pub type Result<T> = std::result::Result<T, ProbeError>;
