//! Usergator Scanner - Bounded-concurrency username probing.
//!
//! This crate checks a username against every site of a [`SiteRegistry`] by
//! issuing one HTTP GET per site, classifying each response status as a
//! presence signal, and returning one outcome per site in registry order.
//!
//! # Features
//!
//! - Concurrent probing with a hard cap on in-flight requests
//! - Per-request timeouts that only affect the probe they belong to
//! - Per-site failures reported as `Unknown` outcomes instead of aborting the batch
//! - Optional batch deadline with all-or-nothing semantics
//! - Flat result records for JSON export
//!
//! # Example
//!
//! ```rust,ignore
//! use usergator_core::ProbeConfig;
//! use usergator_scanner::ProbeEngine;
//! use usergator_sites::SiteRegistry;
//!
//! let config = ProbeConfig::default();
//! let registry = SiteRegistry::builtin()?;
//! let engine = ProbeEngine::from_config(&config)?;
//!
//! let outcomes = engine
//!     .probe_all("alice", &registry, config.concurrency, config.timeout())
//!     .await?;
//! ```
//!
//! [`SiteRegistry`]: usergator_sites::SiteRegistry

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod error;
pub mod fetcher;
pub mod orchestrator;
pub mod outcome;
pub mod report;
#[allow(missing_docs)]
pub mod url_builder;

// Re-export commonly used types
pub use error::{ProbeError, Result};
pub use fetcher::{FetchError, FetchResponse, HttpFetcher, ProfileFetcher};
pub use orchestrator::{ProbeEngine, ProgressCallback};
pub use outcome::{classify_status, PresenceState, ProbeOutcome};
pub use report::{to_json, to_records, ProbeSummary, ResultRecord};
pub use url_builder::{build_probe_url, render_request, render_requests, ProbeRequest};
