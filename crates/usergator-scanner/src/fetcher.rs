//! HTTP fetching for profile probes.
//!
//! The engine talks to the network through [`ProfileFetcher`] so that the
//! transport can be swapped out. [`HttpFetcher`] is the reqwest-backed
//! implementation used in production.

use crate::error::Result;
use async_trait::async_trait;
use reqwest::{redirect, Client};
use std::time::Duration;
use thiserror::Error;
use usergator_core::ProbeConfig;

/// A completed HTTP exchange. Only the status and final location are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    /// Status code of the final response
    pub status: u16,
    /// URL of the final response, after following redirects
    pub final_url: String,
}

/// A probe that failed before a status code was obtained.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// No response within the per-request timeout
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// DNS resolution or TCP/TLS connection failed
    #[error("connection failed: {0}")]
    Connect(String),

    /// The redirect chain was too long or looped
    #[error("redirect failed: {0}")]
    Redirect(String),

    /// Any other transport or protocol failure
    #[error("request failed: {0}")]
    Request(String),
}

/// Issues a single GET against a profile URL.
#[async_trait]
pub trait ProfileFetcher: Send + Sync {
    /// Fetch `url`, following redirects, giving up after `timeout`.
    ///
    /// Any status code, including 4xx and 5xx, is a successful fetch.
    async fn fetch(
        &self,
        url: &str,
        timeout: Duration,
    ) -> std::result::Result<FetchResponse, FetchError>;
}

/// reqwest-backed fetcher sharing one connection pool across all probes.
///
/// The client carries no timeout of its own; each request is bounded by the
/// timeout passed to [`ProfileFetcher::fetch`].
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build a fetcher from probe settings.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new(config: &ProbeConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .redirect(redirect::Policy::limited(config.max_redirects))
            .pool_max_idle_per_host(config.concurrency)
            .build()?;

        Ok(Self { client })
    }

    /// Wrap an existing client.
    #[must_use]
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

fn map_error(error: &reqwest::Error, timeout: Duration) -> FetchError {
    let message = error_chain(error);

    if error.is_timeout() {
        FetchError::Timeout(timeout)
    } else if error.is_redirect() {
        FetchError::Redirect(message)
    } else if error.is_connect() {
        FetchError::Connect(message)
    } else {
        FetchError::Request(message)
    }
}

#[async_trait]
impl ProfileFetcher for HttpFetcher {
    async fn fetch(
        &self,
        url: &str,
        timeout: Duration,
    ) -> std::result::Result<FetchResponse, FetchError> {
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| map_error(&e, timeout))?;

        // The body is never read; dropping the response releases the connection.
        Ok(FetchResponse {
            status: response.status().as_u16(),
            final_url: response.url().to_string(),
        })
    }
}

/// Render an error and all of its sources as one line.
fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();

    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !message.contains(&cause_text) {
            message.push_str(": ");
            message.push_str(&cause_text);
        }
        source = cause.source();
    }

    message
}
