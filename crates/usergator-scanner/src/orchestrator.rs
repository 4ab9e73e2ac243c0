//! Probe engine for checking a username across a site registry.
//!
//! This module provides the `ProbeEngine`, which renders one URL per site,
//! probes them concurrently behind an admission gate, and returns one
//! outcome per site in registry order.

use crate::error::{ProbeError, Result};
use crate::fetcher::{FetchError, HttpFetcher, ProfileFetcher};
use crate::outcome::ProbeOutcome;
use crate::report::ProbeSummary;
use crate::url_builder::{render_requests, ProbeRequest};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};
use usergator_core::{ProbeConfig, UnexpectedStatus, MAX_CONCURRENCY, MIN_CONCURRENCY};
use usergator_sites::{SiteError, SiteRegistry};

/// Called once per completed probe, in completion order.
pub type ProgressCallback = Arc<dyn Fn(&ProbeOutcome) + Send + Sync>;

/// Checks a username against every site in a registry.
///
/// One engine holds one fetcher, so every batch it runs shares a single
/// connection pool.
#[derive(Clone)]
pub struct ProbeEngine {
    /// Transport used for every probe
    fetcher: Arc<dyn ProfileFetcher>,
    /// Classification of statuses outside 404 and the success band
    unexpected_status: UnexpectedStatus,
    /// Optional deadline for a whole batch
    overall_deadline: Option<Duration>,
    /// Optional hook notified as probes complete
    progress: Option<ProgressCallback>,
}

impl ProbeEngine {
    /// Create a new engine around a fetcher.
    #[must_use]
    pub fn new(fetcher: Arc<dyn ProfileFetcher>) -> Self {
        Self {
            fetcher,
            unexpected_status: UnexpectedStatus::default(),
            overall_deadline: None,
            progress: None,
        }
    }

    /// Create an engine with an HTTP fetcher built from probe settings.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn from_config(config: &ProbeConfig) -> Result<Self> {
        let fetcher = HttpFetcher::new(config)?;

        let mut engine =
            Self::new(Arc::new(fetcher)).with_unexpected_status(config.unexpected_status);
        if let Some(deadline) = config.overall_deadline() {
            engine = engine.with_overall_deadline(deadline);
        }

        Ok(engine)
    }

    /// Set how statuses outside 404 and `200..400` are classified.
    #[must_use]
    pub fn with_unexpected_status(mut self, policy: UnexpectedStatus) -> Self {
        self.unexpected_status = policy;
        self
    }

    /// Bound the duration of a whole batch.
    ///
    /// When the deadline expires every in-flight probe is cancelled and the
    /// batch fails with [`ProbeError::DeadlineExceeded`]; partial results are
    /// discarded.
    #[must_use]
    pub fn with_overall_deadline(mut self, deadline: Duration) -> Self {
        self.overall_deadline = Some(deadline);
        self
    }

    /// Report each outcome as soon as its probe completes.
    ///
    /// The returned list is still in registry order; only the callback sees
    /// completion order.
    #[must_use]
    pub fn with_progress(mut self, callback: ProgressCallback) -> Self {
        self.progress = Some(callback);
        self
    }

    /// Run [`ProbeEngine::probe_all`] with the concurrency and timeout from `config`.
    pub async fn check(
        &self,
        username: &str,
        registry: &SiteRegistry,
        config: &ProbeConfig,
    ) -> Result<Vec<ProbeOutcome>> {
        self.probe_all(username, registry, config.concurrency, config.timeout())
            .await
    }

    /// Probe every site in `registry` for `username`.
    ///
    /// At most `concurrency_limit` probes are in flight at any time. The
    /// returned outcomes are in registry order, one per site. A site that
    /// cannot be reached yields an `Unknown` outcome and never affects the
    /// other probes.
    ///
    /// # Errors
    /// - [`ProbeError::InvalidInput`] for an empty username, a concurrency
    ///   limit outside 1-64, or a zero timeout
    /// - [`ProbeError::Config`] for an empty registry
    /// - [`ProbeError::Engine`] if a probe task panics or an outcome goes missing
    /// - [`ProbeError::DeadlineExceeded`] if a batch deadline is set and expires
    pub async fn probe_all(
        &self,
        username: &str,
        registry: &SiteRegistry,
        concurrency_limit: usize,
        per_request_timeout: Duration,
    ) -> Result<Vec<ProbeOutcome>> {
        validate_inputs(username, registry, concurrency_limit, per_request_timeout)?;

        let requests = render_requests(username, registry);
        let started = Instant::now();

        info!(
            sites = requests.len(),
            concurrency = concurrency_limit,
            timeout = ?per_request_timeout,
            "starting probe batch"
        );

        let outcomes = match self.overall_deadline {
            Some(deadline) => tokio::time::timeout(
                deadline,
                self.dispatch(requests, concurrency_limit, per_request_timeout),
            )
            .await
            .map_err(|_| {
                warn!(deadline = ?deadline, "probe batch exceeded its deadline");
                ProbeError::DeadlineExceeded { deadline }
            })??,
            None => {
                self.dispatch(requests, concurrency_limit, per_request_timeout)
                    .await?
            }
        };

        let summary = ProbeSummary::from_outcomes(&outcomes);
        info!(
            sites = outcomes.len(),
            present = summary.present,
            absent = summary.absent,
            unknown = summary.unknown,
            elapsed = ?started.elapsed(),
            "probe batch completed"
        );

        Ok(outcomes)
    }

    /// Spawn one task per request behind a semaphore and collect the outcomes
    /// back into request order.
    ///
    /// Dropping the returned future aborts every task still in the `JoinSet`.
    async fn dispatch(
        &self,
        requests: Vec<ProbeRequest>,
        concurrency_limit: usize,
        per_request_timeout: Duration,
    ) -> Result<Vec<ProbeOutcome>> {
        let gate = Arc::new(Semaphore::new(concurrency_limit));
        let mut tasks = JoinSet::new();
        let total = requests.len();

        for (index, request) in requests.into_iter().enumerate() {
            let gate = Arc::clone(&gate);
            let fetcher = Arc::clone(&self.fetcher);
            let policy = self.unexpected_status;

            tasks.spawn(async move {
                // Released when the task ends, whatever the probe's result.
                let _permit = gate
                    .acquire_owned()
                    .await
                    .map_err(|e| ProbeError::Engine(format!("admission gate closed: {e}")))?;

                let outcome =
                    probe_one(fetcher.as_ref(), request, per_request_timeout, policy).await;
                Ok::<_, ProbeError>((index, outcome))
            });
        }

        let mut slots: Vec<Option<ProbeOutcome>> = (0..total).map(|_| None).collect();

        while let Some(joined) = tasks.join_next().await {
            let (index, outcome) = joined
                .map_err(|e| ProbeError::Engine(format!("probe task failed: {e}")))??;

            let slot = slots.get_mut(index).ok_or_else(|| {
                ProbeError::Engine(format!("probe index {index} out of range for {total} sites"))
            })?;
            if let Some(progress) = &self.progress {
                progress(&outcome);
            }
            *slot = Some(outcome);
        }

        slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| {
                slot.ok_or_else(|| {
                    ProbeError::Engine(format!("no outcome recorded for probe {index}"))
                })
            })
            .collect()
    }
}

/// Probe a single site, converting every failure into an `Unknown` outcome.
async fn probe_one(
    fetcher: &dyn ProfileFetcher,
    request: ProbeRequest,
    per_request_timeout: Duration,
    policy: UnexpectedStatus,
) -> ProbeOutcome {
    debug!(site = %request.site_name, url = %request.resolved_url, "probing site");

    let result = tokio::time::timeout(
        per_request_timeout,
        fetcher.fetch(&request.resolved_url, per_request_timeout),
    )
    .await
    .unwrap_or(Err(FetchError::Timeout(per_request_timeout)));

    match result {
        Ok(response) => {
            debug!(
                site = %request.site_name,
                status = response.status,
                final_url = %response.final_url,
                "probe completed"
            );
            ProbeOutcome::from_response(request, response, policy)
        }
        Err(e) => {
            warn!(site = %request.site_name, error = %e, "probe failed");
            ProbeOutcome::from_error(request, &e)
        }
    }
}

fn validate_inputs(
    username: &str,
    registry: &SiteRegistry,
    concurrency_limit: usize,
    per_request_timeout: Duration,
) -> Result<()> {
    if username.is_empty() {
        return Err(ProbeError::InvalidInput {
            field: "username",
            reason: "cannot be empty".to_string(),
        });
    }

    if !(MIN_CONCURRENCY..=MAX_CONCURRENCY).contains(&concurrency_limit) {
        return Err(ProbeError::InvalidInput {
            field: "concurrency_limit",
            reason: format!(
                "must be {MIN_CONCURRENCY}-{MAX_CONCURRENCY}, got {concurrency_limit}"
            ),
        });
    }

    if per_request_timeout.is_zero() {
        return Err(ProbeError::InvalidInput {
            field: "per_request_timeout",
            reason: "must be greater than zero".to_string(),
        });
    }

    if registry.is_empty() {
        return Err(ProbeError::Config(SiteError::Empty));
    }

    Ok(())
}
