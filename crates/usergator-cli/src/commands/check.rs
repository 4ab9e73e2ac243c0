//! `usergator check`

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use usergator_core::{AppConfig, UnexpectedStatus, Username};
use usergator_scanner::{to_json, ProbeEngine, ProbeOutcome, ProbeSummary};

use crate::display;

/// Flags of the check command that override the loaded config.
#[derive(Debug, Default)]
pub struct CheckOptions {
    pub concurrency: Option<usize>,
    pub timeout_secs: Option<u64>,
    pub sites_file: Option<PathBuf>,
    pub strict_status: bool,
    pub json_out: Option<PathBuf>,
}

impl CheckOptions {
    /// Fold the flags into `config`.
    fn apply(&self, config: &mut AppConfig) {
        if let Some(concurrency) = self.concurrency {
            config.probe.concurrency = concurrency;
        }
        if let Some(secs) = self.timeout_secs {
            config.probe.timeout_secs = secs;
        }
        if let Some(path) = &self.sites_file {
            config.sites.file = Some(path.clone());
        }
        if self.strict_status {
            config.probe.unexpected_status = UnexpectedStatus::Unknown;
        }
    }
}

/// Checks a username across the site list and reports the results.
pub async fn run(username: &str, options: CheckOptions, config: &mut AppConfig) -> Result<()> {
    options.apply(config);
    config.validate()?;

    let username = Username::new(username)?;
    let registry = super::load_registry(config)?;
    display::scan_header(&username, registry.len());

    let progress = display::check_progress(registry.len());
    let ticker = progress.clone();
    let engine = ProbeEngine::from_config(&config.probe)?
        .with_progress(Arc::new(move |_outcome: &ProbeOutcome| ticker.inc(1)));

    let outcomes = engine
        .check(username.as_str(), &registry, &config.probe)
        .await;
    progress.finish_and_clear();
    let outcomes = outcomes?;

    display::outcome_table(&outcomes);
    display::summary(&ProbeSummary::from_outcomes(&outcomes));

    if let Some(path) = &options.json_out {
        let json = to_json(&outcomes).context("failed to serialize results")?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write results to {}", path.display()))?;
        display::saved(path);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_override_config() {
        let options = CheckOptions {
            concurrency: Some(16),
            timeout_secs: Some(3),
            sites_file: Some(PathBuf::from("sites.toml")),
            strict_status: true,
            json_out: None,
        };

        let mut config = AppConfig::default();
        options.apply(&mut config);

        assert_eq!(config.probe.concurrency, 16);
        assert_eq!(config.probe.timeout_secs, 3);
        assert_eq!(config.sites.file, Some(PathBuf::from("sites.toml")));
        assert_eq!(config.probe.unexpected_status, UnexpectedStatus::Unknown);
    }

    #[test]
    fn test_options_keep_config_when_unset() {
        let mut config = AppConfig::default();
        config.probe.concurrency = 12;

        CheckOptions::default().apply(&mut config);

        assert_eq!(config.probe.concurrency, 12);
        assert_eq!(config.probe.unexpected_status, UnexpectedStatus::Absent);
    }

    #[tokio::test]
    async fn test_run_rejects_out_of_range_concurrency() {
        let options = CheckOptions {
            concurrency: Some(0),
            ..CheckOptions::default()
        };

        let mut config = AppConfig::default();
        let err = run("alice", options, &mut config)
            .await
            .expect_err("concurrency 0 rejected before probing");
        assert!(err.to_string().contains("probe.concurrency"));
    }

    #[tokio::test]
    async fn test_run_rejects_unsafe_username() {
        let mut config = AppConfig::default();
        let err = run("alice/../admin", CheckOptions::default(), &mut config)
            .await
            .expect_err("username rejected before probing");
        assert!(err.to_string().contains("invalid username"));
    }
}
