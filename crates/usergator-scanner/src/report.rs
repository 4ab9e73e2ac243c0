//! Flat result records for export.

use crate::outcome::{PresenceState, ProbeOutcome};
use serde::{Deserialize, Serialize};

/// One row of the JSON result dump.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    /// Site name
    pub site: String,
    /// Final URL of the probe
    pub url: String,
    /// `true` only when the profile was found
    pub exists: bool,
    /// HTTP status, if a response was received
    pub status_code: Option<u16>,
    /// Failure description, if presence is unknown
    pub error: Option<String>,
}

impl From<&ProbeOutcome> for ResultRecord {
    fn from(outcome: &ProbeOutcome) -> Self {
        Self {
            site: outcome.site_name.clone(),
            url: outcome.final_url.clone(),
            exists: outcome.presence.exists(),
            status_code: outcome.http_status,
            error: outcome.error_message.clone(),
        }
    }
}

/// Convert outcomes to records, keeping their order.
#[must_use]
pub fn to_records(outcomes: &[ProbeOutcome]) -> Vec<ResultRecord> {
    outcomes.iter().map(ResultRecord::from).collect()
}

/// Serialize outcomes as a pretty-printed JSON array of records.
pub fn to_json(outcomes: &[ProbeOutcome]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&to_records(outcomes))
}

/// Counts of outcomes per presence state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProbeSummary {
    /// Profiles found
    pub present: usize,
    /// Profiles not found
    pub absent: usize,
    /// Sites whose answer could not be classified
    pub unknown: usize,
}

impl ProbeSummary {
    /// Tally a batch of outcomes.
    #[must_use]
    pub fn from_outcomes(outcomes: &[ProbeOutcome]) -> Self {
        outcomes
            .iter()
            .fold(Self::default(), |mut summary, outcome| {
                match outcome.presence {
                    PresenceState::Present => summary.present += 1,
                    PresenceState::Absent => summary.absent += 1,
                    PresenceState::Unknown => summary.unknown += 1,
                }
                summary
            })
    }

    /// Total number of outcomes.
    #[must_use]
    pub fn total(&self) -> usize {
        self.present + self.absent + self.unknown
    }
}
