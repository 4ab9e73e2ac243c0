//! Probe outcomes and status classification.

use crate::fetcher::{FetchError, FetchResponse};
use crate::url_builder::ProbeRequest;
use serde::{Deserialize, Serialize};
use usergator_core::UnexpectedStatus;

/// Whether a username appears to have a profile on a site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PresenceState {
    /// The profile URL resolved to a success response
    Present,
    /// The site answered, and the answer means no profile
    Absent,
    /// No status could be classified (network error, timeout, protocol error)
    Unknown,
}

impl PresenceState {
    /// `true` only for [`PresenceState::Present`].
    #[must_use]
    pub fn exists(self) -> bool {
        matches!(self, Self::Present)
    }
}

/// Classify a completed HTTP exchange.
///
/// `404` is absent and `200..400` is present. Every other status is decided
/// by `policy`.
#[must_use]
pub fn classify_status(status: u16, policy: UnexpectedStatus) -> PresenceState {
    match status {
        404 => PresenceState::Absent,
        200..=399 => PresenceState::Present,
        _ => match policy {
            UnexpectedStatus::Absent => PresenceState::Absent,
            UnexpectedStatus::Unknown => PresenceState::Unknown,
        },
    }
}

/// Result of probing a single site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeOutcome {
    /// Name of the probed site
    pub site_name: String,
    /// URL after following redirects, or the requested URL if no response arrived
    pub final_url: String,
    /// Classified presence
    pub presence: PresenceState,
    /// Status code of the final response, if one was received
    pub http_status: Option<u16>,
    /// Why presence could not be determined
    pub error_message: Option<String>,
}

impl ProbeOutcome {
    /// Build an outcome from a completed HTTP exchange.
    #[must_use]
    pub fn from_response(
        request: ProbeRequest,
        response: FetchResponse,
        policy: UnexpectedStatus,
    ) -> Self {
        let presence = classify_status(response.status, policy);
        let error_message = (presence == PresenceState::Unknown)
            .then(|| format!("unexpected HTTP status {}", response.status));

        Self {
            site_name: request.site_name,
            final_url: response.final_url,
            presence,
            http_status: Some(response.status),
            error_message,
        }
    }

    /// Build an outcome for a probe that never got a status code.
    #[must_use]
    pub fn from_error(request: ProbeRequest, error: &FetchError) -> Self {
        Self {
            site_name: request.site_name,
            final_url: request.resolved_url,
            presence: PresenceState::Unknown,
            http_status: None,
            error_message: Some(error.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn request() -> ProbeRequest {
        ProbeRequest {
            site_name: "GitHub".to_string(),
            resolved_url: "https://github.com/alice".to_string(),
        }
    }

    #[test]
    fn test_classify_literal_policy() {
        let policy = UnexpectedStatus::Absent;
        assert_eq!(classify_status(200, policy), PresenceState::Present);
        assert_eq!(classify_status(204, policy), PresenceState::Present);
        assert_eq!(classify_status(302, policy), PresenceState::Present);
        assert_eq!(classify_status(399, policy), PresenceState::Present);
        assert_eq!(classify_status(404, policy), PresenceState::Absent);
        assert_eq!(classify_status(403, policy), PresenceState::Absent);
        assert_eq!(classify_status(429, policy), PresenceState::Absent);
        assert_eq!(classify_status(500, policy), PresenceState::Absent);
        assert_eq!(classify_status(101, policy), PresenceState::Absent);
    }

    #[test]
    fn test_classify_unknown_policy() {
        let policy = UnexpectedStatus::Unknown;
        assert_eq!(classify_status(200, policy), PresenceState::Present);
        assert_eq!(classify_status(404, policy), PresenceState::Absent);
        assert_eq!(classify_status(403, policy), PresenceState::Unknown);
        assert_eq!(classify_status(503, policy), PresenceState::Unknown);
    }

    #[test]
    fn test_outcome_from_redirected_response() {
        let response = FetchResponse {
            status: 200,
            final_url: "https://github.com/Alice".to_string(),
        };
        let outcome = ProbeOutcome::from_response(request(), response, UnexpectedStatus::Absent);

        assert_eq!(outcome.site_name, "GitHub");
        assert_eq!(outcome.final_url, "https://github.com/Alice");
        assert_eq!(outcome.presence, PresenceState::Present);
        assert_eq!(outcome.http_status, Some(200));
        assert!(outcome.error_message.is_none());
    }

    #[test]
    fn test_outcome_unexpected_status_keeps_code() {
        let response = FetchResponse {
            status: 503,
            final_url: "https://github.com/alice".to_string(),
        };
        let outcome = ProbeOutcome::from_response(request(), response, UnexpectedStatus::Unknown);

        assert_eq!(outcome.presence, PresenceState::Unknown);
        assert_eq!(outcome.http_status, Some(503));
        assert_eq!(
            outcome.error_message.as_deref(),
            Some("unexpected HTTP status 503")
        );
    }

    #[test]
    fn test_outcome_from_error() {
        let outcome =
            ProbeOutcome::from_error(request(), &FetchError::Timeout(Duration::from_secs(10)));

        assert_eq!(outcome.final_url, "https://github.com/alice");
        assert_eq!(outcome.presence, PresenceState::Unknown);
        assert_eq!(outcome.http_status, None);
        assert_eq!(
            outcome.error_message.as_deref(),
            Some("request timed out after 10s")
        );
    }

    #[test]
    fn test_presence_exists() {
        assert!(PresenceState::Present.exists());
        assert!(!PresenceState::Absent.exists());
        assert!(!PresenceState::Unknown.exists());
    }
}
