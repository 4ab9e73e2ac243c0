use usergator_sites::{SiteEntry, SiteRegistry};

/// A rendered profile URL, ready to be probed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeRequest {
    pub site_name: String,
    pub resolved_url: String,
}

/// Substitute `username` into the site's template, verbatim.
///
/// Callers that accept untrusted usernames should validate or encode them
/// first; see `usergator_core::Username`.
#[must_use]
pub fn build_probe_url(entry: &SiteEntry, username: &str) -> String {
    entry.render(username)
}

#[must_use]
pub fn render_request(entry: &SiteEntry, username: &str) -> ProbeRequest {
    ProbeRequest {
        site_name: entry.name.clone(),
        resolved_url: build_probe_url(entry, username),
    }
}

/// Render one request per registry entry, in registry order.
#[must_use]
pub fn render_requests(username: &str, registry: &SiteRegistry) -> Vec<ProbeRequest> {
    registry
        .iter()
        .map(|entry| render_request(entry, username))
        .collect()
}
