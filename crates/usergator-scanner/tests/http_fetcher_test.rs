use std::time::Duration;
use usergator_core::ProbeConfig;
use usergator_scanner::{FetchError, HttpFetcher, PresenceState, ProbeEngine, ProfileFetcher};
use usergator_sites::{SiteEntry, SiteRegistry};
use wiremock::matchers::{header_regex, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TIMEOUT: Duration = Duration::from_secs(10);

fn fetcher() -> HttpFetcher {
    HttpFetcher::new(&ProbeConfig::default()).expect("build fetcher")
}

#[tokio::test]
async fn test_fetch_passes_status_through() {
    let server = MockServer::start().await;
    for (route, status) in [("/ok", 200), ("/missing", 404), ("/broken", 500)] {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(status))
            .mount(&server)
            .await;
    }

    let fetcher = fetcher();
    for (route, status) in [("/ok", 200), ("/missing", 404), ("/broken", 500)] {
        let url = format!("{}{route}", server.uri());
        let response = fetcher.fetch(&url, TIMEOUT).await.expect("fetch succeeds");
        assert_eq!(response.status, status);
        assert_eq!(response.final_url, url);
    }
}

#[tokio::test]
async fn test_fetch_follows_redirects() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/alice"))
        .respond_with(ResponseTemplate::new(301).insert_header("Location", "/Alice"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/Alice"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let response = fetcher()
        .fetch(&format!("{}/alice", server.uri()), TIMEOUT)
        .await
        .expect("fetch succeeds");

    assert_eq!(response.status, 200);
    assert_eq!(response.final_url, format!("{}/Alice", server.uri()));
}

#[tokio::test]
async fn test_fetch_sends_user_agent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header_regex("user-agent", "^usergator/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let response = fetcher()
        .fetch(&format!("{}/alice", server.uri()), TIMEOUT)
        .await
        .expect("fetch succeeds");

    assert_eq!(response.status, 200);
}

#[tokio::test]
async fn test_fetch_connection_refused() {
    // Reserve a port, then release it so nothing is listening.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind local port");
    let port = listener.local_addr().expect("local address").port();
    drop(listener);

    let err = fetcher()
        .fetch(&format!("http://127.0.0.1:{port}/alice"), TIMEOUT)
        .await
        .expect_err("nothing is listening");

    assert!(matches!(err, FetchError::Connect(_)), "got {err:?}");
    assert!(!err.to_string().is_empty());
}

#[tokio::test]
async fn test_fetch_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let timeout = Duration::from_millis(200);
    let err = HttpFetcher::with_client(reqwest::Client::new())
        .fetch(&format!("{}/alice", server.uri()), timeout)
        .await
        .expect_err("request times out");

    assert_eq!(err, FetchError::Timeout(timeout));
}

#[tokio::test]
async fn test_per_request_timeout_overrides_config_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow/alice"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let registry = SiteRegistry::from_entries(vec![SiteEntry::new(
        "Slow",
        format!("{}/slow/{{u}}", server.uri()),
    )])
    .expect("valid registry");

    let config = ProbeConfig {
        timeout_secs: 1,
        ..ProbeConfig::default()
    };
    let engine = ProbeEngine::from_config(&config).expect("build engine");

    let outcomes = engine
        .probe_all("alice", &registry, 8, Duration::from_secs(5))
        .await
        .expect("probe batch");
    assert_eq!(outcomes[0].presence, PresenceState::Present);
    assert_eq!(outcomes[0].http_status, Some(200));
    assert_eq!(outcomes[0].error_message, None);

    let outcomes = engine
        .probe_all("alice", &registry, 8, Duration::from_millis(300))
        .await
        .expect("probe batch");
    assert_eq!(outcomes[0].presence, PresenceState::Unknown);
    assert_eq!(
        outcomes[0].error_message.as_deref(),
        Some("request timed out after 300ms")
    );
}

#[tokio::test]
async fn test_engine_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/a/alice"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/b/alice"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let registry = SiteRegistry::from_entries(vec![
        SiteEntry::new("A", format!("{}/a/{{u}}", server.uri())),
        SiteEntry::new("B", format!("{}/b/{{u}}", server.uri())),
    ])
    .expect("valid registry");

    let config = ProbeConfig::default();
    let engine = ProbeEngine::from_config(&config).expect("build engine");
    let outcomes = engine
        .check("alice", &registry, &config)
        .await
        .expect("probe batch");

    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes[0].site_name, "A");
    assert_eq!(outcomes[0].presence, PresenceState::Present);
    assert_eq!(outcomes[0].http_status, Some(200));
    assert_eq!(outcomes[1].site_name, "B");
    assert_eq!(outcomes[1].presence, PresenceState::Absent);
    assert_eq!(outcomes[1].http_status, Some(404));
}
