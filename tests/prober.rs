//! Integration tests for the HTTP prober
//!
//! These tests run the real reqwest client against a mock server and verify:
//! - HEAD-then-GET fallback (405 and HEAD timeout)
//! - Manual redirect following and the hop limit
//! - Timeout and connection failure classification
//! - The HEAD budget never exceeding the run timeout

use std::time::Duration;

use charity_link_check::error_handling::ProbeError;
use charity_link_check::{Config, HttpProber, Probe, ProbeOutcome};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_prober(head_timeout_ms: u64, get_timeout_ms: u64) -> HttpProber {
    let config = Config {
        head_timeout: Duration::from_millis(head_timeout_ms),
        timeout: Duration::from_millis(get_timeout_ms),
        ..Default::default()
    };
    HttpProber::from_config(&config).expect("Failed to build prober")
}

#[tokio::test]
async fn test_head_success_needs_no_get() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/ok"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/ok"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let outcome = create_prober(1000, 1000)
        .probe(&format!("{}/ok", server.uri()))
        .await;

    assert_eq!(outcome, ProbeOutcome::Status(200));
}

#[tokio::test]
async fn test_head_405_falls_back_to_get() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/no-head"))
        .respond_with(ResponseTemplate::new(405))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/no-head"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = create_prober(1000, 1000)
        .probe(&format!("{}/no-head", server.uri()))
        .await;

    assert_eq!(outcome, ProbeOutcome::Status(200));
}

#[tokio::test]
async fn test_head_404_is_final() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let outcome = create_prober(1000, 1000)
        .probe(&format!("{}/gone", server.uri()))
        .await;

    assert_eq!(outcome, ProbeOutcome::Status(404));
}

#[tokio::test]
async fn test_relative_redirect_is_followed() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(301).insert_header("Location", "/new"))
        .mount(&server)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/new"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = create_prober(1000, 1000)
        .probe(&format!("{}/old", server.uri()))
        .await;

    assert_eq!(outcome, ProbeOutcome::Status(200));
}

#[tokio::test]
async fn test_redirect_loop_hits_hop_limit() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/loop"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/loop"))
        .expect(6)
        .mount(&server)
        .await;

    let outcome = create_prober(1000, 1000)
        .probe(&format!("{}/loop", server.uri()))
        .await;

    assert_eq!(outcome, ProbeOutcome::Failed(ProbeError::TooManyRedirects(5)));
}

#[tokio::test]
async fn test_slow_head_falls_back_to_get() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/slow-head"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/slow-head"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = create_prober(100, 1000)
        .probe(&format!("{}/slow-head", server.uri()))
        .await;

    assert_eq!(outcome, ProbeOutcome::Status(200));
}

#[tokio::test]
async fn test_slow_head_and_get_is_timeout() {
    let server = MockServer::start().await;
    Mock::given(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(800)))
        .mount(&server)
        .await;

    let outcome = create_prober(100, 200)
        .probe(&format!("{}/slow", server.uri()))
        .await;

    assert_eq!(outcome, ProbeOutcome::Timeout);
}

#[tokio::test]
async fn test_head_budget_is_capped_by_short_timeout() {
    let server = MockServer::start().await;
    Mock::given(path("/sluggish"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(1500)))
        .mount(&server)
        .await;

    // Default HEAD timeout (5s) with a much shorter run timeout
    let config = Config {
        timeout: Duration::from_millis(200),
        ..Default::default()
    };
    let prober = HttpProber::from_config(&config).expect("Failed to build prober");

    let started = std::time::Instant::now();
    let outcome = prober.probe(&format!("{}/sluggish", server.uri())).await;

    assert_eq!(outcome, ProbeOutcome::Timeout);
    assert!(
        started.elapsed() < Duration::from_millis(1200),
        "HEAD ran past the run timeout: {:?}",
        started.elapsed()
    );
}

#[tokio::test]
async fn test_connection_refused_is_request_failure() {
    // Bind an ephemeral port, then release it so nothing is listening there
    let port = {
        let listener =
            std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind ephemeral port");
        listener.local_addr().expect("Failed to read local address").port()
    };

    let outcome = create_prober(1000, 1000)
        .probe(&format!("http://127.0.0.1:{port}/x"))
        .await;

    match outcome {
        ProbeOutcome::Failed(ProbeError::Request(message)) => assert!(!message.is_empty()),
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[tokio::test]
async fn test_non_http_scheme_is_invalid() {
    let outcome = create_prober(1000, 1000).probe("ftp://example.org/file").await;
    assert_eq!(
        outcome,
        ProbeOutcome::Failed(ProbeError::InvalidUrl("ftp://example.org/file".to_string()))
    );
}
