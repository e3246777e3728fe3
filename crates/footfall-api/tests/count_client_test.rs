// Integration tests for `CountClient` using wiremock.
#![allow(clippy::unwrap_used)]

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use footfall_api::{CountClient, Error, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, CountClient) {
    let server = MockServer::start().await;
    let url = format!("{}/count", server.uri());
    let client = CountClient::from_reqwest(&url, reqwest::Client::new()).unwrap();
    (server, client)
}

// ── Happy path ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_fetch_count() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/count"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "value": 42 })))
        .expect(1)
        .mount(&server)
        .await;

    let resp = client.fetch_count().await.unwrap();
    assert_eq!(resp.value, 42);
}

#[tokio::test]
async fn test_fetch_zero() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/count"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "value": 0 })))
        .mount(&server)
        .await;

    assert_eq!(client.fetch_count().await.unwrap().value, 0);
}

// ── Error paths ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_server_error_maps_to_status() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/count"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "error": "no log for today" })),
        )
        .mount(&server)
        .await;

    let err = client.fetch_count().await.unwrap_err();
    match err {
        Error::Status { status, ref reason } => {
            assert_eq!(status, 500);
            assert_eq!(reason, "Internal Server Error");
        }
        other => panic!("expected Status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_non_200_success_is_still_an_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/count"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let err = client.fetch_count().await.unwrap_err();
    assert!(
        matches!(err, Error::Status { status: 204, .. }),
        "expected Status 204, got {err:?}"
    );
}

#[tokio::test]
async fn test_malformed_body_keeps_raw_text() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/count"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"count\": 3}"))
        .mount(&server)
        .await;

    match client.fetch_count().await.unwrap_err() {
        Error::Deserialization { message, body } => {
            assert!(message.contains("value"), "message was: {message}");
            assert_eq!(body, "{\"count\": 3}");
        }
        other => panic!("expected Deserialization error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // Bind and immediately drop a server so the port is closed.
    let server = MockServer::start().await;
    let url = format!("{}/count", server.uri());
    drop(server);

    let client = CountClient::new(
        url.parse().unwrap(),
        &TransportConfig::with_timeout(Duration::from_secs(2)),
    )
    .unwrap();

    let err = client.fetch_count().await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)), "got {err:?}");
}

#[tokio::test]
async fn test_slow_response_times_out() {
    let (server, _) = setup().await;

    Mock::given(method("GET"))
        .and(path("/count"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "value": 5 }))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let http = reqwest::Client::builder()
        .timeout(Duration::from_millis(200))
        .build()
        .unwrap();
    let client = CountClient::from_reqwest(&format!("{}/count", server.uri()), http).unwrap();

    let err = client.fetch_count().await.unwrap_err();
    assert!(err.is_timeout(), "got {err:?}");
}

#[test]
fn test_invalid_url_is_rejected() {
    let err = CountClient::from_reqwest("not a url", reqwest::Client::new()).unwrap_err();
    assert!(matches!(err, Error::InvalidUrl(_)));
}
