#![allow(clippy::unwrap_used)]
// End-to-end tests for `FetchPipeline` against a wiremock data source.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use atlas_core::{CoreError, DirectoryConfig, FetchPipeline, RetryPolicy};

// ── Helpers ─────────────────────────────────────────────────────────

const ALL_PATH: &str = "/v3.1/all";

fn config_for(server: &MockServer, timeout: Duration) -> DirectoryConfig {
    config_at(&server.uri(), timeout)
}

/// Three attempts with a short backoff against `base` + the collection path.
fn config_at(base: &str, timeout: Duration) -> DirectoryConfig {
    DirectoryConfig {
        endpoint: Url::parse(&format!("{base}{ALL_PATH}")).unwrap(),
        timeout,
        retry: RetryPolicy {
            max_attempts: 3,
            base_delay: Duration::from_millis(10),
        },
        ..DirectoryConfig::default()
    }
}

async fn setup() -> (MockServer, FetchPipeline) {
    let server = MockServer::start().await;
    let pipeline = FetchPipeline::new(&config_for(&server, Duration::from_secs(5))).unwrap();
    (server, pipeline)
}

fn country(common: &str, cca3: &str, region: &str) -> serde_json::Value {
    json!({
        "name": { "common": common, "official": common },
        "cca3": cca3,
        "region": region,
        "capital": ["Somewhere"],
        "population": 1000,
        "area": 10.5,
        "latlng": [1.0, 2.0],
        "flags": { "png": "flag.png", "svg": "flag.svg" }
    })
}

async fn respond_with(server: &MockServer, template: ResponseTemplate, times: u64) {
    Mock::given(method("GET"))
        .and(path(ALL_PATH))
        .respond_with(template)
        .expect(times)
        .mount(server)
        .await;
}

// ── Success path ────────────────────────────────────────────────────

#[tokio::test]
async fn test_run_publishes_catalog_with_default() {
    let (server, pipeline) = setup().await;
    respond_with(
        &server,
        ResponseTemplate::new(200).set_body_json(json!([
            country("Japan", "JPN", "Asia"),
            country("Afghanistan", "AFG", "Asia"),
            country("France", "FRA", "Europe"),
        ])),
        1,
    )
    .await;

    let catalog = pipeline.run().await.unwrap();

    assert_eq!(catalog.len(), 3);
    assert_eq!(catalog.default.code.as_str(), "AFG");
    assert!(Arc::ptr_eq(&catalog.default, &catalog.countries[1]));
    let codes: Vec<_> = catalog.countries.iter().map(|c| c.code.to_string()).collect();
    assert_eq!(codes, vec!["JPN", "AFG", "FRA"]);
}

#[tokio::test]
async fn test_run_uses_configured_default() {
    let server = MockServer::start().await;
    let config = DirectoryConfig {
        default_country: "France".into(),
        ..config_for(&server, Duration::from_secs(5))
    };
    let pipeline = FetchPipeline::new(&config).unwrap();
    respond_with(
        &server,
        ResponseTemplate::new(200).set_body_json(json!([country("France", "FRA", "Europe")])),
        1,
    )
    .await;

    let catalog = pipeline.run().await.unwrap();
    assert_eq!(catalog.default.name.common, "France");
}

#[tokio::test]
async fn test_run_recovers_after_transient_failure() {
    let (server, pipeline) = setup().await;
    Mock::given(method("GET"))
        .and(path(ALL_PATH))
        .respond_with(ResponseTemplate::new(502))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    respond_with(
        &server,
        ResponseTemplate::new(200).set_body_json(json!([country("Afghanistan", "AFG", "Asia")])),
        1,
    )
    .await;

    assert!(pipeline.run().await.is_ok());
}

// ── Data failures ───────────────────────────────────────────────────

#[tokio::test]
async fn test_object_payload_is_shape_error_without_retry() {
    let (server, pipeline) = setup().await;
    respond_with(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({ "message": "Not Found" })),
        1,
    )
    .await;

    let err = pipeline.run().await.unwrap_err();
    assert!(matches!(err, CoreError::MalformedResponseShape { .. }));
    assert_eq!(err.to_string(), "Invalid data format received from API");
}

#[tokio::test]
async fn test_non_json_payload_is_shape_error() {
    let (server, pipeline) = setup().await;
    respond_with(
        &server,
        ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"),
        1,
    )
    .await;

    let err = pipeline.run().await.unwrap_err();
    assert!(matches!(err, CoreError::MalformedResponseShape { .. }));
}

#[tokio::test]
async fn test_record_missing_name_rejects_payload() {
    let (server, pipeline) = setup().await;
    let mut broken = country("Japan", "JPN", "Asia");
    broken["name"] = json!({ "official": "Japan" });
    respond_with(
        &server,
        ResponseTemplate::new(200)
            .set_body_json(json!([country("Afghanistan", "AFG", "Asia"), broken])),
        1,
    )
    .await;

    let err = pipeline.run().await.unwrap_err();
    assert!(matches!(
        err,
        CoreError::MalformedRecordContent { index: 1, .. }
    ));
    assert_eq!(err.to_string(), "Invalid country data structure");
}

#[tokio::test]
async fn test_missing_default_is_reported() {
    let (server, pipeline) = setup().await;
    respond_with(
        &server,
        ResponseTemplate::new(200).set_body_json(json!([country("Japan", "JPN", "Asia")])),
        1,
    )
    .await;

    let err = pipeline.run().await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Default country (Afghanistan) not found in the data"
    );
}

// ── Transport failures ──────────────────────────────────────────────

#[tokio::test]
async fn test_server_errors_exhaust_retries() {
    let (server, pipeline) = setup().await;
    respond_with(&server, ResponseTemplate::new(500), 3).await;

    let err = pipeline.run().await.unwrap_err();
    assert_eq!(err.to_string(), "Error: Request failed with status code 500");
}

#[tokio::test]
async fn test_timeouts_exhaust_retries() {
    let server = MockServer::start().await;
    let pipeline =
        FetchPipeline::new(&config_for(&server, Duration::from_millis(100))).unwrap();
    respond_with(
        &server,
        ResponseTemplate::new(200)
            .set_body_json(json!([]))
            .set_delay(Duration::from_secs(2)),
        3,
    )
    .await;

    let err = pipeline.run().await.unwrap_err();
    assert!(matches!(err, CoreError::Timeout { .. }));
}

#[tokio::test]
async fn test_unreachable_host_is_network_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = config_at(&format!("http://{addr}"), Duration::from_secs(2));
    assert_eq!(config.retry.max_attempts, 3);
    let err = FetchPipeline::new(&config).unwrap().run().await.unwrap_err();
    assert!(matches!(err, CoreError::Network { .. }), "got {err:?}");
}
