// Exercises Ga4Client against a local stand-in for the Google endpoints.
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use ga4_mcp::analytics::{Ga4Client, ReportClient, RunReportRequest};
use ga4_mcp::config::AnalyticsConfig;
use serde_json::{json, Value};
use std::io::Write;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

const PRIVATE_KEY: &str = include_str!("fixtures/test_key.pem");

#[derive(Clone, Default)]
struct FakeGoogle {
    token_requests: Arc<AtomicUsize>,
}

async fn token(State(state): State<FakeGoogle>, body: String) -> Json<Value> {
    state.token_requests.fetch_add(1, Ordering::SeqCst);
    assert!(body.contains("grant_type=urn%3Aietf%3Aparams%3Aoauth%3Agrant-type%3Ajwt-bearer"));
    assert!(body.contains("assertion="));
    Json(json!({ "access_token": "test-token", "expires_in": 3600, "token_type": "Bearer" }))
}

async fn run_report(
    Path(target): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if headers.get("authorization").and_then(|v| v.to_str().ok()) != Some("Bearer test-token") {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "error": { "code": 401, "message": "no token" } })));
    }
    if target != "123:runReport" {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({
                "error": {
                    "code": 403,
                    "message": "User does not have sufficient permissions for this property.",
                    "status": "PERMISSION_DENIED"
                }
            })),
        );
    }
    assert_eq!(body["dateRanges"][0]["startDate"], "7daysAgo");
    (
        StatusCode::OK,
        Json(json!({
            "dimensionHeaders": [{ "name": "date" }],
            "metricHeaders": [{ "name": "totalUsers", "type": "TYPE_INTEGER" }],
            "rows": [
                { "dimensionValues": [{ "value": "20240101" }], "metricValues": [{ "value": "5" }] }
            ],
            "rowCount": 1
        })),
    )
}

async fn spawn_fake_google(state: FakeGoogle) -> SocketAddr {
    let app = Router::new()
        .route("/token", post(token))
        .route("/v1beta/properties/:target", post(run_report))
        .with_state(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn key_file(addr: SocketAddr) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    let key = json!({
        "type": "service_account",
        "client_email": "reporter@example.iam.gserviceaccount.com",
        "private_key": PRIVATE_KEY,
        "private_key_id": "key-1",
        "token_uri": format!("http://{}/token", addr)
    });
    file.write_all(key.to_string().as_bytes()).unwrap();
    file
}

fn analytics_config(addr: SocketAddr) -> AnalyticsConfig {
    AnalyticsConfig {
        property_id: "123".to_string(),
        api_base_url: format!("http://{}/", addr),
        connect_timeout_secs: 5,
    }
}

fn request(property_id: &str) -> RunReportRequest {
    RunReportRequest::new(
        property_id,
        &["date".to_string()],
        &["totalUsers".to_string()],
        "7daysAgo",
        "yesterday",
    )
}

#[tokio::test]
async fn connect_fetches_a_token_and_reuses_it() {
    let state = FakeGoogle::default();
    let addr = spawn_fake_google(state.clone()).await;
    let key = key_file(addr);

    let client = Ga4Client::connect(&analytics_config(addr), key.path())
        .await
        .unwrap();
    assert_eq!(state.token_requests.load(Ordering::SeqCst), 1);

    let report = client.run_report(&request("123")).await.unwrap();
    assert_eq!(report.rows.len(), 1);
    assert_eq!(report.rows[0].metric_values[0].value, "5");
    assert_eq!(report.metric_headers[0].name, "totalUsers");

    client.run_report(&request("123")).await.unwrap();
    assert_eq!(state.token_requests.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn api_errors_surface_google_message() {
    let addr = spawn_fake_google(FakeGoogle::default()).await;
    let key = key_file(addr);
    let client = Ga4Client::connect(&analytics_config(addr), key.path())
        .await
        .unwrap();

    let err = client.run_report(&request("999")).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "API error: 403 PERMISSION_DENIED: User does not have sufficient permissions for this property."
    );
}

#[tokio::test]
async fn connect_fails_on_unreadable_key() {
    let addr = spawn_fake_google(FakeGoogle::default()).await;
    let err = Ga4Client::connect(
        &analytics_config(addr),
        std::path::Path::new("/nonexistent/key.json"),
    )
    .await
    .err()
    .unwrap();
    assert!(err.to_string().contains("Failed to read credentials file"));
}
