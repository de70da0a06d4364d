//! HTTP API tests, driven through the router without a socket

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use ruster_shield::api::{create_router, AppState};
use ruster_shield::{FraudAnalyzer, ServerConfig};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

const BLACKLISTED: &str = "0x098B716B8Aaf21512996dC57EB0615e2383E2f96";
const CLEAN: &str = "0x5a52e96bacdabb82fd05763e25335261b270efcb";

fn state_with(config: ServerConfig) -> Arc<AppState> {
    Arc::new(AppState::new(FraudAnalyzer::builtin().unwrap(), &config))
}

fn app() -> Router {
    create_router(state_with(ServerConfig::default()))
}

fn post(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn test_health_at_root_and_v1() {
    let app = app();
    for uri in ["/health", "/v1/health"] {
        let (status, body) = send(&app, get(uri)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["status"], "healthy");
        let max = body["data"]["max_wallet_score"].as_f64().unwrap();
        assert!((max - 0.7).abs() < 1e-9);
    }
}

#[tokio::test]
async fn test_scan_wallet_response_shape() {
    let app = app();
    let (status, body) = send(
        &app,
        post(
            "/v1/scan/wallet",
            json!({
                "address": CLEAN,
                "transaction_data": {"transactions_per_hour": 60, "small_transactions": 0},
                "geo_data": {"country": "Russia"}
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let data = &body["data"];
    assert_eq!(data["address"], CLEAN);
    assert_eq!(data["risk_level"], "LOW");
    assert!((data["risk_score"].as_f64().unwrap() - 0.23).abs() < 1e-9);
    assert_eq!(
        data["risk_factors"],
        json!(["Unusually high transaction frequency", "High-risk jurisdiction"])
    );
    assert_eq!(data["compliance_status"]["aml_compliant"], true);
    assert_eq!(data["recommendations"][0], "Standard monitoring protocols");
    assert!(data["scan_id"].as_str().is_some_and(|id| !id.is_empty()));
    assert!(data["fraud_indicators"]["behavior"]["score"].is_number());
    assert_eq!(data["fraud_indicators"]["geo"]["flags"], json!(["High-risk jurisdiction"]));
}

#[tokio::test]
async fn test_scan_wallet_missing_address_is_400() {
    let app = app();
    for body in [json!({}), json!({"address": ""}), json!({"address": "   "})] {
        let (status, response) = send(&app, post("/v1/scan/wallet", body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["success"], false);
        assert_eq!(response["error"]["code"], "INPUT_INVALID_ARGUMENT");
        assert_eq!(response["error"]["details"], "field: address");
    }
}

#[tokio::test]
async fn test_malformed_body_is_400() {
    let app = app();
    let request = Request::builder()
        .method("POST")
        .uri("/v1/scan/wallet")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_repeated_scan_served_from_cache() {
    let app = app();
    let (_, first) = send(&app, post("/v1/scan/wallet", json!({"address": BLACKLISTED}))).await;
    let (_, second) = send(&app, post("/v1/scan/wallet", json!({"address": BLACKLISTED}))).await;
    assert_eq!(first["data"]["cached"], false);
    assert_eq!(second["data"]["cached"], true);
    assert_eq!(first["data"]["risk_score"], second["data"]["risk_score"]);
    assert_ne!(first["data"]["scan_id"], second["data"]["scan_id"]);
}

#[tokio::test]
async fn test_scan_domain() {
    let app = app();
    let (status, body) = send(&app, post("/v1/scan/domain", json!({"domain": "metamsk-wallet.tk"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["risk_level"], "CRITICAL");
    assert_eq!(body["data"]["risk_score"].as_f64(), Some(1.0));

    let (status, body) = send(&app, post("/v1/scan/domain", json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["details"], "field: domain");
}

#[tokio::test]
async fn test_scan_batch_keeps_order() {
    let app = app();
    let (status, body) = send(
        &app,
        post(
            "/v1/scan/batch",
            json!({"addresses": [BLACKLISTED, "", CLEAN], "concurrency": 2}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let data = &body["data"];
    assert_eq!(data["total_requested"], 3);
    assert_eq!(data["total_processed"], 2);
    assert_eq!(data["total_flagged"], 0);
    let results = data["results"].as_array().unwrap();
    assert_eq!(results[0]["address"], BLACKLISTED);
    assert_eq!(results[0]["risk_level"], "MEDIUM");
    assert_eq!(results[1]["status"], "error");
    assert_eq!(results[2]["risk_level"], "MINIMAL");
}

#[tokio::test]
async fn test_scan_batch_limits() {
    let app = app();
    let (status, _) = send(&app, post("/v1/scan/batch", json!({"addresses": []}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let too_many: Vec<String> = (0..101).map(|i| format!("0x{:040x}", i)).collect();
    let (status, body) = send(&app, post("/v1/scan/batch", json!({"addresses": too_many}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]["message"].as_str().unwrap().contains("100"));
}

#[tokio::test]
async fn test_stats_count_scans() {
    let app = app();
    send(&app, post("/v1/scan/wallet", json!({"address": CLEAN}))).await;
    send(&app, post("/v1/scan/domain", json!({"domain": "example.org"}))).await;

    let (status, body) = send(&app, get("/v1/stats")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["scans"]["total_scans"], 2);
    assert_eq!(body["data"]["scans"]["wallet_scans"], 1);
    assert_eq!(body["data"]["scans"]["domain_scans"], 1);
    assert_eq!(body["data"]["scans"]["threats_detected"], 0);
    assert_eq!(body["data"]["cache"]["entries"], 1);
}

#[tokio::test]
async fn test_api_key_required_when_configured() {
    let config = ServerConfig {
        api_keys: ["sk_test".to_string()].into_iter().collect(),
        ..Default::default()
    };
    let app = create_router(state_with(config));

    let (status, body) = send(&app, post("/v1/scan/wallet", json!({"address": CLEAN}))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");

    let mut request = post("/v1/scan/wallet", json!({"address": CLEAN}));
    request
        .headers_mut()
        .insert("x-api-key", "sk_test".parse().unwrap());
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);

    // Health stays open
    let (status, _) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_rate_limit_exceeded() {
    let config = ServerConfig {
        rate_limit: 2,
        ..Default::default()
    };
    let app = create_router(state_with(config));

    for _ in 0..2 {
        let (status, _) = send(&app, get("/v1/stats")).await;
        assert_eq!(status, StatusCode::OK);
    }
    let (status, body) = send(&app, get("/v1/stats")).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["error"]["code"], "RATE_LIMITED");
}

#[tokio::test]
async fn test_cors_and_rate_limit_headers_on_scan() {
    let app = app();
    let mut request = post("/v1/scan/wallet", json!({"address": CLEAN}));
    request
        .headers_mut()
        .insert("origin", "https://dashboard.example".parse().unwrap());
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(headers["access-control-allow-origin"], "*");
    assert!(headers.contains_key("x-ratelimit-remaining"));
    assert!(headers.contains_key("x-ratelimit-reset"));
}
