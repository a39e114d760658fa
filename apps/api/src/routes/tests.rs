//! Router-level tests: real handlers, real `LlmClient`, fake upstream.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use chrono::Utc;
use serde_json::{json, Value};
use tower::ServiceExt;

use super::build_router;
use crate::llm_client::LlmClient;
use crate::models::profile::UserProfile;
use crate::optimization::optimizer::{HostedOptimizer, LocalOptimizer, ResumeOptimizer};
use crate::optimization::prompts::PromptVariant;
use crate::profile::store::{MemoryProfileStore, ProfileStore};
use crate::state::AppState;
use crate::test_support::{spawn_upstream, test_config};

const RESUME: &str = "Senior engineer with eight years building payment systems.\n\
    - Led migration of the billing platform to event-driven services\n\
    - Reduced deploy times by 60% through CI pipeline work";
const STYLE: &str = "Direct, concrete, numbers first. No buzzwords.";

const POSTING_HTML: &str = r#"<html><body>
    <div class="jobs-description-content__text">
      <h2>About the job</h2>
      <p>We are looking for a backend engineer to join our payments team. You will own
      services end to end and work closely with product.</p>
      <h3>Responsibilities</h3>
      <ul><li>Design and operate Kafka based pipelines</li><li>Mentor engineers</li></ul>
      <h3>Requirements</h3>
      <ul><li>5+ years of experience with Rust or Go</li><li>Strong Kubernetes skills</li></ul>
    </div>
</body></html>"#;

fn app(optimizer: Arc<dyn ResumeOptimizer>, profiles: Arc<dyn ProfileStore>) -> Router {
    build_router(AppState {
        config: test_config("http://127.0.0.1:9/"),
        optimizer,
        profiles,
    })
}

/// Router whose optimizer talks to a fake upstream answering with `status`/`body`.
async fn hosted_app(status: StatusCode, body: Value) -> Router {
    let url = spawn_upstream(status, body).await;
    let llm = LlmClient::new(url, Some("test-token".to_string()), None).unwrap();
    app(
        Arc::new(HostedOptimizer::new(llm, PromptVariant::Llama3Chat)),
        Arc::new(MemoryProfileStore::default()),
    )
}

fn local_app_with_profile() -> Router {
    app(
        Arc::new(LocalOptimizer),
        Arc::new(MemoryProfileStore::with_profile(UserProfile {
            master_resume: RESUME.to_string(),
            communication_style: STYLE.to_string(),
            saved_at: Utc::now(),
        })),
    )
}

fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn optimize_body() -> Value {
    json!({
        "masterResume": RESUME,
        "jobDescription": "Backend engineer, Kafka, Kubernetes, 5+ years of experience.",
        "communicationStyle": STYLE,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// /api/optimize-resume
// ────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_missing_job_description_is_400() {
    let app = local_app_with_profile();
    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/optimize-resume",
            json!({"masterResume": RESUME, "communicationStyle": STYLE}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body.get("error").is_some());
}

#[tokio::test]
async fn test_malformed_json_is_400() {
    let app = local_app_with_profile();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/optimize-resume")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await.get("error").is_some());
}

#[tokio::test]
async fn test_upstream_503_is_503_with_retry_after() {
    let app = hosted_app(
        StatusCode::SERVICE_UNAVAILABLE,
        json!({"error": "Model meta-llama is currently loading", "estimated_time": 42.0}),
    )
    .await;
    let response = app
        .oneshot(json_request(Method::POST, "/api/optimize-resume", optimize_body()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = body_json(response).await;
    assert_eq!(body["retryAfter"], 30);
    assert!(body.get("error").is_some());
}

#[tokio::test]
async fn test_upstream_bullets_become_six_points() {
    let generated = "• Led migration of billing to Kafka pipelines\n\
        • Cut deploy times by 60% with Kubernetes rollouts\n\
        - Built Rust services handling 2M payments a day\n\
        * Mentored four engineers on distributed systems\n\
        • Designed idempotent payment APIs\n\
        - Owned on-call for the payments platform\n\
        These points emphasize the job's streaming focus.\n\
        Adjust the numbers to match your records.";
    let app = hosted_app(StatusCode::OK, json!([{ "generated_text": generated }])).await;
    let response = app
        .oneshot(json_request(Method::POST, "/api/optimize-resume", optimize_body()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    let points = body["optimizedPoints"].as_array().unwrap();
    assert_eq!(points.len(), 6);
    for point in points {
        assert!(point.as_str().unwrap().starts_with("• "));
    }
    assert_eq!(points[2], "• Built Rust services handling 2M payments a day");
}

#[tokio::test]
async fn test_upstream_failure_is_500_with_details() {
    let app = hosted_app(StatusCode::BAD_GATEWAY, json!({"error": "gateway down"})).await;
    let response = app
        .oneshot(json_request(Method::POST, "/api/optimize-resume", optimize_body()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"], "AI service temporarily unavailable");
    assert!(body["details"].as_str().unwrap().contains("gateway down"));
}

#[tokio::test]
async fn test_unexpected_upstream_shape_is_500() {
    let app = hosted_app(StatusCode::OK, json!({"outputs": "nothing useful"})).await;
    let response = app
        .oneshot(json_request(Method::POST, "/api/optimize-resume", optimize_body()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["code"], "UNEXPECTED_RESPONSE");
}

#[tokio::test]
async fn test_local_optimizer_serves_optimize() {
    let app = local_app_with_profile();
    let response = app
        .oneshot(json_request(Method::POST, "/api/optimize-resume", optimize_body()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let points = body["optimizedPoints"].as_array().unwrap();
    assert!(points.len() >= 4);
}

#[tokio::test]
async fn test_optimize_rejects_get_with_405() {
    let app = local_app_with_profile();
    let response = app
        .oneshot(empty_request(Method::GET, "/api/optimize-resume"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body_json(response).await["error"], "Method not allowed");
}

#[tokio::test]
async fn test_optimize_options_is_200_with_cors() {
    let app = local_app_with_profile();
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/optimize-resume")
        .header(header::ORIGIN, "chrome-extension://abc")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}

#[tokio::test]
async fn test_plain_options_is_200() {
    let app = local_app_with_profile();
    let response = app
        .oneshot(empty_request(Method::OPTIONS, "/api/optimize-resume"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

// ────────────────────────────────────────────────────────────────────────────
// /api/health
// ────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_health_reports_environment() {
    let app = local_app_with_profile();
    let response = app
        .oneshot(empty_request(Method::GET, "/api/health"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert!(body["timestamp"].is_string());
    assert_eq!(body["environment"]["hasHuggingFaceToken"], true);
    assert_eq!(body["environment"]["optimizer"], "local");
}

#[tokio::test]
async fn test_health_rejects_post_with_405() {
    let app = local_app_with_profile();
    let response = app
        .oneshot(empty_request(Method::POST, "/api/health"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

// ────────────────────────────────────────────────────────────────────────────
// /api/extract
// ────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_extract_finds_linkedin_description() {
    let app = local_app_with_profile();
    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/extract",
            json!({
                "action": "extractJobDescription",
                "url": "https://www.linkedin.com/jobs/view/123",
                "html": POSTING_HTML,
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["source"], "www.linkedin.com");
    let text = body["jobDescription"].as_str().unwrap();
    assert!(text.starts_with("About the job\nWe are looking for a backend engineer"));
    assert!(text.contains("\nRequirements\n5+ years of experience with Rust or Go\n"));
}

#[tokio::test]
async fn test_extract_without_posting_is_unsuccessful_200() {
    let app = local_app_with_profile();
    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/extract",
            json!({
                "action": "extractJobDescription",
                "url": "https://example.com/",
                "html": "<html><body><p>Just a landing page.</p></body></html>",
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("job posting"));
}

#[tokio::test]
async fn test_extract_unknown_action_is_400() {
    let app = local_app_with_profile();
    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/extract",
            json!({"action": "screenshot", "url": "https://example.com/", "html": ""}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ────────────────────────────────────────────────────────────────────────────
// /api/profile, /api/status
// ────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_profile_missing_is_404() {
    let app = app(
        Arc::new(LocalOptimizer),
        Arc::new(MemoryProfileStore::default()),
    );
    let response = app
        .oneshot(empty_request(Method::GET, "/api/profile"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_profile_put_then_get() {
    let app = app(
        Arc::new(LocalOptimizer),
        Arc::new(MemoryProfileStore::default()),
    );

    let response = app
        .clone()
        .oneshot(json_request(
            Method::PUT,
            "/api/profile",
            json!({"masterResume": "  My resume  ", "communicationStyle": "Warm"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let saved = body_json(response).await;
    assert_eq!(saved["masterResume"], "My resume");
    assert!(saved["savedAt"].is_string());

    let response = app
        .oneshot(empty_request(Method::GET, "/api/profile"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, saved);
}

#[tokio::test]
async fn test_profile_put_blank_style_is_400() {
    let app = app(
        Arc::new(LocalOptimizer),
        Arc::new(MemoryProfileStore::default()),
    );
    let response = app
        .oneshot(json_request(
            Method::PUT,
            "/api/profile",
            json!({"masterResume": "resume", "communicationStyle": "   "}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_status_reports_readiness() {
    let app = local_app_with_profile();
    let response = app
        .clone()
        .oneshot(empty_request(
            Method::GET,
            "/api/status?url=https%3A%2F%2Fwww.linkedin.com%2Fjobs%2Fview%2F1",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["resumeReady"], true);
    assert_eq!(body["styleReady"], false, "style sample is under 50 chars");
    assert_eq!(body["pageReady"], true);
    assert_eq!(body["ready"], false);
    assert_eq!(body["hint"], "Configure Profile First");

    let response = app
        .oneshot(empty_request(Method::GET, "/api/status"))
        .await
        .unwrap();
    assert_eq!(body_json(response).await["pageReady"], false);
}

// ────────────────────────────────────────────────────────────────────────────
// /api/scan
// ────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_scan_runs_full_flow() {
    let app = local_app_with_profile();
    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/scan",
            json!({"url": "https://www.linkedin.com/jobs/view/123", "html": POSTING_HTML}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    let points = body["optimizedPoints"].as_array().unwrap();
    assert!(points.len() >= 2);
    assert!(points
        .iter()
        .all(|p| p.as_str().unwrap().starts_with("• ")));
}

#[tokio::test]
async fn test_scan_without_profile_is_400() {
    let app = app(
        Arc::new(LocalOptimizer),
        Arc::new(MemoryProfileStore::default()),
    );
    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/scan",
            json!({"url": "https://www.linkedin.com/jobs/view/123", "html": POSTING_HTML}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_scan_on_page_without_posting_is_422() {
    let app = local_app_with_profile();
    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/scan",
            json!({"url": "https://example.com/", "html": "<p>Nothing to see</p>"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["code"], "EXTRACTION_FAILED");
}
