//! Shared fixtures for async tests.

use std::path::PathBuf;

use axum::{http::StatusCode, routing::post, Json, Router};
use serde_json::Value;

use crate::config::{Config, OptimizerBackend};
use crate::optimization::prompts::PromptVariant;

/// Serves a fixed status and JSON body on `POST /` from a throwaway local
/// server and returns its URL.
pub async fn spawn_upstream(status: StatusCode, body: Value) -> String {
    let app = Router::new().route("/", post(move || async move { (status, Json(body)) }));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/")
}

pub fn test_config(api_url: &str) -> Config {
    Config {
        huggingface_token: Some("test-token".to_string()),
        hf_api_url: api_url.to_string(),
        hf_timeout_secs: Some(5),
        prompt_variant: PromptVariant::Llama3Chat,
        optimizer_backend: OptimizerBackend::Hosted,
        profile_path: PathBuf::from("unused-profile.json"),
        port: 0,
        rust_log: "debug".to_string(),
    }
}
