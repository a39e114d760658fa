pub mod health;

use axum::{
    http::{header, Method, StatusCode},
    routing::{get, post, MethodRouter},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::errors::AppError;
use crate::extraction::handlers as extraction;
use crate::optimization::handlers as optimization;
use crate::profile::handlers as profile;
use crate::scan::handlers as scan;
use crate::state::AppState;

#[cfg(test)]
mod tests;

async fn preflight() -> StatusCode {
    StatusCode::OK
}

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

/// Adds the bare `OPTIONS → 200` answer and a JSON 405 for everything else.
fn with_preflight(route: MethodRouter<AppState>) -> MethodRouter<AppState> {
    route.options(preflight).fallback(method_not_allowed)
}

/// CORS for a route group: any origin, `Content-Type` only, the given methods.
fn cors(methods: Vec<Method>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(methods)
        .allow_headers([header::CONTENT_TYPE])
}

pub fn build_router(state: AppState) -> Router {
    let health = Router::new()
        .route("/api/health", with_preflight(get(health::health_handler)))
        .layer(cors(vec![Method::GET, Method::OPTIONS]));

    let optimize = Router::new()
        .route(
            "/api/optimize-resume",
            with_preflight(post(optimization::handle_optimize_resume)),
        )
        .route(
            "/api/extract",
            with_preflight(post(extraction::handle_extract)),
        )
        .route("/api/scan", with_preflight(post(scan::handle_scan)))
        .layer(cors(vec![Method::POST, Method::OPTIONS]));

    let profile = Router::new()
        .route(
            "/api/profile",
            with_preflight(get(profile::handle_get_profile).put(profile::handle_save_profile)),
        )
        .route("/api/status", with_preflight(get(profile::handle_status)))
        .layer(cors(vec![Method::GET, Method::PUT, Method::OPTIONS]));

    Router::new()
        .merge(health)
        .merge(optimize)
        .merge(profile)
        .with_state(state)
}
