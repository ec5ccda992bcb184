//! # certreg-api — Axum API Service for the Certificate Registry
//!
//! Issues, lists, fetches, and revokes course certificates stored in a
//! local SQLite database.
//!
//! ## API Surface
//!
//! | Path                    | Module                        | Purpose                 |
//! |-------------------------|-------------------------------|-------------------------|
//! | `/certificates`         | [`routes::certificates`]      | issue (PUT), list (GET) |
//! | `/certificates/:id`     | [`routes::certificates`]      | fetch (GET), revoke (DELETE) |
//! | `/health/*`             | this module                   | liveness / readiness    |
//! | `/openapi.json`         | [`openapi`]                   | OpenAPI document        |
//!
//! ## Layers
//!
//! ```text
//! TraceLayer → routes::certificates → service::CertificateService → db::CertificateStore
//! ```

pub mod db;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod service;
pub mod state;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;

use crate::state::AppState;

/// Assemble the full application router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::certificates::router())
        .merge(openapi::router())
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness))
        .layer(middleware::tracing_layer::layer())
        .with_state(state)
}

/// Liveness probe — always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe — 200 when the database answers, 503 otherwise.
async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    if let Err(e) = state.certificates.store().ping().await {
        tracing::warn!("Database health check failed: {e}");
        return (StatusCode::SERVICE_UNAVAILABLE, "database unreachable").into_response();
    }
    (StatusCode::OK, "ready").into_response()
}
