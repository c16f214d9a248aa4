//! Mutating Admission Webhook for the `cumulo.ai` label
//!
//! The API server sends an AdmissionReview for each admitted object to
//! `POST /mutate`; the handler answers with a JSON patch produced by the
//! [`patch`](crate::patch) engine. The handlers hold no state, so the router
//! needs none either.

pub mod pod;

use axum::{
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

/// Path the MutatingWebhookConfiguration points at
pub const MUTATE_PATH: &str = "/mutate";

/// Liveness path
pub const HEALTH_PATH: &str = "/healthz";

/// Liveness path spelled as in earlier deployments, kept so their probes
/// keep passing
pub const LEGACY_HEALTH_PATH: &str = "/healtz";

/// Create the webhook router with the mutation and health endpoints
///
/// - POST /mutate - AdmissionReview in, AdmissionReview with JSON patch out
/// - GET /healthz, GET /healtz - `{"message":"pong"}`
pub fn webhook_router() -> Router {
    Router::new()
        .route(MUTATE_PATH, post(pod::mutate_handler))
        .route(HEALTH_PATH, get(health_handler))
        .route(LEGACY_HEALTH_PATH, get(health_handler))
        .layer(TraceLayer::new_for_http())
}

async fn health_handler() -> Json<Value> {
    Json(json!({ "message": "pong" }))
}
