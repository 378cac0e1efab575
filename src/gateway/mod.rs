//! HTTP gateway (Axum) exposing the verifier.
//!
//! Used by the `serve` subcommand of the `review-verifier` binary.

#![allow(missing_docs)]

pub mod error;
pub mod handler;
pub mod state;


use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

pub use handler::{VerifyRequest, verify_handler};
pub use state::HandlerState;

/// Response header carrying the verdict category.
pub const VERIFICATION_CATEGORY_HEADER: &str = "x-verification-category";

pub fn create_router_with_state(state: HandlerState) -> Router {
    Router::new()
        .route("/healthz", get(health_handler))
        .route("/ready", get(ready_handler))
        .route("/v1/verify", post(verify_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(serde::Serialize)]
pub struct ReadyResponse {
    pub status: &'static str,
    pub mode: &'static str,
    pub lexicon_entries: usize,
    pub models: Vec<LoadedModel>,
}

#[derive(serde::Serialize)]
pub struct LoadedModel {
    pub task: &'static str,
    pub model_id: String,
}

#[tracing::instrument]
pub async fn health_handler() -> Response {
    (StatusCode::OK, Json(HealthResponse { status: "ok" })).into_response()
}

/// Always ready once constructed: without models the verifier serves lexicon-only verdicts.
#[tracing::instrument(skip(state))]
pub async fn ready_handler(State(state): State<HandlerState>) -> Response {
    let verifier = &state.verifier;
    let mode = if verifier.models_loaded() {
        "ml"
    } else {
        "lexicon_only"
    };

    let models = verifier
        .loaded_models()
        .into_iter()
        .map(|(task, model_id)| LoadedModel {
            task: task.as_str(),
            model_id,
        })
        .collect();

    (
        StatusCode::OK,
        Json(ReadyResponse {
            status: "ok",
            mode,
            lexicon_entries: verifier.lexicon().len(),
            models,
        }),
    )
        .into_response()
}
