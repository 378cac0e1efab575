use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::{debug, error, instrument};

use crate::gateway::VERIFICATION_CATEGORY_HEADER;
use crate::gateway::error::GatewayError;
use crate::gateway::state::HandlerState;

#[derive(Debug, Clone, Default, Deserialize)]
/// Body of `POST /v1/verify`: either a raw `text` or the review fields.
pub struct VerifyRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub pros: Option<String>,
    #[serde(default)]
    pub cons: Option<String>,
    #[serde(default)]
    pub interview_questions: Option<String>,
}

impl VerifyRequest {
    /// Text to verify. Review fields are joined the same way the batch driver joins them.
    pub fn content(&self) -> Result<String, GatewayError> {
        if let Some(text) = &self.text {
            return Ok(text.clone());
        }

        if self.pros.is_none() && self.cons.is_none() && self.interview_questions.is_none() {
            return Err(GatewayError::InvalidRequest(
                "expected `text` or any of `pros`, `cons`, `interview_questions`".to_string(),
            ));
        }

        Ok(format!(
            "{} {} {}",
            self.pros.as_deref().unwrap_or(""),
            self.cons.as_deref().unwrap_or(""),
            self.interview_questions.as_deref().unwrap_or("")
        ))
    }
}

#[instrument(skip(state, body), fields(body_len = body.len()))]
pub async fn verify_handler(
    State(state): State<HandlerState>,
    body: Bytes,
) -> Result<Response, GatewayError> {
    let request: VerifyRequest = serde_json::from_slice(&body)
        .map_err(|e| GatewayError::InvalidRequest(format!("Invalid request body: {}", e)))?;
    let text = request.content()?;

    let verifier = state.verifier.clone();
    let verdict = tokio::task::spawn_blocking(move || verifier.verify(&text))
        .await
        .map_err(|e| {
            error!(error = %e, "Verification task failed");
            GatewayError::InternalError(e.to_string())
        })?;

    debug!(
        category = %verdict.category,
        is_appropriate = verdict.is_appropriate,
        "Verification complete"
    );

    let mut headers = HeaderMap::new();
    headers.insert(
        VERIFICATION_CATEGORY_HEADER,
        HeaderValue::from_static(verdict.category.as_str()),
    );

    Ok((StatusCode::OK, headers, Json(verdict)).into_response())
}
