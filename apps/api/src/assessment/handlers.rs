//! Axum route handlers for the Assessment API.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::assessment::blueprint::BlueprintRequest;
use crate::assessment::service;
use crate::errors::AppError;
use crate::models::assessment::{Blueprint, Report, Responses, Test};
use crate::models::lenient;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GenerateTestRequest {
    /// A blueprint that is not an object counts as missing.
    #[serde(deserialize_with = "lenient::or_default")]
    pub blueprint: Option<Blueprint>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SubmitAnswersRequest {
    /// Null or non-object responses count as no answers.
    #[serde(deserialize_with = "lenient::or_default")]
    pub responses: Responses,
}

/// Decodes a request body, falling back to the default request when the body is
/// empty or not a JSON object. Content type is not checked.
fn lenient_body<T: DeserializeOwned + Default>(body: &Bytes) -> T {
    if body.is_empty() {
        return T::default();
    }
    serde_json::from_slice(body).unwrap_or_else(|e| {
        debug!("Unreadable request body, using defaults: {}", e);
        T::default()
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/blueprints
///
/// Compiles a blueprint from requirement fields and a free-text note.
pub async fn handle_create_blueprint(body: Bytes) -> Json<Blueprint> {
    let request: BlueprintRequest = lenient_body(&body);
    Json(service::create_blueprint(request))
}

/// POST /api/v1/tests
///
/// Generates and stores a test. 400 if no blueprint is supplied.
pub async fn handle_generate_test(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Test>), AppError> {
    let request: GenerateTestRequest = lenient_body(&body);
    let test = service::generate_test(state.store.as_ref(), request.blueprint).await?;
    Ok((StatusCode::CREATED, Json(test)))
}

/// GET /api/v1/tests/:id
pub async fn handle_fetch_test(
    State(state): State<AppState>,
    Path(test_id): Path<String>,
) -> Result<Json<Test>, AppError> {
    Ok(Json(service::fetch_test(state.store.as_ref(), &test_id).await?))
}

/// POST /api/v1/tests/:id/submit
///
/// Scores the candidate's responses. Missing answers count as incorrect.
pub async fn handle_submit_answers(
    State(state): State<AppState>,
    Path(test_id): Path<String>,
    body: Bytes,
) -> Result<Json<Report>, AppError> {
    let request: SubmitAnswersRequest = lenient_body(&body);
    let report = service::submit_answers(
        state.store.as_ref(),
        state.code_judge.as_ref(),
        &test_id,
        &request.responses,
    )
    .await?;
    Ok(Json(report))
}

/// GET /api/v1/tests/:id/report
///
/// Returns the most recent report computed for the test.
pub async fn handle_fetch_report(
    State(state): State<AppState>,
    Path(test_id): Path<String>,
) -> Result<Json<Report>, AppError> {
    Ok(Json(service::fetch_report(state.store.as_ref(), &test_id).await?))
}
