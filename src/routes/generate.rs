use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::error::AppError;
use crate::generation::{orchestrator, GenerateRequest};
use crate::state::AppState;

/// POST /api/generate. Validation failures are 400s; an upstream generation
/// failure is reported as a 500 with the adapter's error message.
pub async fn generate(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GenerateRequest>,
) -> Result<Response, AppError> {
    let outcome = orchestrator::handle(&state.store, state.adapter.as_ref(), &request).await?;
    let status = if outcome.result.success {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    Ok((status, Json(outcome.result)).into_response())
}
