use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use std::sync::Arc;

use crate::models::{ApiError, SimplifyRequest, SimplifyResponse};
use crate::state::AppState;

pub async fn simplify(
    State(state): State<Arc<AppState>>,
    body: Result<Json<SimplifyRequest>, JsonRejection>,
) -> Result<Json<SimplifyResponse>, ApiError> {
    let Json(req) = body.map_err(|e| {
        tracing::debug!(error = %e, "rejected simplify body");
        ApiError::bad_request("No data provided")
    })?;

    // Empty input never reaches the gateway.
    let text = req
        .text
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("No text provided"))?;

    let result = state.simplifier.simplify(&text).await?;

    Ok(Json(SimplifyResponse {
        success: true,
        result,
    }))
}
