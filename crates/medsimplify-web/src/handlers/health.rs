use axum::Json;

use crate::models::HealthResponse;

/// Liveness only; never touches the model service.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "healthy" })
}
