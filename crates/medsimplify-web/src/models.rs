use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use medsimplify_core::{ErrorClass, GatewayError};
use medsimplify_ingest::ExtractionError;

// ── Request / response DTOs ─────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SimplifyRequest {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SimplifyResponse {
    pub success: bool,
    pub result: String,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub text: String,
    pub filename: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

// ── Error envelope ──────────────────────────────────────────────────────

/// Any failure leaving a handler, rendered as `{ "success": false, "error" }`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn from_class(class: ErrorClass, message: impl Into<String>) -> Self {
        let status =
            StatusCode::from_u16(class.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        Self::new(status, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::from_class(ErrorClass::InputValidation, message)
    }

    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, "Not found")
    }
}

impl From<ExtractionError> for ApiError {
    fn from(e: ExtractionError) -> Self {
        Self::from_class(e.class(), e.to_string())
    }
}

impl From<GatewayError> for ApiError {
    fn from(e: GatewayError) -> Self {
        Self::from_class(e.class(), e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                success: false,
                error: self.message,
            }),
        )
            .into_response()
    }
}
