use axum::Json;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use std::sync::Arc;

use medsimplify_core::UploadedDocument;
use medsimplify_ingest::{ExtractedText, TextExtractor};

use crate::models::{ApiError, UploadResponse};
use crate::state::AppState;
use crate::upload;

pub async fn upload(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, ApiError> {
    let multipart = multipart.map_err(|e| {
        tracing::debug!(error = %e, "rejected upload body");
        ApiError::bad_request("No file provided")
    })?;

    let document = upload::parse_multipart(multipart).await?;

    let extracted = extract_blocking(state.extractor.clone(), document).await?;

    Ok(Json(UploadResponse {
        success: true,
        text: extracted.text,
        filename: extracted.source_filename,
    }))
}

/// PDF parsing is CPU-bound and synchronous, so keep it off the reactor.
async fn extract_blocking(
    extractor: TextExtractor,
    document: UploadedDocument,
) -> Result<ExtractedText, ApiError> {
    let joined = tokio::task::spawn_blocking(move || extractor.extract_document(&document)).await;

    match joined {
        Ok(result) => result.map_err(ApiError::from),
        Err(e) => {
            tracing::error!(error = %e, "extraction task failed");
            Err(ApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error processing file",
            ))
        }
    }
}
