use axum::extract::Multipart;
use axum::extract::multipart::MultipartError;

use medsimplify_core::UploadedDocument;

use crate::models::ApiError;

/// Form field carrying the uploaded document.
pub const FILE_FIELD: &str = "file";

/// Parse a multipart form upload and pull out the `file` field.
///
/// A part without a filename yields an empty name, which the extractor
/// reports as "no file selected".
pub async fn parse_multipart(mut multipart: Multipart) -> Result<UploadedDocument, ApiError> {
    let mut document: Option<UploadedDocument> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error("Failed to read form field", e))?
    {
        let name = field.name().unwrap_or("").to_string();

        if name == FILE_FIELD && document.is_none() {
            let filename = field.file_name().unwrap_or("").to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| multipart_error("Failed to read file data", e))?
                .to_vec();

            document = Some(UploadedDocument::new(filename, data));
        } else {
            // Unknown fields are drained but still subject to the body limit
            field
                .bytes()
                .await
                .map_err(|e| multipart_error("Failed to read form field", e))?;
        }
    }

    document.ok_or_else(|| ApiError::bad_request("No file provided"))
}

fn multipart_error(context: &str, e: MultipartError) -> ApiError {
    // Keeps 413 for oversized bodies; malformed forms come back as 400.
    ApiError::new(e.status(), format!("{}: {}", context, e.body_text()))
}
