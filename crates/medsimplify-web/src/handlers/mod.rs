pub mod health;
pub mod simplify;
pub mod upload;

use crate::models::ApiError;

/// Fallback for routes outside the API surface.
pub async fn not_found() -> ApiError {
    ApiError::not_found()
}
