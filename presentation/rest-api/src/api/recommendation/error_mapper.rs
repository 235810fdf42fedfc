use poem::http::StatusCode;
use poem_openapi::payload::Json;

use business::domain::recommendation::errors::RecommendationError;

use crate::api::error::{ErrorResponse, IntoErrorResponse};

impl IntoErrorResponse for RecommendationError {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>) {
        let (status, name) = match &self {
            RecommendationError::QueryRequired | RecommendationError::InvalidBirthdate => {
                (StatusCode::BAD_REQUEST, "ValidationError")
            }
            RecommendationError::EmbeddingFailed => (StatusCode::BAD_GATEWAY, "EmbeddingError"),
            RecommendationError::SearchFailed => (StatusCode::BAD_GATEWAY, "VectorStoreError"),
            RecommendationError::GenerationFailed => (StatusCode::BAD_GATEWAY, "GenerationError"),
        };

        (status, Json(ErrorResponse::new(name, self)))
    }
}
