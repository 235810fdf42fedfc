use poem::http::StatusCode;
use poem_openapi::payload::Json;

use business::domain::plan::errors::PlanError;

use crate::api::error::{ErrorResponse, IntoErrorResponse};

impl IntoErrorResponse for PlanError {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>) {
        let (status, name) = match &self {
            PlanError::EmptyBatch => (StatusCode::BAD_REQUEST, "ValidationError"),
            PlanError::Embedding(_) => (StatusCode::BAD_GATEWAY, "EmbeddingError"),
            PlanError::Repository(_) => (StatusCode::BAD_GATEWAY, "VectorStoreError"),
        };

        (status, Json(ErrorResponse::new(name, self)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use business::domain::errors::RepositoryError;

    #[test]
    fn should_map_validation_and_upstream_failures() {
        let (empty, body) = PlanError::EmptyBatch.into_error_response();
        let (store, _) = PlanError::Repository(RepositoryError::Unavailable).into_error_response();

        assert_eq!(empty, StatusCode::BAD_REQUEST);
        assert_eq!(body.0.message, "plan.empty_batch");
        assert_eq!(store, StatusCode::BAD_GATEWAY);
    }
}
