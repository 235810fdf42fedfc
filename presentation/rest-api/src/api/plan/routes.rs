use std::sync::Arc;

use poem_openapi::{OpenApi, payload::Json};

use business::domain::plan::use_cases::vectorize::{VectorizePlansParams, VectorizePlansUseCase};

use crate::api::error::{ErrorResponse, IntoErrorResponse};
use crate::api::plan::dto::{PlanRequest, VectorizeResponse};
use crate::api::tags::ApiTags;

pub struct PlanApi {
    vectorize_use_case: Arc<dyn VectorizePlansUseCase>,
}

impl PlanApi {
    pub fn new(vectorize_use_case: Arc<dyn VectorizePlansUseCase>) -> Self {
        Self { vectorize_use_case }
    }
}

/// Plan catalogue API
#[OpenApi]
impl PlanApi {
    /// Vectorize plans
    ///
    /// Embeds each plan's description and upserts it into the vector
    /// collection, keyed by `planId`. Re-sending a plan replaces it.
    /// The collection is created first if it does not exist yet.
    ///
    /// ## Response
    /// - `200`: `{"status": "ok", "inserted": <count>}`
    /// - `400`: the request held no plans
    /// - `502`: the embedding provider or Qdrant failed
    #[oai(path = "/vectorize", method = "post", tag = "ApiTags::Plans")]
    async fn vectorize_plans(&self, body: Json<Vec<PlanRequest>>) -> VectorizePlansResponse {
        let params = VectorizePlansParams {
            plans: body.0.into_iter().map(Into::into).collect(),
        };

        match self.vectorize_use_case.execute(params).await {
            Ok(inserted) => VectorizePlansResponse::Ok(Json(VectorizeResponse::ok(inserted))),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    400 => VectorizePlansResponse::BadRequest(json),
                    502 => VectorizePlansResponse::BadGateway(json),
                    _ => VectorizePlansResponse::InternalError(json),
                }
            }
        }
    }
}

#[derive(poem_openapi::ApiResponse)]
pub enum VectorizePlansResponse {
    #[oai(status = 200)]
    Ok(Json<VectorizeResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 502)]
    BadGateway(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}
