use std::sync::Arc;

use futures::StreamExt;
use poem::Body;
use poem_openapi::{
    OpenApi,
    payload::{Binary, Json},
};

use business::domain::recommendation::use_cases::search::{
    SearchAndRecommendParams, SearchAndRecommendUseCase,
};

use crate::api::error::{ErrorResponse, IntoErrorResponse};
use crate::api::recommendation::dto::{SearchRequest, render_history};
use crate::api::tags::ApiTags;

pub struct RecommendationApi {
    search_use_case: Arc<dyn SearchAndRecommendUseCase>,
}

impl RecommendationApi {
    pub fn new(search_use_case: Arc<dyn SearchAndRecommendUseCase>) -> Self {
        Self { search_use_case }
    }
}

/// Recommendation API
#[OpenApi]
impl RecommendationApi {
    /// Search and recommend plans
    ///
    /// Finds the plans closest to the query and streams the model's advice as
    /// plain text. The first line is a JSON object `{"status", "item"}` listing
    /// the recommended plans; the explanation follows character by character.
    ///
    /// ## Request
    /// - `query`, `userProfile`: required; the profile needs at least one field
    /// - `ambiguousCount`: recent turns the assistant could not understand;
    ///   from 3 on, unclear questions are referred to the customer centre
    /// - `history`: previous turns, any JSON shape
    ///
    /// ## Response
    /// - `200`: streamed `text/plain`. If the model answer cannot be parsed
    ///   the summary is `{"status":false,"item":[]}` followed by a fallback
    ///   sentence.
    /// - `400`: missing query or profile, malformed birthdate
    /// - `502`: embedding, vector search or completion request failed
    #[oai(path = "/search", method = "post", tag = "ApiTags::Recommendations")]
    async fn search(&self, body: Json<SearchRequest>) -> SearchResponse {
        let request = body.0;
        let params = SearchAndRecommendParams {
            query: request.query,
            user_profile: request.user_profile.map(Into::into),
            ambiguous_count: request.ambiguous_count.unwrap_or(0),
            history: render_history(request.history),
        };

        match self.search_use_case.execute(params).await {
            Ok(stream) => {
                let bytes = stream.map(|chunk| Ok::<_, std::io::Error>(chunk.into_text()));
                SearchResponse::Ok(Binary(Body::from_bytes_stream(bytes)))
            }
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    400 => SearchResponse::BadRequest(json),
                    502 => SearchResponse::BadGateway(json),
                    _ => SearchResponse::InternalError(json),
                }
            }
        }
    }
}

#[derive(poem_openapi::ApiResponse)]
pub enum SearchResponse {
    /// Streamed recommendation
    #[oai(status = 200, content_type = "text/plain; charset=utf-8")]
    Ok(Binary<Body>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 502)]
    BadGateway(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use business::domain::recommendation::errors::RecommendationError;
    use business::domain::recommendation::model::{
        RecommendationChunk, RecommendationSummary, RecommendedPlan,
    };
    use business::domain::recommendation::use_cases::search::RecommendationStream;
    use mockall::mock;
    use poem::Route;
    use poem::http::StatusCode;
    use poem::test::TestClient;
    use poem_openapi::OpenApiService;
    use serde_json::json;

    mock! {
        pub Search {}

        #[async_trait]
        impl SearchAndRecommendUseCase for Search {
            async fn execute(
                &self,
                params: SearchAndRecommendParams,
            ) -> Result<RecommendationStream, RecommendationError>;
        }
    }

    fn client(use_case: MockSearch) -> TestClient<Route> {
        let api = RecommendationApi::new(Arc::new(use_case));
        TestClient::new(Route::new().nest("/", OpenApiService::new(api, "test", "0.0.0")))
    }

    #[tokio::test]
    async fn should_stream_summary_line_then_text() {
        let mut use_case = MockSearch::new();
        use_case
            .expect_execute()
            .withf(|params| {
                params.query.as_deref() == Some("게임 자주 해요")
                    && params.ambiguous_count == 1
                    && params
                        .user_profile
                        .as_ref()
                        .and_then(|p| p.plan_name.as_deref())
                        == Some("T플랜")
                    && params.history.as_deref() == Some("이전 대화")
            })
            .returning(|_| {
                let chunks = vec![
                    RecommendationChunk::Summary(RecommendationSummary {
                        status: true,
                        item: vec![RecommendedPlan {
                            name: "5G 프리미어".to_string(),
                            link: "https://example.com/p".to_string(),
                        }],
                    }),
                    RecommendationChunk::Text("좋".to_string()),
                    RecommendationChunk::Text("아".to_string()),
                ];
                Ok(futures::stream::iter(chunks).boxed())
            });

        let resp = client(use_case)
            .post("/search")
            .body_json(&json!({
                "query": "게임 자주 해요",
                "userProfile": {"birthdate": "2001-02-03", "planName": "T플랜"},
                "ambiguousCount": 1,
                "history": "이전 대화",
            }))
            .send()
            .await;

        resp.assert_status_is_ok();
        resp.assert_content_type("text/plain; charset=utf-8");
        let text = resp.0.into_body().into_string().await.unwrap();
        assert_eq!(
            text,
            "{\"status\":true,\"item\":[{\"name\":\"5G 프리미어\",\"link\":\"https://example.com/p\"}]}\n좋아"
        );
    }

    #[tokio::test]
    async fn should_reject_missing_query_with_bad_request() {
        let mut use_case = MockSearch::new();
        use_case
            .expect_execute()
            .returning(|_| Err(RecommendationError::QueryRequired));

        let resp = client(use_case)
            .post("/search")
            .body_json(&json!({"userProfile": {}}))
            .send()
            .await;

        resp.assert_status(StatusCode::BAD_REQUEST);
        let body: serde_json::Value =
            serde_json::from_str(&resp.0.into_body().into_string().await.unwrap()).unwrap();
        assert_eq!(body["message"], "recommendation.query_required");
    }

    #[tokio::test]
    async fn should_map_generation_failure_to_bad_gateway() {
        let mut use_case = MockSearch::new();
        use_case
            .expect_execute()
            .returning(|_| Err(RecommendationError::GenerationFailed));

        let resp = client(use_case)
            .post("/search")
            .body_json(&json!({"query": "q", "userProfile": {"planName": "T플랜"}}))
            .send()
            .await;

        resp.assert_status(StatusCode::BAD_GATEWAY);
    }
}
