use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use crate::domain::logger::Logger;
use crate::domain::plan::repository::PlanRepository;
use crate::domain::plan::services::EmbeddingService;
use crate::domain::recommendation::assembler::RecommendationAssembler;
use crate::domain::recommendation::eligibility::eligibility_for;
use crate::domain::recommendation::errors::RecommendationError;
use crate::domain::recommendation::model::{
    FALLBACK_MESSAGE, RecommendationChunk, RecommendationSummary,
};
use crate::domain::recommendation::prompt::{PromptContext, build_system_prompt};
use crate::domain::recommendation::services::{CompletionStream, RecommendationGeneratorService};
use crate::domain::recommendation::use_cases::search::{
    RecommendationStream, SearchAndRecommendParams, SearchAndRecommendUseCase,
};

/// Number of nearest plans handed to the model.
pub const SEARCH_LIMIT: usize = 3;

/// Pause between streamed message characters.
pub const DEFAULT_CHAR_DELAY: Duration = Duration::from_millis(5);

pub struct SearchAndRecommendUseCaseImpl {
    pub repository: Arc<dyn PlanRepository>,
    pub embedder: Arc<dyn EmbeddingService>,
    pub generator: Arc<dyn RecommendationGeneratorService>,
    pub logger: Arc<dyn Logger>,
    pub char_delay: Duration,
}

#[async_trait]
impl SearchAndRecommendUseCase for SearchAndRecommendUseCaseImpl {
    async fn execute(
        &self,
        params: SearchAndRecommendParams,
    ) -> Result<RecommendationStream, RecommendationError> {
        let (query, profile) = match (params.query, params.user_profile) {
            (Some(query), Some(profile)) if !query.is_empty() && !profile.is_empty() => {
                (query, profile)
            }
            _ => return Err(RecommendationError::QueryRequired),
        };

        let eligibility =
            eligibility_for(profile.birthdate.as_deref(), Utc::now().date_naive())?;

        self.logger.info(&format!(
            "Recommending plans (ambiguous count: {})",
            params.ambiguous_count
        ));
        if let Some(history) = &params.history {
            self.logger.debug(&format!("Conversation history: {}", history));
        }

        let vector = self
            .embedder
            .embed(std::slice::from_ref(&query))
            .await
            .map_err(|err| {
                self.logger.error(&format!("Query embedding failed: {}", err));
                RecommendationError::EmbeddingFailed
            })?
            .into_iter()
            .next()
            .ok_or(RecommendationError::EmbeddingFailed)?;

        let plans = self
            .repository
            .search(vector, SEARCH_LIMIT)
            .await
            .map_err(|err| {
                self.logger.error(&format!("Plan search failed: {}", err));
                RecommendationError::SearchFailed
            })?;

        self.logger
            .debug(&format!("Retrieved {} candidate plans", plans.len()));

        let prompt = build_system_prompt(&PromptContext {
            query: &query,
            plans: &plans,
            eligibility: &eligibility,
            profile: &profile,
            ambiguous_count: params.ambiguous_count,
            history: params.history.as_deref(),
        });

        let deltas = self
            .generator
            .stream_completion(&prompt, &query)
            .await
            .inspect_err(|err| {
                self.logger
                    .error(&format!("Completion request failed: {}", err));
            })?;

        Ok(relay_recommendation(
            deltas,
            self.logger.clone(),
            self.char_delay,
        ))
    }
}

/// Turns raw completion deltas into the client-facing stream: a summary line
/// as soon as the answer is complete, then the message one character at a time.
fn relay_recommendation(
    mut deltas: CompletionStream,
    logger: Arc<dyn Logger>,
    char_delay: Duration,
) -> RecommendationStream {
    let (tx, rx) = mpsc::channel::<RecommendationChunk>(32);

    tokio::spawn(async move {
        let mut assembler = RecommendationAssembler::new();
        let mut recommendation = None;

        loop {
            let delta = tokio::select! {
                // Client gone: stop pulling from the upstream completion.
                _ = tx.closed() => return,
                delta = deltas.next() => delta,
            };
            let Some(delta) = delta else {
                break;
            };
            match delta {
                Ok(text) => {
                    if let Some(complete) = assembler.push(&text) {
                        recommendation = Some(complete);
                        break;
                    }
                }
                Err(err) => {
                    logger.error(&format!("Completion stream failed: {}", err));
                    break;
                }
            }
        }

        let Some(recommendation) = recommendation else {
            logger.warn("Completion ended without a parsable recommendation");
            let _ = tx
                .send(RecommendationChunk::Summary(
                    RecommendationSummary::unavailable(),
                ))
                .await;
            let _ = tx
                .send(RecommendationChunk::Text(FALLBACK_MESSAGE.to_string()))
                .await;
            return;
        };

        if tx
            .send(RecommendationChunk::Summary(recommendation.summary()))
            .await
            .is_err()
        {
            return;
        }

        for ch in recommendation.message.chars() {
            // Receiver gone means the client disconnected.
            if tx
                .send(RecommendationChunk::Text(ch.to_string()))
                .await
                .is_err()
            {
                return;
            }
            if !char_delay.is_zero() {
                tokio::time::sleep(char_delay).await;
            }
        }
    });

    ReceiverStream::new(rx).boxed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::RepositoryError;
    use crate::domain::plan::errors::EmbeddingError;
    use crate::domain::plan::model::fixtures::plan;
    use crate::domain::plan::model::{Plan, PlanPoint};
    use crate::domain::recommendation::model::{RecommendedPlan, UserProfile};
    use mockall::mock;

    mock! {
        pub PlanRepo {}

        #[async_trait]
        impl PlanRepository for PlanRepo {
            async fn ensure_collection(&self) -> Result<(), RepositoryError>;
            async fn upsert(&self, points: Vec<PlanPoint>) -> Result<(), RepositoryError>;
            async fn search(&self, vector: Vec<f32>, limit: usize) -> Result<Vec<Plan>, RepositoryError>;
        }
    }

    mock! {
        pub Embedder {}

        #[async_trait]
        impl EmbeddingService for Embedder {
            async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError>;
        }
    }

    mock! {
        pub Generator {}

        #[async_trait]
        impl RecommendationGeneratorService for Generator {
            async fn stream_completion(
                &self,
                system_prompt: &str,
                query: &str,
            ) -> Result<CompletionStream, RecommendationError>;
        }
    }

    mock! {
        pub Log {}

        impl Logger for Log {
            fn info(&self, message: &str);
            fn warn(&self, message: &str);
            fn error(&self, message: &str);
            fn debug(&self, message: &str);
        }
    }

    fn mock_logger() -> Arc<dyn Logger> {
        let mut logger = MockLog::new();
        logger.expect_info().returning(|_| ());
        logger.expect_warn().returning(|_| ());
        logger.expect_error().returning(|_| ());
        logger.expect_debug().returning(|_| ());
        Arc::new(logger)
    }

    fn profile() -> UserProfile {
        UserProfile {
            birthdate: Some("1999-05-05".to_string()),
            telecom_provider: Some("KT".to_string()),
            plan_name: Some("Old plan".to_string()),
            family_bundle: Some("없음".to_string()),
            tong_result: None,
        }
    }

    fn params(query: Option<&str>) -> SearchAndRecommendParams {
        SearchAndRecommendParams {
            query: query.map(|q| q.to_string()),
            user_profile: Some(profile()),
            ambiguous_count: 0,
            history: None,
        }
    }

    fn deltas(parts: &[&str]) -> CompletionStream {
        let items: Vec<Result<String, RecommendationError>> =
            parts.iter().map(|p| Ok(p.to_string())).collect();
        futures::stream::iter(items).boxed()
    }

    fn working_embedder() -> MockEmbedder {
        let mut embedder = MockEmbedder::new();
        embedder
            .expect_embed()
            .withf(|texts| texts.len() == 1)
            .returning(|_| Ok(vec![vec![0.5; 4]]));
        embedder
    }

    fn repo_with_plans() -> MockPlanRepo {
        let mut repo = MockPlanRepo::new();
        repo.expect_search()
            .withf(|vector, limit| vector.len() == 4 && *limit == SEARCH_LIMIT)
            .returning(|_, _| Ok(vec![plan(1, "5G 슬림"), plan(2, "5G 프리미어")]));
        repo
    }

    fn use_case(generator: MockGenerator) -> SearchAndRecommendUseCaseImpl {
        SearchAndRecommendUseCaseImpl {
            repository: Arc::new(repo_with_plans()),
            embedder: Arc::new(working_embedder()),
            generator: Arc::new(generator),
            logger: mock_logger(),
            char_delay: Duration::ZERO,
        }
    }

    async fn collect_text(stream: RecommendationStream) -> Vec<RecommendationChunk> {
        stream.collect().await
    }

    #[tokio::test]
    async fn should_stream_summary_then_message_characters() {
        let mut generator = MockGenerator::new();
        generator
            .expect_stream_completion()
            .withf(|prompt, query| prompt.contains("5G 슬림") && query == "데이터 많이 써요")
            .returning(|_, _| {
                Ok(deltas(&[
                    "{\"status\": true, \"item\": [{\"name\": \"5G 슬림\", ",
                    "\"link\": \"https://example.com/plans/1\"}], ",
                    "\"message\": \"추천\"}",
                    "trailing text is ignored",
                ]))
            });

        let stream = use_case(generator)
            .execute(params(Some("데이터 많이 써요")))
            .await
            .unwrap();
        let chunks = collect_text(stream).await;

        assert_eq!(
            chunks,
            vec![
                RecommendationChunk::Summary(RecommendationSummary {
                    status: true,
                    item: vec![RecommendedPlan {
                        name: "5G 슬림".to_string(),
                        link: "https://example.com/plans/1".to_string(),
                    }],
                }),
                RecommendationChunk::Text("추".to_string()),
                RecommendationChunk::Text("천".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn should_fall_back_when_output_never_parses() {
        let mut generator = MockGenerator::new();
        generator
            .expect_stream_completion()
            .returning(|_, _| Ok(deltas(&["Sorry, ", "I can't help"])));

        let stream = use_case(generator)
            .execute(params(Some("ㅎㅇ")))
            .await
            .unwrap();
        let body: String = collect_text(stream)
            .await
            .into_iter()
            .map(|c| c.into_text())
            .collect();

        assert_eq!(
            body,
            format!("{{\"status\":false,\"item\":[]}}\n{}", FALLBACK_MESSAGE)
        );
    }

    #[tokio::test]
    async fn should_fall_back_when_stream_breaks_before_answer() {
        let mut generator = MockGenerator::new();
        generator.expect_stream_completion().returning(|_, _| {
            let items: Vec<Result<String, RecommendationError>> = vec![
                Ok("{\"status\": tr".to_string()),
                Err(RecommendationError::GenerationFailed),
            ];
            Ok(futures::stream::iter(items).boxed())
        });

        let stream = use_case(generator)
            .execute(params(Some("hello")))
            .await
            .unwrap();
        let chunks = collect_text(stream).await;

        assert_eq!(
            chunks[0],
            RecommendationChunk::Summary(RecommendationSummary::unavailable())
        );
        assert_eq!(
            chunks[1],
            RecommendationChunk::Text(FALLBACK_MESSAGE.to_string())
        );
    }

    #[tokio::test]
    async fn should_require_query_and_profile() {
        let missing_query = use_case(MockGenerator::new())
            .execute(params(None))
            .await;
        let empty_query = use_case(MockGenerator::new())
            .execute(params(Some("")))
            .await;
        let missing_profile = use_case(MockGenerator::new())
            .execute(SearchAndRecommendParams {
                user_profile: None,
                ..params(Some("q"))
            })
            .await;

        assert!(matches!(missing_query, Err(RecommendationError::QueryRequired)));
        assert!(matches!(empty_query, Err(RecommendationError::QueryRequired)));
        assert!(matches!(missing_profile, Err(RecommendationError::QueryRequired)));
    }

    #[tokio::test]
    async fn should_reject_malformed_birthdate() {
        let result = use_case(MockGenerator::new())
            .execute(SearchAndRecommendParams {
                user_profile: Some(UserProfile {
                    birthdate: Some("yesterday".to_string()),
                    ..profile()
                }),
                ..params(Some("q"))
            })
            .await;

        assert!(matches!(result, Err(RecommendationError::InvalidBirthdate)));
    }

    #[tokio::test]
    async fn should_map_search_failure() {
        let mut repo = MockPlanRepo::new();
        repo.expect_search()
            .returning(|_, _| Err(RepositoryError::Unavailable));

        let use_case = SearchAndRecommendUseCaseImpl {
            repository: Arc::new(repo),
            embedder: Arc::new(working_embedder()),
            generator: Arc::new(MockGenerator::new()),
            logger: mock_logger(),
            char_delay: Duration::ZERO,
        };

        let result = use_case.execute(params(Some("q"))).await;

        assert!(matches!(result, Err(RecommendationError::SearchFailed)));
    }

    #[tokio::test]
    async fn should_map_embedding_failure() {
        let mut embedder = MockEmbedder::new();
        embedder
            .expect_embed()
            .returning(|_| Err(EmbeddingError::RequestFailed));

        let use_case = SearchAndRecommendUseCaseImpl {
            repository: Arc::new(MockPlanRepo::new()),
            embedder: Arc::new(embedder),
            generator: Arc::new(MockGenerator::new()),
            logger: mock_logger(),
            char_delay: Duration::ZERO,
        };

        let result = use_case.execute(params(Some("q"))).await;

        assert!(matches!(result, Err(RecommendationError::EmbeddingFailed)));
    }

    #[tokio::test]
    async fn should_surface_generation_failure_before_streaming() {
        let mut generator = MockGenerator::new();
        generator
            .expect_stream_completion()
            .returning(|_, _| Err(RecommendationError::GenerationFailed));

        let result = use_case(generator).execute(params(Some("q"))).await;

        assert!(matches!(result, Err(RecommendationError::GenerationFailed)));
    }

    #[tokio::test]
    async fn should_reject_profile_without_any_field() {
        let result = use_case(MockGenerator::new())
            .execute(SearchAndRecommendParams {
                user_profile: Some(UserProfile::default()),
                ..params(Some("q"))
            })
            .await;

        assert!(matches!(result, Err(RecommendationError::QueryRequired)));
    }

    #[tokio::test(start_paused = true)]
    async fn should_pace_message_characters() {
        let mut generator = MockGenerator::new();
        generator.expect_stream_completion().returning(|_, _| {
            Ok(deltas(&[
                "{\"status\": false, \"item\": [], \"message\": \"천천히요\"}",
            ]))
        });
        let use_case = SearchAndRecommendUseCaseImpl {
            char_delay: DEFAULT_CHAR_DELAY,
            ..use_case(generator)
        };

        let mut stream = use_case.execute(params(Some("q"))).await.unwrap();
        let summary = stream.next().await;
        let started = tokio::time::Instant::now();
        let mut text = String::new();
        while let Some(chunk) = stream.next().await {
            text.push_str(&chunk.into_text());
        }

        assert!(matches!(summary, Some(RecommendationChunk::Summary(_))));
        assert_eq!(text, "천천히요");
        assert!(started.elapsed() >= DEFAULT_CHAR_DELAY * 3);
    }

    #[tokio::test(start_paused = true)]
    async fn should_stop_reading_completion_once_client_is_gone() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let pulled = Arc::new(AtomicUsize::new(0));
        let counter = pulled.clone();
        let mut generator = MockGenerator::new();
        generator.expect_stream_completion().returning(move |_, _| {
            // Never forms a JSON object, so the relay keeps buffering.
            let endless = futures::stream::unfold(counter.clone(), |counter| async move {
                tokio::time::sleep(Duration::from_millis(1)).await;
                counter.fetch_add(1, Ordering::SeqCst);
                Some((Ok("x".to_string()), counter))
            });
            Ok(endless.boxed())
        });

        let stream = use_case(generator).execute(params(Some("q"))).await.unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;
        drop(stream);
        tokio::time::sleep(Duration::from_millis(10)).await;
        let after_drop = pulled.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert!(after_drop > 0);
        assert_eq!(pulled.load(Ordering::SeqCst), after_drop);
    }
}
