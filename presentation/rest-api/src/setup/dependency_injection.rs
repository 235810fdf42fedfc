use std::sync::Arc;

use logger::TracingLogger;
use openai::client::OpenAIClient;
use openai::embedder::EmbeddingServiceOpenAI;
use openai::recommendation_generator::RecommendationGeneratorOpenAI;
use qdrant::client::{QdrantClient, QdrantConfig};
use qdrant::plan::repository::PlanRepositoryQdrant;

use business::application::plan::vectorize::VectorizePlansUseCaseImpl;
use business::application::recommendation::search::{
    DEFAULT_CHAR_DELAY, SearchAndRecommendUseCaseImpl,
};
use business::domain::logger::Logger;
use business::domain::plan::repository::PlanRepository;

use crate::config::app_config::AppConfig;
use crate::config::runtime_config::QDRANT_URL;
use crate::setup::error::StartupError;

pub struct DependencyContainer {
    pub health_api: crate::api::health::routes::Api,
    pub plan_api: crate::api::plan::routes::PlanApi,
    pub recommendation_api: crate::api::recommendation::routes::RecommendationApi,
    pub plan_repository: Arc<dyn PlanRepository>,
    pub logger: Arc<dyn Logger>,
}

impl DependencyContainer {
    pub fn new(config: &AppConfig) -> Result<Self, StartupError> {
        let logger: Arc<dyn Logger> = Arc::new(TracingLogger);
        let health_api = crate::api::health::routes::Api::new();

        // Infrastructure adapters
        let qdrant_client = QdrantClient::new(&QdrantConfig::new(
            config.qdrant.url.clone(),
            config.qdrant.api_key.clone(),
        ))
        .map_err(|_| StartupError::InvalidConfiguration { key: QDRANT_URL })?;
        let plan_repository: Arc<dyn PlanRepository> = Arc::new(PlanRepositoryQdrant::new(
            qdrant_client,
            config.qdrant.collection.clone(),
        ));

        let openai_client = OpenAIClient::new(config.openai.api_key.clone());
        let embedder = Arc::new(EmbeddingServiceOpenAI::new(
            openai_client.clone(),
            config.openai.embedding_model.clone(),
        ));
        let generator = Arc::new(RecommendationGeneratorOpenAI::new(
            openai_client,
            config.openai.chat_model.clone(),
        ));

        // Use cases
        let vectorize_use_case = Arc::new(VectorizePlansUseCaseImpl {
            repository: plan_repository.clone(),
            embedder: embedder.clone(),
            logger: logger.clone(),
        });
        let search_use_case = Arc::new(SearchAndRecommendUseCaseImpl {
            repository: plan_repository.clone(),
            embedder,
            generator,
            logger: logger.clone(),
            char_delay: DEFAULT_CHAR_DELAY,
        });

        let plan_api = crate::api::plan::routes::PlanApi::new(vectorize_use_case);
        let recommendation_api =
            crate::api::recommendation::routes::RecommendationApi::new(search_use_case);

        Ok(Self {
            health_api,
            plan_api,
            recommendation_api,
            plan_repository,
            logger,
        })
    }

    /// Makes sure the plan collection exists. Failures are logged only: the
    /// vector store may come up after the API does.
    pub async fn bootstrap_collection(
        repository: Arc<dyn PlanRepository>,
        logger: Arc<dyn Logger>,
    ) {
        match repository.ensure_collection().await {
            Ok(()) => logger.info("Plan collection ready"),
            Err(err) => logger.warn(&format!(
                "Plan collection not ready ({}); it will be created on first vectorize",
                err
            )),
        }
    }
}
