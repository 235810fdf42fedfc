use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::logger::Logger;
use crate::domain::plan::errors::{EmbeddingError, PlanError};
use crate::domain::plan::model::PlanPoint;
use crate::domain::plan::repository::PlanRepository;
use crate::domain::plan::services::EmbeddingService;
use crate::domain::plan::use_cases::vectorize::{VectorizePlansParams, VectorizePlansUseCase};

pub struct VectorizePlansUseCaseImpl {
    pub repository: Arc<dyn PlanRepository>,
    pub embedder: Arc<dyn EmbeddingService>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl VectorizePlansUseCase for VectorizePlansUseCaseImpl {
    async fn execute(&self, params: VectorizePlansParams) -> Result<usize, PlanError> {
        if params.plans.is_empty() {
            return Err(PlanError::EmptyBatch);
        }

        self.logger
            .info(&format!("Vectorizing {} plans", params.plans.len()));

        let texts: Vec<String> = params.plans.iter().map(|p| p.describe()).collect();
        let vectors = self.embedder.embed(&texts).await.inspect_err(|err| {
            self.logger.error(&format!("Plan embedding failed: {}", err));
        })?;

        if vectors.len() != params.plans.len() {
            self.logger.error(&format!(
                "Embedding count mismatch: expected {}, got {}",
                params.plans.len(),
                vectors.len()
            ));
            return Err(EmbeddingError::UnexpectedResponse.into());
        }

        let points: Vec<PlanPoint> = params
            .plans
            .into_iter()
            .zip(vectors)
            .map(|(plan, vector)| PlanPoint::new(plan, vector))
            .collect();
        let inserted = points.len();

        self.repository.ensure_collection().await?;
        self.repository.upsert(points).await.inspect_err(|err| {
            self.logger.error(&format!("Plan upsert failed: {}", err));
        })?;

        self.logger.info(&format!("Upserted {} plan points", inserted));

        Ok(inserted)
    }
}
