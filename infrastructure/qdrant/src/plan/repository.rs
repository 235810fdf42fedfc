use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::json;
use tracing::{debug, info, warn};

use business::domain::errors::RepositoryError;
use business::domain::plan::model::{EMBEDDING_DIMENSIONS, Plan, PlanPoint};
use business::domain::plan::repository::PlanRepository;

use super::entity::{
    ExistsResult, PointEntity, QdrantResponse, ScoredPointEntity, SearchRequest,
    UpsertPointsRequest,
};
use crate::client::QdrantClient;

pub const DEFAULT_COLLECTION: &str = "plan_collection";

/// Points per upsert request.
const UPSERT_BATCH_SIZE: usize = 64;

pub struct PlanRepositoryQdrant {
    client: QdrantClient,
    collection: String,
}

impl PlanRepositoryQdrant {
    pub fn new(client: QdrantClient, collection: String) -> Self {
        Self { client, collection }
    }

    fn collection_url(&self) -> String {
        self.client.collection_url(&self.collection)
    }

    async fn collection_exists(&self) -> Result<bool, RepositoryError> {
        let response = self
            .client
            .get(&format!("{}/exists", self.collection_url()))
            .send()
            .await
            .map_err(|err| {
                warn!("Qdrant unreachable: {}", err);
                RepositoryError::unavailable()
            })?;

        if !response.status().is_success() {
            warn!("Qdrant exists check returned {}", response.status());
            return Err(RepositoryError::unavailable());
        }

        let body: QdrantResponse<ExistsResult> = response
            .json()
            .await
            .map_err(|_| RepositoryError::unexpected_response())?;

        Ok(body.result.exists)
    }
}

#[async_trait]
impl PlanRepository for PlanRepositoryQdrant {
    async fn ensure_collection(&self) -> Result<(), RepositoryError> {
        if self.collection_exists().await? {
            debug!("Collection {} already exists", self.collection);
            return Ok(());
        }

        let response = self
            .client
            .put(&self.collection_url())
            .json(&json!({
                "vectors": {
                    "size": EMBEDDING_DIMENSIONS,
                    "distance": "Cosine",
                }
            }))
            .send()
            .await
            .map_err(|_| RepositoryError::unavailable())?;

        match response.status() {
            status if status.is_success() => {
                info!("Created collection {}", self.collection);
                Ok(())
            }
            // Another instance created it in the meantime.
            StatusCode::CONFLICT => Ok(()),
            status => {
                let text = response.text().await.unwrap_or_default();
                warn!("Qdrant collection creation returned {}: {}", status, text);
                Err(RepositoryError::collection_setup())
            }
        }
    }

    async fn upsert(&self, points: Vec<PlanPoint>) -> Result<(), RepositoryError> {
        let url = format!("{}/points?wait=true", self.collection_url());
        let mut entities: Vec<PointEntity> = points.into_iter().map(Into::into).collect();

        while !entities.is_empty() {
            let rest = entities.split_off(entities.len().min(UPSERT_BATCH_SIZE));
            let batch = std::mem::replace(&mut entities, rest);
            let count = batch.len();

            let response = self
                .client
                .put(&url)
                .json(&UpsertPointsRequest { points: batch })
                .send()
                .await
                .map_err(|_| RepositoryError::unavailable())?;

            if !response.status().is_success() {
                let status = response.status();
                let text = response.text().await.unwrap_or_default();
                warn!("Qdrant upsert returned {}: {}", status, text);
                return Err(RepositoryError::unavailable());
            }

            debug!("Upserted {} points into {}", count, self.collection);
        }

        Ok(())
    }

    async fn search(&self, vector: Vec<f32>, limit: usize) -> Result<Vec<Plan>, RepositoryError> {
        let response = self
            .client
            .post(&format!("{}/points/search", self.collection_url()))
            .json(&SearchRequest {
                vector,
                limit,
                with_payload: true,
            })
            .send()
            .await
            .map_err(|_| RepositoryError::unavailable())?;

        if !response.status().is_success() {
            warn!("Qdrant search returned {}", response.status());
            return Err(RepositoryError::unavailable());
        }

        let body: QdrantResponse<Vec<ScoredPointEntity>> = response
            .json()
            .await
            .map_err(|_| RepositoryError::unexpected_response())?;

        let plans = body
            .result
            .into_iter()
            .filter_map(|hit| {
                let payload = hit.payload?;
                match serde_json::from_value::<Plan>(payload) {
                    Ok(plan) => {
                        debug!("Matched plan {} (score {:.3})", plan.plan_id, hit.score);
                        Some(plan)
                    }
                    Err(err) => {
                        warn!("Skipping point {} with invalid payload: {}", hit.id, err);
                        None
                    }
                }
            })
            .collect();

        Ok(plans)
    }
}
