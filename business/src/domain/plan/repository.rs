use async_trait::async_trait;

use crate::domain::errors::RepositoryError;

use super::model::{Plan, PlanPoint};

/// Vector store port for the plan catalogue.
#[async_trait]
pub trait PlanRepository: Send + Sync {
    /// Creates the backing collection when it does not exist yet.
    async fn ensure_collection(&self) -> Result<(), RepositoryError>;
    async fn upsert(&self, points: Vec<PlanPoint>) -> Result<(), RepositoryError>;
    /// Returns the `limit` plans closest to `vector`, best match first.
    async fn search(&self, vector: Vec<f32>, limit: usize) -> Result<Vec<Plan>, RepositoryError>;
}
