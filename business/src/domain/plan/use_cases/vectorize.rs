use async_trait::async_trait;

use crate::domain::plan::errors::PlanError;
use crate::domain::plan::model::Plan;

pub struct VectorizePlansParams {
    pub plans: Vec<Plan>,
}

#[async_trait]
pub trait VectorizePlansUseCase: Send + Sync {
    /// Embeds and stores the plans, returning how many were written.
    async fn execute(&self, params: VectorizePlansParams) -> Result<usize, PlanError>;
}
