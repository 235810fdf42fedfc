use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::domain::recommendation::errors::RecommendationError;
use crate::domain::recommendation::model::{RecommendationChunk, UserProfile};

pub struct SearchAndRecommendParams {
    pub query: Option<String>,
    pub user_profile: Option<UserProfile>,
    pub ambiguous_count: u32,
    /// Previous conversation, already rendered as text.
    pub history: Option<String>,
}

pub type RecommendationStream = BoxStream<'static, RecommendationChunk>;

#[async_trait]
pub trait SearchAndRecommendUseCase: Send + Sync {
    async fn execute(
        &self,
        params: SearchAndRecommendParams,
    ) -> Result<RecommendationStream, RecommendationError>;
}
