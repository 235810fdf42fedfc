use async_trait::async_trait;
use futures::stream::BoxStream;

use super::errors::RecommendationError;

/// Text deltas of a streamed completion, in arrival order.
pub type CompletionStream = BoxStream<'static, Result<String, RecommendationError>>;

/// Service port for the chat model that writes recommendations.
#[async_trait]
pub trait RecommendationGeneratorService: Send + Sync {
    async fn stream_completion(
        &self,
        system_prompt: &str,
        query: &str,
    ) -> Result<CompletionStream, RecommendationError>;
}
