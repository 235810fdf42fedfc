use async_trait::async_trait;

use super::errors::EmbeddingError;

/// Service port turning texts into embeddings of `EMBEDDING_DIMENSIONS` floats.
///
/// Implementations must return one vector per input, in input order.
#[async_trait]
pub trait EmbeddingService: Send + Sync {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError>;
}
