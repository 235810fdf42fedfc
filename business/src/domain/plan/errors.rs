use crate::domain::errors::RepositoryError;

/// Errors raised by an embedding provider.
#[derive(Debug, thiserror::Error)]
pub enum EmbeddingError {
    #[error("embedding.request_failed")]
    RequestFailed,
    #[error("embedding.unexpected_response")]
    UnexpectedResponse,
}

#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    #[error("plan.empty_batch")]
    EmptyBatch,
    #[error("plan.embedding_failed")]
    Embedding(#[from] EmbeddingError),
    #[error("plan.store_unavailable")]
    Repository(#[from] RepositoryError),
}
