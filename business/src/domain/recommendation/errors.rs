#[derive(Debug, thiserror::Error)]
pub enum RecommendationError {
    #[error("recommendation.query_required")]
    QueryRequired,
    #[error("recommendation.invalid_birthdate")]
    InvalidBirthdate,
    #[error("recommendation.embedding_failed")]
    EmbeddingFailed,
    #[error("recommendation.search_failed")]
    SearchFailed,
    #[error("recommendation.generation_failed")]
    GenerationFailed,
}
