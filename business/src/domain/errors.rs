/// Repository errors for domain layer.
/// Use code-style identifiers for all error variants for i18n compatibility.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("repository.unavailable")]
    Unavailable,
    #[error("repository.collection_setup")]
    CollectionSetup,
    #[error("repository.unexpected_response")]
    UnexpectedResponse,
}

impl RepositoryError {
    pub fn unavailable() -> Self {
        RepositoryError::Unavailable
    }
    pub fn collection_setup() -> Self {
        RepositoryError::CollectionSetup
    }
    pub fn unexpected_response() -> Self {
        RepositoryError::UnexpectedResponse
    }
}
