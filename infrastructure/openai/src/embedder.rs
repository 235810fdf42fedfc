use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use business::domain::plan::errors::EmbeddingError;
use business::domain::plan::model::EMBEDDING_DIMENSIONS;
use business::domain::plan::services::EmbeddingService;

use crate::client::OpenAIClient;

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingRow>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingRow {
    index: usize,
    embedding: Vec<f32>,
}

/// Embeds texts with the OpenAI embeddings endpoint, shortened to the
/// collection's vector size.
pub struct EmbeddingServiceOpenAI {
    client: OpenAIClient,
    model: String,
}

impl EmbeddingServiceOpenAI {
    pub fn new(client: OpenAIClient, model: String) -> Self {
        Self { client, model }
    }
}

#[async_trait]
impl EmbeddingService for EmbeddingServiceOpenAI {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        let body = json!({
            "model": self.model,
            "input": texts,
            "dimensions": EMBEDDING_DIMENSIONS,
        });

        let response = self
            .client
            .client
            .post(self.client.embeddings_url())
            .header("Authorization", self.client.auth_header())
            .json(&body)
            .send()
            .await
            .map_err(|err| {
                warn!("OpenAI embeddings request failed: {}", err);
                EmbeddingError::RequestFailed
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            warn!("OpenAI embeddings returned {}: {}", status, text);
            return Err(EmbeddingError::RequestFailed);
        }

        let mut data: EmbeddingResponse = response
            .json()
            .await
            .map_err(|_| EmbeddingError::UnexpectedResponse)?;

        if data.data.len() != texts.len() {
            return Err(EmbeddingError::UnexpectedResponse);
        }

        data.data.sort_by_key(|row| row.index);

        if data
            .data
            .iter()
            .any(|row| row.embedding.len() != EMBEDDING_DIMENSIONS)
        {
            return Err(EmbeddingError::UnexpectedResponse);
        }

        Ok(data.data.into_iter().map(|row| row.embedding).collect())
    }
}
