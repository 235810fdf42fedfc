use std::collections::VecDeque;

use async_trait::async_trait;
use futures::stream::{self, BoxStream};
use futures::StreamExt;
use serde_json::json;
use tracing::warn;

use business::domain::recommendation::errors::RecommendationError;
use business::domain::recommendation::services::{
    CompletionStream, RecommendationGeneratorService,
};

use crate::client::OpenAIClient;
use crate::sse::CompletionChunkDecoder;

const TEMPERATURE: f64 = 0.7;

pub struct RecommendationGeneratorOpenAI {
    client: OpenAIClient,
    model: String,
}

impl RecommendationGeneratorOpenAI {
    pub fn new(client: OpenAIClient, model: String) -> Self {
        Self { client, model }
    }
}

struct DeltaState {
    bytes: BoxStream<'static, reqwest::Result<Vec<u8>>>,
    decoder: CompletionChunkDecoder,
    pending: VecDeque<String>,
    finished: bool,
}

fn content_deltas(response: reqwest::Response) -> CompletionStream {
    let state = DeltaState {
        bytes: response
            .bytes_stream()
            .map(|chunk| chunk.map(|bytes| bytes.to_vec()))
            .boxed(),
        decoder: CompletionChunkDecoder::default(),
        pending: VecDeque::new(),
        finished: false,
    };

    stream::unfold(state, |mut state| async move {
        loop {
            if let Some(delta) = state.pending.pop_front() {
                return Some((Ok(delta), state));
            }
            if state.finished {
                return None;
            }
            match state.bytes.next().await {
                Some(Ok(bytes)) => {
                    let decoded = state.decoder.push(&bytes);
                    state.pending.extend(decoded.deltas);
                    state.finished = decoded.done;
                }
                Some(Err(err)) => {
                    warn!("OpenAI completion stream interrupted: {}", err);
                    state.finished = true;
                    return Some((Err(RecommendationError::GenerationFailed), state));
                }
                None => state.finished = true,
            }
        }
    })
    .boxed()
}

#[async_trait]
impl RecommendationGeneratorService for RecommendationGeneratorOpenAI {
    async fn stream_completion(
        &self,
        system_prompt: &str,
        query: &str,
    ) -> Result<CompletionStream, RecommendationError> {
        let body = json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": system_prompt},
                {"role": "user", "content": query},
            ],
            "temperature": TEMPERATURE,
            "stream": true,
        });

        let response = self
            .client
            .client
            .post(self.client.chat_completions_url())
            .header("Content-Type", "application/json")
            .header("Authorization", self.client.auth_header())
            .json(&body)
            .send()
            .await
            .map_err(|err| {
                warn!("OpenAI completion request failed: {}", err);
                RecommendationError::GenerationFailed
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            warn!("OpenAI completion returned {}: {}", status, text);
            return Err(RecommendationError::GenerationFailed);
        }

        Ok(content_deltas(response))
    }
}
