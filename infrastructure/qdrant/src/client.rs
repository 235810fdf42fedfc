use std::time::Duration;

use reqwest::{Client, RequestBuilder, Url};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("qdrant.invalid_url")]
    InvalidUrl,
}

/// Configuration for the Qdrant connection
pub struct QdrantConfig {
    pub url: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl QdrantConfig {
    /// Creates a new Qdrant configuration with default values
    pub fn new(url: String, api_key: String) -> Self {
        Self {
            url,
            api_key,
            timeout: Duration::from_secs(10),
        }
    }
}

/// REST client for a single Qdrant deployment.
#[derive(Clone)]
pub struct QdrantClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl QdrantClient {
    /// Creates a client. The URL must be absolute, use http or https and
    /// name a host.
    pub fn new(config: &QdrantConfig) -> Result<Self, ClientError> {
        let url = Url::parse(&config.url).map_err(|_| ClientError::InvalidUrl)?;
        if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
            return Err(ClientError::InvalidUrl);
        }
        let base_url = url.as_str().trim_end_matches('/').to_string();

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_default();

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key.clone(),
        })
    }

    pub fn collection_url(&self, collection: &str) -> String {
        format!("{}/collections/{}", self.base_url, collection)
    }

    pub fn get(&self, url: &str) -> RequestBuilder {
        self.authorized(self.client.get(url))
    }

    pub fn put(&self, url: &str) -> RequestBuilder {
        self.authorized(self.client.put(url))
    }

    pub fn post(&self, url: &str) -> RequestBuilder {
        self.authorized(self.client.post(url))
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.header("api-key", &self.api_key)
    }
}

impl std::fmt::Debug for QdrantClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QdrantClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}
