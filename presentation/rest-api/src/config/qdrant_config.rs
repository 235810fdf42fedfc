use qdrant::plan::repository::DEFAULT_COLLECTION;

use super::runtime_config::RuntimeConfig;

/// Configuration for the Qdrant vector store.
#[derive(Clone)]
pub struct QdrantStoreConfig {
    pub url: String,
    pub api_key: String,
    pub collection: String,
}

impl QdrantStoreConfig {
    /// Optional overrides:
    /// - QDRANT_COLLECTION (default: "plan_collection")
    pub fn from_lookup<F>(runtime: &RuntimeConfig, lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            url: runtime.qdrant_url.clone(),
            api_key: runtime.qdrant_api_key.clone(),
            collection: lookup("QDRANT_COLLECTION")
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_COLLECTION.to_string()),
        }
    }
}
