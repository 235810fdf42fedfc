use openai::client::{DEFAULT_CHAT_MODEL, DEFAULT_EMBEDDING_MODEL};

use super::runtime_config::RuntimeConfig;

/// Configuration for OpenAI API access.
#[derive(Clone)]
pub struct OpenAIConfig {
    pub api_key: String,
    pub chat_model: String,
    pub embedding_model: String,
}

impl OpenAIConfig {
    /// Optional overrides:
    /// - OPENAI_CHAT_MODEL (default: "gpt-4.1-mini")
    /// - OPENAI_EMBEDDING_MODEL (default: "text-embedding-3-small")
    pub fn from_lookup<F>(runtime: &RuntimeConfig, lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            api_key: runtime.openai_api_key.clone(),
            chat_model: lookup("OPENAI_CHAT_MODEL")
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_CHAT_MODEL.to_string()),
            embedding_model: lookup("OPENAI_EMBEDDING_MODEL")
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_EMBEDDING_MODEL.to_string()),
        }
    }
}
