use std::env;

use poem::middleware::Cors;

use super::openai_config::OpenAIConfig;
use super::qdrant_config::QdrantStoreConfig;
use super::runtime_config::RuntimeConfig;
use super::server_config::{ServerArgs, ServerConfig};
use super::cors_config;
use crate::setup::error::StartupError;

pub struct AppConfig {
    pub server: ServerConfig,
    pub openai: OpenAIConfig,
    pub qdrant: QdrantStoreConfig,
    pub cors: Cors,
}

impl AppConfig {
    pub fn from_env(args: ServerArgs) -> Result<Self, StartupError> {
        Self::from_lookup(args, |key| env::var(key).ok())
    }

    /// Validates the required keys first; nothing else is read if any is missing.
    pub fn from_lookup<F>(args: ServerArgs, lookup: F) -> Result<Self, StartupError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let runtime = RuntimeConfig::from_lookup(&lookup)?;

        Ok(Self {
            server: ServerConfig::from_args(args),
            openai: OpenAIConfig::from_lookup(&runtime, &lookup),
            qdrant: QdrantStoreConfig::from_lookup(&runtime, &lookup),
            cors: cors_config::init_cors(lookup("CORS_ALLOWED_ORIGINS")),
        })
    }
}
