pub mod app_config;
pub mod cors_config;
pub mod openai_config;
pub mod qdrant_config;
pub mod runtime_config;
pub mod server_config;
