pub mod client;
pub mod embedder;
pub mod recommendation_generator;
mod sse;
