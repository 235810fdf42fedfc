use crate::setup::error::StartupError;

pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const QDRANT_API_KEY: &str = "QDRANT_API_KEY";
pub const QDRANT_URL: &str = "QDRANT_URL";

/// Required keys, in the order they are reported when missing.
pub const REQUIRED_KEYS: [&str; 3] = [OPENAI_API_KEY, QDRANT_API_KEY, QDRANT_URL];

/// Credentials and addresses for the upstream providers.
///
/// Loaded once at startup and never mutated; values are kept exactly as they
/// appear in the environment.
#[derive(Clone, PartialEq)]
pub struct RuntimeConfig {
    pub openai_api_key: String,
    pub qdrant_api_key: String,
    pub qdrant_url: String,
}

impl RuntimeConfig {
    /// Load runtime configuration through `lookup`
    ///
    /// Keys:
    /// - OPENAI_API_KEY: credential for LLM provider calls (required)
    /// - QDRANT_API_KEY: credential for vector database calls (required)
    /// - QDRANT_URL: vector database address, e.g. http://localhost:6333 (required)
    ///
    /// # Errors
    /// Returns `StartupError::MissingConfiguration` naming every key that is
    /// unset or empty.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, StartupError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut missing = Vec::new();
        let mut values = REQUIRED_KEYS.map(|key| match lookup(key) {
            Some(value) if !value.is_empty() => value,
            _ => {
                missing.push(key);
                String::new()
            }
        });

        if !missing.is_empty() {
            return Err(StartupError::MissingConfiguration { keys: missing });
        }

        Ok(Self {
            openai_api_key: std::mem::take(&mut values[0]),
            qdrant_api_key: std::mem::take(&mut values[1]),
            qdrant_url: std::mem::take(&mut values[2]),
        })
    }
}

impl std::fmt::Debug for RuntimeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuntimeConfig")
            .field("openai_api_key", &"<redacted>")
            .field("qdrant_api_key", &"<redacted>")
            .field("qdrant_url", &self.qdrant_url)
            .finish()
    }
}
