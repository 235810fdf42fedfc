use thiserror::Error;

/// Failures that abort the launch before any request is served.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("missing required configuration: {}", .keys.join(", "))]
    MissingConfiguration { keys: Vec<&'static str> },
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration value for {key}")]
    InvalidConfiguration { key: &'static str },
}
