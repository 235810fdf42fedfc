use clap::Parser;

/// Command line surface of the service.
#[derive(Debug, Clone, Parser)]
#[command(name = "plan-recommender", version, about = "Telecom plan recommendation API")]
pub struct ServerArgs {
    /// Address to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,
    /// TCP port to bind
    #[arg(long, env = "PORT", default_value_t = 8000)]
    pub port: u16,
    /// Development auto-reload (delegated to an external watcher)
    #[arg(long)]
    pub reload: bool,
}

/// Server configuration for HTTP listener
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub reload: bool,
}

impl ServerConfig {
    pub fn from_args(args: ServerArgs) -> Self {
        Self {
            host: args.host,
            port: args.port,
            reload: args.reload,
        }
    }

    /// Get the bind address as "host:port"
    pub fn bind_address(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            // Bare IPv6 literal
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}
