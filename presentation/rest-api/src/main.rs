use clap::Parser;
use dotenvy::dotenv;
use tracing::{error, warn};

mod api;
mod config;
mod setup;

use config::{app_config::AppConfig, server_config::ServerArgs};
use setup::{dependency_injection::DependencyContainer, server::Server, shutdown::shutdown_signal};

/// REST API Entry Point
///
/// Validates configuration, wires dependencies, binds the listener and
/// serves until Ctrl-C or SIGTERM.
///
/// - config/: environment and command line configuration
/// - setup/: dependency injection, startup errors and server setup
/// - api/: route handlers and DTOs
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load .env; real environment values win
    dotenv().ok();

    // 2. Initialize tracing with RUST_LOG env filter
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    // 3. Load configuration, before any network call
    let config = AppConfig::from_env(ServerArgs::parse()).inspect_err(|err| error!("{err}"))?;
    if config.server.reload {
        warn!("--reload is handled by an external watcher (e.g. `cargo watch -x run`)");
    }

    // 4. Wire dependencies
    let container = DependencyContainer::new(&config).inspect_err(|err| error!("{err}"))?;

    // 5. Bind
    let server = Server::bind(&config.server)
        .await
        .inspect_err(|err| error!("{err}"))?;

    // 6. Collection bootstrap runs alongside the listener
    tokio::spawn(DependencyContainer::bootstrap_collection(
        container.plan_repository.clone(),
        container.logger.clone(),
    ));

    // 7. Serve
    let public_url = format!("http://{}", config.server.bind_address());
    let app = Server::app(container, config.cors, public_url);
    server.run(app, shutdown_signal()).await?;

    Ok(())
}
