use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;

use poem::listener::{Acceptor, Listener, TcpAcceptor, TcpListener};
use poem::middleware::{Cors, Tracing};
use poem::{Endpoint, EndpointExt, IntoEndpoint, Response, Route, Server as PoemServer};
use poem_openapi::OpenApiService;
use tracing::info;

use crate::config::server_config::ServerConfig;
use crate::setup::dependency_injection::DependencyContainer;
use crate::setup::error::StartupError;

/// Grace period for in-flight requests after a shutdown signal.
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(10);

/// A listener that already holds its socket.
pub struct Server {
    acceptor: TcpAcceptor,
    address: String,
}

impl Server {
    /// Binds the listening socket without serving yet, so bind failures
    /// surface as `StartupError::Bind`.
    pub async fn bind(config: &ServerConfig) -> Result<Self, StartupError> {
        let address = config.bind_address();
        let acceptor = TcpListener::bind(address.clone())
            .into_acceptor()
            .await
            .map_err(|source| StartupError::Bind {
                address: address.clone(),
                source,
            })?;

        Ok(Self { acceptor, address })
    }

    /// The bound address, with the port the OS picked when 0 was requested.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.acceptor
            .local_addr()
            .into_iter()
            .find_map(|addr| addr.as_socket_addr().copied())
    }

    /// Assembles the routes, API docs and middleware.
    pub fn app(
        container: DependencyContainer,
        cors: Cors,
        public_url: String,
    ) -> impl Endpoint<Output = Response> {
        let api_service = OpenApiService::new(
            (
                container.health_api,
                container.plan_api,
                container.recommendation_api,
            ),
            "Plan Recommender API",
            env!("CARGO_PKG_VERSION"),
        )
        .server(public_url);
        let ui = api_service.swagger_ui();
        let spec = api_service.spec_endpoint();

        Route::new()
            .nest("/", api_service)
            .nest("/docs", ui)
            .nest("/openapi.json", spec)
            .with(cors)
            .with(Tracing)
            .map_to_response()
    }

    /// Serves until `shutdown` resolves, then drains in-flight requests.
    pub async fn run<E>(self, app: E, shutdown: impl Future<Output = ()>) -> std::io::Result<()>
    where
        E: IntoEndpoint,
        E::Endpoint: 'static,
    {
        let address = self
            .local_addr()
            .map(|addr| addr.to_string())
            .unwrap_or_else(|| self.address.clone());
        info!("Server running at http://{}", address);
        info!("Swagger UI at http://{}/docs", address);
        info!("OpenAPI JSON at http://{}/openapi.json", address);

        PoemServer::new_with_acceptor(self.acceptor)
            .run_with_graceful_shutdown(app, shutdown, Some(SHUTDOWN_TIMEOUT))
            .await
    }
}
