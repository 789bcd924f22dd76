//! HTTP server hosting the dashboard

pub mod config;
mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;

pub use config::{ConfigError, ServerConfig, DEFAULT_HOST, DEFAULT_PORT};
pub use routes::{
    build_router, build_router_with_state, AppState, ErrorResponse, EvaluateRequest,
    EvaluateResponse, HealthResponse,
};

pub struct Server {
    config: Arc<ServerConfig>,
    router: Router,
}

impl Server {
    pub fn new(config: ServerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let config = Arc::new(config);
        let router = build_router(config.clone());
        Ok(Self { config, router })
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.config.socket_addr()
    }

    /// Bind the configured address and serve until the process exits
    pub async fn run(self) -> anyhow::Result<()> {
        let addr = self.socket_addr()?;
        let listener = TcpListener::bind(addr).await?;
        self.run_with_listener(listener).await
    }

    pub async fn run_with_listener(self, listener: TcpListener) -> anyhow::Result<()> {
        let addr = listener.local_addr()?;
        log::info!("Dashboard listening on http://{}", addr);
        if self.config.debug {
            log::debug!("Debug mode enabled");
        }

        axum::serve(listener, self.router).await?;
        Ok(())
    }
}
