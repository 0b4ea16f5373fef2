//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with a single catch-all handler
//! - Build the shared upstream client once
//! - Bind the router to a listener and serve until shutdown

use std::sync::Arc;

use axum::{routing::any, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::config::ProxyConfig;
use crate::http::proxy::proxy_handler;
use crate::upstream::UpstreamClient;

/// Application state injected into handlers.
///
/// Read-only after construction; cloning only bumps reference counts.
#[derive(Clone)]
pub struct AppState {
    pub upstream: Arc<UpstreamClient>,
    pub max_body_bytes: usize,
    pub log_bodies: bool,
    pub max_logged_body_bytes: Option<usize>,
}

/// HTTP server for the proxy.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> Self {
        let upstream = Arc::new(UpstreamClient::new(&config.upstream, &config.timeouts));

        let state = AppState {
            upstream,
            max_body_bytes: config.limits.max_body_bytes,
            log_bodies: config.observability.log_bodies,
            max_logged_body_bytes: config.observability.max_logged_body_bytes,
        };

        let router = Self::build_router(state);
        Self { router, config }
    }

    /// Every method on every path goes through the same pipeline.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(proxy_handler))
            .route("/", any(proxy_handler))
            .with_state(state)
            .layer(TraceLayer::new_for_http())
    }

    /// A clone of the router, for driving requests in-process.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// Returns once `shutdown` fires and in-flight requests have drained.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream.base_url,
            "Starting InfluxDB proxy server"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
