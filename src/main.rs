//! InfluxDB logging proxy.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request           ┌──────────────────────────────────────────────┐
//!     ─────────────────────────┼─▶ listener ─▶ http server ─▶ proxy pipeline  │
//!                              │                                │   log line   │
//!                              │                                ▼              │
//!     Client Response          │                         upstream client ──────┼──▶ InfluxDB
//!     ◀────────────────────────┼──────────── relay (status, headers, body) ◀───┼───
//!                              └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use influx_proxy::config::{
    load_config, read_config, validate_config, ConfigError, ProxyConfig,
};
use influx_proxy::lifecycle::{signals, Shutdown};
use influx_proxy::observability::{logging, metrics};
use influx_proxy::{net, HttpServer};

#[derive(Parser)]
#[command(name = "influx-proxy")]
#[command(about = "Logging reverse proxy for an InfluxDB endpoint", long_about = None)]
struct Cli {
    /// TOML configuration file. Defaults apply when omitted.
    #[arg(short, long, env = "INFLUX_PROXY_CONFIG")]
    config: Option<PathBuf>,

    /// Listen address, overrides `listener.bind_address`.
    #[arg(short, long, env = "INFLUX_PROXY_LISTEN")]
    listen: Option<String>,

    /// Upstream base URL, overrides `upstream.base_url`.
    #[arg(short, long, env = "INFLUX_PROXY_UPSTREAM")]
    upstream: Option<String>,
}

impl Cli {
    fn into_config(self) -> Result<ProxyConfig, ConfigError> {
        if let (Some(path), None, None) = (&self.config, &self.listen, &self.upstream) {
            return load_config(path);
        }

        let mut config = match &self.config {
            Some(path) => read_config(path)?,
            None => ProxyConfig::default(),
        };

        if let Some(listen) = self.listen {
            config.listener.bind_address = listen;
        }
        if let Some(upstream) = self.upstream {
            config.upstream.base_url = upstream;
        }

        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let config = match Cli::parse().into_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("influx-proxy: invalid configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Flushes buffered log lines when main returns.
    let _log_guard = match logging::init_logging(&config.observability) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("influx-proxy: failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.base_url,
        forward_query = config.upstream.forward_query,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let listener = match net::bind(&config.listener).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, "Failed to start listener");
            return ExitCode::FAILURE;
        }
    };

    if config.observability.metrics_enabled {
        // Validation guarantees the address parses.
        if let Ok(addr) = config.observability.metrics_address.parse() {
            if let Err(e) = metrics::init_metrics(addr) {
                tracing::error!(error = %e, "Failed to start metrics endpoint");
                return ExitCode::FAILURE;
            }
        }
    }

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        signals::wait_for_signal().await;
        shutdown.trigger();
    });

    let server = HttpServer::new(config);
    if let Err(e) = server.run(listener, server_shutdown).await {
        tracing::error!(error = %e, "HTTP server failed");
        return ExitCode::FAILURE;
    }

    tracing::info!("Shutdown complete");
    ExitCode::SUCCESS
}
