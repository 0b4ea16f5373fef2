//! Structured logging.
//!
//! Events go through `tracing`; a single fmt layer writes them to stderr in
//! either human-readable or JSON form. The writer is `tracing-appender`'s
//! non-blocking wrapper: events are queued and written by a dedicated worker
//! thread, so a request task never holds the stderr lock. The queue is
//! lossless; a task only waits when the queue is full, and no event is
//! dropped.

use std::io::Write;

use tracing_appender::non_blocking::{
    NonBlocking, NonBlockingBuilder, WorkerGuard, DEFAULT_BUFFERED_LINES_LIMIT,
};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ObservabilityConfig;

/// Error returned when a global subscriber is already installed.
pub type InitError = tracing_subscriber::util::TryInitError;

/// Initialize the global subscriber.
///
/// The returned guard flushes buffered events on drop and must be kept
/// alive for the life of the process.
pub fn init_logging(config: &ObservabilityConfig) -> Result<WorkerGuard, InitError> {
    let (writer, guard) = lossless_writer(std::io::stderr(), DEFAULT_BUFFERED_LINES_LIMIT);
    let registry = tracing_subscriber::registry().with(build_env_filter(config));

    if config.log_format == "json" {
        registry
            .with(fmt::layer().json().with_current_span(true).with_writer(writer))
            .try_init()?;
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(writer))
            .try_init()?;
    }

    Ok(guard)
}

/// Non-blocking writer that applies backpressure instead of dropping events.
fn lossless_writer<W>(sink: W, buffered_lines: usize) -> (NonBlocking, WorkerGuard)
where
    W: Write + Send + 'static,
{
    NonBlockingBuilder::default()
        .lossy(false)
        .buffered_lines_limit(buffered_lines)
        .finish(sink)
}

/// `RUST_LOG` wins; otherwise the configured level applies to this crate.
fn build_env_filter(config: &ObservabilityConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "influx_proxy={},tower_http=warn",
            config.log_level
        ))
    })
}
