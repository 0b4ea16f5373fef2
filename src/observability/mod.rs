//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Request pipeline produces:
//!     → logging.rs (one event per pipeline step, inside a request span)
//!     → metrics.rs (counters, upstream latency histogram)
//!
//! Consumers:
//!     → stderr (text or JSON lines)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Log writes are handed to a background worker; handlers never block on I/O
//! - A request id is attached to every line of a request via its span
//! - Metrics are cheap (atomic increments) and disabled by default

pub mod logging;
pub mod metrics;
