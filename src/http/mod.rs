//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, catch-all route)
//!     → proxy.rs (log metadata, capture body, forward, relay)
//!         → headers.rs / body.rs (copying and log rendering)
//!         → error.rs (failures → 500 plain text)
//!     → Send to client
//! ```

pub mod body;
pub mod error;
pub mod headers;
pub mod proxy;
pub mod server;

pub use error::ProxyError;
pub use server::{AppState, HttpServer};
