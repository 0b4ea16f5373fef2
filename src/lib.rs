//! Logging reverse proxy for an InfluxDB endpoint.
//!
//! Every request is logged, forwarded unchanged to one upstream, and the
//! upstream's response is relayed back verbatim.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod upstream;

pub use config::ProxyConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
