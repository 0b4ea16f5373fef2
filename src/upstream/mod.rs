//! Upstream subsystem.
//!
//! # Data Flow
//! ```text
//! Captured inbound request (parts + buffered body)
//!     → client.rs (target URI, header copy, outbound request)
//!     → pooled hyper client (HTTPS via rustls, or plain HTTP)
//!     → Response<Incoming> streamed back by the HTTP layer
//! ```
//!
//! # Design Decisions
//! - One client for the whole process, shared via `Arc`
//! - Every upstream call is bounded by `timeouts.request_secs`
//! - No retries: a failure surfaces to the caller immediately

pub mod client;

pub use client::{UpstreamClient, UpstreamError};
