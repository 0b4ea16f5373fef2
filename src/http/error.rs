//! Per-request failures and their wire representation.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::upstream::UpstreamError;

/// A failure that aborts one request's pipeline.
///
/// Callers only ever see a 500 with a short plain-text message; the cause
/// is recorded in the log.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// The inbound body could not be read in full.
    #[error("error reading request body: {0}")]
    ReadBody(#[source] axum::Error),

    /// The upstream request could not be built or dispatched.
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

impl ProxyError {
    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ProxyError::ReadBody(_) => "read_body",
            ProxyError::Upstream(e) => e.kind(),
        }
    }

    /// Message returned to the caller.
    pub fn public_message(&self) -> &'static str {
        match self {
            ProxyError::ReadBody(_) => "Error reading request body",
            ProxyError::Upstream(_) => "Error forwarding request",
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, self.public_message()).into_response()
    }
}
