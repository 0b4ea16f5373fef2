//! Shared outbound client for the upstream database.

use std::time::Duration;

use axum::body::{Body, Bytes};
use axum::http::request::Parts;
use axum::http::{Request, Response, Uri};
use hyper::body::Incoming;
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use thiserror::Error;
use tokio::time;

use crate::config::{TimeoutConfig, UpstreamConfig};
use crate::http::headers;

/// Errors raised while building or dispatching an upstream request.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("invalid upstream URI `{uri}`: {source}")]
    InvalidUri {
        uri: String,
        #[source]
        source: axum::http::uri::InvalidUri,
    },

    #[error("failed to build upstream request: {0}")]
    Build(#[from] axum::http::Error),

    #[error("upstream request failed: {0}")]
    Request(#[from] hyper_util::client::legacy::Error),

    #[error("upstream request timed out after {0:?}")]
    Timeout(Duration),
}

impl UpstreamError {
    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            UpstreamError::InvalidUri { .. } | UpstreamError::Build(_) => "build",
            UpstreamError::Request(_) => "request",
            UpstreamError::Timeout(_) => "timeout",
        }
    }
}

/// Pooled HTTP(S) client bound to one upstream base URL.
///
/// Constructed once at startup and shared read-only between requests; the
/// inner hyper client handles connection reuse.
#[derive(Clone)]
pub struct UpstreamClient {
    client: Client<HttpsConnector<HttpConnector>, Body>,
    base_url: String,
    forward_query: bool,
    timeout: Duration,
}

impl UpstreamClient {
    pub fn new(upstream: &UpstreamConfig, timeouts: &TimeoutConfig) -> Self {
        let mut http = HttpConnector::new();
        http.enforce_http(false);
        http.set_connect_timeout(Some(Duration::from_secs(timeouts.connect_secs)));

        let https = HttpsConnectorBuilder::new()
            .with_webpki_roots()
            .https_or_http()
            .enable_http1()
            .wrap_connector(http);

        let client = Client::builder(TokioExecutor::new())
            .pool_idle_timeout(Duration::from_secs(timeouts.idle_secs))
            .build(https);

        Self {
            client,
            base_url: upstream.base_url.trim_end_matches('/').to_string(),
            forward_query: upstream.forward_query,
            timeout: Duration::from_secs(timeouts.request_secs),
        }
    }

    /// Base URL with any trailing slash removed.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Outbound URI for an inbound request URI.
    pub fn target_uri(&self, inbound: &Uri) -> Result<Uri, UpstreamError> {
        let target = match inbound.query() {
            Some(query) if self.forward_query => {
                format!("{}{}?{}", self.base_url, inbound.path(), query)
            }
            _ => format!("{}{}", self.base_url, inbound.path()),
        };

        target
            .parse::<Uri>()
            .map_err(|source| UpstreamError::InvalidUri { uri: target, source })
    }

    /// Build the outbound request: same method and headers, captured body.
    pub fn build_request(&self, parts: &Parts, body: Bytes) -> Result<Request<Body>, UpstreamError> {
        let mut builder = Request::builder()
            .method(parts.method.clone())
            .uri(self.target_uri(&parts.uri)?);

        if let Some(outbound) = builder.headers_mut() {
            headers::copy_request_headers(&parts.headers, outbound);
        }

        Ok(builder.body(Body::from(body))?)
    }

    /// Dispatch a request, bounded by the configured request timeout.
    ///
    /// The timeout covers the wait for response headers; the body is streamed
    /// to the caller afterwards.
    pub async fn send(&self, request: Request<Body>) -> Result<Response<Incoming>, UpstreamError> {
        time::timeout(self.timeout, self.client.request(request))
            .await
            .map_err(|_| UpstreamError::Timeout(self.timeout))?
            .map_err(UpstreamError::from)
    }
}
