//! The per-request proxy pipeline.
//!
//! ```text
//! capture metadata → drain body → build outbound → forward & time → relay → log outcome
//! ```
//!
//! Body-read and forwarding failures abort the pipeline with a 500; nothing
//! is retried. No state is shared between requests apart from the immutable
//! [`AppState`].

use std::time::Instant;

use axum::{
    body::Body,
    extract::{Request, State},
    response::{IntoResponse, Response},
};
use hyper::body::Incoming;
use tracing::Instrument;
use uuid::Uuid;

use crate::http::error::ProxyError;
use crate::http::server::AppState;
use crate::http::{body, headers};
use crate::observability::metrics;

/// Catch-all handler: every method and path lands here.
pub async fn proxy_handler(State(state): State<AppState>, request: Request) -> Response {
    let request_id = Uuid::new_v4();
    let method = request.method().clone();

    let span = tracing::info_span!("request", id = %request_id);
    async move {
        match forward(&state, request).await {
            Ok(response) => response,
            Err(err) => {
                tracing::error!(error = %err, "Request failed");
                metrics::record_error(method.as_str(), err.kind());
                err.into_response()
            }
        }
    }
    .instrument(span)
    .await
}

async fn forward(state: &AppState, request: Request) -> Result<Response, ProxyError> {
    let (parts, inbound_body) = request.into_parts();

    tracing::info!(
        method = %parts.method,
        path = %parts.uri.path(),
        query = %parts.uri.query().unwrap_or(""),
        "Received request"
    );
    tracing::info!(headers = %headers::describe(&parts.headers), "Request headers");

    let captured = body::capture(inbound_body, state.max_body_bytes)
        .await
        .map_err(ProxyError::ReadBody)?;

    if state.log_bodies {
        tracing::info!(
            bytes = captured.len(),
            body = %body::describe_body(&captured, state.max_logged_body_bytes),
            "Request body"
        );
    }

    let outbound = state.upstream.build_request(&parts, captured)?;

    let started = Instant::now();
    let result = state.upstream.send(outbound).await;
    let elapsed = started.elapsed();

    let upstream_response = result.inspect_err(|_| {
        tracing::info!(elapsed = ?elapsed, "Upstream call failed");
    })?;

    let status = upstream_response.status();
    tracing::info!(status = %status, "Received response from upstream");
    tracing::info!(elapsed = ?elapsed, "Query execution time");
    metrics::record_request(parts.method.as_str(), status.as_u16(), elapsed);

    Ok(relay(upstream_response))
}

/// Copy status, headers and a streaming body onto the caller's response.
///
/// The upstream body is owned by the returned response; it is released when
/// the copy finishes or the caller goes away and the response is dropped.
fn relay(upstream: hyper::Response<Incoming>) -> Response {
    let (parts, upstream_body) = upstream.into_parts();

    let mut response = Response::new(Body::new(upstream_body));
    *response.status_mut() = parts.status;
    headers::append_all(&parts.headers, response.headers_mut());
    response
}
