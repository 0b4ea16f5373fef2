//! Request body capture.
//!
//! Inbound bodies are single-pass streams. The proxy drains them into one
//! `Bytes` buffer; clones of that buffer are independent, fully readable
//! views, so the body can be both logged and forwarded.

use std::borrow::Cow;

use axum::body::{Body, Bytes};

/// Read an entire body into memory.
///
/// Fails on transport errors or when the body exceeds `limit` bytes.
pub async fn capture(body: Body, limit: usize) -> Result<Bytes, axum::Error> {
    axum::body::to_bytes(body, limit).await
}

/// Render a body for the log, truncated to `max` bytes when set.
pub fn describe_body(body: &Bytes, max: Option<usize>) -> Cow<'_, str> {
    match max {
        Some(max) if body.len() > max => Cow::Owned(format!(
            "{}... ({} bytes truncated)",
            String::from_utf8_lossy(&body[..max]),
            body.len() - max
        )),
        _ => String::from_utf8_lossy(body),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_capture_returns_all_bytes() {
        let payload = Bytes::from_static(b"cpu,host=a value=1\nmem,host=a used=42");
        let captured = capture(Body::from(payload.clone()), 1024).await.unwrap();

        assert_eq!(captured, payload);
        // A clone is a fresh view of the same bytes.
        let forwarded = axum::body::to_bytes(Body::from(captured.clone()), 1024)
            .await
            .unwrap();
        assert_eq!(forwarded, payload);
    }

    #[tokio::test]
    async fn test_capture_empty_body() {
        let captured = capture(Body::empty(), 1024).await.unwrap();
        assert!(captured.is_empty());
    }

    #[tokio::test]
    async fn test_capture_over_limit_fails() {
        let result = capture(Body::from(vec![b'x'; 64]), 16).await;
        assert!(result.is_err());
    }

    #[test]
    fn test_describe_body() {
        let body = Bytes::from_static(b"cpu,host=a value=1");
        assert_eq!(describe_body(&body, None), "cpu,host=a value=1");
        assert_eq!(describe_body(&body, Some(64)), "cpu,host=a value=1");
        assert_eq!(describe_body(&body, Some(3)), "cpu... (15 bytes truncated)");
        assert_eq!(describe_body(&Bytes::new(), None), "");
    }
}
