//! Header copying and log rendering.

use axum::http::header::{HeaderMap, HOST};

/// Copy every inbound header pair onto an outbound request, except `Host`.
///
/// The client derives `Host` from the upstream authority; passing the
/// proxy's own host through would misroute virtual-hosted upstreams.
pub fn copy_request_headers(src: &HeaderMap, dst: &mut HeaderMap) {
    for (name, value) in src {
        if name == HOST {
            continue;
        }
        dst.append(name.clone(), value.clone());
    }
}

/// Append every pair of `src` onto `dst`, keeping existing values.
pub fn append_all(src: &HeaderMap, dst: &mut HeaderMap) {
    for (name, value) in src {
        dst.append(name.clone(), value.clone());
    }
}

/// Render a header map as `name: [v1, v2]` groups, in insertion order.
///
/// Non UTF-8 values are rendered lossily.
pub fn describe(headers: &HeaderMap) -> String {
    let mut out = String::from("{");
    for (i, name) in headers.keys().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push_str(name.as_str());
        out.push_str(": [");
        for (j, value) in headers.get_all(name).iter().enumerate() {
            if j > 0 {
                out.push_str(", ");
            }
            out.push_str(&String::from_utf8_lossy(value.as_bytes()));
        }
        out.push(']');
    }
    out.push('}');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn sample() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(HOST, HeaderValue::from_static("localhost:8086"));
        headers.insert("authorization", HeaderValue::from_static("Token abc"));
        headers.append("accept", HeaderValue::from_static("application/json"));
        headers.append("accept", HeaderValue::from_static("text/csv"));
        headers
    }

    #[test]
    fn test_copy_request_headers_skips_host_only() {
        let mut out = HeaderMap::new();
        copy_request_headers(&sample(), &mut out);

        assert!(out.get(HOST).is_none());
        assert_eq!(out.get("authorization").unwrap(), "Token abc");
        let accept: Vec<_> = out.get_all("accept").iter().collect();
        assert_eq!(accept, vec!["application/json", "text/csv"]);
    }

    #[test]
    fn test_append_all_accumulates() {
        let mut dst = HeaderMap::new();
        dst.insert("set-cookie", HeaderValue::from_static("a=1"));

        let mut src = HeaderMap::new();
        src.append("set-cookie", HeaderValue::from_static("b=2"));
        src.append("set-cookie", HeaderValue::from_static("c=3"));
        append_all(&src, &mut dst);

        let cookies: Vec<_> = dst.get_all("set-cookie").iter().collect();
        assert_eq!(cookies, vec!["a=1", "b=2", "c=3"]);
    }

    #[test]
    fn test_describe_groups_values() {
        assert_eq!(
            describe(&sample()),
            "{host: [localhost:8086], authorization: [Token abc], accept: [application/json, text/csv]}"
        );
        assert_eq!(describe(&HeaderMap::new()), "{}");
    }

    #[test]
    fn test_describe_lossy_values() {
        let mut headers = HeaderMap::new();
        headers.insert("x-raw", HeaderValue::from_bytes(b"caf\xe9").unwrap());
        assert_eq!(describe(&headers), "{x-raw: [caf\u{fffd}]}");
    }
}
