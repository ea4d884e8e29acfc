//! Response header relay.
//!
//! Upstream headers are copied as-is except for connection-scoped
//! hop-by-hop headers, which describe the proxy's connection to the target
//! and not the one to the caller. The CORS set is applied afterwards.

use std::sync::LazyLock;

use axum::http::{HeaderMap, HeaderName};

use super::cors::CorsHeaders;

static HOP_BY_HOP: LazyLock<Vec<HeaderName>> = LazyLock::new(|| {
    [
        "connection",
        "keep-alive",
        "proxy-connection",
        "transfer-encoding",
        "te",
        "trailer",
        "upgrade",
    ]
    .iter()
    .filter_map(|name| name.parse::<HeaderName>().ok())
    .collect()
});

/// `content-length` is kept: the body is streamed through byte for byte.
pub fn strip_hop_by_hop(headers: &mut HeaderMap) {
    for name in HOP_BY_HOP.iter() {
        headers.remove(name);
    }
}

/// Build the header set returned to the caller from the target's headers.
#[must_use]
pub fn relay_headers(mut upstream: HeaderMap, cors: &CorsHeaders) -> HeaderMap {
    strip_hop_by_hop(&mut upstream);
    cors.apply(&mut upstream);
    upstream
}

#[cfg(test)]
mod tests {
    use axum::http::header::{ACCESS_CONTROL_ALLOW_ORIGIN, ORIGIN};

    use super::*;

    #[test]
    fn strips_connection_headers() {
        let mut upstream = HeaderMap::new();
        upstream.insert("connection", "keep-alive".parse().unwrap());
        upstream.insert("transfer-encoding", "chunked".parse().unwrap());
        upstream.insert("content-length", "11".parse().unwrap());
        upstream.insert("content-type", "application/json".parse().unwrap());

        strip_hop_by_hop(&mut upstream);

        assert!(upstream.get("connection").is_none());
        assert!(upstream.get("transfer-encoding").is_none());
        assert_eq!(upstream.get("content-length").unwrap(), "11");
        assert_eq!(upstream.get("content-type").unwrap(), "application/json");
    }

    #[test]
    fn cors_wins_over_upstream() {
        let mut upstream = HeaderMap::new();
        upstream.insert(ACCESS_CONTROL_ALLOW_ORIGIN, "https://target".parse().unwrap());
        upstream.append("set-cookie", "a=1".parse().unwrap());
        upstream.append("set-cookie", "b=2".parse().unwrap());

        let mut req = HeaderMap::new();
        req.insert(ORIGIN, "https://caller".parse().unwrap());
        let cors = CorsHeaders::from_request(&req);

        let relayed = relay_headers(upstream, &cors);

        assert_eq!(relayed.get(ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(), "https://caller");
        assert_eq!(relayed.get_all("set-cookie").iter().count(), 2);
    }
}
