//! The proxy request handler.
//!
//! [`proxy_handler`] is the Axum fallback that receives every request and
//! runs it through a fixed sequence: answer CORS preflights, serve the usage
//! page at `/`, check the password, validate the target, forward, and relay
//! the target's response. Every outcome, including upstream failures, is
//! returned as an HTTP response.
//!
//! Submodules handle query parsing ([`query`]), CORS headers ([`cors`]),
//! response header relay ([`headers`]), the outbound call ([`forward`]),
//! and the usage page ([`usage`]).

pub mod cors;
pub mod forward;
pub mod headers;
pub mod query;
pub mod usage;

use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use hyper::body::Incoming;

use crate::error::ForwardError;
use crate::server::AppState;

use cors::CorsHeaders;
use forward::OutboundRequest;
use query::{normalize_target, ProxyQuery};

pub async fn proxy_handler(
    State(state): State<Arc<AppState>>,
    method: Method,
    uri: Uri,
    req_headers: HeaderMap,
) -> Response {
    let cors = CorsHeaders::from_request(&req_headers);

    if method == Method::OPTIONS {
        return preflight(&cors);
    }

    let query = ProxyQuery::parse(uri.query());

    if uri.path() == "/" && !query.has_url() {
        return usage::usage_page();
    }

    let authorized = query
        .pass
        .as_deref()
        .is_some_and(|pass| !pass.is_empty() && state.config.secret.matches(pass));
    if !authorized {
        tracing::warn!(method = %method, path = %uri.path(), "rejected request: bad password");
        return plain_text(StatusCode::FORBIDDEN, "Unauthorized".into());
    }

    let Some(target) = query.target() else {
        return plain_text(StatusCode::BAD_REQUEST, "Missing target URL".into());
    };
    let target = normalize_target(target);

    let request_id = uuid::Uuid::new_v4().to_string();

    match fetch(&state, &request_id, method.clone(), &target, query.data.as_deref()).await {
        Ok(upstream) => {
            tracing::info!(
                request_id = %request_id,
                method = %method,
                status = upstream.status().as_u16(),
                "target responded"
            );
            relay(upstream, &cors)
        }
        Err(e) => {
            let description = e.describe();
            tracing::error!(
                request_id = %request_id,
                method = %method,
                error = %description,
                "forwarding failed"
            );
            plain_text(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error fetching target: {description}"),
            )
        }
    }
}

async fn fetch(
    state: &AppState,
    request_id: &str,
    method: Method,
    target: &str,
    data: Option<&str>,
) -> Result<hyper::Response<Incoming>, ForwardError> {
    let url = forward::parse_target(target)?;

    // The full URL may carry credentials of its own; log the host only.
    tracing::info!(
        request_id = %request_id,
        method = %method,
        host = url.host_str().unwrap_or_default(),
        "forwarding request"
    );

    let outbound = OutboundRequest::new(method, url, data);
    let call = forward::forward(&state.http_client, outbound, state.config.max_redirects);

    match state.config.timeout {
        Some(limit) => tokio::time::timeout(limit, call).await.map_err(|_| {
            ForwardError::TimedOut(u64::try_from(limit.as_millis()).unwrap_or(u64::MAX))
        })?,
        None => call.await,
    }
}

fn preflight(cors: &CorsHeaders) -> Response {
    let mut headers = HeaderMap::new();
    cors.apply(&mut headers);
    (StatusCode::NO_CONTENT, headers).into_response()
}

fn relay(upstream: hyper::Response<Incoming>, cors: &CorsHeaders) -> Response {
    let (mut parts, body) = upstream.into_parts();

    let mut response = Response::new(Body::new(body));
    *response.status_mut() = parts.status;
    *response.headers_mut() = headers::relay_headers(parts.headers, cors);
    if let Some(reason) = parts.extensions.remove::<hyper::ext::ReasonPhrase>() {
        response.extensions_mut().insert(reason);
    }
    response
}

fn plain_text(status: StatusCode, body: String) -> Response {
    (status, [(CONTENT_TYPE, "text/plain; charset=utf-8")], body).into_response()
}

#[cfg(test)]
mod tests {
    use axum::http::header::{
        ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    };
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use super::*;
    use crate::config::{ProxyConfig, Secret};
    use crate::server::build_router;

    fn router() -> axum::Router {
        let config = ProxyConfig::new(Secret::new("s3cret").unwrap());
        build_router(Arc::new(AppState::new(config)))
    }

    async fn send(method: Method, uri: &str) -> (StatusCode, HeaderMap, String) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("origin", "https://app.example")
            .body(Body::empty())
            .unwrap();
        let response = router().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, headers, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn root_without_url_serves_usage() {
        let (status, headers, body) = send(Method::GET, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(headers[CONTENT_TYPE].to_str().unwrap().starts_with("text/html"));
        assert!(body.contains("GET  /?pass="));
        assert!(body.contains("POST /?pass="));
    }

    #[tokio::test]
    async fn usage_page_needs_no_password_for_any_method() {
        let (status, _, _) = send(Method::POST, "/?pass=wrong").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn wrong_password_is_forbidden() {
        let (status, _, body) = send(Method::GET, "/?pass=nope&url=example.com").await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body, "Unauthorized");
    }

    #[tokio::test]
    async fn missing_or_empty_password_is_forbidden() {
        for uri in ["/?url=example.com", "/?pass=&url=example.com", "/api?url="] {
            let (status, _, _) = send(Method::GET, uri).await;
            assert_eq!(status, StatusCode::FORBIDDEN, "{uri}");
        }
    }

    #[tokio::test]
    async fn password_is_case_sensitive() {
        let (status, _, _) = send(Method::GET, "/?pass=S3CRET&url=example.com").await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn missing_target_is_bad_request() {
        for uri in ["/?pass=s3cret&url=", "/anything?pass=s3cret"] {
            let (status, _, body) = send(Method::GET, uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(body, "Missing target URL");
        }
    }

    #[tokio::test]
    async fn preflight_short_circuits_without_auth() {
        for uri in ["/", "/?url=example.com", "/x?pass=nope&url=example.com"] {
            let (status, headers, body) = send(Method::OPTIONS, uri).await;
            assert_eq!(status, StatusCode::NO_CONTENT, "{uri}");
            assert!(body.is_empty());
            assert_eq!(headers[ACCESS_CONTROL_ALLOW_ORIGIN], "https://app.example");
            assert_eq!(headers[ACCESS_CONTROL_ALLOW_METHODS], cors::ALLOWED_METHODS);
            assert_eq!(headers[ACCESS_CONTROL_ALLOW_HEADERS], "*");
        }
    }

    #[tokio::test]
    async fn options_on_root_is_preflight_not_usage() {
        let (status, headers, body) = send(Method::OPTIONS, "/").await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(body.is_empty());
        assert!(headers.get(CONTENT_TYPE).is_none());
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_ORIGIN], "https://app.example");
    }

    #[tokio::test]
    async fn malformed_target_is_upstream_failure() {
        let (status, _, body) = send(Method::GET, "/?pass=s3cret&url=http://").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.starts_with("Error fetching target: invalid target URL"));
    }
}
