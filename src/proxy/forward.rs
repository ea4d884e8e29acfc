//! The outbound half of the proxy.
//!
//! [`forward`] sends a single request to the target with a fixed header
//! set and follows redirects the way a browser `fetch` does, returning the
//! final response with its body still unread so the caller can stream it.

use axum::http::header::{CONTENT_TYPE, LOCATION, USER_AGENT};
use axum::http::{Method, StatusCode};
use bytes::Bytes;
use http_body_util::Full;
use hyper::body::Incoming;
use url::Url;

use crate::error::ForwardError;
use crate::server::HttpClient;

pub const OUTBOUND_CONTENT_TYPE: &str = "application/json";
pub const OUTBOUND_USER_AGENT: &str = concat!("passproxy/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct OutboundRequest {
    pub method: Method,
    pub url: Url,
    pub body: Option<Bytes>,
}

impl OutboundRequest {
    /// Only POST and PUT carry `data` as their body.
    #[must_use]
    pub fn new(method: Method, url: Url, data: Option<&str>) -> Self {
        let body = (method == Method::POST || method == Method::PUT)
            .then(|| Bytes::from(data.unwrap_or_default().to_owned()));
        Self { method, url, body }
    }

    fn to_hyper(&self) -> Result<hyper::Request<Full<Bytes>>, ForwardError> {
        hyper::Request::builder()
            .method(self.method.clone())
            .uri(self.url.as_str())
            .header(CONTENT_TYPE, OUTBOUND_CONTENT_TYPE)
            .header(USER_AGENT, OUTBOUND_USER_AGENT)
            .body(Full::new(self.body.clone().unwrap_or_default()))
            .map_err(ForwardError::Build)
    }
}

/// Parse the (already normalized) target into a URL.
pub fn parse_target(target: &str) -> Result<Url, ForwardError> {
    Url::parse(target).map_err(|source| ForwardError::InvalidTarget {
        url: target.to_string(),
        source,
    })
}

pub async fn forward(
    client: &HttpClient,
    request: OutboundRequest,
    max_redirects: usize,
) -> Result<hyper::Response<Incoming>, ForwardError> {
    let mut current = request;
    let mut hops = 0;

    loop {
        let response = client.request(current.to_hyper()?).await?;

        let status = response.status();
        if !is_redirect(status) {
            return Ok(response);
        }
        let Some(location) = response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned)
        else {
            return Ok(response);
        };

        if hops >= max_redirects {
            return Err(ForwardError::TooManyRedirects {
                limit: max_redirects,
            });
        }
        hops += 1;

        let next_url = current
            .url
            .join(&location)
            .ok()
            .filter(|u| matches!(u.scheme(), "http" | "https"))
            .ok_or_else(|| ForwardError::InvalidRedirect {
                location: location.clone(),
            })?;

        tracing::debug!(
            status = status.as_u16(),
            from = %current.url,
            to = %next_url,
            hop = hops,
            "following redirect"
        );

        current = redirected(current, status, next_url);
    }
}

fn is_redirect(status: StatusCode) -> bool {
    matches!(status.as_u16(), 301 | 302 | 303 | 307 | 308)
}

/// 303 turns anything but GET/HEAD into a bodiless GET; 301/302 do the same
/// for POST only. 307/308 replay the request unchanged.
fn redirected(previous: OutboundRequest, status: StatusCode, url: Url) -> OutboundRequest {
    let to_get = match status.as_u16() {
        303 => previous.method != Method::GET && previous.method != Method::HEAD,
        301 | 302 => previous.method == Method::POST,
        _ => false,
    };

    if to_get {
        OutboundRequest {
            method: Method::GET,
            url,
            body: None,
        }
    } else {
        OutboundRequest { url, ..previous }
    }
}
