//! Permissive CORS headers attached to every proxied and preflight response.
//!
//! The allowed origin and allowed headers mirror what the browser asked
//! for, falling back to `*`. [`CorsHeaders::apply`] inserts by key, so the
//! proxy's values replace any CORS headers the target sent.

use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    ACCESS_CONTROL_REQUEST_HEADERS, ORIGIN,
};
use axum::http::{HeaderMap, HeaderValue};

pub const ALLOWED_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";

#[derive(Debug, Clone)]
pub struct CorsHeaders {
    pub allow_origin: HeaderValue,
    pub allow_methods: HeaderValue,
    pub allow_headers: HeaderValue,
}

impl CorsHeaders {
    #[must_use]
    pub fn from_request(headers: &HeaderMap) -> Self {
        let wildcard = HeaderValue::from_static("*");
        Self {
            allow_origin: headers
                .get(ORIGIN)
                .cloned()
                .unwrap_or_else(|| wildcard.clone()),
            allow_methods: HeaderValue::from_static(ALLOWED_METHODS),
            allow_headers: headers
                .get(ACCESS_CONTROL_REQUEST_HEADERS)
                .cloned()
                .unwrap_or(wildcard),
        }
    }

    pub fn apply(&self, headers: &mut HeaderMap) {
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, self.allow_origin.clone());
        headers.insert(ACCESS_CONTROL_ALLOW_METHODS, self.allow_methods.clone());
        headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, self.allow_headers.clone());
    }
}
