//! Startup configuration for the proxy.
//!
//! [`ProxyConfig`] is built once from the parsed CLI before the server
//! starts and is shared read-only through [`AppState`](crate::server::AppState).
//! A missing or empty password aborts startup instead of leaving the proxy
//! running with every request rejected.

use std::time::Duration;

use sha2::{Digest, Sha256};

use crate::cli::RunArgs;
use crate::error::ProxyError;

pub const DEFAULT_MAX_REDIRECTS: usize = 20;

/// The shared password callers must present as `?pass=`.
#[derive(Clone)]
pub struct Secret(String);

impl Secret {
    /// Returns `None` for an empty password.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        (!value.is_empty()).then_some(Self(value))
    }

    /// Exact, case-sensitive comparison.
    ///
    /// Both sides are hashed first so the comparison runs over fixed-size
    /// digests without an early exit.
    #[must_use]
    pub fn matches(&self, candidate: &str) -> bool {
        let expected = Sha256::digest(self.0.as_bytes());
        let actual = Sha256::digest(candidate.as_bytes());
        expected
            .iter()
            .zip(actual.iter())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Secret(**redacted**)")
    }
}

#[derive(Debug, Clone)]
pub struct ProxyConfig {
    pub secret: Secret,
    pub timeout: Option<Duration>,
    pub max_redirects: usize,
}

impl ProxyConfig {
    #[must_use]
    pub const fn new(secret: Secret) -> Self {
        Self {
            secret,
            timeout: None,
            max_redirects: DEFAULT_MAX_REDIRECTS,
        }
    }

    pub fn from_args(args: &RunArgs) -> Result<Self, ProxyError> {
        let secret = args
            .password
            .clone()
            .and_then(Secret::new)
            .ok_or_else(|| ProxyError::MissingSecret {
                hint: "Set PROXY_PASSWORD or pass --password <value>.".into(),
            })?;

        Ok(Self {
            secret,
            timeout: args.timeout_ms.map(Duration::from_millis),
            max_redirects: args.max_redirects,
        })
    }
}
