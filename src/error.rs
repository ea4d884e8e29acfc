//! Error types for passproxy.
//!
//! [`ProxyError`] covers startup failures surfaced by `main`.
//! [`ForwardError`] covers everything that can go wrong while talking to
//! the target; the request handler turns it into a `500` response and never
//! lets it escape.

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ProxyError {
    #[error("No proxy password configured.\n\n  {hint}")]
    MissingSecret { hint: String },

    #[error("Invalid address: {0}")]
    AddressParse(#[from] std::net::AddrParseError),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ForwardError {
    #[error("invalid target URL '{url}'")]
    InvalidTarget {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to build outbound request")]
    Build(#[source] http::Error),

    #[error(transparent)]
    Request(#[from] hyper_util::client::legacy::Error),

    #[error("redirect to '{location}' cannot be followed")]
    InvalidRedirect { location: String },

    #[error("too many redirects (limit {limit})")]
    TooManyRedirects { limit: usize },

    #[error("timed out after {0}ms")]
    TimedOut(u64),
}

impl ForwardError {
    /// Render the error followed by its source chain, joined with `: `.
    ///
    /// Client errors from hyper keep the useful part (e.g. "Connection
    /// refused") in their sources, so the top-level message alone says little.
    #[must_use]
    pub fn describe(&self) -> String {
        let mut out = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(err) = source {
            let msg = err.to_string();
            if !out.ends_with(&msg) {
                out.push_str(": ");
                out.push_str(&msg);
            }
            source = err.source();
        }
        out
    }
}
