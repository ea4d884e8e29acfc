//! Extraction of the proxy's query parameters.
//!
//! The inbound query carries everything the proxy needs: `pass` (the
//! password), `url` (the target), and `data` (the outbound body for POST
//! and PUT). Values are form-urlencoded; when a key repeats the first
//! occurrence wins.

use std::borrow::Cow;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProxyQuery {
    pub pass: Option<String>,
    pub url: Option<String>,
    pub data: Option<String>,
}

impl ProxyQuery {
    #[must_use]
    pub fn parse(query: Option<&str>) -> Self {
        let mut parsed = Self::default();
        let Some(query) = query else {
            return parsed;
        };

        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            let slot = match &*key {
                "pass" => &mut parsed.pass,
                "url" => &mut parsed.url,
                "data" => &mut parsed.data,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }
        parsed
    }

    /// Whether a `url` key was sent at all, even with an empty value.
    #[must_use]
    pub const fn has_url(&self) -> bool {
        self.url.is_some()
    }

    /// The target URL, `None` when absent or empty.
    #[must_use]
    pub fn target(&self) -> Option<&str> {
        self.url.as_deref().filter(|u| !u.is_empty())
    }
}

/// Prefix `https://` when the target names no `http://` or `https://` scheme.
#[must_use]
pub fn normalize_target(target: &str) -> Cow<'_, str> {
    let has_scheme = ["http://", "https://"].iter().any(|scheme| {
        target
            .get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    });

    if has_scheme {
        Cow::Borrowed(target)
    } else {
        Cow::Owned(format!("https://{target}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_parameters() {
        let q = ProxyQuery::parse(Some(
            "pass=s3cret&url=example.com%2Fapi&data=%7B%22k%22%3A%22v%22%7D",
        ));
        assert_eq!(q.pass.as_deref(), Some("s3cret"));
        assert_eq!(q.url.as_deref(), Some("example.com/api"));
        assert_eq!(q.data.as_deref(), Some(r#"{"k":"v"}"#));
    }

    #[test]
    fn first_occurrence_wins() {
        let q = ProxyQuery::parse(Some("pass=a&pass=b"));
        assert_eq!(q.pass.as_deref(), Some("a"));
    }

    #[test]
    fn empty_url_is_present_but_not_a_target() {
        let q = ProxyQuery::parse(Some("url="));
        assert!(q.has_url());
        assert_eq!(q.target(), None);
    }

    #[test]
    fn missing_query_yields_nothing() {
        let q = ProxyQuery::parse(None);
        assert_eq!(q, ProxyQuery::default());
        assert!(!q.has_url());
    }

    #[test]
    fn plus_decodes_to_space() {
        let q = ProxyQuery::parse(Some("data=a+b"));
        assert_eq!(q.data.as_deref(), Some("a b"));
    }

    #[test]
    fn normalize_adds_https() {
        assert_eq!(normalize_target("example.com/x"), "https://example.com/x");
    }

    #[test]
    fn normalize_keeps_existing_scheme() {
        assert_eq!(normalize_target("http://example.com"), "http://example.com");
        assert_eq!(normalize_target("https://example.com"), "https://example.com");
        assert_eq!(normalize_target("HTTPS://example.com"), "HTTPS://example.com");
    }

    #[test]
    fn normalize_prefixes_other_schemes() {
        assert_eq!(normalize_target("ftp://host"), "https://ftp://host");
    }
}
