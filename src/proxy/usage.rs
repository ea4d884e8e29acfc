//! The static usage page served at `/` when no target is given.

use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};

pub const USAGE_HTML: &str = r#"<!doctype html>
<html>
<head><meta charset="utf-8"><title>passproxy</title></head>
<body>
<h1>Proxy Active</h1>
<p>Usage:</p>
<pre>GET  /?pass=$PASSWORD&amp;url=example.com</pre>
<pre>POST /?pass=$PASSWORD&amp;url=example.com&amp;data={"key":"val"}</pre>
<p>Targets without a scheme are fetched over <code>https://</code>.
POST and PUT send <code>data</code> as the request body.</p>
</body>
</html>
"#;

pub fn usage_page() -> Response {
    ([(CONTENT_TYPE, "text/html; charset=utf-8")], USAGE_HTML).into_response()
}
