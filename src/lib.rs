//! passproxy is a password-protected HTTP forwarding proxy.
//!
//! Each request names a target URL and a shared secret in its query string.
//! When the secret matches, the request is forwarded to the target and the
//! target's response is relayed back with permissive CORS headers, which
//! lets browser code reach APIs that do not allow cross-origin calls.
//!
//! # Architecture
//!
//! - [`cli`] -- Command-line argument parsing with clap derive macros.
//! - [`cmd`] -- Subcommand dispatch and execution.
//! - [`config`] -- The immutable [`ProxyConfig`](config::ProxyConfig) built
//!   once at startup, including the redacted [`Secret`](config::Secret).
//! - [`error`] -- Startup and forwarding error types using `thiserror`.
//! - [`logging`] -- Structured tracing setup with JSON and pretty-print output.
//! - [`proxy`] -- The request handler: preflight, usage page, authentication,
//!   target validation, forwarding, and relay.
//! - [`server`] -- Axum server setup, shared application state, HTTP client,
//!   and graceful shutdown.

// Binary crate — public functions are internal, not consumed by external users.
#![allow(clippy::missing_errors_doc)]

pub mod cli;
pub mod cmd;
pub mod config;
pub mod error;
pub mod logging;
pub mod proxy;
pub mod server;
