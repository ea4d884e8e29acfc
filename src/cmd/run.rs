//! `passproxy run` — start the proxy server.
//!
//! Builds the [`ProxyConfig`] from the CLI (failing fast when no password
//! is configured), starts the Axum HTTP server, and waits for a shutdown
//! signal.

use std::net::SocketAddr;
use std::sync::Arc;

use crate::cli::RunArgs;
use crate::config::ProxyConfig;
use crate::error::ProxyError;
use crate::logging;
use crate::server::{self, AppState};

pub async fn execute(args: RunArgs) -> Result<(), ProxyError> {
    let log_format = logging::resolve_format(args.pretty, args.json);
    logging::init(&args.log_level, log_format);

    let config = ProxyConfig::from_args(&args)?;
    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;

    let timeout_ms = config.timeout.map(|t| t.as_millis());
    let max_redirects = config.max_redirects;

    let state = Arc::new(AppState::new(config));
    let router = server::build_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(
        addr = %addr,
        timeout_ms = ?timeout_ms,
        max_redirects,
        "passproxy started"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(server::shutdown_signal())
        .await?;

    tracing::info!("passproxy stopped");
    Ok(())
}
