//! Command-line interface definitions using clap derive macros.
//!
//! Every flag has an environment variable equivalent so the proxy can be
//! configured entirely from a container or platform secret store.

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::DEFAULT_MAX_REDIRECTS;

#[derive(Parser)]
#[command(
    name = "passproxy",
    version,
    about = "Password-protected HTTP forwarding proxy",
    propagate_version = true,
    after_help = "\x1b[1mQuick start:\x1b[0m\n  \
        PROXY_PASSWORD=s3cret passproxy run       Start on 0.0.0.0:8080\n  \
        passproxy run --password s3cret -p 9000   Start on a specific port"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the proxy server
    Run(Box<RunArgs>),
}

#[derive(Args)]
#[command(after_help = "\x1b[1mExamples:\x1b[0m\n  \
        passproxy run --password s3cret                  Listen on :8080\n  \
        passproxy run --password s3cret --pretty         Local dev mode\n  \
        passproxy run --password s3cret --timeout-ms 10000   Bound upstream calls")]
pub struct RunArgs {
    /// Password callers must send as `?pass=`
    #[arg(long, env = "PROXY_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Listen port
    #[arg(short, long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Listen address
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    // -- Logging --
    /// Log level
    #[arg(short, long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: LogLevel,

    /// Force pretty (human-readable) log output
    #[arg(long)]
    pub pretty: bool,

    /// Force JSON log output (overrides TTY detection)
    #[arg(long, conflicts_with = "pretty")]
    pub json: bool,

    // -- Tuning --
    /// Upstream timeout in milliseconds (unbounded when unset)
    #[arg(long, env = "REQUEST_TIMEOUT_MS", help_heading = "Tuning")]
    pub timeout_ms: Option<u64>,

    /// Maximum number of upstream redirects to follow
    #[arg(
        long,
        env = "MAX_REDIRECTS",
        default_value_t = DEFAULT_MAX_REDIRECTS,
        help_heading = "Tuning"
    )]
    pub max_redirects: usize,
}

#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    #[must_use]
    pub const fn to_tracing_level(&self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}
