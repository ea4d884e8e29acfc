//! Subcommand dispatch and execution.
//!
//! The [`dispatch`] function routes the parsed CLI to the matching
//! subcommand handler. Each handler lives in its own submodule.

pub mod run;

use crate::cli::{Cli, Commands};
use crate::error::ProxyError;

pub async fn dispatch(cli: Cli) -> Result<(), ProxyError> {
    match cli.command {
        Some(Commands::Run(args)) => run::execute(*args).await,
        None => {
            print_welcome();
            Ok(())
        }
    }
}

fn print_welcome() {
    let version = env!("CARGO_PKG_VERSION");
    println!(
        "\n  passproxy v{version} \u{2014} password-protected HTTP forwarding proxy\n\n  \
         No command provided. To get started:\n\n    \
         PROXY_PASSWORD=s3cret passproxy run     Start the proxy on :8080\n    \
         passproxy run --help                    See all options\n"
    );
}
