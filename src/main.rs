use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = passproxy::cli::Cli::parse();
    if let Err(e) = passproxy::cmd::dispatch(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
