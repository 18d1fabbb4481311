mod cli;
mod commands;
mod config;
mod error;
mod hooks;
mod manifest;
mod orchestrator;
mod output;
mod overrides;
mod platform;
mod process;
mod project;

use clap::Parser;
use error::formatter::ErrorFormatter;
use tracing_subscriber::EnvFilter;

/// ログフィルタを指定する環境変数
const LOG_ENV: &str = "PFM_LOG";

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();
    let verbose = cli.verbose;
    init_tracing(verbose);

    if let Err(err) = commands::dispatch(cli).await {
        eprintln!("{}", ErrorFormatter::new(verbose).format(&err));
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
