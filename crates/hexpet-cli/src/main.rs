use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod args;
mod cmd;
mod keys;
mod output;

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays clean for pets and verdicts.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = args::Cli::parse();
    cmd::dispatch(cli)
}
