//! Binary crate for the `weatherdash` tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Serving the proxy route over HTTP
//! - Human-friendly dashboard output

use clap::Parser;

mod cli;
mod render;
mod server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
