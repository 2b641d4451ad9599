//! QX CLI
//!
//! Command-line interface for the QX platform: inspect backends, run
//! experiments, and manage jobs from a terminal.

mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "qx")]
#[command(about = "QX platform command line client", long_about = None)]
struct Cli {
    /// API token used to authenticate
    #[arg(long, env = "QX_API_TOKEN", hide_env_values = true)]
    token: String,

    /// Base URL of the platform API
    #[arg(long, env = "QX_API_URL", default_value = qx_client::DEFAULT_BASE_URL)]
    url: String,

    /// Skip TLS certificate verification (not recommended)
    #[arg(long)]
    insecure: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "qx_client=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = Config {
        api_token: cli.token,
        api_url: cli.url,
        verify_tls: !cli.insecure,
    };

    handle_command(cli.command, &config).await
}
