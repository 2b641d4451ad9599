//! Command handlers

pub mod account;
pub mod backend;
pub mod job;
pub mod run;

use anyhow::Result;
use clap::Subcommand;

use qx_client::{ClientConfig, QuantumExperienceClient};

use crate::config::Config;

/// Top-level commands
#[derive(Subcommand)]
pub enum Commands {
    /// Inspect backends
    #[command(subcommand)]
    Backend(backend::BackendCommands),

    /// Run an experiment and wait for its result
    Run(run::RunArgs),

    /// Fetch the result of an execution by id
    Fetch {
        /// Execution id returned by a timed-out run
        id: String,
    },

    /// Inspect and submit jobs
    #[command(subcommand)]
    Job(job::JobCommands),

    /// Show the account credit balance
    Credits,
}

/// Route a command to its handler
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Backend(cmd) => backend::handle_backend_command(cmd, config).await,
        Commands::Run(args) => run::handle_run(args, config).await,
        Commands::Fetch { id } => run::handle_fetch(id, config).await,
        Commands::Job(cmd) => job::handle_job_command(cmd, config).await,
        Commands::Credits => account::show_credits(config).await,
    }
}

/// Build a client from the CLI configuration
pub(crate) fn build_client(config: &Config) -> Result<QuantumExperienceClient> {
    let client_config = ClientConfig {
        base_url: config.api_url.clone(),
        verify_tls: config.verify_tls,
        ..ClientConfig::default()
    };
    Ok(QuantumExperienceClient::with_config(
        config.api_token.clone(),
        client_config,
    )?)
}
