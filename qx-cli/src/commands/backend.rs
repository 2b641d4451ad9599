//! Backend command handlers

use anyhow::Result;
use clap::Subcommand;
use colored::*;

use qx_core::dto::backend::BackendInfo;

use crate::commands::build_client;
use crate::config::Config;

/// Backend subcommands
#[derive(Subcommand)]
pub enum BackendCommands {
    /// List backends currently accepting work
    List {
        /// Only show simulators
        #[arg(long)]
        simulators: bool,
    },
    /// Queue status of a backend
    Status {
        /// Backend name or alias
        name: String,
    },
    /// Calibration report of a backend
    Calibration {
        /// Backend name or alias
        name: String,
    },
    /// Device parameter report of a backend
    Parameters {
        /// Backend name or alias
        name: String,
    },
}

/// Handle backend commands
pub async fn handle_backend_command(command: BackendCommands, config: &Config) -> Result<()> {
    let client = build_client(config)?;

    match command {
        BackendCommands::List { simulators } => {
            let backends = if simulators {
                client.available_simulators().await?
            } else {
                client.available_backends().await?
            };
            if backends.is_empty() {
                println!("{}", "No backends available.".yellow());
            } else {
                println!("{}", format!("Found {} backend(s):", backends.len()).bold());
                println!();
                for backend in backends {
                    print_backend(&backend);
                }
            }
        }
        BackendCommands::Status { name } => {
            let status = client.backend_status(&name).await?;
            let available = status.available.unwrap_or(false);
            let marker = if available {
                "available".green()
            } else {
                "unavailable".red()
            };
            println!("{} {}", name.bold(), marker);
            if let Some(busy) = status.busy {
                println!("  busy: {}", busy);
            }
            if let Some(pending) = status.pending_jobs {
                println!("  pending jobs: {}", pending);
            }
        }
        BackendCommands::Calibration { name } => {
            let calibration = client.backend_calibration(&name).await?;
            println!("{}", serde_json::to_string_pretty(&calibration)?);
        }
        BackendCommands::Parameters { name } => {
            let parameters = client.backend_parameters(&name).await?;
            println!("{}", serde_json::to_string_pretty(&parameters)?);
        }
    }

    Ok(())
}

fn print_backend(backend: &BackendInfo) {
    let kind = if backend.simulator {
        "simulator".cyan()
    } else {
        "device".magenta()
    };
    print!("  {} [{}]", backend.name.bold(), kind);
    if let Some(n_qubits) = backend.n_qubits {
        print!(" {} qubits", n_qubits);
    }
    println!();
    if let Some(description) = &backend.description {
        println!("    {}", description.dimmed());
    }
}
