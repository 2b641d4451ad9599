//! Run command handler

use anyhow::{Context, Result};
use clap::Args;
use colored::*;
use std::path::PathBuf;
use std::time::Duration;

use qx_client::{Experiment, RunOutcome};

use crate::commands::build_client;
use crate::config::Config;

/// Arguments for `qx run`
#[derive(Args)]
pub struct RunArgs {
    /// Path to an OpenQASM file
    pub file: PathBuf,

    /// Target backend name or alias
    #[arg(long, default_value = "simulator")]
    pub backend: String,

    /// Repetition count
    #[arg(long, default_value_t = 1024)]
    pub shots: u32,

    /// Experiment name
    #[arg(long)]
    pub name: Option<String>,

    /// Simulator seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Seconds to wait before handing back the execution id
    #[arg(long, default_value_t = 60)]
    pub timeout: u64,
}

/// Submit an experiment and wait for its result
pub async fn handle_run(args: RunArgs, config: &Config) -> Result<()> {
    let qasm = std::fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;

    let mut experiment = Experiment::new(qasm, args.backend, args.shots);
    if let Some(name) = args.name {
        experiment = experiment.with_name(name);
    }
    if let Some(seed) = args.seed {
        experiment = experiment.with_seed(seed);
    }

    let client = build_client(config)?;
    let outcome = client
        .run_experiment(&experiment, Duration::from_secs(args.timeout))
        .await?;

    match outcome {
        RunOutcome::Completed(result) => print_result(&result),
        RunOutcome::Pending(handle) => {
            println!(
                "{}",
                format!("Still running after {}s.", args.timeout).yellow()
            );
            println!("Resume later with: qx fetch {}", handle.to_string().bold());
        }
    }

    Ok(())
}

/// Single non-blocking result check for an execution
pub async fn handle_fetch(id: String, config: &Config) -> Result<()> {
    let client = build_client(config)?;

    match client.fetch_result(&id.as_str().into()).await? {
        qx_client::Fetched::Ready(result) => print_result(&result),
        qx_client::Fetched::InProgress => {
            println!("{}", "Not finished yet; try again later.".yellow());
        }
    }

    Ok(())
}

fn print_result(result: &qx_client::ExecutionResult) {
    println!("{}", "Experiment completed.".green().bold());
    if let Some(measure) = &result.measure {
        println!();
        for (label, value) in measure.labels.iter().zip(measure.values.iter()) {
            println!("  {}  {:.6}", label.bold(), value);
        }
    }
    if let Some(time) = result.time_taken {
        println!();
        println!("  time taken: {:.3}s", time);
    }
}
