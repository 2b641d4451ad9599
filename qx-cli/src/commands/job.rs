//! Job command handlers

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use std::path::PathBuf;
use std::time::Duration;

use qx_client::{JobOutcome, JobSubmission};
use qx_core::dto::job::JobInfo;

use crate::commands::build_client;
use crate::config::Config;

/// Job subcommands
#[derive(Subcommand)]
pub enum JobCommands {
    /// Submit a job from one or more QASM files
    Submit {
        /// OpenQASM files, one program each
        files: Vec<PathBuf>,

        /// Target backend name or alias
        #[arg(long, default_value = "simulator")]
        backend: String,

        /// Repetition count applied to every program
        #[arg(long, default_value_t = 1024)]
        shots: u32,

        /// Credit ceiling for the whole job
        #[arg(long, default_value_t = 3)]
        max_credits: u32,
    },
    /// Get job details
    Get {
        /// Job id
        id: String,
    },
    /// List recent jobs
    List {
        /// Maximum number of jobs to show
        #[arg(long, default_value_t = 50)]
        limit: u32,
    },
    /// Wait for a job to finish
    Wait {
        /// Job id
        id: String,

        /// Seconds to wait before handing the id back
        #[arg(long, default_value_t = 60)]
        timeout: u64,
    },
}

/// Handle job commands
pub async fn handle_job_command(command: JobCommands, config: &Config) -> Result<()> {
    let client = build_client(config)?;

    match command {
        JobCommands::Submit {
            files,
            backend,
            shots,
            max_credits,
        } => {
            let mut qasms = Vec::with_capacity(files.len());
            for file in &files {
                let qasm = std::fs::read_to_string(file)
                    .with_context(|| format!("failed to read {}", file.display()))?;
                qasms.push(qasm);
            }
            let submission =
                JobSubmission::new(qasms, backend, shots).with_max_credits(max_credits);
            let job = client.submit_job(&submission).await?;
            println!("{} {}", "Submitted job".green().bold(), job.id);
        }
        JobCommands::Get { id } => {
            let job = client.get_job(&id.as_str().into()).await?;
            print_job(&job);
        }
        JobCommands::List { limit } => {
            let jobs = client.get_jobs(limit).await?;
            if jobs.is_empty() {
                println!("{}", "No jobs found.".yellow());
            } else {
                println!("{}", format!("Found {} job(s):", jobs.len()).bold());
                println!();
                for job in jobs {
                    print_job_summary(&job);
                }
            }
        }
        JobCommands::Wait { id, timeout } => {
            let outcome = client
                .await_job(&id.as_str().into(), Duration::from_secs(timeout))
                .await?;
            match outcome {
                JobOutcome::Completed(job) => {
                    println!("{}", "Job completed.".green().bold());
                    print_job(&job);
                }
                JobOutcome::Pending(handle) => {
                    println!(
                        "{}",
                        format!("Still running after {}s.", timeout).yellow()
                    );
                    println!("Check again with: qx job wait {}", handle.to_string().bold());
                }
            }
        }
    }

    Ok(())
}

fn print_job_summary(job: &JobInfo) {
    let status = job.status.as_deref().unwrap_or("UNKNOWN");
    println!(
        "  {}  {}  ({} program(s))",
        job.id.to_string().bold(),
        status,
        job.qasms.len()
    );
}

fn print_job(job: &JobInfo) {
    println!("{}", job.id.to_string().bold());
    if let Some(status) = &job.status {
        println!("  status: {}", status);
    }
    if let Some(backend) = &job.backend {
        println!("  backend: {}", backend.name);
    }
    if let Some(shots) = job.shots {
        println!("  shots: {}", shots);
    }
    if let Some(used) = job.used_credits {
        println!("  used credits: {}", used);
    }
    for (i, program) in job.qasms.iter().enumerate() {
        let status = program.status.as_deref().unwrap_or("UNKNOWN");
        println!("  program {}: {}", i, status);
        if let Some(execution_id) = &program.execution_id {
            println!("    execution: {}", execution_id);
        }
    }
}
