//! Job endpoints
//!
//! A job batches several programs under one credit ceiling. Submission is
//! fire-and-forget; the bounded wait reuses the same poll loop as
//! experiments.

use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use qx_core::domain::{EndpointKind, WorkStatus};
use qx_core::dto::job::{BackendRef, JobId, JobInfo, JobRequest, QasmBody};

use crate::QuantumExperienceClient;
use crate::error::{ClientError, Result};
use crate::executions::strip_qasm_preamble;
use crate::poller::{self, PollOptions, Probe, StatusProbe};

/// A batch of programs to run as one job
#[derive(Debug, Clone)]
pub struct JobSubmission {
    /// OpenQASM sources, one per program
    pub qasms: Vec<String>,
    /// Target backend name or alias
    pub backend: String,
    /// Repetition count applied to every program
    pub shots: u32,
    /// Credit ceiling for the whole job
    pub max_credits: u32,
    /// Simulator seed, max 10 digits
    pub seed: Option<u64>,
}

impl JobSubmission {
    pub fn new(qasms: Vec<String>, backend: impl Into<String>, shots: u32) -> Self {
        Self {
            qasms,
            backend: backend.into(),
            shots,
            max_credits: 3,
            seed: None,
        }
    }

    pub fn with_max_credits(mut self, max_credits: u32) -> Self {
        self.max_credits = max_credits;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Outcome of a bounded wait on a job; `Pending` is resumable, not an error
#[derive(Debug, Clone)]
pub enum JobOutcome {
    Completed(JobInfo),
    Pending(JobId),
}

impl QuantumExperienceClient {
    // =============================================================================
    // Jobs
    // =============================================================================

    /// Submit a job and return immediately with its handle
    pub async fn submit_job(&self, submission: &JobSubmission) -> Result<JobInfo> {
        if submission.qasms.is_empty() {
            return Err(ClientError::Submission(
                "a job needs at least one program".into(),
            ));
        }
        self.validate_shots(submission.shots)?;
        self.validate_seed(submission.seed, &submission.backend)?;
        let device = self
            .resolve_backend(&submission.backend, EndpointKind::Job)
            .await?;

        let request = JobRequest {
            qasms: submission
                .qasms
                .iter()
                .map(|qasm| QasmBody {
                    qasm: strip_qasm_preamble(qasm),
                })
                .collect(),
            shots: submission.shots,
            max_credits: submission.max_credits,
            backend: BackendRef { name: device },
            seed: submission.seed,
        };

        let job: JobInfo = self
            .post_json("/Jobs", &[], &request)
            .await
            .map_err(ClientError::into_submission)?;
        debug!(job_id = %job.id, programs = submission.qasms.len(), "job submitted");
        Ok(job)
    }

    /// Get a job by id
    pub async fn get_job(&self, id: &JobId) -> Result<JobInfo> {
        self.get_json(&format!("/Jobs/{}", id), &[]).await
    }

    /// List the most recent jobs of the account
    pub async fn get_jobs(&self, limit: u32) -> Result<Vec<JobInfo>> {
        let filter = format!("{{\"limit\":{}}}", limit);
        self.get_json("/Jobs", &[("filter".to_string(), filter)]).await
    }

    /// Poll a job until terminal or until `timeout` elapses.
    ///
    /// Same contract as [`await_result`](Self::await_result): a timeout
    /// returns the handle, a terminal failure is an error.
    pub async fn await_job(&self, id: &JobId, timeout: Duration) -> Result<JobOutcome> {
        let options = PollOptions::new(self.config().poll_interval, timeout);
        let probe = JobProbe { client: self, id };
        match poller::drive(&probe, &options).await? {
            Some(job) => Ok(JobOutcome::Completed(job)),
            None => Ok(JobOutcome::Pending(id.clone())),
        }
    }

    /// Submit a job and wait for it within `timeout`
    pub async fn run_job(&self, submission: &JobSubmission, timeout: Duration) -> Result<JobOutcome> {
        let job = self.submit_job(submission).await?;
        self.await_job(&job.id, timeout).await
    }

    fn classify_job(&self, id: &JobId, job: JobInfo) -> Result<Probe<JobInfo>> {
        let status = job
            .status
            .as_deref()
            .map(|raw| self.config().status_map.classify(raw))
            .unwrap_or(WorkStatus::Pending);
        match status {
            WorkStatus::Completed => Ok(Probe::Ready(job)),
            WorkStatus::Error => Err(ClientError::Execution {
                handle: id.to_string(),
                detail: format!(
                    "terminal status {}",
                    job.status.as_deref().unwrap_or("ERROR")
                ),
            }),
            WorkStatus::Cancelled => Err(ClientError::Execution {
                handle: id.to_string(),
                detail: "cancelled by the platform".to_string(),
            }),
            WorkStatus::Pending => Ok(Probe::InProgress),
        }
    }
}

struct JobProbe<'a> {
    client: &'a QuantumExperienceClient,
    id: &'a JobId,
}

#[async_trait]
impl StatusProbe for JobProbe<'_> {
    type Output = JobInfo;

    async fn check(&self) -> Result<Probe<JobInfo>> {
        let job = self.client.get_job(self.id).await?;
        self.client.classify_job(self.id, job)
    }
}
