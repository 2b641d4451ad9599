//! Experiment and execution endpoints

use async_trait::async_trait;
use chrono::Utc;
use std::time::Duration;
use tracing::debug;

use qx_core::domain::{EndpointKind, WorkStatus};
use qx_core::dto::execution::{ExecuteCodeRequest, Execution, ExecutionId, ExecutionResult};

use crate::QuantumExperienceClient;
use crate::error::{ClientError, Result};
use crate::poller::{self, PollOptions, Probe, StatusProbe};

/// A single program to run on a backend
#[derive(Debug, Clone)]
pub struct Experiment {
    /// OpenQASM source text
    pub qasm: String,
    /// Target backend name or alias
    pub backend: String,
    /// Repetition count
    pub shots: u32,
    /// Human-readable name; a timestamped default is used when absent
    pub name: Option<String>,
    /// Simulator seed, max 10 digits
    pub seed: Option<u64>,
}

impl Experiment {
    pub fn new(qasm: impl Into<String>, backend: impl Into<String>, shots: u32) -> Self {
        Self {
            qasm: qasm.into(),
            backend: backend.into(),
            shots,
            name: None,
            seed: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// What the platform answered at submission time
#[derive(Debug, Clone)]
pub struct SubmittedExperiment {
    /// Handle for status queries
    pub execution_id: ExecutionId,
    /// Code the execution was stored under
    pub code_id: Option<String>,
    /// Status at submission time
    pub status: WorkStatus,
    /// Simulators often answer with the result inline
    pub result: Option<ExecutionResult>,
}

/// Result of a single non-blocking status check
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched {
    /// Terminal success, result decoded
    Ready(ExecutionResult),
    /// Not terminal yet; check again later
    InProgress,
}

/// Outcome of a bounded wait.
///
/// `Pending` is not an error: the budget elapsed and the caller may resume
/// polling later with the returned handle.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    Completed(ExecutionResult),
    Pending(ExecutionId),
}

impl QuantumExperienceClient {
    // =============================================================================
    // Executions
    // =============================================================================

    /// Get an execution by id
    pub async fn get_execution(&self, id: &ExecutionId) -> Result<Execution> {
        self.get_json(&format!("/Executions/{}", id), &[]).await
    }

    /// Single non-blocking status check for an execution.
    ///
    /// Terminal failure is an error carrying the remote detail; an unknown
    /// handle is [`ClientError::NotFound`].
    pub async fn fetch_result(&self, id: &ExecutionId) -> Result<Fetched> {
        let execution = self.get_execution(id).await?;
        self.classify_execution(id, &execution)
    }

    /// Submit an experiment and return immediately with its handle
    pub async fn submit_experiment(&self, experiment: &Experiment) -> Result<SubmittedExperiment> {
        self.validate_shots(experiment.shots)?;
        self.validate_seed(experiment.seed, &experiment.backend)?;
        let device = self
            .resolve_backend(&experiment.backend, EndpointKind::Experiment)
            .await?;

        let name = experiment
            .name
            .clone()
            .unwrap_or_else(|| format!("Experiment #{}", Utc::now().format("%Y%m%d%H%M%S")));
        let body = ExecuteCodeRequest {
            qasm: strip_qasm_preamble(&experiment.qasm),
            code_type: "QASM2".to_string(),
            name,
        };

        let mut query = vec![
            ("shots".to_string(), experiment.shots.to_string()),
            ("deviceRunType".to_string(), device),
        ];
        if let Some(seed) = experiment.seed {
            query.push(("seed".to_string(), seed.to_string()));
        }

        let execution: Execution = self
            .post_json("/codes/execute", &query, &body)
            .await
            .map_err(ClientError::into_submission)?;

        let status = self.classify_status(&execution);
        debug!(execution_id = %execution.id, ?status, "experiment submitted");

        Ok(SubmittedExperiment {
            result: ExecutionResult::from_execution(&execution),
            code_id: execution.code_id,
            execution_id: execution.id,
            status,
        })
    }

    /// Poll an execution until terminal or until `timeout` elapses.
    ///
    /// A timeout returns the handle unchanged so the caller can resume with
    /// [`fetch_result`](Self::fetch_result) later. A zero timeout performs
    /// no status check at all.
    pub async fn await_result(&self, id: &ExecutionId, timeout: Duration) -> Result<RunOutcome> {
        let options = PollOptions::new(self.config().poll_interval, timeout);
        let probe = ExecutionProbe { client: self, id };
        match poller::drive(&probe, &options).await? {
            Some(result) => Ok(RunOutcome::Completed(result)),
            None => Ok(RunOutcome::Pending(id.clone())),
        }
    }

    /// Submit an experiment and wait for its result within `timeout`.
    ///
    /// When the platform answers the submission with an inline result (the
    /// simulators usually do), that result is returned without polling.
    pub async fn run_experiment(
        &self,
        experiment: &Experiment,
        timeout: Duration,
    ) -> Result<RunOutcome> {
        let submitted = self.submit_experiment(experiment).await?;

        if let Some(result) = submitted.result {
            return Ok(RunOutcome::Completed(result));
        }
        match submitted.status {
            WorkStatus::Error | WorkStatus::Cancelled => Err(ClientError::Execution {
                handle: submitted.execution_id.to_string(),
                detail: "rejected at submission time".to_string(),
            }),
            _ => self.await_result(&submitted.execution_id, timeout).await,
        }
    }

    fn classify_status(&self, execution: &Execution) -> WorkStatus {
        execution
            .raw_status()
            .map(|raw| self.config().status_map.classify(raw))
            .unwrap_or(WorkStatus::Pending)
    }

    fn classify_execution(&self, id: &ExecutionId, execution: &Execution) -> Result<Fetched> {
        if let Some(result) = ExecutionResult::from_execution(execution) {
            return Ok(Fetched::Ready(result));
        }
        match self.classify_status(execution) {
            WorkStatus::Error => Err(ClientError::Execution {
                handle: id.to_string(),
                detail: format!(
                    "terminal status {}",
                    execution.raw_status().unwrap_or("ERROR")
                ),
            }),
            WorkStatus::Cancelled => Err(ClientError::Execution {
                handle: id.to_string(),
                detail: "cancelled by the platform".to_string(),
            }),
            // Completed with no result data yet still counts as in progress;
            // the platform attaches the payload a moment after flipping the
            // status.
            WorkStatus::Completed | WorkStatus::Pending => Ok(Fetched::InProgress),
        }
    }
}

struct ExecutionProbe<'a> {
    client: &'a QuantumExperienceClient,
    id: &'a ExecutionId,
}

#[async_trait]
impl StatusProbe for ExecutionProbe<'_> {
    type Output = ExecutionResult;

    async fn check(&self) -> Result<Probe<ExecutionResult>> {
        match self.client.fetch_result(self.id).await? {
            Fetched::Ready(result) => Ok(Probe::Ready(result)),
            Fetched::InProgress => Ok(Probe::InProgress),
        }
    }
}

/// Drop QASM version preambles the platform rejects
pub(crate) fn strip_qasm_preamble(qasm: &str) -> String {
    qasm.replace("IBMQASM 2.0;", "").replace("OPENQASM 2.0;", "")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strip_qasm_preamble() {
        assert_eq!(
            strip_qasm_preamble("OPENQASM 2.0;\nqreg q[2];"),
            "\nqreg q[2];"
        );
        assert_eq!(
            strip_qasm_preamble("IBMQASM 2.0;\nqreg q[2];"),
            "\nqreg q[2];"
        );
        assert_eq!(strip_qasm_preamble("qreg q[2];"), "qreg q[2];");
    }

    #[test]
    fn test_experiment_builder() {
        let experiment = Experiment::new("qreg q[2];", "simulator", 1024)
            .with_name("bell")
            .with_seed(42);
        assert_eq!(experiment.name.as_deref(), Some("bell"));
        assert_eq!(experiment.seed, Some(42));
    }

    fn client() -> QuantumExperienceClient {
        QuantumExperienceClient::new("token").unwrap()
    }

    fn execution(value: serde_json::Value) -> Execution {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_classify_done_with_result_is_ready() {
        let exec = execution(json!({
            "id": "exec-1",
            "status": { "id": "DONE" },
            "result": { "data": { "p": { "labels": ["0"], "values": [1.0] } } }
        }));
        let fetched = client()
            .classify_execution(&"exec-1".into(), &exec)
            .unwrap();
        assert!(matches!(fetched, Fetched::Ready(_)));
    }

    #[test]
    fn test_classify_running_is_in_progress() {
        let exec = execution(json!({
            "id": "exec-1",
            "status": { "id": "WORKING_IN_PROGRESS" }
        }));
        let fetched = client()
            .classify_execution(&"exec-1".into(), &exec)
            .unwrap();
        assert_eq!(fetched, Fetched::InProgress);
    }

    #[test]
    fn test_classify_done_without_payload_is_in_progress() {
        let exec = execution(json!({
            "id": "exec-1",
            "status": { "id": "DONE" }
        }));
        let fetched = client()
            .classify_execution(&"exec-1".into(), &exec)
            .unwrap();
        assert_eq!(fetched, Fetched::InProgress);
    }

    #[test]
    fn test_classify_error_fails_with_detail() {
        let exec = execution(json!({
            "id": "exec-1",
            "status": { "id": "ERROR" }
        }));
        let err = client()
            .classify_execution(&"exec-1".into(), &exec)
            .unwrap_err();
        match err {
            ClientError::Execution { handle, detail } => {
                assert_eq!(handle, "exec-1");
                assert!(detail.contains("ERROR"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_submit_rejects_oversized_shots_before_any_request() {
        let err = client()
            .submit_experiment(&Experiment::new("qreg q[2];", "simulator", 100_000))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Submission(_)));
    }

    #[tokio::test]
    async fn test_submit_rejects_seed_on_device_before_any_request() {
        let err = client()
            .submit_experiment(&Experiment::new("qreg q[2];", "ibmqx2", 1).with_seed(7))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Submission(_)));
    }

    #[tokio::test]
    async fn test_unknown_handle_is_not_found() {
        use crate::stub::{StubResponse, StubServer};
        use crate::{ClientConfig, QuantumExperienceClient};

        let server = StubServer::start(vec![
            StubResponse::json(200, r#"{"id":"tok-1","userId":"user-1"}"#),
            StubResponse::json(404, r#"{"error":{"message":"unknown Execution id"}}"#),
        ])
        .await;
        let client = QuantumExperienceClient::with_config(
            "token",
            ClientConfig::new(server.base_url()),
        )
        .unwrap();

        let err = client.fetch_result(&"missing".into()).await.unwrap_err();
        assert!(err.is_not_found());
    }
}
