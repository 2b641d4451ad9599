//! Job payloads
//!
//! A job batches several programs under one credit ceiling and runs them
//! through `POST /Jobs`.

use serde::{Deserialize, Serialize};

use crate::dto::execution::RawResult;

/// Opaque identifier of a job, assigned by the platform
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub String);

impl JobId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for JobId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Body for `POST /Jobs`
#[derive(Debug, Clone, Serialize)]
pub struct JobRequest {
    pub qasms: Vec<QasmBody>,
    pub shots: u32,
    #[serde(rename = "maxCredits")]
    pub max_credits: u32,
    pub backend: BackendRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QasmBody {
    pub qasm: String,
}

/// Backend selector inside a job request or response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendRef {
    #[serde(default)]
    pub name: String,
}

/// A job as reported by `GET /Jobs/{id}` or the submit response
#[derive(Debug, Clone, Deserialize)]
pub struct JobInfo {
    pub id: JobId,

    /// Raw status string; vocabulary is owned by the platform
    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub qasms: Vec<JobProgram>,

    #[serde(default)]
    pub shots: Option<u32>,

    #[serde(default, rename = "maxCredits")]
    pub max_credits: Option<u32>,

    #[serde(default, rename = "usedCredits")]
    pub used_credits: Option<u32>,

    #[serde(default)]
    pub backend: Option<BackendRef>,

    #[serde(default, rename = "creationDate")]
    pub creation_date: Option<String>,
}

/// Per-program entry inside a job
#[derive(Debug, Clone, Deserialize)]
pub struct JobProgram {
    #[serde(default)]
    pub qasm: Option<String>,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default, rename = "executionId")]
    pub execution_id: Option<String>,

    #[serde(default)]
    pub result: Option<RawResult>,
}
