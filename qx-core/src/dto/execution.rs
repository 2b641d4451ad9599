//! Execution payloads
//!
//! An execution is a single program run started through `/codes/execute`.
//! The platform nests the interesting data a few levels deep
//! (`result.data.p` for measurement probabilities); [`ExecutionResult`]
//! flattens that into the shape callers actually want.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Opaque identifier of an execution, assigned by the platform
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExecutionId(pub String);

impl ExecutionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ExecutionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ExecutionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Body for `POST /codes/execute`
#[derive(Debug, Clone, Serialize)]
pub struct ExecuteCodeRequest {
    pub qasm: String,
    #[serde(rename = "codeType")]
    pub code_type: String,
    pub name: String,
}

/// Nested status object (`status.id` carries the raw state string)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusInfo {
    pub id: String,
}

/// Queue position info attached while an execution waits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueInfo {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub position: Option<u32>,
}

/// An execution as reported by `GET /Executions/{id}`
#[derive(Debug, Clone, Deserialize)]
pub struct Execution {
    pub id: ExecutionId,

    #[serde(default)]
    pub status: Option<StatusInfo>,

    #[serde(default, rename = "codeId")]
    pub code_id: Option<String>,

    #[serde(default)]
    pub result: Option<RawResult>,

    #[serde(default, rename = "infoQueue")]
    pub info_queue: Option<QueueInfo>,

    #[serde(default)]
    pub calibration: Option<Value>,

    #[serde(default, rename = "startDate")]
    pub start_date: Option<String>,

    #[serde(default, rename = "endDate")]
    pub end_date: Option<String>,
}

impl Execution {
    /// The raw status string, when the platform sent one
    pub fn raw_status(&self) -> Option<&str> {
        self.status.as_ref().map(|s| s.id.as_str())
    }
}

/// Raw result wrapper as sent by the platform
#[derive(Debug, Clone, Deserialize)]
pub struct RawResult {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub data: Option<ResultData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResultData {
    /// Measurement probabilities
    #[serde(default)]
    pub p: Option<Measure>,

    /// Bloch sphere coordinates
    #[serde(default)]
    pub valsxyz: Option<Value>,

    #[serde(default, rename = "additionalData")]
    pub additional_data: Option<Value>,

    #[serde(default, rename = "cregLabels")]
    pub creg_labels: Option<Value>,

    /// Wall time the run took, in seconds
    #[serde(default)]
    pub time: Option<f64>,

    /// Raw counts keyed by bitstring (newer result format)
    #[serde(default)]
    pub counts: Option<Value>,
}

/// Measurement outcome distribution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measure {
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub values: Vec<f64>,
    #[serde(default)]
    pub qubits: Vec<u32>,
}

impl Measure {
    /// Probability of a given outcome label, 0.0 when absent
    pub fn probability(&self, label: &str) -> f64 {
        self.labels
            .iter()
            .position(|l| l == label)
            .and_then(|i| self.values.get(i).copied())
            .unwrap_or(0.0)
    }
}

/// Decoded result of a finished execution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    #[serde(default)]
    pub measure: Option<Measure>,
    #[serde(default)]
    pub bloch: Option<Value>,
    #[serde(default)]
    pub extra_info: Option<Value>,
    #[serde(default)]
    pub calibration: Option<Value>,
    #[serde(default)]
    pub creg_labels: Option<Value>,
    #[serde(default)]
    pub time_taken: Option<f64>,
}

impl ExecutionResult {
    /// Flatten an execution's nested result payload.
    ///
    /// Returns `None` while the platform has not produced any result data
    /// yet; an execution that is still queued or running reports the same
    /// envelope with an empty `result`.
    pub fn from_execution(execution: &Execution) -> Option<Self> {
        let data = execution.result.as_ref()?.data.as_ref()?;

        let result = Self {
            measure: data.p.clone(),
            bloch: data.valsxyz.clone(),
            extra_info: data.additional_data.clone(),
            calibration: execution.calibration.clone(),
            creg_labels: data.creg_labels.clone(),
            time_taken: data.time,
        };

        if result.measure.is_none()
            && result.bloch.is_none()
            && result.extra_info.is_none()
            && result.calibration.is_none()
            && result.creg_labels.is_none()
            && result.time_taken.is_none()
        {
            return None;
        }
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn done_execution() -> Execution {
        serde_json::from_value(json!({
            "id": "exec-1",
            "status": { "id": "DONE" },
            "codeId": "code-7",
            "result": {
                "date": "2017-05-01T10:00:00.000Z",
                "data": {
                    "p": {
                        "labels": ["00", "11"],
                        "values": [0.512, 0.488],
                        "qubits": [0, 1]
                    },
                    "time": 1.25
                }
            },
            "deviceRunType": "sim_trivial_2"
        }))
        .unwrap()
    }

    #[test]
    fn test_deserialize_execution() {
        let exec = done_execution();
        assert_eq!(exec.id.as_str(), "exec-1");
        assert_eq!(exec.raw_status(), Some("DONE"));
        assert_eq!(exec.code_id.as_deref(), Some("code-7"));
    }

    #[test]
    fn test_result_flattening() {
        let exec = done_execution();
        let result = ExecutionResult::from_execution(&exec).unwrap();
        let measure = result.measure.unwrap();
        assert_eq!(measure.labels, vec!["00", "11"]);
        assert!((measure.probability("00") - 0.512).abs() < 1e-9);
        assert_eq!(measure.probability("01"), 0.0);
        assert_eq!(result.time_taken, Some(1.25));
    }

    #[test]
    fn test_no_result_while_pending() {
        let exec: Execution = serde_json::from_value(json!({
            "id": "exec-2",
            "status": { "id": "WORKING_IN_PROGRESS" },
            "infoQueue": { "status": "PENDING_IN_QUEUE", "position": 4 }
        }))
        .unwrap();
        assert!(ExecutionResult::from_execution(&exec).is_none());
        assert_eq!(exec.info_queue.unwrap().position, Some(4));
    }

    #[test]
    fn test_empty_result_data_is_none() {
        let exec: Execution = serde_json::from_value(json!({
            "id": "exec-3",
            "status": { "id": "DONE" },
            "result": { "data": {} }
        }))
        .unwrap();
        assert!(ExecutionResult::from_execution(&exec).is_none());
    }
}
