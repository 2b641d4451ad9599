//! Backend payloads

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A backend entry from `GET /Backends`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendInfo {
    pub name: String,

    /// Raw status string; `"on"` means accepting work
    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub simulator: bool,

    #[serde(default, rename = "nQubits")]
    pub n_qubits: Option<u32>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default, rename = "couplingMap")]
    pub coupling_map: Option<Value>,

    #[serde(default)]
    pub version: Option<String>,
}

impl BackendInfo {
    /// Whether the backend is currently accepting work
    pub fn is_on(&self) -> bool {
        matches!(self.status.as_deref(), Some("on"))
    }
}

/// Raw queue status from `GET /Backends/{name}/queue/status`
#[derive(Debug, Clone, Deserialize)]
pub struct RawQueueStatus {
    #[serde(default)]
    pub state: Option<bool>,
    #[serde(default)]
    pub busy: Option<bool>,
    #[serde(default, rename = "lengthQueue")]
    pub length_queue: Option<u64>,
}

/// Reshaped queue status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendQueueStatus {
    #[serde(default)]
    pub available: Option<bool>,
    #[serde(default)]
    pub busy: Option<bool>,
    #[serde(default)]
    pub pending_jobs: Option<u64>,
}

impl From<RawQueueStatus> for BackendQueueStatus {
    fn from(raw: RawQueueStatus) -> Self {
        Self {
            available: raw.state,
            busy: raw.busy,
            pending_jobs: raw.length_queue,
        }
    }
}

/// Calibration report for a physical backend.
///
/// Simulators have no calibration; the client returns the envelope with all
/// data fields empty without asking the platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendCalibration {
    /// Canonical backend name the report belongs to; filled in by the client
    #[serde(default)]
    pub backend: String,

    #[serde(default, rename = "lastUpdateDate")]
    pub last_update_date: Option<String>,

    #[serde(default)]
    pub qubits: Option<Value>,

    #[serde(default, rename = "multiQubitGates")]
    pub multi_qubit_gates: Option<Value>,
}

impl BackendCalibration {
    /// Empty report for backends without calibration data
    pub fn empty(backend: impl Into<String>) -> Self {
        Self {
            backend: backend.into(),
            last_update_date: None,
            qubits: None,
            multi_qubit_gates: None,
        }
    }
}

/// Device parameter report for a physical backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendParameters {
    /// Canonical backend name the report belongs to; filled in by the client
    #[serde(default)]
    pub backend: String,

    #[serde(default, rename = "lastUpdateDate")]
    pub last_update_date: Option<String>,

    #[serde(default)]
    pub qubits: Option<Value>,

    #[serde(default, rename = "fridgeParameters")]
    pub fridge_parameters: Option<Value>,
}

impl BackendParameters {
    /// Empty report for backends without parameter data
    pub fn empty(backend: impl Into<String>) -> Self {
        Self {
            backend: backend.into(),
            last_update_date: None,
            qubits: None,
            fridge_parameters: None,
        }
    }
}
