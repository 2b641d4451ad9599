//! Code payloads
//!
//! A code is a stored program; executions hang off it.

use serde::Deserialize;

use crate::dto::execution::Execution;

/// A stored code as reported by `GET /Codes/{id}`
#[derive(Debug, Clone, Deserialize)]
pub struct Code {
    pub id: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub qasm: Option<String>,

    #[serde(default, rename = "codeType")]
    pub code_type: Option<String>,

    #[serde(default, rename = "creationDate")]
    pub creation_date: Option<String>,

    /// Recent executions of this code; filled by a follow-up query
    #[serde(default)]
    pub executions: Vec<Execution>,
}

/// Envelope of `GET /users/{user_id}/codes/lastest`
#[derive(Debug, Clone, Deserialize)]
pub struct CodesPage {
    #[serde(default)]
    pub codes: Vec<Code>,
}
