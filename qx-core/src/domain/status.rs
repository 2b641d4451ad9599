//! Remote status vocabulary
//!
//! The platform reports execution and job states as free-form strings whose
//! exact vocabulary is owned by the remote service. `StatusMap` folds those
//! raw strings onto a closed set so the poller never hard-codes assumptions
//! beyond "completed", "error" and "still running".

use serde::{Deserialize, Serialize};

/// Closed set of work states the client reasons about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkStatus {
    /// Queued or running; not terminal
    Pending,
    /// Terminal success
    Completed,
    /// Terminal failure reported by the platform
    Error,
    /// Terminal, cancelled before completion
    Cancelled,
}

impl WorkStatus {
    /// Whether the work can no longer change state
    pub fn is_terminal(&self) -> bool {
        !matches!(self, WorkStatus::Pending)
    }
}

/// Mapping of raw remote status strings onto [`WorkStatus`].
///
/// Configuration-level data: callers may extend the vocabulary without
/// touching the poller. Matching is case-insensitive and unknown strings are
/// treated as [`WorkStatus::Pending`].
#[derive(Debug, Clone)]
pub struct StatusMap {
    completed: Vec<String>,
    error: Vec<String>,
    cancelled: Vec<String>,
}

impl Default for StatusMap {
    fn default() -> Self {
        Self {
            completed: vec!["DONE".into(), "COMPLETED".into()],
            error: vec!["ERROR".into(), "FAILED".into()],
            cancelled: vec!["CANCELLED".into(), "CANCELED".into()],
        }
    }
}

impl StatusMap {
    /// Classify a raw status string reported by the platform
    pub fn classify(&self, raw: &str) -> WorkStatus {
        let contains = |set: &[String]| set.iter().any(|s| s.eq_ignore_ascii_case(raw));

        if contains(&self.completed) {
            WorkStatus::Completed
        } else if contains(&self.error) {
            WorkStatus::Error
        } else if contains(&self.cancelled) {
            WorkStatus::Cancelled
        } else {
            WorkStatus::Pending
        }
    }

    /// Register an additional raw string for a terminal state
    pub fn add(&mut self, raw: impl Into<String>, status: WorkStatus) {
        let raw = raw.into();
        match status {
            WorkStatus::Completed => self.completed.push(raw),
            WorkStatus::Error => self.error.push(raw),
            WorkStatus::Cancelled => self.cancelled.push(raw),
            WorkStatus::Pending => {}
        }
    }
}
