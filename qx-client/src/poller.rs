//! Job poller
//!
//! Drives a submission from "sent" to a terminal state within a bounded
//! wait. The loop itself is an explicit state machine so the timeout/resume
//! contract is testable without any I/O: running out of budget is not a
//! failure, it hands the work back to the caller as a resumable handle.
//!
//! The same loop polls executions and jobs; the thing being polled is
//! abstracted behind [`StatusProbe`].

use async_trait::async_trait;
use std::time::{Duration, Instant};
use tokio::time::sleep;
use tracing::{debug, trace};

use qx_core::domain::WorkStatus;

use crate::error::Result;

/// Poll loop parameters
#[derive(Debug, Clone, Copy)]
pub struct PollOptions {
    /// Fixed sleep between status checks
    pub interval: Duration,
    /// Wall-clock budget; when it elapses the handle is returned unchanged
    pub timeout: Duration,
}

impl PollOptions {
    pub fn new(interval: Duration, timeout: Duration) -> Self {
        Self { interval, timeout }
    }
}

/// States of the poll loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    /// Work has been handed to the platform, no status check made yet
    Submitted,
    /// Actively checking; `checks` counts completed non-terminal checks
    Polling { checks: u32 },
    /// Terminal: the platform reported success
    Succeeded,
    /// Terminal: the platform reported an error or a cancellation
    Failed,
    /// The wall-clock budget elapsed before a terminal status was seen
    TimedOut,
}

/// What the loop should do next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PollAction {
    /// Perform one status check
    Check,
    /// Stop; the machine is in a terminal state
    Finished(PollEnd),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PollEnd {
    Succeeded,
    Failed,
    TimedOut,
}

/// Pure poll state machine.
///
/// `tick` decides, from elapsed wall-clock time, whether to check again or
/// stop; `record` folds an observed status into the state. A zero timeout
/// times out on the first tick, before any check is performed.
#[derive(Debug)]
pub struct PollMachine {
    timeout: Duration,
    state: PollState,
}

impl PollMachine {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            state: PollState::Submitted,
        }
    }

    pub fn state(&self) -> PollState {
        self.state
    }

    pub(crate) fn tick(&mut self, elapsed: Duration) -> PollAction {
        match self.state {
            PollState::Succeeded => PollAction::Finished(PollEnd::Succeeded),
            PollState::Failed => PollAction::Finished(PollEnd::Failed),
            PollState::TimedOut => PollAction::Finished(PollEnd::TimedOut),
            PollState::Submitted | PollState::Polling { .. } if elapsed >= self.timeout => {
                self.state = PollState::TimedOut;
                PollAction::Finished(PollEnd::TimedOut)
            }
            PollState::Submitted => {
                self.state = PollState::Polling { checks: 0 };
                PollAction::Check
            }
            PollState::Polling { .. } => PollAction::Check,
        }
    }

    pub(crate) fn record(&mut self, status: WorkStatus) {
        if let PollState::Polling { checks } = self.state {
            self.state = match status {
                WorkStatus::Pending => PollState::Polling { checks: checks + 1 },
                WorkStatus::Completed => PollState::Succeeded,
                WorkStatus::Error | WorkStatus::Cancelled => PollState::Failed,
            };
        }
    }
}

/// Outcome of a single non-blocking status check
#[derive(Debug)]
pub(crate) enum Probe<T> {
    /// Terminal success, payload decoded
    Ready(T),
    /// Not terminal yet
    InProgress,
}

/// A pollable unit of remote work.
///
/// A terminal failure is reported as an `Err` from `check`, not as a probe
/// variant; the loop stops on the first error.
#[async_trait]
pub(crate) trait StatusProbe: Sync {
    type Output;

    async fn check(&self) -> Result<Probe<Self::Output>>;
}

/// Poll until terminal, returning `Ok(None)` when the budget elapses.
pub(crate) async fn drive<P: StatusProbe>(
    probe: &P,
    options: &PollOptions,
) -> Result<Option<P::Output>> {
    let start = Instant::now();
    let mut machine = PollMachine::new(options.timeout);

    loop {
        match machine.tick(start.elapsed()) {
            PollAction::Finished(_) => {
                debug!(timeout = ?options.timeout, "poll budget exhausted, handing the work back");
                return Ok(None);
            }
            PollAction::Check => match probe.check().await {
                Ok(Probe::Ready(output)) => {
                    machine.record(WorkStatus::Completed);
                    return Ok(Some(output));
                }
                Ok(Probe::InProgress) => {
                    machine.record(WorkStatus::Pending);
                    trace!(state = ?machine.state(), "work not terminal yet");
                }
                Err(err) => {
                    machine.record(WorkStatus::Error);
                    return Err(err);
                }
            },
        }
        sleep(options.interval).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_zero_timeout_times_out_before_any_check() {
        let mut machine = PollMachine::new(Duration::ZERO);
        assert_eq!(machine.tick(Duration::ZERO), PollAction::Finished(PollEnd::TimedOut));
        assert_eq!(machine.state(), PollState::TimedOut);
    }

    #[test]
    fn test_submitted_to_polling_to_succeeded() {
        let mut machine = PollMachine::new(Duration::from_secs(60));

        assert_eq!(machine.tick(Duration::ZERO), PollAction::Check);
        assert_eq!(machine.state(), PollState::Polling { checks: 0 });

        machine.record(WorkStatus::Pending);
        assert_eq!(machine.state(), PollState::Polling { checks: 1 });

        assert_eq!(machine.tick(Duration::from_secs(2)), PollAction::Check);
        machine.record(WorkStatus::Completed);
        assert_eq!(machine.state(), PollState::Succeeded);

        // Terminal states are sticky
        assert_eq!(
            machine.tick(Duration::from_secs(4)),
            PollAction::Finished(PollEnd::Succeeded)
        );
    }

    #[test]
    fn test_error_and_cancellation_fail() {
        for status in [WorkStatus::Error, WorkStatus::Cancelled] {
            let mut machine = PollMachine::new(Duration::from_secs(60));
            machine.tick(Duration::ZERO);
            machine.record(status);
            assert_eq!(machine.state(), PollState::Failed);
        }
    }

    #[test]
    fn test_budget_elapses_mid_poll() {
        let mut machine = PollMachine::new(Duration::from_secs(10));
        assert_eq!(machine.tick(Duration::from_secs(5)), PollAction::Check);
        machine.record(WorkStatus::Pending);
        assert_eq!(
            machine.tick(Duration::from_secs(11)),
            PollAction::Finished(PollEnd::TimedOut)
        );
        assert_eq!(machine.state(), PollState::TimedOut);
    }

    struct ScriptedProbe {
        steps: Mutex<VecDeque<Result<Probe<u32>>>>,
        checks: AtomicU32,
    }

    impl ScriptedProbe {
        fn new(steps: Vec<Result<Probe<u32>>>) -> Self {
            Self {
                steps: Mutex::new(steps.into()),
                checks: AtomicU32::new(0),
            }
        }

        fn checks(&self) -> u32 {
            self.checks.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl StatusProbe for ScriptedProbe {
        type Output = u32;

        async fn check(&self) -> Result<Probe<u32>> {
            self.checks.fetch_add(1, Ordering::SeqCst);
            self.steps
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Ok(Probe::InProgress))
        }
    }

    fn fast(timeout: Duration) -> PollOptions {
        PollOptions::new(Duration::from_millis(5), timeout)
    }

    #[tokio::test]
    async fn test_drive_returns_payload_when_work_completes() {
        let probe = ScriptedProbe::new(vec![Ok(Probe::InProgress), Ok(Probe::Ready(7))]);
        let got = drive(&probe, &fast(Duration::from_secs(5))).await.unwrap();
        assert_eq!(got, Some(7));
        assert_eq!(probe.checks(), 2);
    }

    #[tokio::test]
    async fn test_drive_zero_timeout_performs_no_checks() {
        let probe = ScriptedProbe::new(vec![Ok(Probe::Ready(7))]);
        let got = drive(&probe, &fast(Duration::ZERO)).await.unwrap();
        assert_eq!(got, None);
        assert_eq!(probe.checks(), 0);
    }

    #[tokio::test]
    async fn test_drive_times_out_on_slow_work() {
        let probe = ScriptedProbe::new(vec![]);
        let got = drive(&probe, &fast(Duration::from_millis(30))).await.unwrap();
        assert_eq!(got, None);
        assert!(probe.checks() >= 1);
    }

    #[tokio::test]
    async fn test_drive_propagates_terminal_failure() {
        let probe = ScriptedProbe::new(vec![
            Ok(Probe::InProgress),
            Err(ClientError::Execution {
                handle: "exec-1".into(),
                detail: "terminal status ERROR".into(),
            }),
        ]);
        let err = drive(&probe, &fast(Duration::from_secs(5))).await.unwrap_err();
        assert!(matches!(err, ClientError::Execution { .. }));
        assert_eq!(probe.checks(), 2);
    }
}
