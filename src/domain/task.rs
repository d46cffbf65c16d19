//! Server-tracked task lifecycle types.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum_macros::Display;

use super::pair_result::PairResult;

/// Opaque identifier issued by the service at submission time.
///
/// The client never inspects it beyond routing it back into the status URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskHandle(String);

impl TaskHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle state as last reported by the service.
///
/// Strict progression `processing -> (completed | failed)`. `not_found` can
/// show up on any poll when the id is unknown server-side (expired or bogus);
/// it is a successful poll outcome, not a transport error, and not terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TaskStatus {
    Processing,
    Completed,
    Failed,
    NotFound,
}

impl TaskStatus {
    /// Only `completed` and `failed` stop a tracking loop.
    pub fn is_terminal(self) -> bool {
        matches!(self, TaskStatus::Completed | TaskStatus::Failed)
    }
}

/// One status snapshot for a task.
///
/// This is a cache of the server's last answer, re-fetched on every poll; the
/// client holds no authoritative task state of its own.
#[derive(Debug, Clone, Deserialize)]
pub struct Task {
    pub task_id: String,
    pub status: TaskStatus,
    #[serde(default)]
    pub results: Vec<PairResult>,
    /// Human-readable failure detail, passed through verbatim when
    /// `status == failed`.
    #[serde(default)]
    pub error: Option<String>,
}

impl Task {
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// The result set, gated on completion. The wire `results` array is only
    /// meaningful for a `completed` task and is ignored otherwise.
    pub fn completed_results(&self) -> &[PairResult] {
        if self.status == TaskStatus::Completed {
            &self.results
        } else {
            &[]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_names() {
        for (status, wire) in [
            (TaskStatus::Processing, "\"processing\""),
            (TaskStatus::Completed, "\"completed\""),
            (TaskStatus::Failed, "\"failed\""),
            (TaskStatus::NotFound, "\"not_found\""),
        ] {
            assert_eq!(serde_json::to_string(&status).unwrap(), wire);
            assert_eq!(serde_json::from_str::<TaskStatus>(wire).unwrap(), status);
        }
    }

    #[test]
    fn test_terminality() {
        assert!(TaskStatus::Completed.is_terminal());
        assert!(TaskStatus::Failed.is_terminal());
        assert!(!TaskStatus::Processing.is_terminal());
        assert!(
            !TaskStatus::NotFound.is_terminal(),
            "not_found signals a stale handle but does not stop tracking"
        );
    }

    #[test]
    fn test_minimal_status_payload_decodes() {
        // The service omits `results`/`error` freely on non-completed answers
        let task: Task =
            serde_json::from_str(r#"{"task_id": "abc-123", "status": "processing"}"#).unwrap();
        assert_eq!(task.task_id, "abc-123");
        assert_eq!(task.status, TaskStatus::Processing);
        assert!(task.results.is_empty());
        assert!(task.error.is_none());
    }

    #[test]
    fn test_results_are_gated_on_completion() {
        let json = r#"{
            "task_id": "abc",
            "status": "failed",
            "error": "yfinance download failed",
            "results": [{
                "pair": "AAPL/MSFT", "combo": "", "method": "CADF",
                "price_corr": 0.9, "z_score": 2.0, "half_life": 10,
                "move_to_mean": 1.0, "exp_return": 2.0, "unit_price": 100.0,
                "hurst": 0.3, "prob_profit": 70.0, "prob_profit_low": 60.0,
                "prob_profit_high": 80.0, "same_sector": "Yes",
                "extreme_z_in_hl": "No", "extreme_z_detail": "",
                "profitable_since_extreme": "N/A", "pnl_since_extreme": 0.0
            }]
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert!(
            task.completed_results().is_empty(),
            "results from a non-completed task must be treated as empty"
        );
        assert_eq!(task.error.as_deref(), Some("yfinance download failed"));
    }
}
