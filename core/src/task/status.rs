use indexmap::IndexMap;

use super::types::TaskResult;

/// Lifecycle of a subtask. Transitions are strictly
/// `Waiting -> InProgress -> (Done | Failed)`; a command returning
/// `success == false` is normalized to `Failed` at the point of assignment,
/// so `Done` always implies success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    Waiting,
    InProgress,
    Done,
    Failed,
}

/// Mutable per-subtask execution status. The executor owns the only writable
/// reference; reporters receive it read-only through the shared status map.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskStatus {
    pub state: TaskState,
    pub result: Option<TaskResult>,
    /// Epoch milliseconds.
    pub start_time: Option<i64>,
    pub end_time: Option<i64>,
}

impl TaskStatus {
    pub fn waiting() -> Self {
        Self {
            state: TaskState::Waiting,
            result: None,
            start_time: None,
            end_time: None,
        }
    }

    pub fn start(&mut self) {
        self.state = TaskState::InProgress;
        self.start_time = Some(now_ms());
    }

    /// Records the command result. This is the single normalization point:
    /// a failed result lands in `Failed`, never in `Done`.
    pub fn finish(&mut self, result: TaskResult) {
        self.state = if result.success {
            TaskState::Done
        } else {
            TaskState::Failed
        };
        self.result = Some(result);
        self.end_time = Some(now_ms());
    }

    /// The one failure predicate used everywhere. Checks both the `Failed`
    /// state and the legacy `Done`-with-failed-result shape so hand-built
    /// statuses behave identically.
    pub fn is_failed(&self) -> bool {
        match self.state {
            TaskState::Failed => true,
            TaskState::Done => !self.result.as_ref().map(|r| r.success).unwrap_or(false),
            _ => false,
        }
    }

    pub fn is_passed(&self) -> bool {
        self.state == TaskState::Done && self.result.as_ref().map(|r| r.success).unwrap_or(false)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.state, TaskState::Done | TaskState::Failed)
    }

    /// Wall-clock duration when both timestamps are present, otherwise the
    /// duration the command itself measured.
    pub fn duration_ms(&self) -> Option<u64> {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) if end >= start => Some((end - start) as u64),
            _ => self.result.as_ref().and_then(|r| r.duration_ms),
        }
    }
}

/// Status of one target: its id plus the ordered per-subtask statuses.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetStatus {
    pub target: String,
    pub tasks: IndexMap<String, TaskStatus>,
}

impl TargetStatus {
    pub fn is_failed(&self) -> bool {
        self.tasks.values().any(TaskStatus::is_failed)
    }
}

/// The executor's sole piece of mutable state, keyed by target id. Insertion
/// order is preserved so reporters render targets in admission order.
pub type StatusMap = IndexMap<String, TargetStatus>;

pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finish_normalizes_failed_result() {
        let mut status = TaskStatus::waiting();
        status.start();
        status.finish(TaskResult::failed("nope"));

        assert_eq!(status.state, TaskState::Failed);
        assert!(status.is_failed());
        assert!(!status.is_passed());
    }

    #[test]
    fn test_finish_success_is_done() {
        let mut status = TaskStatus::waiting();
        status.start();
        status.finish(TaskResult::passed("ok"));

        assert_eq!(status.state, TaskState::Done);
        assert!(status.is_passed());
        assert!(!status.is_failed());
    }

    #[test]
    fn test_is_failed_covers_legacy_done_with_failure() {
        // A status assembled by hand, bypassing finish().
        let status = TaskStatus {
            state: TaskState::Done,
            result: Some(TaskResult::failed("bad")),
            start_time: None,
            end_time: None,
        };

        assert!(status.is_failed());
    }

    #[test]
    fn test_duration_prefers_timestamps() {
        let status = TaskStatus {
            state: TaskState::Done,
            result: Some(TaskResult::passed("ok").with_duration(999)),
            start_time: Some(1_000),
            end_time: Some(1_250),
        };

        assert_eq!(status.duration_ms(), Some(250));
    }

    #[test]
    fn test_duration_falls_back_to_result() {
        let status = TaskStatus {
            state: TaskState::Done,
            result: Some(TaskResult::passed("ok").with_duration(999)),
            start_time: None,
            end_time: None,
        };

        assert_eq!(status.duration_ms(), Some(999));
    }
}
