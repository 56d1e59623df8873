use super::status::TaskStatus;

/// Progress events emitted by the executor. Events for different targets
/// interleave arbitrarily; reporters key all state off the ids and re-derive
/// counts from the status map handed alongside each event, never from event
/// arrival order.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    TargetStarted {
        target: String,
    },
    TaskStarted {
        target: String,
        task_id: String,
    },
    TaskCompleted {
        target: String,
        task_id: String,
        /// Snapshot taken at completion time.
        status: TaskStatus,
    },
    TargetCompleted {
        target: String,
    },
}
