//! Progress-event sinks rendering orchestration state to the terminal.
//!
//! Two implementations consume the same event stream: [`CiReporter`] streams
//! append-only lines for log-capturing CI environments, [`CliReporter`]
//! redraws the whole terminal buffer on every event. Both treat the status
//! map handed with each call as the single source of truth and never trust
//! event payloads for counts.

mod ci;
mod cli;

pub use ci::CiReporter;
pub use cli::CliReporter;

use crate::task::{ProgressEvent, StatusMap, TaskStatus};

pub trait Reporter: Send + Sync {
    fn on_progress(&self, event: &ProgressEvent, statuses: &StatusMap);
    fn on_complete(&self, statuses: &StatusMap);
}

/// ANSI color codes shared by both reporters.
pub mod colors {
    pub const RED: &str = "\x1b[0;31m";
    pub const GREEN: &str = "\x1b[0;32m";
    pub const YELLOW: &str = "\x1b[1;33m";
    pub const BLUE: &str = "\x1b[0;34m";
    pub const CYAN: &str = "\x1b[0;36m";
    pub const NC: &str = "\x1b[0m";
}

/// Aggregate counts over a status map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SummaryStats {
    pub total_targets: usize,
    pub total_tasks: usize,
    pub passed_targets: usize,
    pub failed_targets: usize,
    pub passed_tasks: usize,
    pub failed_tasks: usize,
}

pub fn calculate_stats(statuses: &StatusMap) -> SummaryStats {
    let mut stats = SummaryStats {
        total_targets: statuses.len(),
        ..Default::default()
    };

    for target in statuses.values() {
        let mut target_failed = false;

        for status in target.tasks.values() {
            stats.total_tasks += 1;
            if status.is_passed() {
                stats.passed_tasks += 1;
            } else if status.is_failed() {
                stats.failed_tasks += 1;
                target_failed = true;
            }
        }

        if target_failed {
            stats.failed_targets += 1;
        } else {
            stats.passed_targets += 1;
        }
    }

    stats
}

/// Icon + color for a subtask status. The mapping is part of the rendering
/// contract: waiting `○`, in progress `◐`, passed `✔`, failed `✖`.
pub(crate) fn status_icon(status: &TaskStatus) -> (&'static str, &'static str) {
    use crate::task::TaskState;

    match status.state {
        TaskState::Waiting => ("○", colors::NC),
        TaskState::InProgress => ("◐", colors::YELLOW),
        TaskState::Done if status.is_passed() => ("✔", colors::GREEN),
        _ => ("✖", colors::RED),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{TargetStatus, TaskResult, TaskState};
    use indexmap::IndexMap;

    fn target(name: &str, results: &[Option<bool>]) -> TargetStatus {
        let mut tasks = IndexMap::new();
        for (idx, outcome) in results.iter().enumerate() {
            let mut status = TaskStatus::waiting();
            if let Some(success) = outcome {
                status.start();
                status.finish(if *success {
                    TaskResult::passed("ok")
                } else {
                    TaskResult::failed("bad")
                });
            }
            tasks.insert(format!("task-{idx}"), status);
        }
        TargetStatus {
            target: name.to_string(),
            tasks,
        }
    }

    #[test]
    fn test_calculate_stats_counts_by_target_and_task() {
        let mut statuses = IndexMap::new();
        statuses.insert(
            "a".to_string(),
            target("a", &[Some(true), Some(true)]),
        );
        statuses.insert(
            "b".to_string(),
            target("b", &[Some(false), Some(true)]),
        );
        statuses.insert("c".to_string(), target("c", &[None, None]));

        let stats = calculate_stats(&statuses);
        assert_eq!(stats.total_targets, 3);
        assert_eq!(stats.total_tasks, 6);
        assert_eq!(stats.passed_targets, 2);
        assert_eq!(stats.failed_targets, 1);
        assert_eq!(stats.passed_tasks, 3);
        assert_eq!(stats.failed_tasks, 1);
    }

    #[test]
    fn test_status_icon_mapping() {
        let waiting = TaskStatus::waiting();
        assert_eq!(status_icon(&waiting).0, "○");

        let mut in_progress = TaskStatus::waiting();
        in_progress.start();
        assert_eq!(status_icon(&in_progress).0, "◐");

        let mut passed = TaskStatus::waiting();
        passed.start();
        passed.finish(TaskResult::passed("ok"));
        assert_eq!(status_icon(&passed).0, "✔");

        let mut failed = TaskStatus::waiting();
        failed.start();
        failed.finish(TaskResult::failed("bad"));
        assert_eq!(status_icon(&failed).0, "✖");

        // Legacy shape: Done carrying a failed result still renders as failed.
        let legacy = TaskStatus {
            state: TaskState::Done,
            result: Some(TaskResult::failed("bad")),
            start_time: None,
            end_time: None,
        };
        assert_eq!(status_icon(&legacy).0, "✖");
    }
}
