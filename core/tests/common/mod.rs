use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use monoguard_core::api::{
    LintTask, ProgressEvent, Reporter, StatusMap, TargetKind, TaskResult, UnifiedTask,
};

/// Reporter that records everything it receives, for asserting event order
/// and completion semantics.
#[derive(Default)]
pub struct RecordingReporter {
    pub events: Mutex<Vec<ProgressEvent>>,
    pub completions: AtomicUsize,
    pub final_target_count: Mutex<Option<usize>>,
}

impl Reporter for RecordingReporter {
    fn on_progress(&self, event: &ProgressEvent, _statuses: &StatusMap) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }

    fn on_complete(&self, statuses: &StatusMap) {
        self.completions.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut count) = self.final_target_count.lock() {
            *count = Some(statuses.len());
        }
    }
}

impl RecordingReporter {
    /// `(task_id, started)` pairs for one target, in arrival order.
    pub fn task_events_for(&self, target_id: &str) -> Vec<(String, bool)> {
        self.events
            .lock()
            .map(|events| {
                events
                    .iter()
                    .filter_map(|event| match event {
                        ProgressEvent::TaskStarted { target, task_id } if target == target_id => {
                            Some((task_id.clone(), true))
                        }
                        ProgressEvent::TaskCompleted {
                            target, task_id, ..
                        } if target == target_id => Some((task_id.clone(), false)),
                        _ => None,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// A target whose subtasks immediately return the given outcomes.
pub fn target_with_outcomes(id: &str, outcomes: &[bool]) -> UnifiedTask {
    let subtasks = outcomes
        .iter()
        .enumerate()
        .map(|(idx, success)| {
            let success = *success;
            LintTask::new(format!("check-{idx}"), format!("Check {idx}"), move || {
                async move {
                    Ok(if success {
                        TaskResult::passed("ok")
                    } else {
                        TaskResult::failed("broken")
                    })
                }
            })
        })
        .collect();
    UnifiedTask::new(id, TargetKind::Backend, subtasks)
}
