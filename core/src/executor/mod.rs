//! Concurrency-bounded executor for unified tasks.
//!
//! One executor serves every entrypoint (backend linting, unified lint-all,
//! E2E testing). Top-level targets run under a bounded worker pool; within a
//! target, subtasks run strictly sequentially and a failure never stops later
//! subtasks, so a single pass collects every structural error.
//!
//! ```text
//! Vec<UnifiedTask>
//!   ↓
//! TaskExecutor::execute()
//!   ↓  initialize StatusMap (all Waiting)
//!   ↓  Semaphore(max_concurrency) + FuturesUnordered
//!   ↓  per target: TargetStarted → subtasks (sequential) → TargetCompleted
//!   ↓
//! Reporter::on_complete(StatusMap) → aggregate bool
//! ```

use std::sync::{Arc, Mutex, MutexGuard};

use futures::stream::FuturesUnordered;
use futures::StreamExt;
use indexmap::IndexMap;
use tokio::sync::Semaphore;

use crate::reporter::Reporter;
use crate::task::{
    LintTask, ProgressEvent, StatusMap, TargetStatus, TaskResult, TaskStatus, UnifiedTask,
};

/// Default worker-pool size for top-level targets.
pub const DEFAULT_MAX_CONCURRENCY: usize = 4;

#[derive(Debug, Clone, Copy)]
pub struct ExecutorOptions {
    /// Max number of targets with an in-flight subtask at any instant.
    pub max_concurrency: usize,
}

impl Default for ExecutorOptions {
    fn default() -> Self {
        Self {
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }
}

/// Runs unified tasks and reports progress. Each run owns its status map;
/// nothing is shared across runs.
pub struct TaskExecutor {
    reporter: Arc<dyn Reporter>,
    options: ExecutorOptions,
    statuses: Arc<Mutex<StatusMap>>,
}

impl TaskExecutor {
    pub fn new(reporter: Arc<dyn Reporter>, options: ExecutorOptions) -> Self {
        Self {
            reporter,
            options,
            statuses: Arc::new(Mutex::new(IndexMap::new())),
        }
    }

    /// Shared status map, mutated only by this executor during `execute`.
    pub fn statuses(&self) -> Arc<Mutex<StatusMap>> {
        self.statuses.clone()
    }

    /// Executes all targets and reports progress.
    /// Returns true if every subtask passed, false otherwise.
    pub async fn execute(&self, tasks: Vec<UnifiedTask>) -> bool {
        if tasks.is_empty() {
            return true;
        }

        // Populate the full status structure before any execution begins so
        // the reporter's very first render sees every target and subtask.
        {
            let mut statuses = self.lock();
            for task in &tasks {
                let mut subtasks = IndexMap::new();
                for subtask in &task.subtasks {
                    subtasks.insert(subtask.id.clone(), TaskStatus::waiting());
                }
                statuses.insert(
                    task.id.clone(),
                    TargetStatus {
                        target: task.id.clone(),
                        tasks: subtasks,
                    },
                );
            }
        }

        let semaphore = Arc::new(Semaphore::new(self.options.max_concurrency.max(1)));
        let mut running: FuturesUnordered<_> = tasks
            .into_iter()
            .map(|task| {
                let semaphore = semaphore.clone();
                async move {
                    let Ok(_permit) = semaphore.acquire_owned().await else {
                        return;
                    };
                    self.execute_target(task).await;
                }
            })
            .collect();

        while running.next().await.is_some() {}
        drop(running);

        let statuses = self.lock();
        self.reporter.on_complete(&statuses);

        statuses.values().all(|target| !target.is_failed())
    }

    /// Runs one target's subtask pipeline, in declaration order, without
    /// fail-fast.
    async fn execute_target(&self, task: UnifiedTask) {
        tracing::debug!(target_id = %task.id, kind = %task.kind, "target started");

        self.emit(ProgressEvent::TargetStarted {
            target: task.id.clone(),
        });

        for subtask in &task.subtasks {
            self.execute_subtask(&task.id, subtask).await;
        }

        self.emit(ProgressEvent::TargetCompleted {
            target: task.id.clone(),
        });

        tracing::debug!(target_id = %task.id, "target completed");
    }

    async fn execute_subtask(&self, target_id: &str, subtask: &LintTask) {
        {
            let mut statuses = self.lock();
            let Some(status) = subtask_status(&mut statuses, target_id, &subtask.id) else {
                return;
            };
            status.start();
        }

        self.emit(ProgressEvent::TaskStarted {
            target: target_id.to_string(),
            task_id: subtask.id.clone(),
        });

        // An erroring command is contained here and recorded as a failed
        // result; it never escapes execute().
        let result = match (subtask.command)().await {
            Ok(result) => result,
            Err(err) => {
                tracing::warn!(target_id, task_id = %subtask.id, error = %err, "command errored");
                TaskResult::failed(err.to_string())
            }
        };

        let snapshot = {
            let mut statuses = self.lock();
            let Some(status) = subtask_status(&mut statuses, target_id, &subtask.id) else {
                return;
            };
            status.finish(result);
            status.clone()
        };

        self.emit(ProgressEvent::TaskCompleted {
            target: target_id.to_string(),
            task_id: subtask.id.clone(),
            status: snapshot,
        });
    }

    /// Hands the reporter the event together with the authoritative map.
    fn emit(&self, event: ProgressEvent) {
        let statuses = self.lock();
        self.reporter.on_progress(&event, &statuses);
    }

    fn lock(&self) -> MutexGuard<'_, StatusMap> {
        match self.statuses.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

fn subtask_status<'a>(
    statuses: &'a mut StatusMap,
    target_id: &str,
    task_id: &str,
) -> Option<&'a mut TaskStatus> {
    statuses.get_mut(target_id)?.tasks.get_mut(task_id)
}
