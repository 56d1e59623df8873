use std::collections::HashMap;
use std::sync::Mutex;

use crate::task::{ProgressEvent, StatusMap};

use super::colors::{BLUE, CYAN, GREEN, NC, RED, YELLOW};
use super::{calculate_stats, Reporter};

const RULE: &str = "========================================";

/// Streaming reporter for CI environments. Append-only: one line per event,
/// ANSI-colored, never clears the terminal, so captured logs stay readable
/// when tailed. Error bodies are streamed inline as failures happen.
pub struct CiReporter {
    task_names: Mutex<HashMap<String, String>>,
    /// Per-target `(current, total)` subtask counters. Targets run
    /// concurrently, so counters are keyed rather than global.
    counters: Mutex<HashMap<String, (usize, usize)>>,
}

impl CiReporter {
    pub fn new(task_names: HashMap<String, String>) -> Self {
        Self {
            task_names: Mutex::new(task_names),
            counters: Mutex::new(HashMap::new()),
        }
    }

    /// Merges another display-name namespace into this reporter. The unified
    /// run feeds one reporter tasks from several domains.
    pub fn add_task_names(&self, names: HashMap<String, String>) {
        if let Ok(mut task_names) = self.task_names.lock() {
            task_names.extend(names);
        }
    }

    fn display_name(&self, task_id: &str) -> String {
        self.task_names
            .lock()
            .ok()
            .and_then(|names| names.get(task_id).cloned())
            .unwrap_or_else(|| task_id.to_string())
    }
}

impl Reporter for CiReporter {
    fn on_progress(&self, event: &ProgressEvent, statuses: &StatusMap) {
        match event {
            ProgressEvent::TargetStarted { target } => {
                let total = statuses
                    .get(target)
                    .map(|status| status.tasks.len())
                    .unwrap_or(0);
                if let Ok(mut counters) = self.counters.lock() {
                    counters.insert(target.clone(), (0, total));
                }

                println!("{BLUE}{RULE}{NC}");
                println!("{BLUE}{target}{NC}");
                println!("{BLUE}{RULE}{NC}");
                println!();
            }
            ProgressEvent::TaskStarted { target, task_id } => {
                let name = self.display_name(task_id);
                if let Ok(mut counters) = self.counters.lock() {
                    if let Some((current, total)) = counters.get_mut(target) {
                        *current += 1;
                        println!("{YELLOW}  [{current}/{total}] Running {name}...{NC}");
                    }
                }
            }
            ProgressEvent::TaskCompleted {
                task_id, status, ..
            } => {
                let name = self.display_name(task_id);
                if status.is_passed() {
                    println!("{GREEN}  ✓ {name} passed{NC}");
                } else {
                    println!("{RED}  ✗ {name} failed{NC}");
                    if let Some(error) = status.result.as_ref().and_then(|r| r.error.as_deref()) {
                        eprintln!("{error}");
                    }
                }
                println!();
            }
            ProgressEvent::TargetCompleted { target } => {
                // Re-derive from the map; the event carries no verdict.
                let failed = statuses
                    .get(target)
                    .map(|status| status.is_failed())
                    .unwrap_or(false);
                if failed {
                    println!("{RED}✗ {target}: Some checks failed{NC}");
                } else {
                    println!("{GREEN}✓ {target}: All checks passed{NC}");
                }
                println!();
            }
        }
    }

    fn on_complete(&self, statuses: &StatusMap) {
        let stats = calculate_stats(statuses);

        println!("{BLUE}{RULE}{NC}");
        println!("{BLUE}  Final Summary{NC}");
        println!("{BLUE}{RULE}{NC}");
        println!();

        for (target_id, target) in statuses {
            if target.is_failed() {
                println!("{RED}✗ {target_id}{NC}");
                for (task_id, status) in &target.tasks {
                    if status.is_failed() {
                        println!("    - {} failed", self.display_name(task_id));
                    }
                }
            } else {
                println!("{GREEN}✓ {target_id}{NC}");
            }
        }

        println!();
        println!(
            "{CYAN}Results: {} passed, {} failed out of {} target(s){NC}",
            stats.passed_targets, stats.failed_targets, stats.total_targets
        );
        println!();
        if stats.failed_targets == 0 {
            println!("{GREEN}✓ All checks passed!{NC}");
        } else {
            println!("{RED}✗ Some checks failed{NC}");
        }
    }
}
