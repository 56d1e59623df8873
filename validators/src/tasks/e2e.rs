use std::collections::HashMap;
use std::path::Path;
use std::time::{Duration, Instant};

use monoguard_core::task::{LintTask, TaskResult};

use crate::process::run_command;

/// Container teardown between runs; best-effort, errors ignored.
const CLEANUP_TIMEOUT: Duration = Duration::from_secs(30);
/// The test run itself spins up containers and seeds data.
const TEST_RUN_TIMEOUT: Duration = Duration::from_secs(300);

pub fn task_names() -> HashMap<String, String> {
    HashMap::from([
        ("run-local".to_string(), "Run local tests".to_string()),
        ("run-deployed".to_string(), "Run deployed tests".to_string()),
    ])
}

/// Builds the single-task pipeline for one E2E project: cleanup, run the
/// suite against local containers or the deployed environment, cleanup again
/// whatever the outcome.
pub fn create_e2e_tasks(project: &str, root: &Path, deployed: bool) -> Vec<LintTask> {
    let project_path = root.join("tests").join("e2e").join(project);
    let (id, name, script) = if deployed {
        ("run-deployed", "Run deployed tests", "test:deployed")
    } else {
        ("run-local", "Run local tests", "test")
    };

    vec![LintTask::new(id, name, move || {
        let path = project_path.clone();
        async move {
            let start = Instant::now();

            // Clean up any previous containers; a failed teardown must not
            // fail the suite.
            let _ = run_command("bun", &["run", "test:down"], &path, Some(CLEANUP_TIMEOUT)).await;

            let run = run_command("bun", &["run", script], &path, Some(TEST_RUN_TIMEOUT)).await;
            let duration = start.elapsed().as_millis() as u64;

            let result = match run {
                Ok(output) if output.success => TaskResult {
                    success: true,
                    output: Some(output.stdout),
                    error: None,
                    duration_ms: Some(duration),
                },
                Ok(output) => TaskResult {
                    success: false,
                    output: Some(output.stdout.clone()),
                    error: Some(if output.stderr.trim().is_empty() {
                        output.error_payload()
                    } else {
                        output.stderr
                    }),
                    duration_ms: Some(duration),
                },
                Err(e) => TaskResult::failed(e.to_string()).with_duration(duration),
            };

            let _ = run_command("bun", &["run", "test:down"], &path, Some(CLEANUP_TIMEOUT)).await;

            Ok(result)
        }
    })]
}
