use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use monoguard_core::task::{LintTask, TaskResult};

use crate::process::run_command;

/// Vite config checks can hang on broken configs; bound them.
const BUILD_CHECK_TIMEOUT: Duration = Duration::from_secs(60);

pub fn task_names() -> HashMap<String, String> {
    HashMap::from([
        ("eslint".to_string(), "ESLint".to_string()),
        ("vue-tsc".to_string(), "TypeScript (vue-tsc)".to_string()),
        ("vite-build".to_string(), "Vite build check".to_string()),
    ])
}

/// Builds the subtask pipeline for one frontend service.
pub fn create_frontend_tasks(service: &str, root: &Path) -> Vec<LintTask> {
    let service_dir = root.join("apps").join(service);

    vec![
        shell_task("eslint", "ESLint", &service_dir, &["bun", "run", "lint"], None),
        shell_task(
            "vue-tsc",
            "TypeScript (vue-tsc)",
            &service_dir,
            &["bunx", "vue-tsc", "--noEmit"],
            None,
        ),
        shell_task(
            "vite-build",
            "Vite build check",
            &service_dir,
            &["bunx", "vite", "build", "--mode", "development", "--logLevel", "silent"],
            Some(BUILD_CHECK_TIMEOUT),
        ),
    ]
}

fn shell_task(
    id: &str,
    name: &str,
    cwd: &Path,
    argv: &[&str],
    timeout: Option<Duration>,
) -> LintTask {
    let cwd = cwd.to_path_buf();
    let argv: Vec<String> = argv.iter().map(|s| s.to_string()).collect();
    LintTask::new(id, name, move || {
        let cwd = cwd.clone();
        let argv = argv.clone();
        async move {
            let args: Vec<&str> = argv[1..].iter().map(String::as_str).collect();
            let result = match run_command(&argv[0], &args, &cwd, timeout).await {
                Ok(output) if output.success => TaskResult::passed(output.stdout),
                Ok(output) => TaskResult::failed(output.error_payload()),
                Err(e) => TaskResult::failed(e.to_string()),
            };
            Ok(result)
        }
    })
}
