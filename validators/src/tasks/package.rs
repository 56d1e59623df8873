use std::collections::HashMap;
use std::path::Path;

use monoguard_core::task::{LintTask, TaskResult};

use crate::process::run_command;

pub fn task_names() -> HashMap<String, String> {
    HashMap::from([
        ("eslint".to_string(), "ESLint".to_string()),
        ("tsc".to_string(), "TypeScript (tsc)".to_string()),
    ])
}

/// Builds the subtask pipeline for one workspace package. A package without a
/// lint script and without a tsconfig contributes nothing; callers drop such
/// targets from the run entirely instead of reporting an empty pass.
pub fn create_package_tasks(package: &str, root: &Path) -> Vec<LintTask> {
    let package_dir = root.join("packages").join(package);
    let mut tasks = Vec::new();

    if has_lint_script(&package_dir) {
        let dir = package_dir.clone();
        tasks.push(LintTask::new("eslint", "ESLint", move || {
            let dir = dir.clone();
            async move {
                let result = match run_command("bun", &["run", "lint"], &dir, None).await {
                    Ok(output) if output.success => TaskResult::passed(output.stdout),
                    Ok(output) => TaskResult::failed(output.error_payload()),
                    Err(e) => TaskResult::failed(e.to_string()),
                };
                Ok(result)
            }
        }));
    }

    if package_dir.join("tsconfig.json").is_file() {
        let dir = package_dir.clone();
        tasks.push(LintTask::new("tsc", "TypeScript (tsc)", move || {
            let dir = dir.clone();
            async move {
                let result = match run_command("bunx", &["tsc", "--noEmit"], &dir, None).await {
                    Ok(output) if output.success => TaskResult::passed(if output.stdout.is_empty() {
                        "TypeScript check passed".to_string()
                    } else {
                        output.stdout
                    }),
                    Ok(output) => TaskResult::failed(output.error_payload()),
                    Err(e) => TaskResult::failed(e.to_string()),
                };
                Ok(result)
            }
        }));
    }

    tasks
}

fn has_lint_script(package_dir: &Path) -> bool {
    std::fs::read_to_string(package_dir.join("package.json"))
        .ok()
        .and_then(|raw| serde_json::from_str::<serde_json::Value>(&raw).ok())
        .and_then(|json| {
            json.get("scripts")
                .and_then(|scripts| scripts.get("lint"))
                .map(|script| script.is_string())
        })
        .unwrap_or(false)
}
