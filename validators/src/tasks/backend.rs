use std::collections::HashMap;
use std::path::{Path, PathBuf};

use monoguard_core::task::{LintTask, TaskResult};

use crate::backend::{
    validate_config, validate_dockerfile, validate_e2e_exists, validate_index_structure,
    validate_route_actions, validate_structure,
};
use crate::process::run_command;
use crate::spectral::validate_backend_openapi;

pub fn task_names() -> HashMap<String, String> {
    HashMap::from([
        ("eslint".to_string(), "ESLint".to_string()),
        ("structure".to_string(), "Structure validation".to_string()),
        (
            "dockerfile".to_string(),
            "Dockerfile template validation".to_string(),
        ),
        (
            "index-structure".to_string(),
            "Index.ts structure validation".to_string(),
        ),
        ("config".to_string(), "Config extends validation".to_string()),
        ("routes".to_string(), "Route-action alignment".to_string()),
        ("openapi".to_string(), "OpenAPI validation".to_string()),
        ("e2e".to_string(), "E2E project check".to_string()),
    ])
}

/// Builds the subtask pipeline for one backend service.
pub fn create_backend_tasks(service: &str, root: &Path) -> Vec<LintTask> {
    let service_dir = root.join("apps").join(service);

    vec![
        eslint_task(&service_dir),
        sync_task(
            "structure",
            "Structure validation",
            service,
            &service_dir,
            validate_structure,
        ),
        root_task(
            "dockerfile",
            "Dockerfile template validation",
            service,
            &service_dir,
            root,
            validate_dockerfile,
        ),
        root_task(
            "index-structure",
            "Index.ts structure validation",
            service,
            &service_dir,
            root,
            validate_index_structure,
        ),
        sync_task(
            "config",
            "Config extends validation",
            service,
            &service_dir,
            validate_config,
        ),
        sync_task(
            "routes",
            "Route-action alignment",
            service,
            &service_dir,
            validate_route_actions,
        ),
        openapi_task(service, root),
        e2e_task(service, root),
    ]
}

fn eslint_task(service_dir: &Path) -> LintTask {
    let dir = service_dir.to_path_buf();
    LintTask::new("eslint", "ESLint", move || {
        let dir = dir.clone();
        async move {
            let result = match run_command("bun", &["run", "lint"], &dir, None).await {
                Ok(output) if output.success => TaskResult::passed(output.stdout),
                Ok(output) => TaskResult::failed(output.error_payload()),
                Err(e) => TaskResult::failed(e.to_string()),
            };
            Ok(result)
        }
    })
}

/// Wraps a `(service, service_dir)` validator into a subtask.
fn sync_task(
    id: &str,
    name: &str,
    service: &str,
    service_dir: &Path,
    validate: impl Fn(&str, &Path) -> crate::ValidationResult + Send + Sync + 'static,
) -> LintTask {
    let service = service.to_string();
    let dir = service_dir.to_path_buf();
    LintTask::new(id, name, move || {
        let result: TaskResult = validate(&service, &dir).into();
        async move { Ok(result) }
    })
}

/// Wraps a `(service, service_dir, root)` validator into a subtask.
fn root_task(
    id: &str,
    name: &str,
    service: &str,
    service_dir: &Path,
    root: &Path,
    validate: impl Fn(&str, &Path, &Path) -> crate::ValidationResult + Send + Sync + 'static,
) -> LintTask {
    let service = service.to_string();
    let dir = service_dir.to_path_buf();
    let root = root.to_path_buf();
    LintTask::new(id, name, move || {
        let result: TaskResult = validate(&service, &dir, &root).into();
        async move { Ok(result) }
    })
}

fn openapi_task(service: &str, root: &Path) -> LintTask {
    let service = service.to_string();
    let root: PathBuf = root.to_path_buf();
    LintTask::new("openapi", "OpenAPI validation", move || {
        let service = service.clone();
        let root = root.clone();
        async move {
            let result: TaskResult = validate_backend_openapi(&service, &root).await.into();
            Ok(result)
        }
    })
}

fn e2e_task(service: &str, root: &Path) -> LintTask {
    let service = service.to_string();
    let root = root.to_path_buf();
    LintTask::new("e2e", "E2E project check", move || {
        let result: TaskResult = validate_e2e_exists(&service, &root).into();
        async move { Ok(result) }
    })
}
