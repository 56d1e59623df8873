use std::collections::HashMap;
use std::path::Path;

use monoguard_core::task::{LintTask, TaskResult};

use crate::spectral::validate_all_openapi;

pub fn task_names() -> HashMap<String, String> {
    HashMap::from([("spectral".to_string(), "Spectral validation".to_string())])
}

/// Builds the standalone OpenAPI target: one Spectral pass over every
/// backend's spec.
pub fn create_openapi_tasks(root: &Path) -> Vec<LintTask> {
    let root = root.to_path_buf();
    vec![LintTask::new("spectral", "Spectral validation", move || {
        let root = root.clone();
        async move {
            let result: TaskResult = validate_all_openapi(&root).await.into();
            Ok(result)
        }
    })]
}
