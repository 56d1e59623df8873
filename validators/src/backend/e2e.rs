use std::path::Path;

use crate::types::ValidationResult;

/// Validates that a backend service has a companion E2E test project at
/// `tests/e2e/{service}-e2e/`.
pub fn validate_e2e_exists(service_name: &str, root: &Path) -> ValidationResult {
    let project_name = format!("{service_name}-e2e");
    let project_path = root.join("tests").join("e2e").join(&project_name);

    if !project_path.exists() {
        return ValidationResult::fail(vec![format!(
            "Missing e2e test project at tests/e2e/{project_name}/"
        )]);
    }

    if !project_path.is_dir() {
        return ValidationResult::fail(vec![format!(
            "tests/e2e/{project_name} exists but is not a directory"
        )]);
    }

    if !project_path.join("package.json").is_file() {
        return ValidationResult::fail(vec![format!(
            "E2E project exists but missing package.json at tests/e2e/{project_name}/package.json"
        )]);
    }

    ValidationResult::ok(format!(
        "E2E test project exists at tests/e2e/{project_name}/"
    ))
}
