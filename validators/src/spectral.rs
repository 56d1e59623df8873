use std::path::Path;

use crate::process::run_command;
use crate::types::ValidationResult;

const SPECTRAL_BIN: &str = "node_modules/.bin/spectral";

/// Lints one backend's OpenAPI spec with the repo-local Spectral install.
/// Stdout/stderr are surfaced verbatim on failure.
pub async fn validate_backend_openapi(service_name: &str, root: &Path) -> ValidationResult {
    let spec_path = format!("apps/{service_name}/openapi.yaml");
    run_spectral(root, &spec_path, &format!("OpenAPI validation passed for {service_name}")).await
}

/// Lints every backend's OpenAPI spec in one pass (the standalone `openapi`
/// target of the unified run).
pub async fn validate_all_openapi(root: &Path) -> ValidationResult {
    run_spectral(root, "apps/backend-*/openapi.yaml", "OpenAPI validation passed").await
}

async fn run_spectral(root: &Path, target: &str, passed_message: &str) -> ValidationResult {
    let result = run_command(
        "node",
        &[SPECTRAL_BIN, "lint", target, "--format", "stylish"],
        root,
        None,
    )
    .await;

    match result {
        Ok(output) if output.success => ValidationResult::ok(if output.stdout.trim().is_empty() {
            passed_message.to_string()
        } else {
            output.stdout
        }),
        Ok(output) => ValidationResult::fail(vec![output.error_payload()]),
        Err(e) => ValidationResult::fail(vec![e.to_string()]),
    }
}
