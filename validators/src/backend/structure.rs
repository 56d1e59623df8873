use std::path::Path;

use crate::types::ValidationResult;

const REQUIRED_FILES: &[&str] = &[
    "Dockerfile",
    "eslint.config.js",
    "openapi.yaml",
    "package.json",
    "tsconfig.json",
];

const REQUIRED_DIRS: &[&str] = &["src", "src/actions"];

const REQUIRED_SRC_FILES: &[&str] = &["config.ts", "index.ts", "routes.ts", "types.ts"];

const ALLOWED_SRC_FOLDERS: &[&str] = &["actions", "services", "utils"];

/// Validates the canonical file layout of a backend service directory.
pub fn validate_structure(_service_name: &str, service_path: &Path) -> ValidationResult {
    let mut errors = Vec::new();

    for file in REQUIRED_FILES {
        if !service_path.join(file).is_file() {
            errors.push(format!("Missing file: {file}"));
        }
    }

    for dir in REQUIRED_DIRS {
        if !service_path.join(dir).is_dir() {
            errors.push(format!("Missing directory: {dir}"));
        }
    }

    let src_path = service_path.join("src");
    if src_path.is_dir() {
        for file in REQUIRED_SRC_FILES {
            if !src_path.join(file).is_file() {
                errors.push(format!("Missing required file in src: {file}"));
            }
        }

        if let Ok(entries) = std::fs::read_dir(&src_path) {
            for entry in entries.flatten() {
                let name = entry.file_name().to_string_lossy().to_string();
                if entry.path().is_dir() && !ALLOWED_SRC_FOLDERS.contains(&name.as_str()) {
                    errors.push(format!(
                        "Invalid folder in src/: {name} (only 'actions', 'services', 'utils' are allowed)"
                    ));
                }
            }
        }
    }

    ValidationResult::from_errors(errors, "Structure validation passed")
}
