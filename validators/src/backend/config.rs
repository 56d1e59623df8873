use std::path::Path;

use crate::types::ValidationResult;

// Expected exact content for eslint.config.js
const EXPECTED_ESLINT_CONFIG: &str = "import backendConfig from '../../eslint.config.backend.js'

export default backendConfig
";

// Expected content for tsconfig.json, compared structurally
fn expected_tsconfig() -> serde_json::Value {
    serde_json::json!({
        "extends": "../../tsconfig.json",
        "compilerOptions": {
            "outDir": "./dist",
            "module": "NodeNext",
            "moduleResolution": "NodeNext",
        },
        "include": ["src/**/*", "../../config/config.ts"],
        "exclude": ["node_modules"],
    })
}

/// Validates that a service's eslint and tsconfig files are the canonical
/// extends-stubs and nothing more.
pub fn validate_config(_service_name: &str, service_path: &Path) -> ValidationResult {
    let mut errors = Vec::new();

    match std::fs::read_to_string(service_path.join("eslint.config.js")) {
        Ok(actual) => {
            if actual.trim() != EXPECTED_ESLINT_CONFIG.trim() {
                errors.push(format!(
                    "eslint.config.js content mismatch\nExpected:\n{}\nActual:\n{}",
                    EXPECTED_ESLINT_CONFIG.trim(),
                    actual.trim()
                ));
            }
        }
        Err(_) => errors.push("Missing file: eslint.config.js".to_string()),
    }

    let tsconfig_path = service_path.join("tsconfig.json");
    match std::fs::read_to_string(&tsconfig_path)
        .ok()
        .and_then(|raw| serde_json::from_str::<serde_json::Value>(&raw).ok())
    {
        Some(actual) => {
            let expected = expected_tsconfig();
            if actual != expected {
                errors.push(format!(
                    "tsconfig.json content mismatch\nExpected:\n{}\nActual:\n{}",
                    pretty(&expected),
                    pretty(&actual)
                ));
            }
        }
        None => errors.push("Missing or invalid file: tsconfig.json".to_string()),
    }

    ValidationResult::from_errors(errors, "Config validation passed")
}

fn pretty(value: &serde_json::Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_canonical(dir: &Path) {
        fs::write(dir.join("eslint.config.js"), EXPECTED_ESLINT_CONFIG).expect("write");
        fs::write(
            dir.join("tsconfig.json"),
            serde_json::to_string_pretty(&expected_tsconfig()).expect("serialize"),
        )
        .expect("write");
    }

    #[test]
    fn test_canonical_configs_pass() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_canonical(dir.path());
        assert!(validate_config("backend-audio", dir.path()).success);
    }

    #[test]
    fn test_key_order_does_not_matter_for_tsconfig() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_canonical(dir.path());
        // Same structure, different key order.
        fs::write(
            dir.path().join("tsconfig.json"),
            r#"{
                "exclude": ["node_modules"],
                "include": ["src/**/*", "../../config/config.ts"],
                "compilerOptions": {
                    "moduleResolution": "NodeNext",
                    "module": "NodeNext",
                    "outDir": "./dist"
                },
                "extends": "../../tsconfig.json"
            }"#,
        )
        .expect("write");

        assert!(validate_config("backend-audio", dir.path()).success);
    }

    #[test]
    fn test_divergent_eslint_config_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_canonical(dir.path());
        fs::write(dir.path().join("eslint.config.js"), "export default {}\n").expect("write");

        let result = validate_config("backend-audio", dir.path());
        assert!(!result.success);
        assert!(result.errors[0].contains("eslint.config.js content mismatch"));
    }

    #[test]
    fn test_missing_files_reported() {
        let dir = tempfile::tempdir().expect("tempdir");
        let result = validate_config("backend-audio", dir.path());
        assert!(!result.success);
        assert!(result.errors.contains(&"Missing file: eslint.config.js".to_string()));
        assert!(result
            .errors
            .contains(&"Missing or invalid file: tsconfig.json".to_string()));
    }
}
