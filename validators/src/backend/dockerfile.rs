use std::path::Path;

use crate::repo_config::RepoConfig;
use crate::types::ValidationResult;

const TEMPLATE_PATH: &str = "_templates/backend-service/Dockerfile.tmpl";

/// Validates that a backend service's Dockerfile matches the scaffolding
/// template rendered with the service's own parameters from
/// `config/config.json`.
pub fn validate_dockerfile(
    service_name: &str,
    service_path: &Path,
    root: &Path,
) -> ValidationResult {
    let actual = match std::fs::read_to_string(service_path.join("Dockerfile")) {
        Ok(content) => content,
        Err(e) => return ValidationResult::fail(vec![format!("Failed to read Dockerfile: {e}")]),
    };

    let template = match std::fs::read_to_string(root.join(TEMPLATE_PATH)) {
        Ok(content) => strip_frontmatter(&content),
        Err(e) => {
            return ValidationResult::fail(vec![format!(
                "Failed to read template {TEMPLATE_PATH}: {e}"
            )])
        }
    };

    let config = match RepoConfig::load(root) {
        Ok(config) => config,
        Err(e) => return ValidationResult::fail(vec![e.to_string()]),
    };

    let Some(service) = config.service(service_name) else {
        return ValidationResult::fail(vec![format!(
            "Service {} not found in config/config.json",
            crate::repo_config::service_key(service_name)
        )]);
    };

    let domain = service_name.strip_prefix("backend-").unwrap_or(service_name);
    let expected = render_template(&template, domain, service.prod, &service.data_folders);

    let normalized_actual = normalize(&actual);
    let normalized_expected = normalize(&expected);
    if normalized_actual == normalized_expected {
        return ValidationResult::ok("Dockerfile matches template");
    }

    let mut errors = vec!["Dockerfile does not match template".to_string()];
    let actual_lines: Vec<&str> = normalized_actual.lines().collect();
    let expected_lines: Vec<&str> = normalized_expected.lines().collect();
    for idx in 0..actual_lines.len().max(expected_lines.len()) {
        if actual_lines.get(idx) != expected_lines.get(idx) {
            errors.push(format!("First difference at line {}:", idx + 1));
            errors.push(format!(
                "  Expected: {}",
                expected_lines.get(idx).unwrap_or(&"(empty)")
            ));
            errors.push(format!(
                "  Actual:   {}",
                actual_lines.get(idx).unwrap_or(&"(empty)")
            ));
            break;
        }
    }

    ValidationResult::fail(errors)
}

/// Generator templates carry a 3-line frontmatter block (`---`, `to: ...`,
/// `---`) before the actual content.
fn strip_frontmatter(template: &str) -> String {
    if template.starts_with("---") {
        template.lines().skip(3).collect::<Vec<_>>().join("\n")
    } else {
        template.to_string()
    }
}

fn render_template(template: &str, service: &str, port: u16, data_folders: &[String]) -> String {
    template
        .replace("{{service}}", service)
        .replace("{{port}}", &port.to_string())
        .replace("{{data_folders}}", &data_folders.join(" "))
}

/// Trailing whitespace per line and blank edges are not meaningful.
fn normalize(content: &str) -> String {
    content
        .lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    const TEMPLATE: &str = "---
to: apps/backend-{{service}}/Dockerfile
---
FROM oven/bun:1

WORKDIR /app
COPY . .
RUN mkdir -p {{data_folders}}
EXPOSE {{port}}
CMD [\"bun\", \"run\", \"src/index.ts\"]
";

    fn scaffold(root: &Path, dockerfile: &str) {
        fs::create_dir_all(root.join("_templates/backend-service")).expect("mkdir");
        fs::create_dir_all(root.join("apps/backend-audio")).expect("mkdir");
        fs::create_dir_all(root.join("config")).expect("mkdir");
        fs::write(root.join(TEMPLATE_PATH), TEMPLATE).expect("write");
        fs::write(root.join("apps/backend-audio/Dockerfile"), dockerfile).expect("write");
        fs::write(
            root.join("config/config.json"),
            r#"{"services": {"BACKEND_AUDIO": {"dev": 3001, "prod": 8001, "apiRoute": "/api/recordings", "containerName": "backend-audio", "backendMode": "custom", "dataFolders": ["recordings", "uploads"]}}}"#,
        )
        .expect("write");
    }

    fn rendered() -> &'static str {
        "FROM oven/bun:1

WORKDIR /app
COPY . .
RUN mkdir -p recordings uploads
EXPOSE 8001
CMD [\"bun\", \"run\", \"src/index.ts\"]
"
    }

    #[test]
    fn test_matching_dockerfile_passes() {
        let root = tempfile::tempdir().expect("tempdir");
        scaffold(root.path(), rendered());
        let result = validate_dockerfile(
            "backend-audio",
            &root.path().join("apps/backend-audio"),
            root.path(),
        );
        assert!(result.success, "errors: {:?}", result.errors);
    }

    #[test]
    fn test_trailing_whitespace_is_ignored() {
        let root = tempfile::tempdir().expect("tempdir");
        let with_trailing = rendered().replace("WORKDIR /app", "WORKDIR /app   ");
        scaffold(root.path(), &with_trailing);
        let result = validate_dockerfile(
            "backend-audio",
            &root.path().join("apps/backend-audio"),
            root.path(),
        );
        assert!(result.success);
    }

    #[test]
    fn test_divergence_reports_first_differing_line() {
        let root = tempfile::tempdir().expect("tempdir");
        let drifted = rendered().replace("EXPOSE 8001", "EXPOSE 9999");
        scaffold(root.path(), &drifted);

        let result = validate_dockerfile(
            "backend-audio",
            &root.path().join("apps/backend-audio"),
            root.path(),
        );
        assert!(!result.success);
        assert_eq!(result.errors[0], "Dockerfile does not match template");
        assert!(result.errors[1].contains("First difference at line 6"));
        assert!(result.errors[2].contains("EXPOSE 8001"));
        assert!(result.errors[3].contains("EXPOSE 9999"));
    }

    #[test]
    fn test_unknown_service_key_fails() {
        let root = tempfile::tempdir().expect("tempdir");
        scaffold(root.path(), rendered());
        fs::create_dir_all(root.path().join("apps/backend-ghost")).expect("mkdir");
        fs::write(root.path().join("apps/backend-ghost/Dockerfile"), rendered()).expect("write");

        let result = validate_dockerfile(
            "backend-ghost",
            &root.path().join("apps/backend-ghost"),
            root.path(),
        );
        assert!(!result.success);
        assert!(result.errors[0].contains("BACKEND_GHOST not found"));
    }
}
