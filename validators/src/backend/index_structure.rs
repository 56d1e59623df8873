use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use crate::repo_config::RepoConfig;
use crate::types::ValidationResult;

static LINE_COMMENT_REGEX: OnceLock<Regex> = OnceLock::new();
static BLOCK_COMMENT_REGEX: OnceLock<Regex> = OnceLock::new();
static IMPORT_REGEX: OnceLock<Regex> = OnceLock::new();
static LOG_CALL_REGEX: OnceLock<Regex> = OnceLock::new();

const REQUIRED_IMPORTS: &[&str] = &[
    "import cors from '@fastify/cors'",
    "import Fastify from 'fastify'",
    "import { PORT } from './config'",
    "import { registerRoutes } from './routes'",
];

const FORBIDDEN_PATTERNS: &[&str] = &["setupFileWatcher", "Socket.IO", "setupWatcher"];

/// Validates that an `endpoint-only` service keeps the generated index.ts
/// shape: the standard imports, the standard Fastify bootstrap, and nothing
/// custom. Services in `custom` mode are exempt.
pub fn validate_index_structure(
    service_name: &str,
    service_path: &Path,
    root: &Path,
) -> ValidationResult {
    let config = match RepoConfig::load(root) {
        Ok(config) => config,
        Err(e) => return ValidationResult::fail(vec![e.to_string()]),
    };

    let service = config.service(service_name);
    let backend_mode = service
        .map(|entry| entry.backend_mode.as_str())
        .unwrap_or("custom");
    if backend_mode != "endpoint-only" {
        return ValidationResult::ok(format!(
            "Service {service_name} is in 'custom' mode (skipping index.ts structure validation)"
        ));
    }

    let index_path = service_path.join("src").join("index.ts");
    let content = match std::fs::read_to_string(&index_path) {
        Ok(content) => content,
        Err(_) => {
            return ValidationResult::fail(vec![format!(
                "index.ts not found at {}",
                index_path.display()
            )])
        }
    };

    let content_no_comments = strip_comments(&content);
    let container_name = service
        .map(|entry| entry.container_name.as_str())
        .filter(|name| !name.is_empty())
        .unwrap_or(service_name);
    let display_name = service_display_name(container_name);

    let mut errors = Vec::new();

    for import in REQUIRED_IMPORTS {
        if !content.contains(import) {
            errors.push(format!("Missing required import: {import}"));
        }
    }

    // Anything imported beyond the standard set is custom initialization.
    let import_regex = IMPORT_REGEX
        .get_or_init(|| Regex::new(r"(?m)^import\s+.*$").expect("import regex is valid"));
    for line in import_regex.find_iter(&content) {
        let normalized = line.as_str().trim().replace(['"', '\''], "");
        let is_required = REQUIRED_IMPORTS
            .iter()
            .any(|required| normalized == required.replace(['"', '\''], ""));
        if !is_required {
            errors.push(format!("Extra import found: {}", line.as_str()));
        }
    }

    for (needle, message) in [
        ("async function start()", "Missing 'async function start()' declaration"),
        ("void start()", "Missing 'void start()' invocation"),
        ("const fastify = Fastify", "Missing 'const fastify = Fastify' initialization"),
        ("logger: true", "Missing 'logger: true' in Fastify config"),
        (
            "await fastify.register(cors",
            "Missing CORS registration: 'await fastify.register(cors'",
        ),
        ("registerRoutes(fastify)", "Missing 'registerRoutes(fastify)' call"),
        (
            "await fastify.listen({ port: PORT, host: '0.0.0.0' })",
            "Missing standard listen call: 'await fastify.listen({ port: PORT, host: '0.0.0.0' })'",
        ),
    ] {
        if !content_no_comments.contains(needle) {
            errors.push(message.to_string());
        }
    }

    let expected_log = format!("Backend {display_name} API running at http://localhost:${{PORT}}");
    let expected_log_line = format!("fastify.log.info(`{expected_log}`)");
    if !content.contains(&expected_log_line) {
        errors.push("Log message incorrect".to_string());
        errors.push(format!("  Expected: {expected_log_line}"));
        let log_regex = LOG_CALL_REGEX
            .get_or_init(|| Regex::new(r"fastify\.log\.info\([^)]+\)").expect("log regex is valid"));
        if let Some(found) = log_regex.find(&content) {
            errors.push(format!("  Got: {}", found.as_str()));
        }
    }

    if !content_no_comments.contains("fastify.log.error(err)") {
        errors.push("Missing error logging: 'fastify.log.error(err)'".to_string());
    }
    if !content_no_comments.contains("process.exit(1)") {
        errors.push("Missing 'process.exit(1)' in error handler".to_string());
    }

    for pattern in FORBIDDEN_PATTERNS {
        if content.contains(pattern) {
            errors.push(format!("Contains custom initialization code ({pattern})"));
            errors.push(
                "  Either remove custom code or change backendMode to 'custom' in config.json"
                    .to_string(),
            );
            break;
        }
    }

    if content.contains("getPort(") {
        errors.push(
            "Uses dynamic port resolution (getPort) - should import PORT from ./config".to_string(),
        );
    }

    if errors.is_empty() {
        return ValidationResult::ok(format!(
            "Service {service_name} follows the endpoint-only structure"
        ));
    }

    let mut wrapped = vec![format!(
        "Service {service_name} violates endpoint-only structure requirements:"
    )];
    wrapped.extend(errors);
    wrapped.push(String::new());
    wrapped.push(
        "This service is configured as 'endpoint-only' and must follow the standard structure."
            .to_string(),
    );
    wrapped.push(
        "Either fix the index.ts to match the standard, or change backendMode to 'custom' in config.json."
            .to_string(),
    );
    ValidationResult::fail(wrapped)
}

fn strip_comments(content: &str) -> String {
    let line = LINE_COMMENT_REGEX
        .get_or_init(|| Regex::new(r"(?m)//.*$").expect("line-comment regex is valid"));
    let block = BLOCK_COMMENT_REGEX
        .get_or_init(|| Regex::new(r"(?s)/\*.*?\*/").expect("block-comment regex is valid"));
    block.replace_all(&line.replace_all(content, ""), "").into_owned()
}

/// `backend-table-document` -> `Table Document`.
fn service_display_name(container_name: &str) -> String {
    container_name
        .strip_prefix("backend-")
        .unwrap_or(container_name)
        .split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
