use std::collections::BTreeSet;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use crate::types::ValidationResult;

static ROUTE_REGEX: OnceLock<Regex> = OnceLock::new();

#[derive(Debug, Clone, PartialEq, Eq)]
struct RouteInfo {
    method: String,
    path: String,
    expected_file: String,
}

/// Validates that the routing table and the action-file tree agree in both
/// directions: every declared route has its action file, and every action
/// file has a declaring route.
pub fn validate_route_actions(_service_name: &str, service_path: &Path) -> ValidationResult {
    let routes_file = service_path.join("src").join("routes.ts");
    let actions_dir = service_path.join("src").join("actions");

    let content = match std::fs::read_to_string(&routes_file) {
        Ok(content) => content,
        Err(e) => {
            return ValidationResult::fail(vec![format!(
                "Failed to validate route-action alignment: {e}"
            )])
        }
    };

    let routes = extract_routes(&content);
    let actual_files = collect_action_files(&actions_dir);
    let actual_set: BTreeSet<&String> = actual_files.iter().collect();
    let expected_set: BTreeSet<&String> = routes.iter().map(|r| &r.expected_file).collect();

    let mut errors = Vec::new();

    for route in &routes {
        if !actual_set.contains(&route.expected_file) {
            errors.push(format!(
                "Missing action file: actions/{} for route {} {}",
                route.expected_file,
                route.method.to_uppercase(),
                route.path
            ));
        }
    }

    for file in &actual_files {
        if !expected_set.contains(file) {
            errors.push(format!("Unexpected action file: actions/{file}"));
        }
    }

    ValidationResult::from_errors(errors, "Route-action validation passed")
}

/// Pulls `fastify.<method>('<path>', handler)` declarations out of the
/// routing table. The health endpoint is runtime plumbing, not a resource
/// route, and has no action file.
fn extract_routes(content: &str) -> Vec<RouteInfo> {
    let regex = ROUTE_REGEX.get_or_init(|| {
        Regex::new(r#"fastify\.(get|post|put|patch|delete)\s*\(\s*['"]([^'"]+)['"]"#)
            .expect("route regex is valid")
    });

    regex
        .captures_iter(content)
        .filter_map(|captures| {
            let method = captures.get(1)?.as_str().to_string();
            let path = captures.get(2)?.as_str().to_string();
            if path == "/health" {
                return None;
            }
            let expected_file = route_to_action_file(&method, &path);
            Some(RouteInfo {
                method,
                path,
                expected_file,
            })
        })
        .collect()
}

/// `GET /api/decisions/:id` -> `decisions/[id]/get.action.ts`.
fn route_to_action_file(method: &str, route_path: &str) -> String {
    let trimmed = route_path.strip_prefix("/api/").unwrap_or(route_path);
    let folder: Vec<String> = trimmed
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| match segment.strip_prefix(':') {
            Some(param) => format!("[{param}]"),
            None => segment.to_string(),
        })
        .collect();

    let file_name = format!("{}.action.ts", method.to_lowercase());
    if folder.is_empty() {
        file_name
    } else {
        format!("{}/{}", folder.join("/"), file_name)
    }
}

/// All `*.action.ts` files under the actions dir, as `/`-separated paths
/// relative to it. A missing dir yields an empty set.
fn collect_action_files(actions_dir: &Path) -> Vec<String> {
    let pattern = format!("{}/**/*.action.ts", actions_dir.display());
    let Ok(paths) = glob::glob(&pattern) else {
        return Vec::new();
    };

    let mut files: Vec<String> = paths
        .flatten()
        .filter_map(|path| {
            let relative = path.strip_prefix(actions_dir).ok()?;
            Some(
                relative
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/"),
            )
        })
        .collect();
    files.sort();
    files
}
