//! Filesystem discovery of validation targets.
//!
//! Each category scans exactly one level of its directory and filters by
//! naming convention plus a marker file. Results are sorted so run order and
//! display order are stable across machines. Explicitly requested names are
//! validated against the discovered set before anything executes.

use std::path::Path;

use thiserror::Error;

const APPS_DIR: &str = "apps";
const PACKAGES_DIR: &str = "packages";
const E2E_DIR: &str = "tests/e2e";

pub const BACKEND_PREFIX: &str = "backend-";
pub const FRONTEND_PREFIX: &str = "ui-";
pub const E2E_SUFFIX: &str = "-e2e";

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("Invalid {category}: {}", .names.join(", "))]
    InvalidTargets {
        category: String,
        names: Vec<String>,
        available: Vec<String>,
    },
}

/// Backend services: `apps/backend-*` directories.
pub fn discover_backends(root: &Path) -> Vec<String> {
    scan_directories(&root.join(APPS_DIR), |name, path| {
        name.starts_with(BACKEND_PREFIX) && path.is_dir()
    })
}

/// Frontend services: `apps/ui-*` directories.
pub fn discover_frontends(root: &Path) -> Vec<String> {
    scan_directories(&root.join(APPS_DIR), |name, path| {
        name.starts_with(FRONTEND_PREFIX) && path.is_dir()
    })
}

/// Workspace packages: every `packages/*` directory carrying a package.json.
pub fn discover_packages(root: &Path) -> Vec<String> {
    scan_directories(&root.join(PACKAGES_DIR), |_, path| {
        path.is_dir() && path.join("package.json").is_file()
    })
}

/// E2E projects: `tests/e2e/*-e2e` directories carrying a package.json.
pub fn discover_e2e_projects(root: &Path) -> Vec<String> {
    scan_directories(&root.join(E2E_DIR), |name, path| {
        name.ends_with(E2E_SUFFIX) && path.is_dir() && path.join("package.json").is_file()
    })
}

/// Resolves the set of targets to run: all discovered targets, or the
/// requested subset. Unknown requested names fail fast, before any command
/// runs.
pub fn filter_requested(
    category: &str,
    requested: Option<&[String]>,
    available: Vec<String>,
) -> Result<Vec<String>, DiscoveryError> {
    let Some(requested) = requested else {
        return Ok(available);
    };
    if requested.is_empty() {
        return Ok(available);
    }

    let invalid: Vec<String> = requested
        .iter()
        .filter(|name| !available.contains(name))
        .cloned()
        .collect();
    if !invalid.is_empty() {
        return Err(DiscoveryError::InvalidTargets {
            category: category.to_string(),
            names: invalid,
            available,
        });
    }

    // Preserve discovery order rather than request order.
    Ok(available
        .into_iter()
        .filter(|name| requested.contains(name))
        .collect())
}

/// Scans one directory level. A missing directory yields an empty set, not an
/// error, matching "no services of this category exist yet".
fn scan_directories(dir: &Path, keep: impl Fn(&str, &Path) -> bool) -> Vec<String> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut names: Vec<String> = entries
        .flatten()
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().to_string();
            keep(&name, &entry.path()).then_some(name)
        })
        .collect();
    names.sort();
    names
}
