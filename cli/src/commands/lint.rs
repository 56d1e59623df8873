use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use monoguard_core::api::{
    discover_backends, discover_frontends, discover_packages, filter_requested, AppConfig,
    CiReporter, CliError, CliReporter, ExecutorOptions, Reporter, TargetKind, TaskExecutor,
    UnifiedTask,
};
use monoguard_validators::tasks;

use super::cli::LintArgs;

const BLUE: &str = "\x1b[0;34m";
const CYAN: &str = "\x1b[0;36m";
const NC: &str = "\x1b[0m";
const RULE: &str = "========================================";

/// Runs the unified lint: discovers the selected categories, builds one
/// merged task list, and executes it under a single reporter.
pub async fn run(args: &LintArgs, root: &Path, cfg: &AppConfig) -> Result<i32, CliError> {
    let any_category =
        args.backends.is_some() || args.frontends.is_some() || args.packages.is_some();
    let lint_backends = !any_category || args.backends.is_some();
    let lint_frontends = !any_category || args.frontends.is_some();
    let lint_packages = !any_category || args.packages.is_some();
    let lint_openapi = !any_category && !args.skip_openapi;

    let ci_mode = args.ci || !atty::is(atty::Stream::Stdout);

    let mut unified: Vec<UnifiedTask> = Vec::new();
    let mut task_names: HashMap<String, String> = HashMap::new();
    let mut discovered_lines: Vec<String> = Vec::new();

    if lint_backends {
        let selected = filter_requested(
            "backend service(s)",
            args.backends.as_deref(),
            discover_backends(root),
        )?;
        discovered_lines.push(discovered_line("backend service(s)", args.backends.as_deref(), &selected));
        for service in &selected {
            unified.push(UnifiedTask::new(
                service,
                TargetKind::Backend,
                tasks::backend::create_backend_tasks(service, root),
            ));
        }
        task_names.extend(tasks::backend::task_names());
    }

    if lint_frontends {
        let selected = filter_requested(
            "frontend service(s)",
            args.frontends.as_deref(),
            discover_frontends(root),
        )?;
        discovered_lines.push(discovered_line("frontend service(s)", args.frontends.as_deref(), &selected));
        for service in &selected {
            unified.push(UnifiedTask::new(
                service,
                TargetKind::Frontend,
                tasks::frontend::create_frontend_tasks(service, root),
            ));
        }
        task_names.extend(tasks::frontend::task_names());
    }

    if lint_packages {
        let selected = filter_requested(
            "package(s)",
            args.packages.as_deref(),
            discover_packages(root),
        )?;
        discovered_lines.push(discovered_line("package(s)", args.packages.as_deref(), &selected));
        for package in &selected {
            let subtasks = tasks::package::create_package_tasks(package, root);
            // A package with neither a lint script nor a tsconfig contributes
            // nothing; drop it rather than reporting an empty pass.
            if !subtasks.is_empty() {
                unified.push(UnifiedTask::new(package, TargetKind::Package, subtasks));
            }
        }
        task_names.extend(tasks::package::task_names());
    }

    if lint_openapi {
        unified.push(UnifiedTask::new(
            "openapi",
            TargetKind::Openapi,
            tasks::openapi::create_openapi_tasks(root),
        ));
        task_names.extend(tasks::openapi::task_names());
    }

    let mode_suffix = if ci_mode { " (CI Mode)" } else { "" };
    println!("{BLUE}{RULE}{NC}");
    println!("{BLUE}  Linting Services{mode_suffix}{NC}");
    println!("{BLUE}{RULE}{NC}");
    println!();
    for line in &discovered_lines {
        println!("{CYAN}{line}{NC}");
    }
    println!();

    if unified.is_empty() {
        println!("No lint targets found");
        return Ok(0);
    }

    let reporter: Arc<dyn Reporter> = if ci_mode {
        Arc::new(CiReporter::new(task_names))
    } else {
        Arc::new(CliReporter::new("Services Linting", task_names))
    };

    let max_concurrency = args.concurrency.unwrap_or(cfg.executor.max_concurrency);
    tracing::info!(targets = unified.len(), max_concurrency, ci_mode, "starting lint run");

    let executor = TaskExecutor::new(reporter, ExecutorOptions { max_concurrency });

    let all_passed = executor.execute(unified).await;
    Ok(if all_passed { 0 } else { 1 })
}

fn discovered_line(category: &str, requested: Option<&[String]>, selected: &[String]) -> String {
    match requested {
        Some(names) if !names.is_empty() => {
            format!("Linting specific {category}: {}", names.join(", "))
        }
        _ => format!("Discovered {} {category}", selected.len()),
    }
}
