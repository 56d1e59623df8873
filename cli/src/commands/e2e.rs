use std::path::Path;
use std::sync::Arc;

use monoguard_core::api::{
    discover_e2e_projects, filter_requested, CiReporter, CliError, CliReporter, ExecutorOptions,
    Reporter, TargetKind, TaskExecutor, UnifiedTask,
};
use monoguard_validators::tasks;

use super::cli::E2eTestArgs;

const BLUE: &str = "\x1b[0;34m";
const CYAN: &str = "\x1b[0;36m";
const NC: &str = "\x1b[0m";
const RULE: &str = "========================================";

/// `e2e list`: prints discovered E2E projects.
pub fn list(root: &Path) -> i32 {
    let projects = discover_e2e_projects(root);

    println!("Available E2E test projects:\n");
    if projects.is_empty() {
        println!("  No e2e test projects found");
        return 0;
    }

    for project in &projects {
        println!("  - {project}");
    }
    println!();
    println!("Total: {} projects", projects.len());
    0
}

/// `e2e test`: runs the selected projects' suites under the bounded pool.
pub async fn test(args: &E2eTestArgs, root: &Path) -> Result<i32, CliError> {
    let selected = filter_requested(
        "e2e project(s)",
        args.projects.as_deref(),
        discover_e2e_projects(root),
    )?;

    if selected.is_empty() {
        println!("No e2e test projects to run.");
        return Ok(0);
    }

    let mode = if args.deployed { "deployed" } else { "local" };

    println!("{BLUE}{RULE}{NC}");
    println!("{BLUE}  Running E2E Tests{NC}");
    println!("{BLUE}{RULE}{NC}");
    println!();
    match args.projects.as_deref() {
        Some(names) if !names.is_empty() => {
            println!("{CYAN}Testing specific project(s): {}{NC}", names.join(", "));
        }
        _ => println!("{CYAN}Discovered {} e2e test project(s){NC}", selected.len()),
    }
    println!("{CYAN}Mode: {mode}{NC}");
    println!();

    let projects: Vec<UnifiedTask> = selected
        .iter()
        .map(|project| {
            UnifiedTask::new(
                project,
                TargetKind::E2e,
                tasks::e2e::create_e2e_tasks(project, root, args.deployed),
            )
        })
        .collect();

    let reporter: Arc<dyn Reporter> = if atty::is(atty::Stream::Stdout) {
        Arc::new(CliReporter::new("E2E Tests", tasks::e2e::task_names()))
    } else {
        Arc::new(CiReporter::new(tasks::e2e::task_names()))
    };

    tracing::info!(
        projects = projects.len(),
        max_concurrency = args.concurrency,
        mode,
        "starting e2e run"
    );

    let executor = TaskExecutor::new(
        reporter,
        ExecutorOptions {
            max_concurrency: args.concurrency,
        },
    );

    let all_passed = executor.execute(projects).await;
    Ok(if all_passed { 0 } else { 1 })
}
