use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "monoguard",
    version,
    about = "Unified lint and E2E orchestration for the services monorepo"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Monorepo root directory.
    #[arg(long, default_value = ".", global = true)]
    pub root: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all discovered targets.
    List(ListArgs),
    /// Lint targets (all categories by default).
    Lint(LintArgs),
    /// E2E test orchestration.
    E2e(E2eArgs),
}

#[derive(ClapArgs, Debug, Clone, Default)]
pub struct ListArgs {
    /// List only backend services.
    #[arg(long)]
    pub backends: bool,

    /// List only frontend services.
    #[arg(long)]
    pub frontends: bool,

    /// List only workspace packages.
    #[arg(long)]
    pub packages: bool,
}

#[derive(ClapArgs, Debug, Clone, Default)]
pub struct LintArgs {
    /// Streaming output for CI log capture (no screen redraws).
    #[arg(long)]
    pub ci: bool,

    /// Max targets validated concurrently (overrides monoguard.toml).
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Lint only backend services (all of them, or the named ones).
    #[arg(long, num_args = 0..)]
    pub backends: Option<Vec<String>>,

    /// Lint only frontend services (all of them, or the named ones).
    #[arg(long, num_args = 0..)]
    pub frontends: Option<Vec<String>>,

    /// Lint only workspace packages (all of them, or the named ones).
    #[arg(long, num_args = 0..)]
    pub packages: Option<Vec<String>>,

    /// Skip the standalone OpenAPI validation target.
    #[arg(long)]
    pub skip_openapi: bool,
}

#[derive(ClapArgs, Debug)]
pub struct E2eArgs {
    #[command(subcommand)]
    pub command: E2eCommands,
}

#[derive(Subcommand, Debug)]
pub enum E2eCommands {
    /// List all discovered E2E test projects.
    List,
    /// Run E2E tests (all projects by default).
    Test(E2eTestArgs),
}

#[derive(ClapArgs, Debug, Clone)]
pub struct E2eTestArgs {
    /// Max projects tested concurrently.
    #[arg(long, default_value_t = 3)]
    pub concurrency: usize,

    /// Run only the named projects.
    #[arg(long, num_args = 0..)]
    pub projects: Option<Vec<String>>,

    /// Run tests against deployed services (default: local containers).
    #[arg(long)]
    pub deployed: bool,
}
