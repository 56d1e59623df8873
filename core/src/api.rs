//! Stable re-exports for consumers (`cli`, `validators`, and external crates).
//!
//! Prefer importing from `monoguard_core::api` instead of reaching into
//! internal modules.

pub use crate::config::{load_default, AppConfig, ExecutorConfig, LoggingConfig};
pub use crate::discovery::{
    discover_backends, discover_e2e_projects, discover_frontends, discover_packages,
    filter_requested, DiscoveryError,
};
pub use crate::error::CliError;
pub use crate::executor::{ExecutorOptions, TaskExecutor, DEFAULT_MAX_CONCURRENCY};
pub use crate::reporter::{calculate_stats, CiReporter, CliReporter, Reporter, SummaryStats};
pub use crate::task::{
    now_ms, LintTask, ProgressEvent, StatusMap, TargetKind, TargetStatus, TaskResult, TaskState,
    TaskStatus, UnifiedTask,
};
