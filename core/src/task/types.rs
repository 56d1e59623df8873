use std::fmt;
use std::future::Future;

use futures::future::BoxFuture;

/// Result of a single subtask command invocation. Produced exactly once per
/// invocation and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskResult {
    pub success: bool,
    pub output: Option<String>,
    pub error: Option<String>,
    pub duration_ms: Option<u64>,
}

impl TaskResult {
    pub fn passed(output: impl Into<String>) -> Self {
        Self {
            success: true,
            output: Some(output.into()),
            error: None,
            duration_ms: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            output: None,
            error: Some(error.into()),
            duration_ms: None,
        }
    }

    pub fn with_duration(mut self, duration_ms: u64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }
}

/// The async thunk a subtask runs. Zero arguments; target context is captured
/// by closure at construction time. An `Err` models a command that threw
/// rather than returning a failed result.
pub type CommandFuture = BoxFuture<'static, anyhow::Result<TaskResult>>;
pub type CommandFn = Box<dyn Fn() -> CommandFuture + Send + Sync>;

/// One atomic check or test command within a target.
pub struct LintTask {
    /// Unique within its parent target.
    pub id: String,
    /// Display name shown in output.
    pub name: String,
    pub command: CommandFn,
}

impl LintTask {
    pub fn new<F, Fut>(id: impl Into<String>, name: impl Into<String>, command: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<TaskResult>> + Send + 'static,
    {
        Self {
            id: id.into(),
            name: name.into(),
            command: Box::new(move || Box::pin(command())),
        }
    }
}

impl fmt::Debug for LintTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LintTask")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Category of a validation target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetKind {
    Backend,
    Frontend,
    Package,
    Openapi,
    E2e,
}

impl TargetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Backend => "backend",
            Self::Frontend => "frontend",
            Self::Package => "package",
            Self::Openapi => "openapi",
            Self::E2e => "e2e",
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One validation target with its ordered subtask pipeline. The id is
/// globally unique within a run and doubles as the status-map key.
pub struct UnifiedTask {
    pub id: String,
    pub name: String,
    pub kind: TargetKind,
    pub subtasks: Vec<LintTask>,
}

impl UnifiedTask {
    pub fn new(id: impl Into<String>, kind: TargetKind, subtasks: Vec<LintTask>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            kind,
            subtasks,
        }
    }
}

impl fmt::Debug for UnifiedTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnifiedTask")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("subtasks", &self.subtasks.len())
            .finish()
    }
}
