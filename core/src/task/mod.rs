//! Task model shared by the executor, the reporters, and the task builders.
//!
//! A [`UnifiedTask`] is one validation target (a backend service, a frontend
//! service, a workspace package, the OpenAPI spec set, or an E2E project). It
//! owns an ordered list of [`LintTask`] subtasks; each subtask wraps a
//! zero-argument async command producing a [`TaskResult`]. All entities are
//! constructed once during initialization and only the executor mutates the
//! per-subtask [`TaskStatus`] afterwards.

pub mod event;
pub mod status;
pub mod types;

pub use event::*;
pub use status::*;
pub use types::*;
