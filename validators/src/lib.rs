//! Structural validators and per-domain task-set builders.
//!
//! Validators are read-only checks over the monorepo tree, each returning a
//! uniform [`ValidationResult`]; they never mutate the filesystem. The
//! `tasks` module wraps them (and the external-process checks) into
//! [`monoguard_core::task::LintTask`] pipelines per target category.

pub mod backend;
pub mod process;
pub mod repo_config;
pub mod spectral;
pub mod tasks;
pub mod types;

pub use types::ValidationResult;
