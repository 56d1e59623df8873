//! Core orchestration engine for monoguard.
//!
//! This crate provides the generic task model, the concurrency-bounded
//! executor, the progress reporters, and target discovery. Leaf validators
//! and per-domain task builders live in `monoguard-validators`; the CLI
//! entrypoint lives in `monoguard-cli`.

pub mod api;
pub mod config;
pub mod discovery;
pub mod error;
pub mod executor;
pub mod reporter;
pub mod task;
