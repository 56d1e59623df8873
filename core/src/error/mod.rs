use thiserror::Error;

use crate::discovery::DiscoveryError;

/// Top-level error for the CLI entrypoint. All orchestration failures are
/// aggregated into the executor's boolean instead of erroring; these cover
/// the configuration path, where nothing has executed yet.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("config error: {0}")]
    Config(String),

    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
