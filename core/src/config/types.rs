use serde::{Deserialize, Serialize};

use crate::executor::DEFAULT_MAX_CONCURRENCY;

/// Tool configuration, loaded from `monoguard.toml` at the monorepo root.
/// CLI flags override everything here.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub executor: ExecutorConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutorConfig {
    /// Max number of targets validated concurrently.
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            max_concurrency: default_max_concurrency(),
        }
    }
}

fn default_max_concurrency() -> usize {
    DEFAULT_MAX_CONCURRENCY
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log to stderr (never stdout, which belongs to the reporters).
    #[serde(default = "default_true")]
    pub console: bool,

    #[serde(default)]
    pub file: bool,

    /// Directory for log files; defaults to the system temp dir when unset.
    #[serde(default)]
    pub directory: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: default_log_level(),
            console: true,
            file: false,
            directory: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}
