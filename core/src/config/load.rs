use std::path::Path;

use super::types::AppConfig;

const CONFIG_FILE: &str = "monoguard.toml";

/// Loads `monoguard.toml` from the monorepo root, falling back to defaults
/// when the file does not exist.
pub fn load_default(root: &Path) -> anyhow::Result<AppConfig> {
    let path = root.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(AppConfig::default());
    }

    let raw = std::fs::read_to_string(&path)?;
    let cfg = toml::from_str::<AppConfig>(&raw)
        .map_err(|e| anyhow::anyhow!("invalid {}: {e}", path.display()))?;
    Ok(cfg)
}
