use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

const CONFIG_PATH: &str = "config/config.json";

/// The monorepo's `config/config.json`: one entry per service, keyed by the
/// uppercase form of the service directory name (`backend-audio` ->
/// `BACKEND_AUDIO`).
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RepoConfig {
    #[serde(default)]
    pub services: HashMap<String, ServiceEntry>,

    #[serde(default)]
    pub uis: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceEntry {
    #[serde(default)]
    pub dev: u16,

    #[serde(default)]
    pub prod: u16,

    #[serde(default)]
    pub api_route: String,

    #[serde(default)]
    pub container_name: String,

    /// `endpoint-only` services must follow the generated index structure;
    /// `custom` services are exempt.
    #[serde(default = "default_backend_mode")]
    pub backend_mode: String,

    #[serde(default)]
    pub data_folders: Vec<String>,
}

fn default_backend_mode() -> String {
    "custom".to_string()
}

impl RepoConfig {
    pub fn load(root: &Path) -> anyhow::Result<Self> {
        let path = root.join(CONFIG_PATH);
        let raw = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("cannot read {}: {e}", path.display()))?;
        let config = serde_json::from_str(&raw)
            .map_err(|e| anyhow::anyhow!("invalid {}: {e}", path.display()))?;
        Ok(config)
    }

    pub fn service(&self, service_name: &str) -> Option<&ServiceEntry> {
        self.services.get(&service_key(service_name))
    }
}

/// `backend-audio` -> `BACKEND_AUDIO`.
pub fn service_key(service_name: &str) -> String {
    service_name.to_uppercase().replace('-', "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) const SAMPLE_CONFIG: &str = r#"{
        "services": {
            "BACKEND_AUDIO": {
                "dev": 3001,
                "prod": 8001,
                "apiRoute": "/api/recordings",
                "containerName": "backend-audio",
                "backendMode": "endpoint-only",
                "dataFolders": ["recordings", "uploads"]
            },
            "BACKEND_DECISION": {
                "dev": 3002,
                "prod": 8002,
                "apiRoute": "/api/decisions",
                "containerName": "backend-decision",
                "backendMode": "custom"
            }
        },
        "uis": {
            "UI_DECISION": {}
        }
    }"#;

    #[test]
    fn test_service_key() {
        assert_eq!(service_key("backend-audio"), "BACKEND_AUDIO");
        assert_eq!(service_key("backend-table-document"), "BACKEND_TABLE_DOCUMENT");
    }

    #[test]
    fn test_load_and_lookup() {
        let root = tempfile::tempdir().expect("tempdir");
        std::fs::create_dir_all(root.path().join("config")).expect("mkdir");
        std::fs::write(root.path().join("config/config.json"), SAMPLE_CONFIG).expect("write");

        let config = RepoConfig::load(root.path()).expect("load");
        let audio = config.service("backend-audio").expect("entry");
        assert_eq!(audio.prod, 8001);
        assert_eq!(audio.backend_mode, "endpoint-only");
        assert_eq!(audio.data_folders, vec!["recordings", "uploads"]);

        let decision = config.service("backend-decision").expect("entry");
        assert_eq!(decision.backend_mode, "custom");

        assert!(config.service("backend-missing").is_none());
    }

    #[test]
    fn test_backend_mode_defaults_to_custom() {
        let config: RepoConfig = serde_json::from_str(
            r#"{"services": {"BACKEND_X": {"dev": 1, "prod": 2, "apiRoute": "/api/x", "containerName": "backend-x"}}}"#,
        )
        .expect("parse");
        assert_eq!(config.service("backend-x").expect("entry").backend_mode, "custom");
    }
}
