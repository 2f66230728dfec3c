//! rollgate.toml configuration parser.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Port the gate listens on.
    pub port: u16,
    /// Request header trusted to carry the caller's network address.
    /// Used verbatim — no proxy-chain parsing.
    pub client_ip_header: String,
    /// Directory holding rollout.json and the version artifacts.
    pub artifact_dir: PathBuf,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            client_ip_header: "x-real-ip".to_string(),
            artifact_dir: PathBuf::from("artifacts"),
        }
    }
}

impl GateConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: GateConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
