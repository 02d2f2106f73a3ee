//! CLI configuration, stored as `config.json` in the base directory.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, VaultError};

const CONFIG_FILENAME: &str = "config.json";

const DEFAULT_NICKNAME: &str = "Player";

/// User preferences for the command-line frontend. The library core never
/// reads these; the binary resolves them into explicit arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultConfig {
    /// Hand out one-shot random tag UUIDs instead of assigning persistent
    /// ones to records.
    #[serde(default)]
    pub random_uuid: bool,

    /// Persona nickname used for register info when none is passed.
    #[serde(default = "default_nickname")]
    pub nickname: String,
}

fn default_nickname() -> String {
    DEFAULT_NICKNAME.to_string()
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            random_uuid: false,
            nickname: default_nickname(),
        }
    }
}

impl VaultConfig {
    /// Loads the configuration from `base_dir`, falling back to defaults
    /// when no config file exists yet.
    pub fn load<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let path = base_dir.as_ref().join(CONFIG_FILENAME);
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)?;
        serde_json::from_str(&content).map_err(|source| VaultError::Corrupt { path, source })
    }

    /// Persists the configuration into `base_dir`, creating it if needed.
    pub fn save<P: AsRef<Path>>(&self, base_dir: P) -> Result<()> {
        fs::create_dir_all(base_dir.as_ref())?;
        let path = base_dir.as_ref().join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self)
            .map_err(|source| VaultError::Corrupt { path: path.clone(), source })?;
        fs::write(&path, content)?;
        Ok(())
    }
}
