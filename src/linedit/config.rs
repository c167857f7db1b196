use crate::error::{EditorError, Result};
use crate::observer::DEFAULT_LOG_SUFFIX;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
const STATE_FILENAME: &str = "workspace.json";
const DEFAULT_LOG_MARKER: &str = "#log";
pub const HOME_ENV: &str = "LINEDIT_HOME";

/// Editor settings, stored as `config.json` in the data directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EditorConfig {
    /// A document whose first line equals this marker is audit-logged on load.
    #[serde(default = "default_log_marker")]
    pub log_marker: String,

    #[serde(default = "default_true")]
    pub restore_on_start: bool,

    #[serde(default = "default_true")]
    pub save_state_on_exit: bool,

    /// Suffix of the sidecar audit log, e.g. `.notes.txt.log`.
    #[serde(default = "default_log_suffix")]
    pub log_suffix: String,
}

fn default_log_marker() -> String {
    DEFAULT_LOG_MARKER.to_string()
}

fn default_log_suffix() -> String {
    DEFAULT_LOG_SUFFIX.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            log_marker: default_log_marker(),
            restore_on_start: true,
            save_state_on_exit: true,
            log_suffix: default_log_suffix(),
        }
    }
}

impl EditorConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(EditorError::Io)?;
        let config: EditorConfig =
            serde_json::from_str(&content).map_err(EditorError::Serialization)?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(EditorError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(EditorError::Serialization)?;
        fs::write(config_path, content).map_err(EditorError::Io)?;
        Ok(())
    }
}

/// Data directory: `override_dir`, else `$LINEDIT_HOME`, else the platform data dir.
pub fn data_dir(override_dir: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = override_dir {
        return Ok(dir.to_path_buf());
    }
    if let Some(home) = env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("com", "linedit", "linedit")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| {
            EditorError::InvalidState("could not determine a data directory".to_string())
        })
}

pub fn default_state_file(data_dir: &Path) -> PathBuf {
    data_dir.join(STATE_FILENAME)
}
