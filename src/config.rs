use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{MonitorError, Result};

/// Monitor settings read from `~/.claude-monitor/config.json`.
/// Every field is optional in the file; missing fields take the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MonitorConfig {
    /// Invocation token that identifies a target process in the process table
    pub target_command: String,
    /// Lines containing any of these are never treated as target processes
    pub exclude_patterns: Vec<String>,
    /// Argument substrings that mark a process as headless
    pub headless_flags: Vec<String>,
    /// Root of the per-project session log directories
    pub projects_dir: PathBuf,
    /// Extra MCP config files checked after the built-in candidates
    pub mcp_config_paths: Vec<PathBuf>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        MonitorConfig {
            target_command: "claude".to_string(),
            exclude_patterns: vec![
                "grep".to_string(),
                "Claude Helper".to_string(),
                "/Applications/Claude.app/".to_string(),
                "ShipIt".to_string(),
                "crashpad".to_string(),
            ],
            headless_flags: vec![
                "--headless".to_string(),
                "--no-window".to_string(),
                "--background".to_string(),
                "--print".to_string(),
            ],
            projects_dir: claude_home().join("projects"),
            mcp_config_paths: Vec::new(),
        }
    }
}

impl MonitorConfig {
    /// Load from the default location. Returns defaults on a missing file or parse errors.
    pub fn load() -> Self {
        let Some(path) = default_config_path() else {
            return MonitorConfig::default();
        };

        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(_) => {
                debug!("No config at {:?}, using defaults", path);
                return MonitorConfig::default();
            }
        };

        match serde_json::from_str::<MonitorConfig>(&content) {
            Ok(config) if config.validate().is_err() => {
                warn!("Ignoring config {:?}: targetCommand is empty", path);
                MonitorConfig::default()
            }
            Ok(config) => {
                debug!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                warn!("Ignoring malformed config {:?}: {}", path, e);
                MonitorConfig::default()
            }
        }
    }

    /// Load from an explicitly requested file. Unlike `load`, failures are errors.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| MonitorError::Io {
            context: format!("reading config {}", path.display()),
            source,
        })?;
        let config: MonitorConfig =
            serde_json::from_str(&content).map_err(|source| MonitorError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// An empty target would match every line of the process table
    fn validate(&self) -> Result<()> {
        if self.target_command.trim().is_empty() {
            return Err(MonitorError::ParseFailed {
                what: "config".to_string(),
                details: "targetCommand must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// `~/.claude`, falling back to a relative path when there is no home directory.
pub fn claude_home() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".claude"))
        .unwrap_or_else(|| PathBuf::from(".claude"))
}

fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".claude-monitor").join("config.json"))
}
