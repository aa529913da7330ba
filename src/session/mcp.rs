use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::config::claude_home;
use crate::process::WorkingDirectory;

const MCP_CONFIG_FILE: &str = "claude_desktop_config.json";

/// One MCP server entry, in the order it appears in the config file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct McpTool {
    pub name: String,
    #[serde(rename = "type")]
    pub tool_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<String>>,
}

// ---------------------------------------------------------------------------
// Config file schema
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct McpConfigFile {
    #[serde(default)]
    mcp_servers: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
struct McpServerEntry {
    command: Option<String>,
    args: Option<Vec<String>>,
}

// ---------------------------------------------------------------------------
// Public functions
// ---------------------------------------------------------------------------

/// Candidate config files, most specific first: the project's `.claude`
/// directory, the project root, the user's `~/.claude`, then any extras.
/// Sentinel directories contribute no project candidates.
pub fn mcp_config_candidates(working_dir: &WorkingDirectory, extra: &[PathBuf]) -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Some(dir) = working_dir.path() {
        let dir = Path::new(dir);
        candidates.push(dir.join(".claude").join(MCP_CONFIG_FILE));
        candidates.push(dir.join(MCP_CONFIG_FILE));
    }
    candidates.push(claude_home().join(MCP_CONFIG_FILE));
    candidates.extend(extra.iter().cloned());
    candidates
}

/// MCP tools from the first candidate that exists and parses.
/// Unreadable or malformed files are skipped, not fatal.
pub async fn read_mcp_tools(candidates: &[PathBuf]) -> Vec<McpTool> {
    for path in candidates {
        let content = match tokio::fs::read_to_string(path).await {
            Ok(c) => c,
            Err(_) => continue,
        };

        match parse_mcp_config(&content) {
            Ok(tools) => {
                debug!("Loaded {} MCP tools from {:?}", tools.len(), path);
                return tools;
            }
            Err(e) => {
                warn!("Failed to parse MCP config {:?}: {}", path, e);
            }
        }
    }

    Vec::new()
}

/// Extract the `mcpServers` table of a config file, keeping file order
pub fn parse_mcp_config(content: &str) -> Result<Vec<McpTool>, serde_json::Error> {
    let config: McpConfigFile = serde_json::from_str(content)?;

    Ok(config
        .mcp_servers
        .into_iter()
        .map(|(name, value)| {
            let entry: McpServerEntry = serde_json::from_value(value).unwrap_or_default();
            let tool_type = if entry.command.is_some() {
                "Local Server"
            } else {
                "Remote Server"
            };
            McpTool {
                name,
                tool_type: tool_type.to_string(),
                command: entry.command,
                args: entry.args,
            }
        })
        .collect())
}
