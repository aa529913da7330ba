use chrono::{DateTime, Utc};
use log::{debug, trace, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use super::model::{ModelInfo, SessionRecord, SessionStats};
use crate::process::WorkingDirectory;

/// Extension of session log files
const SESSION_LOG_EXTENSION: &str = "jsonl";

/// First run of eight digits in a model id, e.g. the "20250514" in "claude-sonnet-4-20250514"
static MODEL_DATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d{4})(\d{2})(\d{2})").unwrap());

/// Convert a file system path like "/Users/ozan/Projects/my-project" to the
/// session directory name "-Users-ozan-Projects-my-project".
pub fn convert_path_to_dir_name(path: &str) -> String {
    path.replace('/', "-")
}

/// Claude's current encoding, where every non-alphanumeric character becomes a dash.
/// "/Users/ozan/Projects/app/.worktrees/x" -> "-Users-ozan-Projects-app--worktrees-x"
pub fn convert_path_to_sanitized_dir_name(path: &str) -> String {
    path.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect()
}

/// Derive the display label for a model id.
///
/// Family comes from a case-sensitive substring match; an eight-digit run is
/// appended as a date without checking that it is a real calendar date.
pub fn model_alias(model: &str) -> String {
    let mut alias = if model.contains("opus") {
        "Opus".to_string()
    } else if model.contains("sonnet") {
        "Sonnet".to_string()
    } else if model.contains("haiku") {
        "Haiku".to_string()
    } else {
        "Unknown".to_string()
    };

    if let Some(caps) = MODEL_DATE.captures(model) {
        alias.push_str(&format!(" ({}-{}-{})", &caps[1], &caps[2], &caps[3]));
    }

    alias
}

/// Look up the newest session log for `working_dir` under `projects_dir` and
/// summarise it. Every failure along the way degrades to `ModelInfo::none()`.
pub async fn inspect_model(projects_dir: &Path, working_dir: &WorkingDirectory) -> ModelInfo {
    let Some(path) = working_dir.path() else {
        return ModelInfo::none();
    };

    let Some(project_dir) = find_project_dir(projects_dir, path).await else {
        debug!("No session directory for {}", path);
        return ModelInfo::none();
    };

    let Some((log_path, modified)) = find_latest_session_file(&project_dir).await else {
        debug!("No session logs in {:?}", project_dir);
        return ModelInfo::none();
    };

    // Invalid UTF-8 only spoils the lines it touches
    let content = match tokio::fs::read(&log_path).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("Failed to read session log {:?}: {}", log_path, e);
            return ModelInfo::none();
        }
    };

    let mut info = parse_session_log(&String::from_utf8_lossy(&content));
    info.session_id = log_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned());
    info.last_activity_at = Some(DateTime::<Utc>::from(modified).to_rfc3339());

    debug!(
        "Session {:?} for {}: model={:?}, messages={}",
        info.session_id,
        path,
        info.model,
        info.session_stats.map(|s| s.message_count).unwrap_or(0)
    );
    info
}

/// The project's session directory, trying the plain and the sanitized encodings
async fn find_project_dir(projects_dir: &Path, path: &str) -> Option<PathBuf> {
    let plain = projects_dir.join(convert_path_to_dir_name(path));
    if is_dir(&plain).await {
        return Some(plain);
    }

    let sanitized = projects_dir.join(convert_path_to_sanitized_dir_name(path));
    if sanitized != plain && is_dir(&sanitized).await {
        trace!("Matched {} via sanitized dir name", path);
        return Some(sanitized);
    }

    None
}

async fn is_dir(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false)
}

/// The `.jsonl` file with the latest modification time, with that time
pub async fn find_latest_session_file(project_dir: &Path) -> Option<(PathBuf, SystemTime)> {
    let mut entries = tokio::fs::read_dir(project_dir).await.ok()?;
    let mut latest: Option<(PathBuf, SystemTime)> = None;

    while let Ok(Some(entry)) = entries.next_entry().await {
        let path = entry.path();
        let is_log = path
            .extension()
            .map(|ext| ext == SESSION_LOG_EXTENSION)
            .unwrap_or(false);
        if !is_log {
            continue;
        }

        let Some(modified) = entry.metadata().await.and_then(|m| m.modified()).ok() else {
            continue;
        };

        if latest.as_ref().map(|(_, t)| modified > *t).unwrap_or(true) {
            latest = Some((path, modified));
        }
    }

    latest
}

/// Replay a whole session log. Lines that are not valid JSON are skipped.
pub fn parse_session_log(content: &str) -> ModelInfo {
    let mut stats = SessionStats::default();
    let mut model: Option<String> = None;

    for line in content.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let Ok(record) = serde_json::from_str::<SessionRecord>(line) else {
            trace!("Skipping invalid session line");
            continue;
        };

        match record.record_type.as_deref() {
            Some("assistant") => {
                stats.assistant_count += 1;
                if let Some(message) = &record.message {
                    // Later turns override earlier ones
                    if let Some(m) = message.get("model").and_then(Value::as_str) {
                        model = Some(m.to_string());
                    }
                    if let Some(tokens) = message
                        .get("usage")
                        .and_then(|u| u.get("output_tokens"))
                        .and_then(Value::as_u64)
                    {
                        stats.total_tokens += tokens;
                    }
                }
            }
            Some("user") => stats.user_count += 1,
            _ => {}
        }
    }

    stats.message_count = stats.assistant_count + stats.user_count;
    stats.conversation_length = stats.message_count / 2;

    ModelInfo {
        model_alias: Some(
            model
                .as_deref()
                .map(model_alias)
                .unwrap_or_else(|| "Unknown".to_string()),
        ),
        has_model: model.is_some(),
        model,
        session_stats: Some(stats),
        session_id: None,
        last_activity_at: None,
    }
}
