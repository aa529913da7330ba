use serde::{Deserialize, Serialize};

/// Coarse activity of a process, derived from its state flags and CPU usage
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ActivityState {
    Idle,
    Thinking,
    Working,
    Waiting,
}

impl ActivityState {
    /// Symbol shown next to the instance
    pub fn indicator(self) -> &'static str {
        match self {
            ActivityState::Working => "⚡",
            ActivityState::Thinking => "🤔",
            ActivityState::Waiting => "⏳",
            ActivityState::Idle => "💤",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ActivityState::Idle => "idle",
            ActivityState::Thinking => "thinking",
            ActivityState::Working => "working",
            ActivityState::Waiting => "waiting",
        }
    }
}

/// Counters gathered by replaying one session log
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SessionStats {
    pub message_count: u64,
    pub assistant_count: u64,
    pub user_count: u64,
    pub total_tokens: u64,
    pub conversation_length: u64,
}

/// Model identity and usage for the most recent session in a directory.
/// `model` is `None` both when no log was found and when no assistant turn named a model.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ModelInfo {
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_alias: Option<String>,
    #[serde(default)]
    pub has_model: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_stats: Option<SessionStats>,
    /// File stem of the log the stats came from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_activity_at: Option<String>,
}

impl ModelInfo {
    /// No session log could be read
    pub fn none() -> Self {
        ModelInfo::default()
    }
}

/// Internal struct for parsing JSONL records
#[derive(Debug, Deserialize)]
pub(crate) struct SessionRecord {
    #[serde(rename = "type")]
    pub record_type: Option<String>,
    pub message: Option<serde_json::Value>,
}
