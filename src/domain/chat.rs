// Chat transcript and reply domain models
use serde::{Deserialize, Deserializer};

/// Reply phrases the assistant service uses when a chat turn mutated tasks
/// or meetings. Matching is exact and case-sensitive.
pub const MUTATION_MARKERS: [&str; 5] = [
    "Task added:",
    "Meeting scheduled:",
    "Marked task",
    "Deleted task",
    "Deleted meeting",
];

/// Shown in place of a reply when the chat request fails.
pub const SEND_FAILURE_TEXT: &str = "Error: Failed to fetch response";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub text: String,
    pub is_user: bool,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_user: true,
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_user: false,
        }
    }
}

/// Structured change flags. Older servers never send these.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct ChangedCollections {
    #[serde(default)]
    pub tasks: bool,
    #[serde(default)]
    pub meetings: bool,
}

/// Body of a `POST /chat` response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChatReply {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(deserialize_with = "content_text")]
    pub content: String,
    #[serde(default)]
    pub changed: Option<ChangedCollections>,
}

impl ChatReply {
    #[cfg(test)]
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            kind: Some("message".to_string()),
            content: content.into(),
            changed: None,
        }
    }

    /// Whether this reply means server-side tasks or meetings changed.
    pub fn signals_change(&self) -> bool {
        match self.changed {
            Some(changed) => changed.tasks || changed.meetings,
            None => contains_mutation_marker(&self.content),
        }
    }
}

pub fn contains_mutation_marker(content: &str) -> bool {
    MUTATION_MARKERS.iter().any(|marker| content.contains(marker))
}

// Unhandled actions come back with an object as content.
fn content_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(text) => text,
        other => other.to_string(),
    })
}
