// Task domain model
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A task owned by the remote service. The dashboard only ever holds
/// read-only copies replaced wholesale on each fetch.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(deserialize_with = "super::timestamp::deserialize")]
    pub created_at: DateTime<Utc>,
}
