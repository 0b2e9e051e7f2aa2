// Meeting domain model
use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Meeting {
    pub id: i64,
    pub title: String,
    #[serde(deserialize_with = "super::timestamp::deserialize")]
    pub start_time: DateTime<Utc>,
    #[serde(deserialize_with = "super::timestamp::deserialize")]
    pub end_time: DateTime<Utc>,
}
