use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A direct message, joined with the names of both parties.
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Message {
    pub message_id: i64,
    pub author_id: i64,
    pub author_name: String,
    pub receiver_id: i64,
    pub receiver_name: String,
    pub content: String,
    pub read: bool,
    pub timestamp: DateTime<Utc>,
}
