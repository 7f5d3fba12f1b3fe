//! Message record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single timestamped message in a conversation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub id: String,
    pub conversation_id: String,
    /// User identity of the sending participant
    pub sender_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Read flag as reported for the viewing context
    pub is_read: bool,
}

impl Message {
    /// Create a new unread message
    pub fn new(
        conversation_id: impl Into<String>,
        sender_id: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            conversation_id: conversation_id.into(),
            sender_id: sender_id.into(),
            content: content.into(),
            created_at: now,
            updated_at: now,
            is_read: false,
        }
    }

    pub fn is_from(&self, user_id: &str) -> bool {
        self.sender_id == user_id
    }

    /// Content shortened to `max_chars` characters for chat list previews
    pub fn preview(&self, max_chars: usize) -> String {
        match self.content.char_indices().nth(max_chars) {
            Some((cut, _)) => format!("{}…", &self.content[..cut]),
            None => self.content.clone(),
        }
    }
}
