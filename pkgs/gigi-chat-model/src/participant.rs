//! Conversation membership record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user's membership in one conversation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConversationParticipant {
    pub id: String,
    pub conversation_id: String,
    /// External user identity, not modeled here
    pub user_id: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ConversationParticipant {
    /// Create a new membership record
    pub fn new(
        conversation_id: impl Into<String>,
        user_id: impl Into<String>,
        is_admin: bool,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            conversation_id: conversation_id.into(),
            user_id: user_id.into(),
            is_admin,
            created_at: now,
            updated_at: now,
        }
    }
}
