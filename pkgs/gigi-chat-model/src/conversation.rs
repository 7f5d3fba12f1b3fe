//! Conversation record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A chat thread, either a direct message or a group
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Conversation {
    pub id: String,
    /// Human readable label, absent for one-to-one conversations
    pub name: Option<String>,
    /// false = direct chat, true = group chat
    pub is_group: bool,
    /// Most recent activity, used for sorting chats
    pub last_message_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    /// Create a new direct (one-to-one) conversation
    pub fn direct() -> Self {
        Self::with_name(None, false)
    }

    /// Create a new group conversation
    pub fn group(name: impl Into<String>) -> Self {
        Self::with_name(Some(name.into()), true)
    }

    fn with_name(name: Option<String>, is_group: bool) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            is_group,
            last_message_at: now,
            created_at: now,
            updated_at: now,
        }
    }

    /// Label to show in a chat list, `fallback` when the name is missing or blank
    pub fn display_name<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => fallback,
        }
    }

    /// Copy of this conversation with activity recorded at `at`.
    ///
    /// `last_message_at` and `updated_at` never move backwards, so replaying an
    /// older message leaves them untouched.
    pub fn with_activity(&self, at: DateTime<Utc>) -> Self {
        Self {
            last_message_at: self.last_message_at.max(at),
            updated_at: self.updated_at.max(at),
            ..self.clone()
        }
    }

    /// Most recently active first, then by id
    pub fn recency_cmp(a: &Conversation, b: &Conversation) -> Ordering {
        b.last_message_at
            .cmp(&a.last_message_at)
            .then_with(|| a.id.cmp(&b.id))
    }
}

/// Sort conversations the way a chat list shows them
pub fn sort_by_recent_activity(conversations: &mut [Conversation]) {
    conversations.sort_by(Conversation::recency_cmp);
}
