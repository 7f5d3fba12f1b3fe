//! Snapshot - one interchange document holding all three record kinds

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

use crate::composite::{compose_all, ConversationWithParticipants};
use crate::conversation::Conversation;
use crate::error::Result;
use crate::message::Message;
use crate::participant::ConversationParticipant;

/// Records as exchanged with the backend
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Snapshot {
    #[serde(default)]
    pub conversations: Vec<Conversation>,
    #[serde(default)]
    pub participants: Vec<ConversationParticipant>,
    #[serde(default)]
    pub messages: Vec<Message>,
}

/// Chat list entry as seen by one user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConversationSummary {
    #[serde(flatten)]
    pub conversation: ConversationWithParticipants,
    /// Preview of the newest message
    pub last_message: Option<String>,
    pub unread_count: usize,
}

impl Snapshot {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a snapshot from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let snapshot = Self::from_json_str(&json)?;

        info!(
            "Loaded snapshot from {}: {} conversations, {} participants, {} messages",
            path.display(),
            snapshot.conversations.len(),
            snapshot.participants.len(),
            snapshot.messages.len()
        );

        Ok(snapshot)
    }

    /// Write the snapshot as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json_string()?)?;
        info!("Saved snapshot to {}", path.display());
        Ok(())
    }

    /// All conversations with their participants, most recently active first
    pub fn conversation_list(&self) -> Vec<ConversationWithParticipants> {
        let mut list = compose_all(self.conversations.clone(), self.participants.clone());
        list.sort_by(|a, b| Conversation::recency_cmp(&a.conversation, &b.conversation));
        list
    }

    /// Messages of one conversation, oldest first
    pub fn messages_for(&self, conversation_id: &str) -> Vec<&Message> {
        let mut messages: Vec<&Message> = self
            .messages
            .iter()
            .filter(|m| m.conversation_id == conversation_id)
            .collect();
        messages.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        messages
    }

    /// Chat list for `viewer_id` with last message previews and unread counts
    pub fn summaries(&self, viewer_id: &str, preview_chars: usize) -> Vec<ConversationSummary> {
        let mut newest: HashMap<&str, &Message> = HashMap::new();
        let mut unread: HashMap<&str, usize> = HashMap::new();

        for message in &self.messages {
            let conversation_id = message.conversation_id.as_str();
            newest
                .entry(conversation_id)
                .and_modify(|current| {
                    if (message.created_at, &message.id) > (current.created_at, &current.id) {
                        *current = message;
                    }
                })
                .or_insert(message);

            if !message.is_read && !message.is_from(viewer_id) {
                *unread.entry(conversation_id).or_default() += 1;
            }
        }

        self.conversation_list()
            .into_iter()
            .map(|conversation| {
                let id = conversation.id();
                let last_message = newest.get(id).map(|m| m.preview(preview_chars));
                let unread_count = unread.get(id).copied().unwrap_or(0);
                ConversationSummary {
                    conversation,
                    last_message,
                    unread_count,
                }
            })
            .collect()
    }
}
