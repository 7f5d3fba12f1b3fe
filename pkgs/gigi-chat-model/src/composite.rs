//! Conversations joined with their participants for display

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

use crate::conversation::Conversation;
use crate::error::{ModelError, Result};
use crate::participant::ConversationParticipant;

/// A conversation together with its materialized participant list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConversationWithParticipants {
    #[serde(flatten)]
    pub conversation: Conversation,
    #[serde(default)]
    pub participants: Vec<ConversationParticipant>,
}

impl ConversationWithParticipants {
    /// Join a conversation with its participants.
    ///
    /// Every participant must reference `conversation.id`; input order is kept.
    pub fn compose(
        conversation: Conversation,
        participants: Vec<ConversationParticipant>,
    ) -> Result<Self> {
        if let Some(stray) = participants
            .iter()
            .find(|p| p.conversation_id != conversation.id)
        {
            return Err(ModelError::ConversationMismatch {
                participant_id: stray.id.clone(),
                expected: conversation.id.clone(),
                found: stray.conversation_id.clone(),
            });
        }

        debug!(
            "Composed conversation {} with {} participants",
            conversation.id,
            participants.len()
        );

        Ok(Self {
            conversation,
            participants,
        })
    }

    pub fn id(&self) -> &str {
        &self.conversation.id
    }

    pub fn is_direct(&self) -> bool {
        !self.conversation.is_group
    }

    /// Distinct user ids, in the order they first appear
    pub fn user_ids(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.participants
            .iter()
            .map(|p| p.user_id.as_str())
            .filter(|user_id| seen.insert(*user_id))
            .collect()
    }

    pub fn has_member(&self, user_id: &str) -> bool {
        self.participants.iter().any(|p| p.user_id == user_id)
    }

    pub fn admins(&self) -> impl Iterator<Item = &ConversationParticipant> {
        self.participants.iter().filter(|p| p.is_admin)
    }

    /// Everyone except `viewer_id`; for a direct chat this is the peer
    pub fn others<'a>(
        &'a self,
        viewer_id: &'a str,
    ) -> impl Iterator<Item = &'a ConversationParticipant> + 'a {
        self.participants.iter().filter(move |p| p.user_id != viewer_id)
    }
}

/// Join every conversation with its participants.
///
/// Output follows the order of `conversations`. Participants pointing at a
/// conversation that is not in the list are dropped.
pub fn compose_all(
    conversations: Vec<Conversation>,
    participants: Vec<ConversationParticipant>,
) -> Vec<ConversationWithParticipants> {
    let known: HashSet<&str> = conversations.iter().map(|c| c.id.as_str()).collect();

    let mut by_conversation: HashMap<String, Vec<ConversationParticipant>> = HashMap::new();
    for participant in participants {
        if !known.contains(participant.conversation_id.as_str()) {
            warn!(
                "Dropping participant {}: conversation {} not found",
                participant.id, participant.conversation_id
            );
            continue;
        }
        by_conversation
            .entry(participant.conversation_id.clone())
            .or_default()
            .push(participant);
    }

    conversations
        .into_iter()
        .map(|conversation| {
            let participants = by_conversation.remove(&conversation.id).unwrap_or_default();
            ConversationWithParticipants {
                conversation,
                participants,
            }
        })
        .collect()
}
