//! Integrity checks over a snapshot of chat records
//!
//! The records themselves carry no behavior; the relations between them
//! (conversation references, direct-chat membership, activity timestamps)
//! are only meaningful across a whole snapshot, so they are checked here.

use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

use crate::error::{ModelError, RecordKind, Result};
use crate::snapshot::Snapshot;
use crate::ModelConfig;

/// Validate a snapshot, returning the first violation found
pub fn validate(snapshot: &Snapshot, config: &ModelConfig) -> Result<()> {
    config.validate()?;
    match violations(snapshot, config).into_iter().next() {
        Some(violation) => Err(violation),
        None => Ok(()),
    }
}

/// Collect every violation in the snapshot.
///
/// Order is stable for a given snapshot: id and timestamp checks first, then
/// membership, then messages, each in input order.
pub fn violations(snapshot: &Snapshot, config: &ModelConfig) -> Vec<ModelError> {
    let mut found = Vec::new();

    check_duplicate_ids(snapshot, &mut found);
    if config.check_timestamps {
        check_timestamps(snapshot, &mut found);
    }

    let conversations: HashMap<&str, bool> = snapshot
        .conversations
        .iter()
        .map(|c| (c.id.as_str(), c.is_group))
        .collect();

    // conversation id -> distinct member user ids
    let mut members: HashMap<&str, HashSet<&str>> = HashMap::new();
    for participant in &snapshot.participants {
        let conversation_id = participant.conversation_id.as_str();
        if !conversations.contains_key(conversation_id) {
            found.push(ModelError::UnknownConversation {
                kind: RecordKind::Participant,
                id: participant.id.clone(),
                conversation_id: participant.conversation_id.clone(),
            });
            continue;
        }
        if !members
            .entry(conversation_id)
            .or_default()
            .insert(participant.user_id.as_str())
        {
            found.push(ModelError::DuplicateParticipant {
                conversation_id: participant.conversation_id.clone(),
                user_id: participant.user_id.clone(),
            });
        }
    }

    for conversation in &snapshot.conversations {
        if conversation.is_group {
            continue;
        }
        let count = members.get(conversation.id.as_str()).map_or(0, HashSet::len);
        if count > config.max_direct_participants {
            found.push(ModelError::DirectParticipantLimit {
                conversation_id: conversation.id.clone(),
                count,
                max: config.max_direct_participants,
            });
        }
    }

    let mut newest: HashMap<&str, DateTime<Utc>> = HashMap::new();
    for message in &snapshot.messages {
        let conversation_id = message.conversation_id.as_str();
        if !conversations.contains_key(conversation_id) {
            found.push(ModelError::UnknownConversation {
                kind: RecordKind::Message,
                id: message.id.clone(),
                conversation_id: message.conversation_id.clone(),
            });
            continue;
        }

        // Conversations without any membership rows are not checked for senders
        if let Some(users) = members.get(conversation_id) {
            if !users.contains(message.sender_id.as_str()) {
                found.push(ModelError::SenderNotParticipant {
                    message_id: message.id.clone(),
                    sender_id: message.sender_id.clone(),
                    conversation_id: message.conversation_id.clone(),
                });
            }
        }

        newest
            .entry(conversation_id)
            .and_modify(|at| *at = (*at).max(message.created_at))
            .or_insert(message.created_at);
    }

    if config.check_last_message_at {
        for conversation in &snapshot.conversations {
            if let Some(&latest) = newest.get(conversation.id.as_str()) {
                if conversation.last_message_at < latest {
                    found.push(ModelError::StaleLastMessageAt {
                        conversation_id: conversation.id.clone(),
                        last_message_at: conversation.last_message_at,
                        newest: latest,
                    });
                }
            }
        }
    }

    for violation in &found {
        warn!("Snapshot violation: {}", violation);
    }
    debug!(
        "Validated {} conversations, {} participants, {} messages: {} violations",
        snapshot.conversations.len(),
        snapshot.participants.len(),
        snapshot.messages.len(),
        found.len()
    );

    found
}

fn check_duplicate_ids(snapshot: &Snapshot, found: &mut Vec<ModelError>) {
    let ids = [
        (
            RecordKind::Conversation,
            snapshot.conversations.iter().map(|c| c.id.as_str()).collect::<Vec<_>>(),
        ),
        (
            RecordKind::Participant,
            snapshot.participants.iter().map(|p| p.id.as_str()).collect(),
        ),
        (
            RecordKind::Message,
            snapshot.messages.iter().map(|m| m.id.as_str()).collect(),
        ),
    ];

    for (kind, ids) in ids {
        let mut seen = HashSet::new();
        for id in ids {
            if !seen.insert(id) {
                found.push(ModelError::DuplicateId {
                    kind,
                    id: id.to_string(),
                });
            }
        }
    }
}

fn check_timestamps(snapshot: &Snapshot, found: &mut Vec<ModelError>) {
    let records = snapshot
        .conversations
        .iter()
        .map(|c| (RecordKind::Conversation, &c.id, c.created_at, c.updated_at))
        .chain(
            snapshot
                .participants
                .iter()
                .map(|p| (RecordKind::Participant, &p.id, p.created_at, p.updated_at)),
        )
        .chain(
            snapshot
                .messages
                .iter()
                .map(|m| (RecordKind::Message, &m.id, m.created_at, m.updated_at)),
        );

    for (kind, id, created_at, updated_at) in records {
        if updated_at < created_at {
            found.push(ModelError::UpdatedBeforeCreated {
                kind,
                id: id.clone(),
            });
        }
    }
}
