//! Error types for the chat data model

use chrono::{DateTime, Utc};
use thiserror::Error;

/// A type alias for `Result<T, ModelError>`.
pub type Result<T> = std::result::Result<T, ModelError>;

/// Record kinds, used to say which table a violation was found in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Conversation,
    Participant,
    Message,
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RecordKind::Conversation => "conversation",
            RecordKind::Participant => "participant",
            RecordKind::Message => "message",
        };
        f.write_str(name)
    }
}

/// Errors raised while composing, validating or loading chat records
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Duplicate {kind} id: {id}")]
    DuplicateId { kind: RecordKind, id: String },

    #[error("{kind} {id} references unknown conversation {conversation_id}")]
    UnknownConversation {
        kind: RecordKind,
        id: String,
        conversation_id: String,
    },

    #[error("Participant {participant_id} belongs to conversation {found}, expected {expected}")]
    ConversationMismatch {
        participant_id: String,
        expected: String,
        found: String,
    },

    #[error("User {user_id} joined conversation {conversation_id} more than once")]
    DuplicateParticipant {
        conversation_id: String,
        user_id: String,
    },

    #[error("Direct conversation {conversation_id} has {count} participants (max: {max})")]
    DirectParticipantLimit {
        conversation_id: String,
        count: usize,
        max: usize,
    },

    #[error("Message {message_id} sender {sender_id} is not a participant of {conversation_id}")]
    SenderNotParticipant {
        message_id: String,
        sender_id: String,
        conversation_id: String,
    },

    #[error(
        "Conversation {conversation_id} last_message_at {last_message_at} is older than its newest message ({newest})"
    )]
    StaleLastMessageAt {
        conversation_id: String,
        last_message_at: DateTime<Utc>,
        newest: DateTime<Utc>,
    },

    #[error("{kind} {id} was updated before it was created")]
    UpdatedBeforeCreated { kind: RecordKind, id: String },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
