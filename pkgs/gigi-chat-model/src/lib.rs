//! Gigi Chat Model - conversation, participant and message records
//!
//! This crate defines the records exchanged with the chat backend and the
//! few operations that only make sense across them: joining conversations
//! with their participants, ordering a chat list, and checking that a set of
//! records is internally consistent.
//!
//! # Records
//!
//! - **Conversation**: a direct or group chat, sorted by `last_message_at`
//! - **ConversationParticipant**: a user's membership in a conversation
//! - **Message**: one timestamped text message in a conversation
//! - **ConversationWithParticipants**: a conversation joined with its members
//!
//! All ids are opaque strings assigned by the backend. Timestamps are UTC and
//! serialize as RFC 3339.
//!
//! # Example Usage
//!
//! ```rust
//! use gigi_chat_model::{
//!     validation, Conversation, ConversationParticipant, Message, ModelConfig, Snapshot,
//! };
//!
//! let conv = Conversation::direct();
//! let alice = ConversationParticipant::new(&conv.id, "alice", false);
//! let bob = ConversationParticipant::new(&conv.id, "bob", false);
//! let hello = Message::new(&conv.id, "alice", "Hello!");
//! let conv = conv.with_activity(hello.created_at);
//!
//! let snapshot = Snapshot {
//!     conversations: vec![conv],
//!     participants: vec![alice, bob],
//!     messages: vec![hello],
//! };
//! validation::validate(&snapshot, &ModelConfig::default())?;
//!
//! let chats = snapshot.summaries("bob", 40);
//! assert_eq!(chats[0].unread_count, 1);
//! # Ok::<(), gigi_chat_model::ModelError>(())
//! ```

pub mod composite;
pub mod conversation;
pub mod error;
pub mod message;
pub mod participant;
pub mod snapshot;
pub mod validation;

pub use composite::{compose_all, ConversationWithParticipants};
pub use conversation::{sort_by_recent_activity, Conversation};
pub use error::{ModelError, RecordKind, Result};
pub use message::Message;
pub use participant::ConversationParticipant;
pub use snapshot::{ConversationSummary, Snapshot};

use serde::{Deserialize, Serialize};

/// Configuration for snapshot validation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ModelConfig {
    /// Maximum distinct users in a non-group conversation (default: 2)
    pub max_direct_participants: usize,

    /// Reject conversations whose `last_message_at` trails their newest message (default: true)
    pub check_last_message_at: bool,

    /// Reject records with `updated_at` before `created_at` (default: true)
    pub check_timestamps: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            max_direct_participants: 2,
            check_last_message_at: true,
            check_timestamps: true,
        }
    }
}

impl ModelConfig {
    /// A direct chat needs room for at least the two ends
    const MIN_DIRECT_PARTICIPANTS: usize = 2;

    pub fn validate(&self) -> Result<()> {
        if self.max_direct_participants < Self::MIN_DIRECT_PARTICIPANTS {
            return Err(ModelError::InvalidConfig(format!(
                "max_direct_participants too small: {} (min: {})",
                self.max_direct_participants,
                Self::MIN_DIRECT_PARTICIPANTS
            )));
        }
        Ok(())
    }
}
