// Copyright 2024 Gigi Team.
//
// Tests for snapshot integrity checks

use chrono::{DateTime, Duration, TimeZone, Utc};
use gigi_chat_model::{
    validation, Conversation, ConversationParticipant, Message, ModelConfig, ModelError,
    RecordKind, Snapshot,
};

fn base() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

fn conversation(id: &str, is_group: bool) -> Conversation {
    Conversation {
        id: id.to_string(),
        name: None,
        is_group,
        last_message_at: base() + Duration::hours(1),
        created_at: base(),
        updated_at: base(),
    }
}

fn participant(id: &str, conversation_id: &str, user_id: &str) -> ConversationParticipant {
    ConversationParticipant {
        id: id.to_string(),
        conversation_id: conversation_id.to_string(),
        user_id: user_id.to_string(),
        is_admin: false,
        created_at: base(),
        updated_at: base(),
    }
}

fn message(id: &str, conversation_id: &str, sender_id: &str, minutes: i64) -> Message {
    Message {
        id: id.to_string(),
        conversation_id: conversation_id.to_string(),
        sender_id: sender_id.to_string(),
        content: format!("message {}", id),
        created_at: base() + Duration::minutes(minutes),
        updated_at: base() + Duration::minutes(minutes),
        is_read: false,
    }
}

fn valid_snapshot() -> Snapshot {
    Snapshot {
        conversations: vec![conversation("c1", false), conversation("g1", true)],
        participants: vec![
            participant("p1", "c1", "alice"),
            participant("p2", "c1", "bob"),
            participant("p3", "g1", "alice"),
            participant("p4", "g1", "bob"),
            participant("p5", "g1", "carol"),
        ],
        messages: vec![
            message("m1", "c1", "alice", 5),
            message("m2", "c1", "bob", 10),
            message("m3", "g1", "carol", 20),
        ],
    }
}

#[test]
fn test_valid_snapshot_passes() {
    let snapshot = valid_snapshot();
    let config = ModelConfig::default();

    assert!(validation::violations(&snapshot, &config).is_empty());
    validation::validate(&snapshot, &config).expect("Snapshot should be valid");
}

#[test]
fn test_message_with_unknown_conversation() {
    let mut snapshot = valid_snapshot();
    snapshot.messages.push(message("m9", "nope", "alice", 30));

    let err = validation::validate(&snapshot, &ModelConfig::default()).unwrap_err();
    match err {
        ModelError::UnknownConversation {
            kind,
            id,
            conversation_id,
        } => {
            assert_eq!(kind, RecordKind::Message);
            assert_eq!(id, "m9");
            assert_eq!(conversation_id, "nope");
        }
        other => panic!("Expected UnknownConversation, got {:?}", other),
    }
}

#[test]
fn test_participant_with_unknown_conversation() {
    let mut snapshot = valid_snapshot();
    snapshot.participants.push(participant("p9", "nope", "dave"));

    let found = validation::violations(&snapshot, &ModelConfig::default());
    assert_eq!(found.len(), 1);
    assert!(matches!(
        found[0],
        ModelError::UnknownConversation {
            kind: RecordKind::Participant,
            ..
        }
    ));
}

#[test]
fn test_direct_conversation_participant_limit() {
    let mut snapshot = valid_snapshot();
    snapshot.participants.push(participant("p6", "c1", "carol"));

    let found = validation::violations(&snapshot, &ModelConfig::default());
    assert!(found.iter().any(|e| matches!(
        e,
        ModelError::DirectParticipantLimit { count: 3, max: 2, .. }
    )));

    // Same user twice does not count as a third member
    let mut snapshot = valid_snapshot();
    snapshot.participants.push(participant("p6", "c1", "bob"));
    let found = validation::violations(&snapshot, &ModelConfig::default());
    assert_eq!(found.len(), 1);
    assert!(matches!(found[0], ModelError::DuplicateParticipant { .. }));
}

#[test]
fn test_group_conversation_has_no_limit() {
    let mut snapshot = valid_snapshot();
    for i in 0..10 {
        snapshot
            .participants
            .push(participant(&format!("gp{}", i), "g1", &format!("user{}", i)));
    }

    assert!(validation::violations(&snapshot, &ModelConfig::default()).is_empty());
}

#[test]
fn test_configurable_direct_limit() {
    let mut snapshot = valid_snapshot();
    snapshot.participants.push(participant("p6", "c1", "carol"));

    let config = ModelConfig {
        max_direct_participants: 3,
        ..Default::default()
    };
    assert!(validation::violations(&snapshot, &config).is_empty());
}

#[test]
fn test_stale_last_message_at() {
    let mut snapshot = valid_snapshot();
    snapshot.messages.push(message("m4", "c1", "bob", 120));

    let found = validation::violations(&snapshot, &ModelConfig::default());
    assert_eq!(found.len(), 1);
    match &found[0] {
        ModelError::StaleLastMessageAt {
            conversation_id,
            newest,
            ..
        } => {
            assert_eq!(conversation_id, "c1");
            assert_eq!(*newest, base() + Duration::minutes(120));
        }
        other => panic!("Expected StaleLastMessageAt, got {:?}", other),
    }

    // Recording the activity fixes it
    let touched = snapshot.conversations[0].with_activity(base() + Duration::minutes(120));
    snapshot.conversations[0] = touched;
    assert!(validation::violations(&snapshot, &ModelConfig::default()).is_empty());

    let relaxed = ModelConfig {
        check_last_message_at: false,
        ..Default::default()
    };
    snapshot.messages.push(message("m5", "c1", "bob", 500));
    assert!(validation::violations(&snapshot, &relaxed).is_empty());
}

#[test]
fn test_sender_must_be_participant() {
    let mut snapshot = valid_snapshot();
    snapshot.messages.push(message("m4", "c1", "mallory", 15));

    let found = validation::violations(&snapshot, &ModelConfig::default());
    assert_eq!(found.len(), 1);
    assert!(matches!(found[0], ModelError::SenderNotParticipant { .. }));

    // Conversations with no membership rows are not checked
    let mut snapshot = valid_snapshot();
    snapshot.conversations.push(conversation("c2", false));
    snapshot.messages.push(message("m5", "c2", "mallory", 15));
    assert!(validation::violations(&snapshot, &ModelConfig::default()).is_empty());
}

#[test]
fn test_duplicate_ids() {
    let mut snapshot = valid_snapshot();
    snapshot.messages.push(message("m1", "c1", "alice", 6));

    let found = validation::violations(&snapshot, &ModelConfig::default());
    assert_eq!(found.len(), 1);
    match &found[0] {
        ModelError::DuplicateId { kind, id } => {
            assert_eq!(*kind, RecordKind::Message);
            assert_eq!(id, "m1");
        }
        other => panic!("Expected DuplicateId, got {:?}", other),
    }
}

#[test]
fn test_updated_before_created() {
    let mut snapshot = valid_snapshot();
    snapshot.participants[0].updated_at = base() - Duration::seconds(1);

    let found = validation::violations(&snapshot, &ModelConfig::default());
    assert_eq!(found.len(), 1);
    assert_eq!(
        found[0].to_string(),
        "participant p1 was updated before it was created"
    );

    let relaxed = ModelConfig {
        check_timestamps: false,
        ..Default::default()
    };
    assert!(validation::violations(&snapshot, &relaxed).is_empty());
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = ModelConfig {
        max_direct_participants: 1,
        ..Default::default()
    };

    assert!(config.validate().is_err());
    let err = validation::validate(&valid_snapshot(), &config).unwrap_err();
    assert!(matches!(err, ModelError::InvalidConfig(_)));
}

#[test]
fn test_config_from_partial_json() {
    let config: ModelConfig = serde_json::from_str(r#"{"max_direct_participants": 4}"#).unwrap();

    assert_eq!(config.max_direct_participants, 4);
    assert!(config.check_last_message_at);
    assert!(config.check_timestamps);
}
