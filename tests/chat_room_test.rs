//! Tests for chat room membership decoding, which backs both the REST
//! membership checks and the WebSocket handshake.
//!
//! Run with: `cargo test --test chat_room_test`
use chrono::Utc;
use uuid::Uuid;

use lexmarket_backend::models::chat_rooms::{self, members_to_json};

fn room(members: &[Uuid]) -> chat_rooms::Model {
    chat_rooms::Model {
        id: Uuid::new_v4(),
        name: "case-discussion".to_string(),
        creator_id: members.first().copied().unwrap_or_else(Uuid::new_v4),
        member_ids: members_to_json(members),
        last_message: None,
        last_message_at: None,
        created_at: Utc::now(),
    }
}

#[test]
fn test_member_list_round_trips() {
    let members = vec![Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4()];
    let room = room(&members);

    assert_eq!(room.member_list(), members);
    for id in &members {
        assert!(room.is_member(*id));
    }
    assert!(!room.is_member(Uuid::new_v4()));
}

#[test]
fn test_malformed_entries_are_skipped() {
    let good = Uuid::new_v4();
    let mut room = room(&[good]);
    room.member_ids = serde_json::json!([good.to_string(), "not-a-uuid", 42, null]);

    assert_eq!(room.member_list(), vec![good]);
    assert!(room.is_member(good));
}

#[test]
fn test_non_array_membership_is_empty() {
    let mut room = room(&[]);
    room.member_ids = serde_json::json!({"oops": true});

    assert!(room.member_list().is_empty());
    assert!(!room.is_member(Uuid::new_v4()));
}
