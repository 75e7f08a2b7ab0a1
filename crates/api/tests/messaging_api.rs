//! HTTP-level integration tests for conversations and messages.
//!
//! Tests cover first-contact conversation creation, pair-conversation reuse,
//! participant scoping, and the notification written for each message.

mod common;

use axum::http::StatusCode;
use common::{auth_user, body_json, get, get_auth, post_json_auth};
use sqlx::PgPool;
use t2t_core::roles::{ROLE_BUYER, ROLE_WASTE_GENERATOR};
use t2t_db::repositories::NotificationRepo;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Send a message to `receiver_id` as the token's user and return the 201
/// JSON view.
async fn send_to_user(
    pool: PgPool,
    token: &str,
    receiver_id: i64,
    content: &str,
) -> serde_json::Value {
    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "receiver_id": receiver_id, "content": content });
    let response = post_json_auth(app, "/api/messaging/messages/send", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Send tests
// ---------------------------------------------------------------------------

/// First contact by receiver_id creates a conversation and notifies the
/// receiver.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_send_message_first_contact(pool: PgPool) {
    let (_alice, alice_token) = auth_user(&pool, "alice", ROLE_WASTE_GENERATOR).await;
    let (bob, _bob_token) = auth_user(&pool, "bob", ROLE_BUYER).await;

    let json = send_to_user(pool.clone(), &alice_token, bob.id, "Is the glass still available?").await;

    assert_eq!(json["sender"], "alice");
    assert_eq!(json["content"], "Is the glass still available?");
    assert_eq!(json["is_read"], false);
    assert!(
        json["conversation_id"].is_number(),
        "response must expose the new conversation's id"
    );

    // The receiver got a medium-priority message notification.
    let notifications = NotificationRepo::list_for_user(&pool, bob.id).await.unwrap();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].kind, "message");
    assert_eq!(notifications[0].priority, "medium");
    assert_eq!(notifications[0].title, "New message from alice");
    assert_eq!(notifications[0].message, "Is the glass still available?");
}

/// A second message between the same pair reuses the conversation, in either
/// direction.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_pair_conversation_reused(pool: PgPool) {
    let (carol, carol_token) = auth_user(&pool, "carol", ROLE_WASTE_GENERATOR).await;
    let (dave, dave_token) = auth_user(&pool, "dave", ROLE_BUYER).await;

    let first = send_to_user(pool.clone(), &carol_token, dave.id, "Morning!").await;
    let reply = send_to_user(pool.clone(), &dave_token, carol.id, "Morning to you").await;
    let second = send_to_user(pool.clone(), &carol_token, dave.id, "Deal?").await;

    assert_eq!(reply["conversation_id"], first["conversation_id"]);
    assert_eq!(second["conversation_id"], first["conversation_id"]);

    // Each party still sees exactly one conversation.
    for token in [&carol_token, &dave_token] {
        let app = common::build_test_app(pool.clone());
        let json = body_json(get_auth(app, "/api/messaging/conversations", token).await).await;
        assert_eq!(json.as_array().unwrap().len(), 1);
    }
}

/// Appending by conversation_id works for a participant.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_send_message_by_conversation_id(pool: PgPool) {
    let (_erin, erin_token) = auth_user(&pool, "erin", ROLE_WASTE_GENERATOR).await;
    let (frank, frank_token) = auth_user(&pool, "frank", ROLE_BUYER).await;

    let first = send_to_user(pool.clone(), &erin_token, frank.id, "Opening message").await;
    let conversation_id = first["conversation_id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "conversation_id": conversation_id, "content": "Follow-up" });
    let response = post_json_auth(app, "/api/messaging/messages/send", body, &frank_token).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["conversation_id"], conversation_id);
    assert_eq!(json["sender"], "frank");
}

/// Sending into a conversation you are not part of behaves as 404.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_send_to_foreign_conversation(pool: PgPool) {
    let (_grace, grace_token) = auth_user(&pool, "grace", ROLE_WASTE_GENERATOR).await;
    let (heidi, _heidi_token) = auth_user(&pool, "heidi", ROLE_BUYER).await;
    let (_intruder, intruder_token) = auth_user(&pool, "intruder", ROLE_BUYER).await;

    let first = send_to_user(pool.clone(), &grace_token, heidi.id, "Private talk").await;
    let conversation_id = first["conversation_id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "conversation_id": conversation_id, "content": "Let me in" });
    let response = post_json_auth(app, "/api/messaging/messages/send", body, &intruder_token).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Messaging yourself is rejected.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_send_to_self(pool: PgPool) {
    let (me, my_token) = auth_user(&pool, "loner", ROLE_BUYER).await;

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "receiver_id": me.id, "content": "Hello me" });
    let response = post_json_auth(app, "/api/messaging/messages/send", body, &my_token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Cannot send a message to yourself");
}

/// Omitting both conversation_id and receiver_id is rejected.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_send_missing_target(pool: PgPool) {
    let (_user, token) = auth_user(&pool, "aimless", ROLE_BUYER).await;

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "content": "To whom?" });
    let response = post_json_auth(app, "/api/messaging/messages/send", body, &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "conversation_id or receiver_id required");
}

/// Whitespace-only content is rejected.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_send_empty_content(pool: PgPool) {
    let (_sender, sender_token) = auth_user(&pool, "mute", ROLE_WASTE_GENERATOR).await;
    let (peer, _peer_token) = auth_user(&pool, "peer", ROLE_BUYER).await;

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "receiver_id": peer.id, "content": "   " });
    let response = post_json_auth(app, "/api/messaging/messages/send", body, &sender_token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Message content must not be empty");
}

/// Messaging an unknown user returns 404.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_send_to_unknown_receiver(pool: PgPool) {
    let (_sender, sender_token) = auth_user(&pool, "searcher", ROLE_BUYER).await;

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "receiver_id": 999999, "content": "Anyone there?" });
    let response = post_json_auth(app, "/api/messaging/messages/send", body, &sender_token).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Conversation listing tests
// ---------------------------------------------------------------------------

/// The conversation list shows participants, the latest message, and orders
/// by most recent activity.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_conversations_list(pool: PgPool) {
    let (_ivy, ivy_token) = auth_user(&pool, "ivy", ROLE_WASTE_GENERATOR).await;
    let (jack, _jack_token) = auth_user(&pool, "jack", ROLE_BUYER).await;
    let (kate, _kate_token) = auth_user(&pool, "kate", ROLE_BUYER).await;

    send_to_user(pool.clone(), &ivy_token, jack.id, "First thread").await;
    send_to_user(pool.clone(), &ivy_token, kate.id, "Second thread").await;
    // More activity in the jack thread moves it back to the top.
    send_to_user(pool.clone(), &ivy_token, jack.id, "Bumping this").await;

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/messaging/conversations", &ivy_token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let conversations = json.as_array().unwrap();
    assert_eq!(conversations.len(), 2);

    // Most recently active first.
    let top = &conversations[0];
    let participants = top["participants"].as_array().unwrap();
    assert!(participants.contains(&serde_json::json!("ivy")));
    assert!(participants.contains(&serde_json::json!("jack")));
    assert_eq!(top["last_message"]["content"], "Bumping this");
    assert_eq!(top["last_message"]["sender"], "ivy");

    assert_eq!(conversations[1]["last_message"]["content"], "Second thread");
}

/// Conversations require authentication.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_conversations_require_auth(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/messaging/conversations").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Message listing tests
// ---------------------------------------------------------------------------

/// Messages come back oldest first for a participant.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_conversation_messages_chronological(pool: PgPool) {
    let (liam, liam_token) = auth_user(&pool, "liam", ROLE_WASTE_GENERATOR).await;
    let (mona, mona_token) = auth_user(&pool, "mona", ROLE_BUYER).await;

    let first = send_to_user(pool.clone(), &liam_token, mona.id, "One").await;
    send_to_user(pool.clone(), &mona_token, liam.id, "Two").await;
    send_to_user(pool.clone(), &liam_token, mona.id, "Three").await;
    let conversation_id = first["conversation_id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let uri = format!("/api/messaging/conversations/{conversation_id}/messages");
    let response = get_auth(app, &uri, &mona_token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let messages = json.as_array().unwrap();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[0]["content"], "One");
    assert_eq!(messages[0]["sender"], "liam");
    assert_eq!(messages[1]["content"], "Two");
    assert_eq!(messages[1]["sender"], "mona");
    assert_eq!(messages[2]["content"], "Three");
}

/// Non-participants get 404, indistinguishable from a missing conversation.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_conversation_messages_non_participant(pool: PgPool) {
    let (_nora, nora_token) = auth_user(&pool, "nora", ROLE_WASTE_GENERATOR).await;
    let (omar, _omar_token) = auth_user(&pool, "omar", ROLE_BUYER).await;
    let (_peek, peek_token) = auth_user(&pool, "peek", ROLE_BUYER).await;

    let first = send_to_user(pool.clone(), &nora_token, omar.id, "Confidential").await;
    let conversation_id = first["conversation_id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let uri = format!("/api/messaging/conversations/{conversation_id}/messages");
    let response = get_auth(app, &uri, &peek_token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Same status for a conversation that does not exist at all.
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/messaging/conversations/999999/messages", &peek_token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Long message content is truncated in the notification preview.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_notification_preview_truncated(pool: PgPool) {
    let (_quin, quin_token) = auth_user(&pool, "quin", ROLE_WASTE_GENERATOR).await;
    let (rose, _rose_token) = auth_user(&pool, "rose", ROLE_BUYER).await;

    let long_content = "x".repeat(250);
    send_to_user(pool.clone(), &quin_token, rose.id, &long_content).await;

    let notifications = NotificationRepo::list_for_user(&pool, rose.id).await.unwrap();
    assert_eq!(notifications.len(), 1);
    assert_eq!(
        notifications[0].message.chars().count(),
        100,
        "notification preview should cap at 100 characters"
    );
}
