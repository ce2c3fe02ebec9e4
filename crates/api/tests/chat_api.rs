//! Integration tests for chats: creation, membership gating, pagination,
//! read receipts, and unread counts.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, patch_auth, post_json_auth, seed_profile};
use sqlx::PgPool;

async fn create_chat(
    app: axum::Router,
    creator: &common::TestProfile,
    others: &[&str],
) -> i64 {
    let body = serde_json::json!({ "members": others });
    let response = post_json_auth(app, "/api/chats/create-chat", body, &creator.token).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["id"].as_i64().unwrap()
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_chat_unknown_member_404(pool: PgPool) {
    let alice = seed_profile(&pool, "alice", "student").await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "members": ["nobody"] });
    let response = post_json_auth(app, "/api/chats/create-chat", body, &alice.token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await, "Nome de usuário inválido!");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_non_member_cannot_read_or_post(pool: PgPool) {
    let alice = seed_profile(&pool, "alice", "student").await;
    let _bob = seed_profile(&pool, "bob", "student").await;
    let eve = seed_profile(&pool, "eve", "student").await;
    let app = common::build_test_app(pool);

    let chat_id = create_chat(app.clone(), &alice, &["bob"]).await;

    let response = get_auth(
        app.clone(),
        &format!("/api/chats/get-chat-messages/{chat_id}"),
        &eve.token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await, "Você não está na conversa!");

    let body = serde_json::json!({ "content": "hi" });
    let response = post_json_auth(
        app,
        &format!("/api/chats/create-message/{chat_id}"),
        body,
        &eve.token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_message_pagination_window(pool: PgPool) {
    let alice = seed_profile(&pool, "alice", "student").await;
    let _bob = seed_profile(&pool, "bob", "student").await;
    let app = common::build_test_app(pool);

    let chat_id = create_chat(app.clone(), &alice, &["bob"]).await;

    for i in 0..5 {
        let body = serde_json::json!({ "content": format!("message {i}") });
        let response = post_json_auth(
            app.clone(),
            &format!("/api/chats/create-message/{chat_id}"),
            body,
            &alice.token,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    // First page of two: the newest two messages.
    let response = get_auth(
        app.clone(),
        &format!("/api/chats/get-chat-messages/{chat_id}?scroll-index=0&batch-length=2"),
        &alice.token,
    )
    .await;
    let page = body_json(response).await;
    assert_eq!(page.as_array().unwrap().len(), 2);
    assert_eq!(page[0]["content"], "message 4");
    assert_eq!(page[1]["content"], "message 3");

    // Second page.
    let response = get_auth(
        app.clone(),
        &format!("/api/chats/get-chat-messages/{chat_id}?scroll-index=1&batch-length=2"),
        &alice.token,
    )
    .await;
    let page = body_json(response).await;
    assert_eq!(page[0]["content"], "message 2");

    // Past the end: empty.
    let response = get_auth(
        app,
        &format!("/api/chats/get-chat-messages/{chat_id}?scroll-index=9&batch-length=2"),
        &alice.token,
    )
    .await;
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 0);
}

/// Unread counts exclude own messages and drain on visualize.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_unread_counts_and_visualize(pool: PgPool) {
    let alice = seed_profile(&pool, "alice", "student").await;
    let bob = seed_profile(&pool, "bob", "student").await;
    let app = common::build_test_app(pool);

    let chat_id = create_chat(app.clone(), &alice, &["bob"]).await;

    for i in 0..3 {
        let body = serde_json::json!({ "content": format!("from alice {i}") });
        post_json_auth(
            app.clone(),
            &format!("/api/chats/create-message/{chat_id}"),
            body,
            &alice.token,
        )
        .await;
    }

    // Alice sent everything: her unread count is zero.
    let chats = body_json(get_auth(app.clone(), "/api/chats/get-chats-list", &alice.token).await).await;
    assert_eq!(chats[0]["unvisualized_count"], 0);

    // Bob has three unread.
    let chats = body_json(get_auth(app.clone(), "/api/chats/get-chats-list", &bob.token).await).await;
    assert_eq!(chats[0]["unvisualized_count"], 3);

    // Visualize, then the count drains; a second call changes nothing.
    let response = patch_auth(
        app.clone(),
        &format!("/api/chats/visualize-chat-messages/{chat_id}"),
        &bob.token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    patch_auth(
        app.clone(),
        &format!("/api/chats/visualize-chat-messages/{chat_id}"),
        &bob.token,
    )
    .await;

    let chats = body_json(get_auth(app, "/api/chats/get-chats-list", &bob.token).await).await;
    assert_eq!(chats[0]["unvisualized_count"], 0);
}

/// Chats with no messages stay off the list; ordering follows the
/// latest message.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_chat_list_ordering(pool: PgPool) {
    let alice = seed_profile(&pool, "alice", "student").await;
    let _bob = seed_profile(&pool, "bob", "student").await;
    let _carol = seed_profile(&pool, "carol", "student").await;
    let app = common::build_test_app(pool);

    let first_chat = create_chat(app.clone(), &alice, &["bob"]).await;
    let second_chat = create_chat(app.clone(), &alice, &["carol"]).await;

    // Empty chats are hidden.
    let chats = body_json(get_auth(app.clone(), "/api/chats/get-chats-list", &alice.token).await).await;
    assert_eq!(chats.as_array().unwrap().len(), 0);

    let body = serde_json::json!({ "content": "to bob" });
    post_json_auth(
        app.clone(),
        &format!("/api/chats/create-message/{first_chat}"),
        body,
        &alice.token,
    )
    .await;
    let body = serde_json::json!({ "content": "to carol" });
    post_json_auth(
        app.clone(),
        &format!("/api/chats/create-message/{second_chat}"),
        body,
        &alice.token,
    )
    .await;

    // Most recently active first.
    let chats = body_json(get_auth(app, "/api/chats/get-chats-list", &alice.token).await).await;
    let ids: Vec<i64> = chats
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![second_chat, first_chat]);
}
