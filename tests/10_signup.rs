mod common;

use anyhow::Result;
use axum::http::StatusCode;
use common::{body_json, TestApp};
use flashcards_api::store::{DocumentStore, USERS};
use serde_json::json;

#[tokio::test]
async fn signup_creates_empty_profile() -> Result<()> {
    let app = TestApp::new();

    let resp = app
        .send_json(
            "POST",
            "/hooks/signup",
            &json!({ "uid": "user-1", "email": "user1@example.com" }),
            None,
        )
        .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_json(resp).await;
    assert_eq!(body["success"], true);

    let profile = app.profile("user-1").await;
    assert_eq!(profile["email"], "user1@example.com");
    assert_eq!(profile["createdFlashcards"], json!([]));
    Ok(())
}

#[tokio::test]
async fn signup_overwrites_existing_profile() -> Result<()> {
    let app = TestApp::new();
    app.signup("user-1", "old@example.com").await;

    // Simulate an already-used profile
    app.store
        .array_union(USERS, "user-1", "createdFlashcards", &json!({ "flashcardId": "f1" }))
        .await?;

    app.signup("user-1", "new@example.com").await;

    let profile = app.profile("user-1").await;
    assert_eq!(profile["email"], "new@example.com");
    assert_eq!(profile["createdFlashcards"], json!([]));
    Ok(())
}

#[tokio::test]
async fn signup_rejects_malformed_event() -> Result<()> {
    let app = TestApp::new();

    let resp = app
        .send_json("POST", "/hooks/signup", &json!({ "uid": "user-1" }), None)
        .await;
    assert!(
        resp.status().is_client_error(),
        "expected client error, got {}",
        resp.status()
    );
    Ok(())
}
