mod common;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use common::TestApp;
use common::PUBLIC_PEM;
use common::TOKEN_LIFETIME;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_register_user_success() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/user/nicola")
        .json(&json!({ "password": "pass_word!" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);
    assert!(response.text().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let app = TestApp::spawn().await;
    app.register("nicola", "pass_word!").await;

    let response = app
        .post("/user/nicola")
        .json(&json!({ "password": "another" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_register_reserved_matches_taken_response() {
    let app = TestApp::spawn().await;
    app.register("nicola", "pass_word!").await;

    let taken = app
        .post("/user/nicola")
        .json(&json!({ "password": "x" }))
        .send()
        .await
        .expect("Failed to execute request");
    let reserved = app
        .post("/user/ADMIN")
        .json(&json!({ "password": "x" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(taken.status(), StatusCode::CONFLICT);
    assert_eq!(reserved.status(), StatusCode::CONFLICT);

    let body: serde_json::Value = reserved.json().await.unwrap();
    assert_eq!(body["status_code"], 409);
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .contains("unavailable"));
}

#[tokio::test]
async fn test_register_malformed_username() {
    let app = TestApp::spawn().await;

    for name in ["-abc", "ab*cd", "abc_"] {
        let response = app
            .post(&format!("/user/{}", name))
            .json(&json!({ "password": "pass_word" }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{name}");
    }
}

#[tokio::test]
async fn test_issue_token_success() {
    let app = TestApp::spawn().await;
    app.register("nicola", "pass_word!").await;

    let before = Utc::now();
    let response = app
        .post("/user/nicola/token")
        .json(&json!({ "password": "pass_word!" }))
        .send()
        .await
        .expect("Failed to execute request");
    let after = Utc::now();

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["maxAge"], TOKEN_LIFETIME);

    let expires_at: DateTime<Utc> = body["expiresAt"].as_str().unwrap().parse().unwrap();
    let issued_at = expires_at - Duration::seconds(TOKEN_LIFETIME);
    assert!(before <= issued_at && issued_at <= after);

    let claims = app
        .token_verifier
        .verify(body["token"].as_str().unwrap())
        .expect("Token should verify with the public key");
    assert_eq!(claims.sub, "nicola");
}

#[tokio::test]
async fn test_issue_token_failures_are_indistinguishable() {
    let app = TestApp::spawn().await;
    app.register("nicola", "pass_word!").await;

    let wrong_password = app
        .post("/user/nicola/token")
        .json(&json!({ "password": "wrong" }))
        .send()
        .await
        .expect("Failed to execute request");
    let unknown_user = app
        .post("/user/nobody/token")
        .json(&json!({ "password": "wrong" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(wrong_password.status(), StatusCode::NOT_FOUND);
    assert_eq!(unknown_user.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        wrong_password.text().await.unwrap(),
        unknown_user.text().await.unwrap()
    );
}

#[tokio::test]
async fn test_change_password_success() {
    let app = TestApp::spawn().await;
    app.register("nicola", "old-password").await;

    let response = app
        .put("/user/nicola/password")
        .json(&json!({ "password": "old-password", "newPassword": "new-password" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let old = app
        .post("/user/nicola/token")
        .json(&json!({ "password": "old-password" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(old.status(), StatusCode::NOT_FOUND);

    let new = app
        .post("/user/nicola/token")
        .json(&json!({ "password": "new-password" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(new.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_change_password_wrong_password_keeps_old() {
    let app = TestApp::spawn().await;
    app.register("nicola", "old-password").await;

    let response = app
        .put("/user/nicola/password")
        .json(&json!({ "password": "guess", "newPassword": "new-password" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let old = app
        .post("/user/nicola/token")
        .json(&json!({ "password": "old-password" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(old.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_change_password_unknown_user() {
    let app = TestApp::spawn().await;

    let response = app
        .put("/user/ghost/password")
        .json(&json!({ "password": "a", "newPassword": "b" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_token_survives_password_change() {
    let app = TestApp::spawn().await;
    app.register("nicola", "old-password").await;

    let body: serde_json::Value = app
        .post("/user/nicola/token")
        .json(&json!({ "password": "old-password" }))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .unwrap();

    app.put("/user/nicola/password")
        .json(&json!({ "password": "old-password", "newPassword": "new-password" }))
        .send()
        .await
        .expect("Failed to execute request");

    // No revocation: the earlier token still verifies
    assert!(app
        .token_verifier
        .verify(body["token"].as_str().unwrap())
        .is_ok());
}

#[tokio::test]
async fn test_get_public_key() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/publickey")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["publicKey"], PUBLIC_PEM);
}

#[tokio::test]
async fn test_missing_password_field_is_rejected() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/user/nicola")
        .json(&json!({}))
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_client_error());

    // Nothing was registered
    let retry = app
        .post("/user/nicola")
        .json(&json!({ "password": "pw" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(retry.status(), StatusCode::CREATED);
}
