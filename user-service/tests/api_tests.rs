mod common;

use auth::Identity;
use chrono::Duration;
use chrono::Utc;
use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;
use serde_json::Value;

fn invalid_token_body() -> Value {
    json!({"success": false, "error": "Invalid or expired token"})
}

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::spawn().await;

    let response = app.register("Alice", "alice@example.com", "secret1").await;

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["message"], "User registered successfully");
    assert_eq!(body["data"]["user"]["name"], "Alice");
    assert_eq!(body["data"]["user"]["email"], "alice@example.com");
    assert!(body["data"]["user"]["id"].is_i64());
    assert!(body["data"]["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::spawn().await;

    app.register("Alice", "alice@example.com", "secret1").await;
    let response = app.register("Alice Two", "alice@example.com", "other-pass").await;

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("already exists"));
}

#[tokio::test]
async fn test_register_same_email_twice_conflicts() {
    let app = TestApp::spawn().await;

    let first = app.register("A", "a@x.com", "secret1").await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app.register("A", "a@x.com", "secret1").await;
    assert_eq!(second.status(), StatusCode::CONFLICT);

    let body: Value = second.json().await.expect("Failed to parse response");
    assert_eq!(
        body,
        json!({"success": false, "error": "User with this email already exists"})
    );
}

#[tokio::test]
async fn test_register_invalid_fields() {
    let app = TestApp::spawn().await;

    for (name, email, password) in [
        ("Alice", "not-an-email", "secret1"),
        ("   ", "alice@example.com", "secret1"),
        ("Alice", "alice@example.com", "short"),
    ] {
        let response = app.register(name, email, password).await;

        assert_eq!(
            response.status(),
            StatusCode::UNPROCESSABLE_ENTITY,
            "{name} / {email} / {password}"
        );
        let body: Value = response.json().await.expect("Failed to parse response");
        assert_eq!(body["success"], false);
        assert!(body["error"].is_string());
    }
}

#[tokio::test]
async fn test_register_unparsable_body() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/users/register")
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::spawn().await;
    app.register("Alice", "alice@example.com", "secret1").await;

    let response = app.login("alice@example.com", "secret1").await;

    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], true);
    assert!(!body["data"]["token"].as_str().unwrap().is_empty());
    assert_eq!(body["data"]["user"]["email"], "alice@example.com");
    assert_eq!(body["data"]["user"]["name"], "Alice");
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::spawn().await;
    app.register("Alice", "alice@example.com", "secret1").await;

    let wrong_password = app.login("alice@example.com", "wrong-password").await;
    let unknown_email = app.login("nobody@example.com", "secret1").await;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);

    let wrong_password: Value = wrong_password.json().await.unwrap();
    let unknown_email: Value = unknown_email.json().await.unwrap();
    assert_eq!(
        wrong_password,
        json!({"success": false, "error": "Invalid email or password"})
    );
    assert_eq!(wrong_password, unknown_email);
}

#[tokio::test]
async fn test_token_identifies_caller() {
    let app = TestApp::spawn().await;
    let (user_id, token) = app
        .register_and_login("Alice", "alice@example.com", "secret1")
        .await;

    let identity = app.token_service.validate(&token).expect("token should validate");
    assert_eq!(identity, Identity::new(user_id, "alice@example.com"));

    let response = app
        .get_authenticated(&format!("/api/users/{user_id}"), &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["id"], user_id);
    assert_eq!(body["data"]["email"], "alice@example.com");
}

#[tokio::test]
async fn test_protected_routes_reject_missing_header() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/users")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.json::<Value>().await.unwrap(), invalid_token_body());
}

#[tokio::test]
async fn test_protected_routes_reject_malformed_header() {
    let app = TestApp::spawn().await;

    for header in ["Foo abc", "Bearer", "Basic YWxpY2U6c2VjcmV0", "Bearer a b"] {
        let response = app
            .get("/api/users")
            .header("authorization", header)
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{header}");
        assert_eq!(response.json::<Value>().await.unwrap(), invalid_token_body());
    }
}

#[tokio::test]
async fn test_protected_routes_reject_bad_tokens() {
    let app = TestApp::spawn().await;
    let (_, token) = app
        .register_and_login("Alice", "alice@example.com", "secret1")
        .await;

    let expired = app
        .token_service
        .issue_at(
            &Identity::new(1, "alice@example.com"),
            Utc::now() - Duration::hours(25),
        )
        .unwrap();

    let mut tampered = token.clone().into_bytes();
    let middle = tampered.len() / 2;
    tampered[middle] = if tampered[middle] == b'A' { b'B' } else { b'A' };
    let tampered = String::from_utf8(tampered).unwrap();

    for bad in [expired.as_str(), tampered.as_str(), "not.a.token"] {
        let response = app
            .get_authenticated("/api/users", bad)
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.json::<Value>().await.unwrap(), invalid_token_body());
    }
}

#[tokio::test]
async fn test_list_users() {
    let app = TestApp::spawn().await;
    let (_, token) = app
        .register_and_login("Alice", "alice@example.com", "secret1")
        .await;
    app.register("Bob", "bob@example.com", "secret2").await;

    let response = app
        .get_authenticated("/api/users", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    let users = body["data"].as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0]["name"], "Alice");
    assert_eq!(users[1]["name"], "Bob");
}

#[tokio::test]
async fn test_get_user_not_found() {
    let app = TestApp::spawn().await;
    let (_, token) = app
        .register_and_login("Alice", "alice@example.com", "secret1")
        .await;

    let response = app
        .get_authenticated("/api/users/999", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"success": false, "error": "User not found"}));
}

#[tokio::test]
async fn test_get_user_invalid_id() {
    let app = TestApp::spawn().await;
    let (_, token) = app
        .register_and_login("Alice", "alice@example.com", "secret1")
        .await;

    let response = app
        .get_authenticated("/api/users/abc", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_user() {
    let app = TestApp::spawn().await;
    let (user_id, token) = app
        .register_and_login("Alice", "alice@example.com", "secret1")
        .await;

    let response = app
        .put_authenticated(&format!("/api/users/{user_id}"), &token)
        .json(&json!({"name": "Alice Smith", "email": "alice.smith@example.com"}))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["id"], user_id);
    assert_eq!(body["data"]["name"], "Alice Smith");
    assert_eq!(body["data"]["email"], "alice.smith@example.com");

    // The new email logs in with the old password.
    let response = app.login("alice.smith@example.com", "secret1").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_update_user_email_taken() {
    let app = TestApp::spawn().await;
    let (user_id, token) = app
        .register_and_login("Alice", "alice@example.com", "secret1")
        .await;
    app.register("Bob", "bob@example.com", "secret2").await;

    let response = app
        .put_authenticated(&format!("/api/users/{user_id}"), &token)
        .json(&json!({"name": "Alice", "email": "bob@example.com"}))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_update_user_invalid_name() {
    let app = TestApp::spawn().await;
    let (user_id, token) = app
        .register_and_login("Alice", "alice@example.com", "secret1")
        .await;

    let response = app
        .put_authenticated(&format!("/api/users/{user_id}"), &token)
        .json(&json!({"name": " ", "email": "alice@example.com"}))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_delete_user() {
    let app = TestApp::spawn().await;
    let (user_id, token) = app
        .register_and_login("Alice", "alice@example.com", "secret1")
        .await;

    let response = app
        .delete_authenticated(&format!("/api/users/{user_id}"), &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(response.bytes().await.unwrap().is_empty());

    let response = app
        .delete_authenticated(&format!("/api/users/{user_id}"), &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Tokens are stateless, so the old token still passes the middleware.
    let response = app
        .get_authenticated(&format!("/api/users/{user_id}"), &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.login("alice@example.com", "secret1").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
