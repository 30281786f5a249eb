mod common;

use auth::Claims;
use auth::JwtHandler;
use auth::TokenType;
use common::TestApp;
use common::JWT_SECRET;
use inventory_service::domain::cache::CacheKey;
use inventory_service::domain::item::models::Item;
use inventory_service::domain::item::models::ItemDescription;
use inventory_service::domain::item::models::ItemId;
use inventory_service::domain::item::models::ItemName;
use reqwest::StatusCode;
use serde_json::json;

async fn create_item(app: &TestApp, token: &str, name: &str, description: &str) -> i64 {
    let response = app
        .post_authenticated("/items", token)
        .json(&json!({ "name": name, "description": description }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    body["id"].as_i64().expect("id missing")
}

#[tokio::test]
async fn test_signup_success() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/signup")
        .json(&json!({ "username": "testuser", "password": "testpassword" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["username"], "testuser");
    assert_eq!(body["message"], "User created successfully");
    assert!(body["id"].is_i64());
    assert!(body.get("password").is_none());
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_signup_duplicate_username() {
    let app = TestApp::spawn().await;

    app.post("/signup")
        .json(&json!({ "username": "testuser", "password": "testpassword" }))
        .send()
        .await
        .expect("Failed to execute request");

    let response = app
        .post("/signup")
        .json(&json!({ "username": "testuser", "password": "otherpassword" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("already exists"));
}

#[tokio::test]
async fn test_signup_missing_fields() {
    let app = TestApp::spawn().await;

    for payload in [
        json!({ "password": "testpassword" }),
        json!({ "username": "testuser" }),
        json!({ "username": "", "password": "testpassword" }),
        json!({ "username": "testuser", "password": "" }),
    ] {
        let response = app
            .post("/signup")
            .json(&payload)
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", payload);
    }
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::spawn().await;

    let tokens = app.signup_and_login("testuser", "testpassword").await;

    assert!(tokens["access_token"].is_string());
    assert!(tokens["refresh_token"].is_string());
    assert_ne!(tokens["access_token"], tokens["refresh_token"]);
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    let app = TestApp::spawn().await;
    app.signup_and_login("testuser", "testpassword").await;

    let wrong_password = app
        .post("/login")
        .json(&json!({ "username": "testuser", "password": "wrongpassword" }))
        .send()
        .await
        .expect("Failed to execute request");
    let unknown_user = app
        .post("/login")
        .json(&json!({ "username": "nobody", "password": "testpassword" }))
        .send()
        .await
        .expect("Failed to execute request");
    let missing_fields = app
        .post("/login")
        .json(&json!({}))
        .send()
        .await
        .expect("Failed to execute request");

    for response in [wrong_password, unknown_user, missing_fields] {
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        assert_eq!(body["message"], "Invalid credentials");
    }
}

#[tokio::test]
async fn test_items_require_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/items")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .get_authenticated("/items", "not-a-jwt")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_refresh_token_is_not_an_access_token() {
    let app = TestApp::spawn().await;
    let tokens = app.signup_and_login("testuser", "testpassword").await;

    let response = app
        .get_authenticated("/items", tokens["refresh_token"].as_str().unwrap())
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_access_token_rejected() {
    let app = TestApp::spawn().await;
    app.signup_and_login("testuser", "testpassword").await;

    let claims = Claims::for_user(
        1,
        "testuser",
        TokenType::Access,
        chrono::Duration::seconds(-60),
    );
    let token = JwtHandler::new(JWT_SECRET).encode(&claims).unwrap();

    let response = app
        .get_authenticated("/items", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_access_token() {
    let app = TestApp::spawn().await;
    let tokens = app.signup_and_login("testuser", "testpassword").await;

    let response = app
        .post("/token/refresh")
        .json(&json!({ "refresh_token": tokens["refresh_token"] }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    let access_token = body["access_token"].as_str().unwrap();

    let response = app
        .get_authenticated("/items", access_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    // An access token cannot be used to refresh
    let response = app
        .post("/token/refresh")
        .json(&json!({ "refresh_token": tokens["access_token"] }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_item_lifecycle() {
    let app = TestApp::spawn().await;
    let token = app.access_token().await;

    let item_id = create_item(&app, &token, "Test Item", "Test Description").await;
    let path = format!("/items/{}", item_id);

    let response = app
        .get_authenticated(&path, &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(
        body,
        json!({ "id": item_id, "name": "Test Item", "description": "Test Description" })
    );

    let response = app
        .put_authenticated(&path, &token)
        .json(&json!({ "name": "Updated Test Item", "description": "Updated Description" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["name"], "Updated Test Item");
    assert_eq!(body["description"], "Updated Description");

    let response = app
        .get_authenticated(&path, &token)
        .send()
        .await
        .expect("Failed to execute request");
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["name"], "Updated Test Item");

    let response = app
        .delete_authenticated(&path, &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .get_authenticated(&path, &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_reflects_writes() {
    let app = TestApp::spawn().await;
    let token = app.access_token().await;

    let first = create_item(&app, &token, "First", "One").await;

    // Populate the listing entry
    let response = app
        .get_authenticated("/items", &token)
        .send()
        .await
        .expect("Failed to execute request");
    let body: Vec<serde_json::Value> = response.json().await.expect("Failed to parse response");
    assert_eq!(body.len(), 1);
    assert!(app.cache_store.contains(&CacheKey::AllItems));

    let second = create_item(&app, &token, "Second", "Two").await;
    assert!(!app.cache_store.contains(&CacheKey::AllItems));

    app.put_authenticated(&format!("/items/{}", first), &token)
        .json(&json!({ "name": "First renamed", "description": "One" }))
        .send()
        .await
        .expect("Failed to execute request");

    let response = app
        .get_authenticated("/items", &token)
        .send()
        .await
        .expect("Failed to execute request");
    let body: Vec<serde_json::Value> = response.json().await.expect("Failed to parse response");
    assert_eq!(
        body,
        vec![
            json!({ "id": first, "name": "First renamed", "description": "One" }),
            json!({ "id": second, "name": "Second", "description": "Two" }),
        ]
    );

    app.delete_authenticated(&format!("/items/{}", second), &token)
        .send()
        .await
        .expect("Failed to execute request");

    let response = app
        .get_authenticated("/items", &token)
        .send()
        .await
        .expect("Failed to execute request");
    let body: Vec<serde_json::Value> = response.json().await.expect("Failed to parse response");
    assert_eq!(body.len(), 1);
    assert_eq!(body[0]["id"], first);
}

#[tokio::test]
async fn test_get_item_served_from_cache() {
    let app = TestApp::spawn().await;
    let token = app.access_token().await;

    let item_id = create_item(&app, &token, "Cached", "Original").await;
    assert!(app.cache_store.contains(&CacheKey::Item(ItemId(item_id))));

    // A write that bypasses the service is invisible until the entry goes away
    app.item_repository.overwrite(Item {
        id: ItemId(item_id),
        name: ItemName::new("Cached".to_string()).unwrap(),
        description: ItemDescription::new("Changed behind the cache".to_string()).unwrap(),
    });

    let response = app
        .get_authenticated(&format!("/items/{}", item_id), &token)
        .send()
        .await
        .expect("Failed to execute request");
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["description"], "Original");
}

#[tokio::test]
async fn test_create_item_validation() {
    let app = TestApp::spawn().await;
    let token = app.access_token().await;

    for payload in [
        json!({ "description": "No name" }),
        json!({ "name": "No description" }),
        json!({ "name": "   ", "description": "Blank name" }),
        json!({ "name": "x".repeat(256), "description": "Too long" }),
    ] {
        let response = app
            .post_authenticated("/items", &token)
            .json(&payload)
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", payload);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        assert!(body["message"].is_string());
    }

    let response = app
        .get_authenticated("/items", &token)
        .send()
        .await
        .expect("Failed to execute request");
    let body: Vec<serde_json::Value> = response.json().await.expect("Failed to parse response");
    assert!(body.is_empty());
}

#[tokio::test]
async fn test_unknown_item_not_found() {
    let app = TestApp::spawn().await;
    let token = app.access_token().await;

    let response = app
        .get_authenticated("/items/999", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .put_authenticated("/items/999", &token)
        .json(&json!({ "name": "Ghost", "description": "Never created" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .delete_authenticated("/items/999", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .get_authenticated("/items/not-a-number", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

async fn assert_json_bad_request(response: reqwest::Response) -> serde_json::Value {
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("application/json"), "{}", content_type);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["message"].is_string());
    body
}

#[tokio::test]
async fn test_wrong_typed_field_is_bad_request() {
    let app = TestApp::spawn().await;
    let token = app.access_token().await;

    let response = app
        .post_authenticated("/items", &token)
        .json(&json!({ "name": 5, "description": "x" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_json_bad_request(response).await;

    let item_id = create_item(&app, &token, "Test Item", "Test Description").await;
    let response = app
        .put_authenticated(&format!("/items/{}", item_id), &token)
        .json(&json!({ "name": "Test Item", "description": ["x"] }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_json_bad_request(response).await;

    let response = app
        .post("/signup")
        .json(&json!({ "username": "testuser2", "password": 1234 }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_json_bad_request(response).await;
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = TestApp::spawn().await;
    let token = app.access_token().await;

    let response = app
        .post_authenticated("/items", &token)
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .body(r#"{"name": "Test Item", "description": "#)
        .send()
        .await
        .expect("Failed to execute request");
    assert_json_bad_request(response).await;

    let response = app
        .post("/token/refresh")
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .body("not json")
        .send()
        .await
        .expect("Failed to execute request");
    assert_json_bad_request(response).await;
}

#[tokio::test]
async fn test_missing_content_type_is_bad_request() {
    let app = TestApp::spawn().await;
    let token = app.access_token().await;

    let response = app
        .post_authenticated("/items", &token)
        .body(r#"{"name": "Test Item", "description": "Test Description"}"#)
        .send()
        .await
        .expect("Failed to execute request");
    assert_json_bad_request(response).await;
}

#[tokio::test]
async fn test_unreadable_login_body_is_invalid_credentials() {
    let app = TestApp::spawn().await;
    app.signup_and_login("testuser", "testpassword").await;

    let form_body = app
        .post("/login")
        .header(
            reqwest::header::CONTENT_TYPE,
            "application/x-www-form-urlencoded",
        )
        .body("username=testuser&password=testpassword")
        .send()
        .await
        .expect("Failed to execute request");
    let wrong_types = app
        .post("/login")
        .json(&json!({ "username": "testuser", "password": 42 }))
        .send()
        .await
        .expect("Failed to execute request");

    for response in [form_body, wrong_types] {
        let body = assert_json_bad_request(response).await;
        assert_eq!(body["message"], "Invalid credentials");
    }
}
