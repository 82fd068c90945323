//! 用户账号 API 集成测试

use axum::http::StatusCode;
use rbac_admin::models::RoleName;
use serde_json::json;

mod common;
use common::TestApp;

#[tokio::test]
async fn test_created_user_can_receive_roles() {
    let app = TestApp::new();
    let admin = app.create_user(&[RoleName::ADMIN]).await;

    let (status, body) = app
        .post(
            "/api/v1/users",
            admin,
            json!({ "name": "Ines", "email": "ines@example.com" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let id = body["user"]["id"].as_str().unwrap().to_string();

    let editor_role = app.role_id(&RoleName::EDITOR).await;
    let (status, body) = app
        .post(
            &format!("/api/v1/users/{}/roles", id),
            admin,
            json!({ "role_id": editor_role }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["roles"][0]["name"], "editor");

    let (status, body) = app.get("/api/v1/users", admin).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);
}

#[tokio::test]
async fn test_user_validation_errors() {
    let app = TestApp::new();
    let admin = app.create_user(&[RoleName::ADMIN]).await;

    let (status, body) = app
        .post("/api/v1/users", admin, json!({ "name": "", "email": "nope" }))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let fields = body["error"]["fields"].as_array().unwrap();
    assert_eq!(fields.len(), 2);

    let (status, body) = app
        .post(
            "/api/v1/users",
            admin,
            json!({ "name": "Dup", "email": format!("{}@example.com", admin) }),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["fields"][0]["field"], "email");
}

#[tokio::test]
async fn test_user_management_is_strict() {
    let app = TestApp::new();
    let editor = app.create_user(&[RoleName::EDITOR]).await;
    let plain = app.create_user(&[]).await;

    let (status, _) = app.get("/api/v1/users", editor).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .put(
            &format!("/api/v1/users/{}", plain),
            editor,
            json!({ "name": "Changed" }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_only_super_admin_deletes_users() {
    let app = TestApp::new();
    let root = app.create_user(&[RoleName::SUPER_ADMIN]).await;
    let admin = app.create_user(&[RoleName::ADMIN]).await;
    let plain = app.create_user(&[RoleName::EDITOR]).await;

    let (status, _) = app.delete(&format!("/api/v1/users/{}", plain), admin).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.delete(&format!("/api/v1/users/{}", root), root).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app.delete(&format!("/api/v1/users/{}", plain), root).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user_id"], plain.to_string());

    let (status, _) = app.get(&format!("/api/v1/users/{}", plain), root).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // 被删除用户的令牌不再有效
    let (status, _) = app.get("/api/v1/me", plain).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
