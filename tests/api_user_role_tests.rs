//! 用户角色分配 API 集成测试

use axum::http::StatusCode;
use rbac_admin::models::RoleName;
use serde_json::json;
use uuid::Uuid;

mod common;
use common::TestApp;

#[tokio::test]
async fn test_user_can_view_own_roles() {
    let app = TestApp::new();
    let editor = app.create_user(&[RoleName::EDITOR]).await;
    let other = app.create_user(&[]).await;

    let (status, body) = app.get(&format!("/api/v1/users/{}/roles", editor), editor).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["roles"][0]["name"], "editor");

    let (status, _) = app.get(&format!("/api/v1/users/{}/roles", other), editor).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_manages_ordinary_users_only() {
    let app = TestApp::new();
    let admin = app.create_user(&[RoleName::ADMIN]).await;
    let peer = app.create_user(&[RoleName::ADMIN]).await;
    let plain = app.create_user(&[]).await;
    let editor = app.role_id(&RoleName::EDITOR).await;

    let (status, body) = app
        .post(&format!("/api/v1/users/{}/roles", plain), admin, json!({ "role_id": editor }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["roles"].as_array().unwrap().len(), 1);

    let (status, _) = app
        .post(&format!("/api/v1/users/{}/roles", peer), admin, json!({ "role_id": editor }))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_super_admin_removal_rules() {
    let app = TestApp::new();
    let root = app.create_user(&[RoleName::SUPER_ADMIN]).await;
    let other = app.create_user(&[RoleName::SUPER_ADMIN]).await;
    let super_admin = app.role_id(&RoleName::SUPER_ADMIN).await;

    let (status, _) = app
        .delete(&format!("/api/v1/users/{}/roles/{}", other, super_admin), root)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .delete(&format!("/api/v1/users/{}/roles/{}", root, super_admin), root)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["roles"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_sync_roles_replaces_set() {
    let app = TestApp::new();
    let root = app.create_user(&[RoleName::SUPER_ADMIN]).await;
    let target = app.create_user(&[RoleName::EDITOR]).await;
    let admin = app.role_id(&RoleName::ADMIN).await;

    let (status, body) = app
        .put(
            &format!("/api/v1/users/{}/roles", target),
            root,
            json!({ "role_ids": [admin] }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<_> = body["roles"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].clone())
        .collect();
    assert_eq!(names, vec![json!("admin")]);
}

#[tokio::test]
async fn test_unknown_user_or_role_is_not_found() {
    let app = TestApp::new();
    let root = app.create_user(&[RoleName::SUPER_ADMIN]).await;
    let target = app.create_user(&[]).await;

    let (status, _) = app
        .get(&format!("/api/v1/users/{}/roles", Uuid::new_v4()), root)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .post(
            &format!("/api/v1/users/{}/roles", target),
            root,
            json!({ "role_id": Uuid::new_v4() }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
