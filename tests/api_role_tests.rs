//! 角色与权限目录 API 集成测试

use axum::http::StatusCode;
use rbac_admin::models::{PermissionName, RoleName};
use serde_json::json;
use uuid::Uuid;

mod common;
use common::TestApp;

async fn permission_id(app: &TestApp, name: &PermissionName) -> Uuid {
    app.state
        .store
        .read()
        .await
        .find_permission_by_name(name)
        .map(|p| p.id)
        .unwrap()
}

#[tokio::test]
async fn test_super_admin_cannot_modify_system_role() {
    let app = TestApp::new();
    let root = app.create_user(&[RoleName::SUPER_ADMIN]).await;
    let admin_role = app.role_id(&RoleName::ADMIN).await;

    let (status, body) = app
        .put(
            &format!("/api/v1/roles/{}", admin_role),
            root,
            json!({ "name": "admin", "display_name": "Renamed" }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["code"], 403);

    let (status, _) = app.delete(&format!("/api/v1/roles/{}", admin_role), root).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_create_update_delete_role() {
    let app = TestApp::new();
    let root = app.create_user(&[RoleName::SUPER_ADMIN]).await;

    let (status, body) = app
        .post(
            "/api/v1/roles",
            root,
            json!({ "name": "reviewer", "display_name": "Reviewer" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"]["is_system"], false);
    let id = body["role"]["id"].as_str().unwrap().to_string();

    let (status, body) = app
        .put(
            &format!("/api/v1/roles/{}", id),
            root,
            json!({ "name": "reviewer", "display_name": "Content Reviewer" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"]["display_name"], "Content Reviewer");

    let (status, _) = app.delete(&format!("/api/v1/roles/{}", id), root).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.get(&format!("/api/v1/roles/{}", id), root).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_role_validation_errors() {
    let app = TestApp::new();
    let root = app.create_user(&[RoleName::SUPER_ADMIN]).await;

    let (status, body) = app
        .post(
            "/api/v1/roles",
            root,
            json!({ "name": "editor", "display_name": "Duplicate" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["fields"][0]["field"], "name");
    assert_eq!(
        body["error"]["fields"][0]["message"],
        "The name has already been taken."
    );

    let (status, body) = app
        .post(
            "/api/v1/roles",
            root,
            json!({ "name": "Bad Name!", "display_name": "Bad" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["fields"][0]["field"], "name");
}

#[tokio::test]
async fn test_editor_cannot_manage_roles() {
    let app = TestApp::new();
    let editor = app.create_user(&[RoleName::EDITOR]).await;

    let (status, _) = app.get("/api/v1/roles", editor).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .post(
            "/api/v1/roles",
            editor,
            json!({ "name": "mine", "display_name": "Mine" }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_cannot_grant_restricted_permission() {
    let app = TestApp::new();
    let admin = app.create_user(&[RoleName::ADMIN]).await;
    let editor_role = app.role_id(&RoleName::EDITOR).await;
    let manage = permission_id(&app, &PermissionName::CONTENT_MANAGE).await;
    let settings = permission_id(&app, &PermissionName::ADMIN_SETTINGS).await;

    let uri = format!("/api/v1/roles/{}/permissions", editor_role);

    let (status, _) = app
        .put(&uri, admin, json!({ "permission_ids": [manage, settings], "mode": "augment" }))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .put(&uri, admin, json!({ "permission_ids": [manage] }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"]["permissions"], json!(["content.manage"]));
}

#[tokio::test]
async fn test_super_admin_grants_restricted_permission() {
    let app = TestApp::new();
    let root = app.create_user(&[RoleName::SUPER_ADMIN]).await;
    let editor_role = app.role_id(&RoleName::EDITOR).await;
    let settings = permission_id(&app, &PermissionName::ADMIN_SETTINGS).await;

    let (status, body) = app
        .put(
            &format!("/api/v1/roles/{}/permissions", editor_role),
            root,
            json!({ "permission_ids": [settings], "mode": "augment" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let names = body["role"]["permissions"].as_array().unwrap();
    assert!(names.contains(&json!("admin.settings")));
    assert!(names.contains(&json!("content.view")));
}

#[tokio::test]
async fn test_permission_catalogue_crud() {
    let app = TestApp::new();
    let root = app.create_user(&[RoleName::SUPER_ADMIN]).await;
    let admin = app.create_user(&[RoleName::ADMIN]).await;

    // admin 没有 permissions.create（受限）
    let (status, _) = app
        .post(
            "/api/v1/permissions",
            admin,
            json!({ "name": "reports.export", "display_name": "Export reports" }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .post(
            "/api/v1/permissions",
            root,
            json!({ "name": "reports.export", "display_name": "Export reports" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["permission"]["group"], "reports");
    let id = body["permission"]["id"].as_str().unwrap().to_string();

    let (status, body) = app.get("/api/v1/permissions", admin).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["count"].as_u64().unwrap() > 0);

    let (status, _) = app.delete(&format!("/api/v1/permissions/{}", id), root).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.get(&format!("/api/v1/permissions/{}", id), root).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

/// 两个系统角色的权限名称列表
async fn system_grants(app: &TestApp, viewer: Uuid) -> Vec<serde_json::Value> {
    let mut grants = Vec::new();
    for name in [RoleName::SUPER_ADMIN, RoleName::ADMIN] {
        let id = app.role_id(&name).await;
        let (status, body) = app.get(&format!("/api/v1/roles/{}", id), viewer).await;
        assert_eq!(status, StatusCode::OK);
        grants.push(body["permissions"].clone());
    }
    grants
}

#[tokio::test]
async fn test_catalogue_changes_leave_system_roles_intact() {
    let app = TestApp::new();
    let root = app.create_user(&[RoleName::SUPER_ADMIN]).await;
    let admin = app.create_user(&[RoleName::ADMIN]).await;
    let before = system_grants(&app, root).await;

    let assign = permission_id(&app, &PermissionName::ROLES_ASSIGN_PERMISSIONS).await;
    let (status, body) = app
        .delete(&format!("/api/v1/permissions/{}", assign), root)
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["fields"][0]["field"], "id");

    // 先把受限名称挪走，再把已持有的权限改名为受限名称
    let roles_delete = permission_id(&app, &PermissionName::ROLES_DELETE).await;
    let (status, _) = app
        .put(
            &format!("/api/v1/permissions/{}", roles_delete),
            admin,
            json!({ "name": "zz.parked", "display_name": "Parked" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let content_view = permission_id(&app, &PermissionName::parse("content.view").unwrap()).await;
    let (status, body) = app
        .put(
            &format!("/api/v1/permissions/{}", content_view),
            admin,
            json!({ "name": "content.read", "display_name": "Read content" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["fields"][0]["field"], "name");

    let admin_role = app.role_id(&RoleName::ADMIN).await;
    let (status, _) = app
        .put(
            &format!("/api/v1/roles/{}/permissions", admin_role),
            root,
            json!({ "permission_ids": [], "mode": "replace" }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    assert_eq!(system_grants(&app, root).await, before);

    let (_, body) = app.get("/api/v1/me", admin).await;
    let permissions = body["permissions"].as_array().unwrap();
    assert!(!permissions.contains(&json!("roles.delete")));
}

#[tokio::test]
async fn test_permission_held_by_custom_role_cannot_be_deleted() {
    let app = TestApp::new();
    let root = app.create_user(&[RoleName::SUPER_ADMIN]).await;

    let (_, body) = app
        .post(
            "/api/v1/permissions",
            root,
            json!({ "name": "reports.export", "display_name": "Export reports" }),
        )
        .await;
    let id = body["permission"]["id"].as_str().unwrap().to_string();

    let editor_role = app.role_id(&RoleName::EDITOR).await;
    let (status, _) = app
        .put(
            &format!("/api/v1/roles/{}/permissions", editor_role),
            root,
            json!({ "permission_ids": [id], "mode": "augment" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.delete(&format!("/api/v1/permissions/{}", id), root).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body["error"]["fields"][0]["message"],
        "The permission is still assigned to roles: editor."
    );
}
