//! 权限目录的 HTTP 处理器

use crate::{
    auth::middleware::AuthContext, error::AppError, middleware::AppState,
    models::permission::PermissionRequest,
};
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

pub async fn list_permissions(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
) -> Result<impl IntoResponse, AppError> {
    let permissions = state
        .catalog_service
        .list_permissions(auth_context.user_id)
        .await?;

    Ok(Json(json!({
        "permissions": permissions,
        "count": permissions.len()
    })))
}

pub async fn create_permission(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Json(req): Json<PermissionRequest>,
) -> Result<impl IntoResponse, AppError> {
    let permission = state
        .catalog_service
        .create_permission(auth_context.user_id, req)
        .await?;

    Ok(Json(json!({
        "message": "权限创建成功",
        "permission": permission
    })))
}

pub async fn get_permission(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let permission = state
        .catalog_service
        .get_permission(auth_context.user_id, id)
        .await?;
    Ok(Json(permission))
}

pub async fn update_permission(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Path(id): Path<Uuid>,
    Json(req): Json<PermissionRequest>,
) -> Result<impl IntoResponse, AppError> {
    let permission = state
        .catalog_service
        .update_permission(auth_context.user_id, id, req)
        .await?;

    Ok(Json(json!({
        "message": "权限更新成功",
        "permission": permission
    })))
}

pub async fn delete_permission(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let permission = state
        .catalog_service
        .delete_permission(auth_context.user_id, id)
        .await?;

    Ok(Json(json!({
        "message": "权限删除成功",
        "permission_id": permission.id
    })))
}
