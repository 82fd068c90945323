//! 角色管理的 HTTP 处理器

use crate::{
    auth::middleware::AuthContext,
    error::AppError,
    middleware::AppState,
    models::role::{AssignPermissionsRequest, RoleRequest},
};
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

/// 列出所有角色
pub async fn list_roles(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
) -> Result<impl IntoResponse, AppError> {
    let roles = state.role_service.list_roles(auth_context.user_id).await?;

    Ok(Json(json!({
        "roles": roles,
        "count": roles.len()
    })))
}

/// 创建角色
pub async fn create_role(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Json(req): Json<RoleRequest>,
) -> Result<impl IntoResponse, AppError> {
    let role = state.role_service.create_role(auth_context.user_id, req).await?;

    Ok(Json(json!({
        "message": "角色创建成功",
        "role": role
    })))
}

/// 获取角色详情
pub async fn get_role(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let role = state.role_service.get_role(auth_context.user_id, id).await?;
    Ok(Json(role))
}

/// 更新角色
pub async fn update_role(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Path(id): Path<Uuid>,
    Json(req): Json<RoleRequest>,
) -> Result<impl IntoResponse, AppError> {
    let role = state
        .role_service
        .update_role(auth_context.user_id, id, req)
        .await?;

    Ok(Json(json!({
        "message": "角色更新成功",
        "role": role
    })))
}

/// 删除角色
pub async fn delete_role(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let role = state.role_service.delete_role(auth_context.user_id, id).await?;

    Ok(Json(json!({
        "message": "角色删除成功",
        "role_id": role.id
    })))
}

/// 为角色分配权限
pub async fn assign_permissions(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Path(id): Path<Uuid>,
    Json(req): Json<AssignPermissionsRequest>,
) -> Result<impl IntoResponse, AppError> {
    let role = state
        .role_service
        .assign_permissions(auth_context.user_id, id, req)
        .await?;

    Ok(Json(json!({
        "message": "权限分配成功",
        "role": role
    })))
}
