//! 用户角色分配的 HTTP 处理器

use crate::{
    auth::middleware::AuthContext,
    error::AppError,
    middleware::AppState,
    models::user::{AssignRoleRequest, SyncRolesRequest},
};
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

/// 查看用户角色
pub async fn list_user_roles(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let roles = state
        .user_role_service
        .roles_of(auth_context.user_id, user_id)
        .await?;
    Ok(Json(roles))
}

/// 追加角色
pub async fn assign_role(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Path(user_id): Path<Uuid>,
    Json(req): Json<AssignRoleRequest>,
) -> Result<impl IntoResponse, AppError> {
    let roles = state
        .user_role_service
        .assign_role(auth_context.user_id, user_id, req)
        .await?;
    Ok(Json(roles))
}

/// 覆盖角色集合
pub async fn sync_roles(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Path(user_id): Path<Uuid>,
    Json(req): Json<SyncRolesRequest>,
) -> Result<impl IntoResponse, AppError> {
    let roles = state
        .user_role_service
        .sync_roles(auth_context.user_id, user_id, req)
        .await?;
    Ok(Json(roles))
}

/// 移除角色
pub async fn remove_role(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Path((user_id, role_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    let roles = state
        .user_role_service
        .remove_role(auth_context.user_id, user_id, role_id)
        .await?;
    Ok(Json(roles))
}
