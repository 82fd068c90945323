//! 用户账号的 HTTP 处理器

use crate::{
    auth::middleware::AuthContext,
    error::AppError,
    middleware::AppState,
    models::user::{CreateUserRequest, UpdateUserRequest},
};
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

pub async fn list_users(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
) -> Result<impl IntoResponse, AppError> {
    let users = state.user_service.list_users(auth_context.user_id).await?;

    Ok(Json(json!({
        "users": users,
        "count": users.len()
    })))
}

pub async fn create_user(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Json(req): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = state
        .user_service
        .create_user(auth_context.user_id, req)
        .await?;

    Ok(Json(json!({
        "message": "用户创建成功",
        "user": user
    })))
}

pub async fn get_user(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let user = state.user_service.get_user(auth_context.user_id, id).await?;
    Ok(Json(user))
}

pub async fn update_user(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = state
        .user_service
        .update_user(auth_context.user_id, id, req)
        .await?;

    Ok(Json(json!({
        "message": "用户更新成功",
        "user": user
    })))
}

pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let user = state
        .user_service
        .delete_user(auth_context.user_id, id)
        .await?;

    Ok(Json(json!({
        "message": "用户删除成功",
        "user_id": user.id
    })))
}
