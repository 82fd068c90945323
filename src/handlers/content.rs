//! 内容的 HTTP 处理器

use crate::{
    auth::middleware::AuthContext,
    error::AppError,
    middleware::AppState,
    models::content::{CreateContentRequest, UpdateContentRequest},
};
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

pub async fn list_content(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
) -> Result<impl IntoResponse, AppError> {
    let contents = state.content_service.list(auth_context.user_id).await?;

    Ok(Json(json!({
        "content": contents,
        "count": contents.len()
    })))
}

pub async fn create_content(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Json(req): Json<CreateContentRequest>,
) -> Result<impl IntoResponse, AppError> {
    let content = state
        .content_service
        .create(auth_context.user_id, req)
        .await?;

    Ok(Json(json!({
        "message": "内容创建成功",
        "content": content
    })))
}

pub async fn get_content(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let content = state.content_service.get(auth_context.user_id, id).await?;
    Ok(Json(content))
}

pub async fn update_content(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateContentRequest>,
) -> Result<impl IntoResponse, AppError> {
    let content = state
        .content_service
        .update(auth_context.user_id, id, req)
        .await?;

    Ok(Json(json!({
        "message": "内容更新成功",
        "content": content
    })))
}

pub async fn publish_content(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let content = state
        .content_service
        .publish(auth_context.user_id, id)
        .await?;

    Ok(Json(json!({
        "message": "内容发布成功",
        "content": content
    })))
}

pub async fn archive_content(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let content = state
        .content_service
        .archive(auth_context.user_id, id)
        .await?;

    Ok(Json(json!({
        "message": "内容归档成功",
        "content": content
    })))
}
