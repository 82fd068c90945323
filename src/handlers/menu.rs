//! 菜单的 HTTP 处理器

use crate::{
    auth::middleware::AuthContext,
    error::AppError,
    middleware::AppState,
    models::menu::{CreateMenuRequest, ReorderMenusRequest},
};
use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

/// 当前用户可见的菜单树
pub async fn list_menus(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
) -> Result<impl IntoResponse, AppError> {
    let menus = state.menu_service.tree(auth_context.user_id).await?;
    Ok(Json(json!({ "menus": menus })))
}

pub async fn create_menu(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Json(req): Json<CreateMenuRequest>,
) -> Result<impl IntoResponse, AppError> {
    let menu = state
        .menu_service
        .create_menu(auth_context.user_id, req)
        .await?;

    Ok(Json(json!({
        "message": "菜单创建成功",
        "menu": menu
    })))
}

pub async fn reorder_menus(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Json(req): Json<ReorderMenusRequest>,
) -> Result<impl IntoResponse, AppError> {
    let menus = state.menu_service.reorder(auth_context.user_id, req).await?;
    Ok(Json(json!({ "menus": menus })))
}
