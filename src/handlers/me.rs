//! 当前用户

use crate::{auth::middleware::AuthContext, error::AppError, middleware::AppState};
use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;

/// 当前用户的角色与有效权限
pub async fn get_current_user(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
) -> Result<impl IntoResponse, AppError> {
    let summary = state.permission_service.summary(auth_context.user_id).await?;
    Ok(Json(summary))
}
