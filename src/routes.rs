//! 路由注册
//! 创建所有 API 路由并应用中间件

use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

use crate::{handlers, middleware::AppState};

/// 请求体上限
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// 创建应用路由
pub fn create_router(state: Arc<AppState>) -> Router {
    // 公开端点（健康检查）
    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check));

    // 需要认证的路由
    let authenticated_routes = Router::new()
        // 当前用户
        .route("/api/v1/me", get(handlers::me::get_current_user))

        // 角色
        .route(
            "/api/v1/roles",
            get(handlers::role::list_roles)
                .post(handlers::role::create_role)
        )
        .route(
            "/api/v1/roles/{id}",
            get(handlers::role::get_role)
                .put(handlers::role::update_role)
                .delete(handlers::role::delete_role)
        )
        .route(
            "/api/v1/roles/{id}/permissions",
            put(handlers::role::assign_permissions)
        )

        // 权限目录
        .route(
            "/api/v1/permissions",
            get(handlers::permission::list_permissions)
                .post(handlers::permission::create_permission)
        )
        .route(
            "/api/v1/permissions/{id}",
            get(handlers::permission::get_permission)
                .put(handlers::permission::update_permission)
                .delete(handlers::permission::delete_permission)
        )

        // 用户
        .route(
            "/api/v1/users",
            get(handlers::user::list_users)
                .post(handlers::user::create_user)
        )
        .route(
            "/api/v1/users/{id}",
            get(handlers::user::get_user)
                .put(handlers::user::update_user)
                .delete(handlers::user::delete_user)
        )

        // 用户角色
        .route(
            "/api/v1/users/{id}/roles",
            get(handlers::user_role::list_user_roles)
                .post(handlers::user_role::assign_role)
                .put(handlers::user_role::sync_roles)
        )
        .route(
            "/api/v1/users/{id}/roles/{role_id}",
            axum::routing::delete(handlers::user_role::remove_role)
        )

        // 菜单
        .route(
            "/api/v1/menus",
            get(handlers::menu::list_menus)
                .post(handlers::menu::create_menu)
        )
        .route("/api/v1/menus/reorder", put(handlers::menu::reorder_menus))

        // 内容
        .route(
            "/api/v1/content",
            get(handlers::content::list_content)
                .post(handlers::content::create_content)
        )
        .route(
            "/api/v1/content/{id}",
            get(handlers::content::get_content)
                .put(handlers::content::update_content)
        )
        .route(
            "/api/v1/content/{id}/publish",
            post(handlers::content::publish_content)
        )
        .route(
            "/api/v1/content/{id}/archive",
            post(handlers::content::archive_content)
        )
        .layer(axum::middleware::from_fn_with_state(
            state.jwt_service.clone(),
            crate::auth::middleware::jwt_auth_middleware,
        ));

    // 组合所有路由
    Router::new()
        .merge(public_routes)
        .merge(authenticated_routes)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(crate::middleware::request_tracking_middleware))
        .with_state(state)
}
