//! HTTP 中间件与应用状态
//! 请求追踪：trace_id / request_id、访问日志与请求指标

use crate::{
    auth::jwt::JwtService,
    config::AppConfig,
    error::AppError,
    repository::{RbacState, Store},
    services::{
        CatalogService, ContentService, MenuService, PermissionService, RoleService,
        UserRoleService, UserService,
    },
};
use axum::{
    extract::Request,
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;
use uuid::Uuid;

/// 应用状态
///
/// 所有服务共享同一个 Store
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub store: Arc<Store>,
    pub jwt_service: Arc<JwtService>,
    pub permission_service: Arc<PermissionService>,
    pub role_service: Arc<RoleService>,
    pub catalog_service: Arc<CatalogService>,
    pub user_service: Arc<UserService>,
    pub user_role_service: Arc<UserRoleService>,
    pub menu_service: Arc<MenuService>,
    pub content_service: Arc<ContentService>,
}

impl AppState {
    /// 按配置初始化存储并构建所有服务
    pub fn from_config(config: AppConfig) -> Result<Self, AppError> {
        let state = if config.rbac.seed_defaults {
            RbacState::seeded(config.rbac.bootstrap_super_admin)
        } else {
            RbacState::default()
        };
        Self::with_state(config, state)
    }

    /// 使用预先准备好的数据构建（测试中用于注入用户）
    pub fn with_state(config: AppConfig, state: RbacState) -> Result<Self, AppError> {
        let jwt_service = Arc::new(JwtService::from_config(&config)?);
        let store = Arc::new(Store::new(state));

        Ok(Self {
            jwt_service,
            permission_service: Arc::new(PermissionService::new(store.clone())),
            role_service: Arc::new(RoleService::new(store.clone())),
            catalog_service: Arc::new(CatalogService::new(store.clone())),
            user_service: Arc::new(UserService::new(store.clone())),
            user_role_service: Arc::new(UserRoleService::new(store.clone())),
            menu_service: Arc::new(MenuService::new(store.clone())),
            content_service: Arc::new(ContentService::new(store.clone())),
            store,
            config,
        })
    }
}

/// 请求追踪中间件
/// 为每个请求生成 trace_id 和 request_id，并记录指标
pub async fn request_tracking_middleware(req: Request, next: Next) -> Response {
    let trace_id = extract_or_generate_trace_id(req.headers());
    let request_id = Uuid::new_v4().to_string();

    let method = req.method().clone();
    let uri = req.uri().to_string();

    let span = tracing::info_span!(
        "http_request",
        trace_id = %trace_id,
        request_id = %request_id,
        method = %method,
        uri = %uri,
    );

    async move {
        let start = Instant::now();

        let mut response = next.run(req).await;

        let elapsed = start.elapsed();
        let status = response.status().as_u16();

        // 标签只使用有限取值
        let method_name = match method.as_str() {
            "GET" => "GET",
            "POST" => "POST",
            "PUT" => "PUT",
            "DELETE" => "DELETE",
            "PATCH" => "PATCH",
            _ => "UNKNOWN",
        };
        let status_code = match status {
            200 => "200",
            201 => "201",
            204 => "204",
            400 => "400",
            401 => "401",
            403 => "403",
            404 => "404",
            422 => "422",
            500 => "500",
            _ => "other",
        };

        metrics::counter!("http_requests_total", "method" => method_name, "status" => status_code)
            .increment(1);
        metrics::histogram!("http_request_duration_seconds").record(elapsed.as_secs_f64());

        tracing::info!(
            method = %method,
            uri = %uri,
            status = status,
            elapsed_ms = elapsed.as_millis(),
            "Request completed"
        );

        // 在响应头中回写 trace_id / request_id
        if let Ok(value) = HeaderValue::from_str(&trace_id) {
            response.headers_mut().insert("x-trace-id", value);
        }
        if let Ok(value) = HeaderValue::from_str(&request_id) {
            response.headers_mut().insert("x-request-id", value);
        }

        response
    }
    .instrument(span)
    .await
}

/// 从请求头中提取或生成 trace_id
fn extract_or_generate_trace_id(headers: &HeaderMap) -> String {
    headers
        .get("x-trace-id")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}
