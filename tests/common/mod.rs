//! 测试公共模块
//! 提供测试配置、应用状态与请求辅助函数

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use rbac_admin::{
    config::{AppConfig, LoggingConfig, RbacConfig, SecurityConfig, ServerConfig},
    middleware::AppState,
    models::{RoleName, User},
    repository::RbacState,
    routes,
};
use secrecy::Secret;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

/// 创建测试配置
pub fn create_test_config() -> AppConfig {
    AppConfig {
        server: ServerConfig {
            addr: "127.0.0.1:0".to_string(), // 使用随机端口
            graceful_shutdown_timeout_secs: 5,
        },
        logging: LoggingConfig {
            level: "debug".to_string(),
            format: "pretty".to_string(),
        },
        security: SecurityConfig {
            jwt_secret: Secret::new("test-secret-key-for-testing-only-min-32-chars".to_string()),
            access_token_exp_secs: 300, // 5分钟用于测试
        },
        rbac: RbacConfig {
            seed_defaults: true,
            bootstrap_super_admin: None,
        },
    }
}

/// 测试应用：路由 + 共享状态
pub struct TestApp {
    pub state: Arc<AppState>,
    pub router: Router,
}

impl TestApp {
    /// 写入默认数据的测试应用
    pub fn new() -> Self {
        let state = Arc::new(
            AppState::with_state(create_test_config(), RbacState::seeded(None))
                .expect("Failed to create app state"),
        );
        let router = routes::create_router(state.clone());
        Self { state, router }
    }

    /// 创建测试用户并分配给定角色
    pub async fn create_user(&self, roles: &[RoleName]) -> Uuid {
        let user_id = Uuid::new_v4();
        let mut store = self.state.store.write().await;
        store.insert_user(User::new(
            user_id,
            "testuser",
            format!("{}@example.com", user_id),
        ));
        let role_ids = roles
            .iter()
            .filter_map(|name| store.find_role_by_name(name).map(|r| r.id))
            .collect();
        store.set_user_roles(user_id, role_ids);
        user_id
    }

    pub async fn role_id(&self, name: &RoleName) -> Uuid {
        self.state
            .store
            .read()
            .await
            .find_role_by_name(name)
            .map(|r| r.id)
            .expect("role not seeded")
    }

    /// 签发访问令牌
    pub fn token(&self, user_id: Uuid) -> String {
        self.state
            .jwt_service
            .generate_access_token(&user_id)
            .expect("Failed to issue token")
    }

    /// 以指定用户身份发送请求
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        user_id: Option<Uuid>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(user_id) = user_id {
            builder = builder.header(
                header::AUTHORIZATION,
                format!("Bearer {}", self.token(user_id)),
            );
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str, user_id: Uuid) -> (StatusCode, Value) {
        self.request(Method::GET, uri, Some(user_id), None).await
    }

    pub async fn post(&self, uri: &str, user_id: Uuid, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(user_id), Some(body)).await
    }

    pub async fn put(&self, uri: &str, user_id: Uuid, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, Some(user_id), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, user_id: Uuid) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, Some(user_id), None).await
    }
}
