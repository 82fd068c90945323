//! 权限检查服务
//! 解析操作者的角色与有效权限，记录并执行鉴权结果

use crate::{
    error::AppError,
    models::{Actor, PermissionName, RoleName},
    policy::Resource,
    repository::{RbacState, Store},
};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

/// 当前用户的权限摘要
#[derive(Debug, Serialize)]
pub struct ActorSummary {
    pub id: Uuid,
    pub roles: Vec<RoleName>,
    pub permissions: Vec<PermissionName>,
}

impl From<&Actor> for ActorSummary {
    fn from(actor: &Actor) -> Self {
        Self {
            id: actor.id,
            roles: actor.roles().cloned().collect(),
            permissions: actor.permissions().cloned().collect(),
        }
    }
}

pub struct PermissionService {
    store: Arc<Store>,
}

impl PermissionService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// 解析当前用户
    pub async fn resolve_actor(&self, user_id: Uuid) -> Result<Actor, AppError> {
        let state = self.store.read().await;
        resolve_actor(&state, user_id)
    }

    /// 获取用户的权限摘要
    pub async fn summary(&self, user_id: Uuid) -> Result<ActorSummary, AppError> {
        let actor = self.resolve_actor(user_id).await?;
        Ok(ActorSummary::from(&actor))
    }
}

/// 从快照中解析已认证用户；令牌指向不存在的用户时视为认证失败
pub fn resolve_actor(state: &RbacState, user_id: Uuid) -> Result<Actor, AppError> {
    state.resolve_actor(user_id).ok_or_else(|| {
        tracing::warn!(user_id = %user_id, "Authenticated user no longer exists");
        AppError::Unauthorized
    })
}

/// 解析被操作的目标用户
pub fn resolve_target(state: &RbacState, user_id: Uuid) -> Result<Actor, AppError> {
    state
        .resolve_actor(user_id)
        .ok_or_else(|| AppError::not_found("User not found"))
}

/// 记录鉴权结果，拒绝时返回 Forbidden
pub fn authorize(
    actor: &Actor,
    resource: Resource,
    action: &'static str,
    allowed: bool,
) -> Result<(), AppError> {
    let outcome = if allowed { "allow" } else { "deny" };
    metrics::counter!(
        "rbac_decisions_total",
        "resource" => resource.as_str(),
        "action" => action,
        "outcome" => outcome
    )
    .increment(1);

    if !allowed {
        tracing::warn!(
            user_id = %actor.id,
            resource = resource.as_str(),
            action = action,
            "Permission denied"
        );
        return Err(AppError::Forbidden);
    }

    tracing::debug!(
        user_id = %actor.id,
        resource = resource.as_str(),
        action = action,
        "Permission granted"
    );
    Ok(())
}
