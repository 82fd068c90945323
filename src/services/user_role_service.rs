//! 用户角色分配服务

use crate::{
    error::AppError,
    models::{
        user::{AssignRoleRequest, SyncRolesRequest, UserRolesResponse},
        Actor,
    },
    policy::{Policy, Resource, UserRolePolicy},
    repository::{RbacState, Store},
    services::permission_service::{authorize, resolve_actor, resolve_target},
};
use std::collections::BTreeSet;
use std::sync::Arc;
use uuid::Uuid;

pub struct UserRoleService {
    store: Arc<Store>,
}

impl UserRoleService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// 查看用户的角色（本人始终可见）
    pub async fn roles_of(&self, actor_id: Uuid, user_id: Uuid) -> Result<UserRolesResponse, AppError> {
        let state = self.store.read().await;
        let actor = resolve_actor(&state, actor_id)?;
        let target = resolve_target(&state, user_id)?;
        authorize(
            &actor,
            Resource::UserRoles,
            "view",
            UserRolePolicy::view(&actor, &target),
        )?;

        Ok(response(&state, user_id))
    }

    /// 为用户追加一个角色；已持有时不做变更
    pub async fn assign_role(
        &self,
        actor_id: Uuid,
        user_id: Uuid,
        req: AssignRoleRequest,
    ) -> Result<UserRolesResponse, AppError> {
        let mut state = self.store.write().await;
        let (actor, target) = actor_and_target(&state, actor_id, user_id)?;
        authorize(
            &actor,
            Resource::UserRoles,
            "assign",
            UserRolePolicy::assign_role(&actor, &target),
        )?;
        ensure_roles_exist(&state, std::iter::once(req.role_id))?;

        let mut roles = state.user_role_ids(user_id);
        if roles.insert(req.role_id) {
            state.set_user_roles(user_id, roles);
            tracing::info!(
                user_id = %actor.id,
                target_user_id = %user_id,
                role_id = %req.role_id,
                "Role assigned to user"
            );
        }

        Ok(response(&state, user_id))
    }

    /// 移除用户的一个角色
    pub async fn remove_role(
        &self,
        actor_id: Uuid,
        user_id: Uuid,
        role_id: Uuid,
    ) -> Result<UserRolesResponse, AppError> {
        let mut state = self.store.write().await;
        let (actor, target) = actor_and_target(&state, actor_id, user_id)?;
        authorize(
            &actor,
            Resource::UserRoles,
            "remove",
            UserRolePolicy::remove_role(&actor, &target),
        )?;
        ensure_roles_exist(&state, std::iter::once(role_id))?;

        let mut roles = state.user_role_ids(user_id);
        if roles.remove(&role_id) {
            state.set_user_roles(user_id, roles);
            tracing::info!(
                user_id = %actor.id,
                target_user_id = %user_id,
                role_id = %role_id,
                "Role removed from user"
            );
        }

        Ok(response(&state, user_id))
    }

    /// 用给定集合覆盖用户的角色
    pub async fn sync_roles(
        &self,
        actor_id: Uuid,
        user_id: Uuid,
        req: SyncRolesRequest,
    ) -> Result<UserRolesResponse, AppError> {
        let mut state = self.store.write().await;
        let (actor, target) = actor_and_target(&state, actor_id, user_id)?;
        authorize(
            &actor,
            Resource::UserRoles,
            "sync",
            UserRolePolicy::sync_roles(&actor, &target),
        )?;
        ensure_roles_exist(&state, req.role_ids.iter().copied())?;

        let roles: BTreeSet<Uuid> = req.role_ids.into_iter().collect();
        let count = roles.len();
        state.set_user_roles(user_id, roles);

        tracing::info!(
            user_id = %actor.id,
            target_user_id = %user_id,
            count,
            "User roles synced"
        );

        Ok(response(&state, user_id))
    }
}

fn actor_and_target(
    state: &RbacState,
    actor_id: Uuid,
    user_id: Uuid,
) -> Result<(Actor, Actor), AppError> {
    let actor = resolve_actor(state, actor_id)?;
    let target = resolve_target(state, user_id)?;
    Ok((actor, target))
}

fn ensure_roles_exist(state: &RbacState, ids: impl IntoIterator<Item = Uuid>) -> Result<(), AppError> {
    for id in ids {
        if state.find_role(id).is_none() {
            return Err(AppError::not_found("Role not found"));
        }
    }
    Ok(())
}

fn response(state: &RbacState, user_id: Uuid) -> UserRolesResponse {
    UserRolesResponse {
        user_id,
        roles: state.role_summaries(user_id),
    }
}
