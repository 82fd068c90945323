//! 权限目录服务
//! 权限的增删改查（严格模式：只看精确权限）

use crate::{
    error::AppError,
    models::{permission::PermissionRequest, Permission, PermissionName},
    policy::{registry, PermissionPolicy, Policy, Resource},
    repository::{RbacState, Store},
    services::permission_service::{authorize, resolve_actor},
};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

pub struct CatalogService {
    store: Arc<Store>,
}

impl CatalogService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    pub async fn list_permissions(&self, actor_id: Uuid) -> Result<Vec<Permission>, AppError> {
        let state = self.store.read().await;
        let actor = resolve_actor(&state, actor_id)?;
        authorize(
            &actor,
            Resource::Permissions,
            "view_any",
            PermissionPolicy::view_any(&actor),
        )?;

        Ok(state.list_permissions())
    }

    pub async fn get_permission(&self, actor_id: Uuid, id: Uuid) -> Result<Permission, AppError> {
        let state = self.store.read().await;
        let actor = resolve_actor(&state, actor_id)?;
        let permission = find_permission(&state, id)?;
        authorize(
            &actor,
            Resource::Permissions,
            "view",
            PermissionPolicy::view(&actor, permission),
        )?;

        Ok(permission.clone())
    }

    /// 创建权限，未指定分组时取名称的第一段
    pub async fn create_permission(
        &self,
        actor_id: Uuid,
        req: PermissionRequest,
    ) -> Result<Permission, AppError> {
        let mut state = self.store.write().await;
        let actor = resolve_actor(&state, actor_id)?;
        authorize(
            &actor,
            Resource::Permissions,
            "create",
            PermissionPolicy::create(&actor),
        )?;

        let name = validate_permission_request(&state, &req, None)?;
        let mut permission = Permission::new(name, req.display_name, req.description);
        if let Some(group) = req.group {
            permission.group = group;
        }
        let permission = state.insert_permission(permission);

        tracing::info!(
            user_id = %actor.id,
            permission_id = %permission.id,
            permission = %permission.name,
            "Permission created"
        );

        Ok(permission)
    }

    pub async fn update_permission(
        &self,
        actor_id: Uuid,
        id: Uuid,
        req: PermissionRequest,
    ) -> Result<Permission, AppError> {
        let mut state = self.store.write().await;
        let actor = resolve_actor(&state, actor_id)?;
        let permission = find_permission(&state, id)?;
        authorize(
            &actor,
            Resource::Permissions,
            "update",
            PermissionPolicy::update(&actor, permission),
        )?;

        let name = validate_permission_request(&state, &req, Some(id))?;
        if name != permission.name {
            ensure_renamable(&state, permission, &name)?;
        }
        let group = req.group.unwrap_or_else(|| name.group().to_string());
        let permission = state
            .update_permission(id, name, req.display_name, req.description, group)
            .ok_or_else(|| AppError::not_found("Permission not found"))?;

        tracing::info!(
            user_id = %actor.id,
            permission_id = %permission.id,
            permission = %permission.name,
            "Permission updated"
        );

        Ok(permission)
    }

    /// 删除权限；仍被角色持有时拒绝，关联只能通过角色的权限分配解除
    pub async fn delete_permission(&self, actor_id: Uuid, id: Uuid) -> Result<Permission, AppError> {
        let mut state = self.store.write().await;
        let actor = resolve_actor(&state, actor_id)?;
        let permission = find_permission(&state, id)?;
        authorize(
            &actor,
            Resource::Permissions,
            "delete",
            PermissionPolicy::delete(&actor, permission),
        )?;

        let holders = holder_names(&state, id);
        if !holders.is_empty() {
            return Err(AppError::field(
                "id",
                format!("The permission is still assigned to roles: {}.", holders),
            ));
        }

        let permission = state
            .delete_permission(id)
            .ok_or_else(|| AppError::not_found("Permission not found"))?;

        tracing::info!(
            user_id = %actor.id,
            permission_id = %permission.id,
            permission = %permission.name,
            "Permission deleted"
        );

        Ok(permission)
    }
}

fn find_permission(state: &RbacState, id: Uuid) -> Result<&Permission, AppError> {
    state
        .find_permission(id)
        .ok_or_else(|| AppError::not_found("Permission not found"))
}

/// 名称决定了每个持有者的有效权限：受限名称永不改名，被角色持有的权限也不能改名
fn ensure_renamable(
    state: &RbacState,
    permission: &Permission,
    name: &PermissionName,
) -> Result<(), AppError> {
    if registry::is_restricted(&permission.name) || registry::is_restricted(name) {
        return Err(AppError::field("name", "Restricted permission names cannot be changed."));
    }

    let holders = holder_names(state, permission.id);
    if !holders.is_empty() {
        return Err(AppError::field(
            "name",
            format!("The name cannot change while roles hold the permission: {}.", holders),
        ));
    }
    Ok(())
}

fn holder_names(state: &RbacState, permission_id: Uuid) -> String {
    state
        .roles_holding(permission_id)
        .iter()
        .map(|role| role.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn validate_permission_request(
    state: &RbacState,
    req: &PermissionRequest,
    except: Option<Uuid>,
) -> Result<PermissionName, AppError> {
    req.validate()?;

    let name = PermissionName::parse(req.name.as_str())
        .map_err(|e| AppError::field("name", e.to_string()))?;
    if state.permission_name_taken(&name, except) {
        return Err(AppError::field("name", "The name has already been taken."));
    }
    Ok(name)
}
