//! 角色管理服务
//! 角色的增删改查以及角色-权限分配

use crate::{
    error::{AppError, FieldError},
    models::{
        role::{AssignMode, AssignPermissionsRequest, RoleRequest, RoleWithPermissions},
        Permission, Role, RoleName,
    },
    policy::{Policy, Resource, RolePolicy},
    repository::{RbacState, Store},
    services::permission_service::{authorize, resolve_actor},
};
use std::collections::BTreeSet;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

pub struct RoleService {
    store: Arc<Store>,
}

impl RoleService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// 列出所有角色
    pub async fn list_roles(&self, actor_id: Uuid) -> Result<Vec<RoleWithPermissions>, AppError> {
        let state = self.store.read().await;
        let actor = resolve_actor(&state, actor_id)?;
        authorize(&actor, Resource::Roles, "view_any", RolePolicy::view_any(&actor))?;

        Ok(state
            .list_roles()
            .into_iter()
            .map(|role| state.role_with_permissions(role))
            .collect())
    }

    /// 获取角色详情
    pub async fn get_role(&self, actor_id: Uuid, id: Uuid) -> Result<RoleWithPermissions, AppError> {
        let state = self.store.read().await;
        let actor = resolve_actor(&state, actor_id)?;
        let role = find_role(&state, id)?.clone();
        authorize(&actor, Resource::Roles, "view", RolePolicy::view(&actor, &role))?;

        Ok(state.role_with_permissions(role))
    }

    /// 创建角色（始终为非系统角色）
    pub async fn create_role(
        &self,
        actor_id: Uuid,
        req: RoleRequest,
    ) -> Result<RoleWithPermissions, AppError> {
        let mut state = self.store.write().await;
        let actor = resolve_actor(&state, actor_id)?;
        authorize(&actor, Resource::Roles, "create", RolePolicy::create(&actor))?;

        let name = validate_role_request(&state, &req, None)?;
        let mut role = Role::new(name, req.display_name, false);
        role.description = req.description;
        let role = state.insert_role(role);

        tracing::info!(
            user_id = %actor.id,
            role_id = %role.id,
            role = %role.name,
            "Role created"
        );

        Ok(state.role_with_permissions(role))
    }

    /// 更新角色
    pub async fn update_role(
        &self,
        actor_id: Uuid,
        id: Uuid,
        req: RoleRequest,
    ) -> Result<RoleWithPermissions, AppError> {
        let mut state = self.store.write().await;
        let actor = resolve_actor(&state, actor_id)?;
        let role = find_role(&state, id)?;
        authorize(&actor, Resource::Roles, "update", RolePolicy::update(&actor, role))?;

        let name = validate_role_request(&state, &req, Some(id))?;
        let role = state
            .update_role(id, name, req.display_name, req.description)
            .ok_or_else(|| AppError::not_found("Role not found"))?;

        tracing::info!(user_id = %actor.id, role_id = %role.id, role = %role.name, "Role updated");

        Ok(state.role_with_permissions(role))
    }

    /// 删除角色
    pub async fn delete_role(&self, actor_id: Uuid, id: Uuid) -> Result<Role, AppError> {
        let mut state = self.store.write().await;
        let actor = resolve_actor(&state, actor_id)?;
        let role = find_role(&state, id)?;
        authorize(&actor, Resource::Roles, "delete", RolePolicy::delete(&actor, role))?;

        let role = state
            .delete_role(id)
            .ok_or_else(|| AppError::not_found("Role not found"))?;

        tracing::info!(user_id = %actor.id, role_id = %role.id, role = %role.name, "Role deleted");

        Ok(role)
    }

    /// 为角色分配权限
    ///
    /// 每个新增的权限都必须通过 `can_assign_permission`，任一失败则整个请求被拒绝
    pub async fn assign_permissions(
        &self,
        actor_id: Uuid,
        role_id: Uuid,
        req: AssignPermissionsRequest,
    ) -> Result<RoleWithPermissions, AppError> {
        let mut state = self.store.write().await;
        let actor = resolve_actor(&state, actor_id)?;
        let role = find_role(&state, role_id)?.clone();
        authorize(
            &actor,
            Resource::Roles,
            "assign_permissions",
            RolePolicy::assign_permissions(&actor, &role),
        )?;

        let requested = lookup_permissions(&state, &req.permission_ids)?;
        let current = state.role_permission_ids(role_id);

        for permission in requested.iter().filter(|p| !current.contains(&p.id)) {
            let allowed = RolePolicy::can_assign_permission(&actor, &role, permission);
            if !allowed {
                tracing::warn!(
                    user_id = %actor.id,
                    role_id = %role.id,
                    permission = %permission.name,
                    "Restricted permission requires super admin"
                );
            }
            authorize(&actor, Resource::Roles, "assign_permission", allowed)?;
        }

        let requested_ids: BTreeSet<Uuid> = requested.iter().map(|p| p.id).collect();
        let next = match req.mode {
            AssignMode::Replace => requested_ids,
            AssignMode::Augment => current.union(&requested_ids).copied().collect(),
        };
        if !state.set_role_permissions(role_id, next) {
            return Err(AppError::Forbidden);
        }

        tracing::info!(
            user_id = %actor.id,
            role_id = %role.id,
            mode = ?req.mode,
            count = requested.len(),
            "Role permissions assigned"
        );

        let role = find_role(&state, role_id)?.clone();
        Ok(state.role_with_permissions(role))
    }
}

fn find_role(state: &RbacState, id: Uuid) -> Result<&Role, AppError> {
    state
        .find_role(id)
        .ok_or_else(|| AppError::not_found("Role not found"))
}

/// 每个 id 都必须存在，否则按字段校验失败处理
fn lookup_permissions(state: &RbacState, ids: &[Uuid]) -> Result<Vec<Permission>, AppError> {
    let mut seen = BTreeSet::new();
    let mut found = Vec::with_capacity(ids.len());
    let mut errors = Vec::new();

    for (i, id) in ids.iter().enumerate() {
        if !seen.insert(*id) {
            continue;
        }
        match state.find_permission(*id) {
            Some(permission) => found.push(permission.clone()),
            None => errors.push(FieldError::new(
                format!("permission_ids.{}", i),
                "The selected permission is invalid.",
            )),
        }
    }

    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }
    Ok(found)
}

/// 字段格式 + 名称唯一性（更新时排除自身）
fn validate_role_request(
    state: &RbacState,
    req: &RoleRequest,
    except: Option<Uuid>,
) -> Result<RoleName, AppError> {
    req.validate()?;

    let name = RoleName::parse(req.name.as_str()).map_err(|e| AppError::field("name", e.to_string()))?;
    if state.role_name_taken(&name, except) {
        return Err(AppError::field("name", "The name has already been taken."));
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PermissionName, User};

    struct Fixture {
        service: RoleService,
        store: Arc<Store>,
    }

    impl Fixture {
        fn new() -> Self {
            let store = Arc::new(Store::new(RbacState::seeded(None)));
            Self {
                service: RoleService::new(store.clone()),
                store,
            }
        }

        async fn user(&self, roles: &[RoleName]) -> Uuid {
            let id = Uuid::new_v4();
            let mut state = self.store.write().await;
            state.insert_user(User::new(id, "Sam", "sam@example.com"));
            let role_ids = roles
                .iter()
                .filter_map(|name| state.find_role_by_name(name).map(|r| r.id))
                .collect();
            state.set_user_roles(id, role_ids);
            id
        }

        async fn role_id(&self, name: &RoleName) -> Uuid {
            self.store.read().await.find_role_by_name(name).unwrap().id
        }

        async fn permission_id(&self, name: &PermissionName) -> Uuid {
            self.store
                .read()
                .await
                .find_permission_by_name(name)
                .unwrap()
                .id
        }
    }

    fn role_request(name: &str) -> RoleRequest {
        RoleRequest {
            name: name.to_string(),
            display_name: "Writer".to_string(),
            description: None,
        }
    }

    #[tokio::test]
    async fn test_created_roles_are_not_system() {
        let fx = Fixture::new();
        let actor = fx.user(&[RoleName::SUPER_ADMIN]).await;

        let created = fx.service.create_role(actor, role_request("writer")).await.unwrap();
        assert!(!created.role.is_system);
        assert!(created.permissions.is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_role_name_rejected() {
        let fx = Fixture::new();
        let actor = fx.user(&[RoleName::SUPER_ADMIN]).await;

        let err = fx.service.create_role(actor, role_request("editor")).await.unwrap_err();
        assert_eq!(err.fields()[0].field, "name");
    }

    #[tokio::test]
    async fn test_system_role_is_immutable_even_for_super_admin() {
        let fx = Fixture::new();
        let actor = fx.user(&[RoleName::SUPER_ADMIN]).await;
        let admin = fx.role_id(&RoleName::ADMIN).await;

        let update = fx.service.update_role(actor, admin, role_request("admin")).await;
        assert!(matches!(update, Err(AppError::Forbidden)));
        let delete = fx.service.delete_role(actor, admin).await;
        assert!(matches!(delete, Err(AppError::Forbidden)));

        let req = AssignPermissionsRequest {
            permission_ids: vec![],
            mode: AssignMode::Replace,
        };
        let assign = fx.service.assign_permissions(actor, admin, req).await;
        assert!(matches!(assign, Err(AppError::Forbidden)));
    }

    #[tokio::test]
    async fn test_admin_cannot_grant_restricted_permission() {
        let fx = Fixture::new();
        let actor = fx.user(&[RoleName::ADMIN]).await;
        let editor = fx.role_id(&RoleName::EDITOR).await;
        let settings = fx.permission_id(&PermissionName::ADMIN_SETTINGS).await;

        let req = AssignPermissionsRequest {
            permission_ids: vec![settings],
            mode: AssignMode::Augment,
        };
        let err = fx.service.assign_permissions(actor, editor, req).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden));

        // nothing changed
        let state = fx.store.read().await;
        assert!(!state.role_permission_ids(editor).contains(&settings));
    }

    #[tokio::test]
    async fn test_super_admin_grants_restricted_permission() {
        let fx = Fixture::new();
        let actor = fx.user(&[RoleName::SUPER_ADMIN]).await;
        let editor = fx.role_id(&RoleName::EDITOR).await;
        let settings = fx.permission_id(&PermissionName::ADMIN_SETTINGS).await;

        let req = AssignPermissionsRequest {
            permission_ids: vec![settings],
            mode: AssignMode::Augment,
        };
        let updated = fx.service.assign_permissions(actor, editor, req).await.unwrap();
        assert!(updated.permissions.contains(&PermissionName::ADMIN_SETTINGS));
        assert!(updated.permissions.contains(&PermissionName::CONTENT_MANAGE));
    }

    #[tokio::test]
    async fn test_replace_mode_overwrites() {
        let fx = Fixture::new();
        let actor = fx.user(&[RoleName::ADMIN]).await;
        let editor = fx.role_id(&RoleName::EDITOR).await;
        let manage = fx.permission_id(&PermissionName::CONTENT_MANAGE).await;

        let req = AssignPermissionsRequest {
            permission_ids: vec![manage],
            mode: AssignMode::Replace,
        };
        let updated = fx.service.assign_permissions(actor, editor, req).await.unwrap();
        assert_eq!(updated.permissions, vec![PermissionName::CONTENT_MANAGE]);
    }

    #[tokio::test]
    async fn test_unknown_permission_id_is_validation_error() {
        let fx = Fixture::new();
        let actor = fx.user(&[RoleName::SUPER_ADMIN]).await;
        let editor = fx.role_id(&RoleName::EDITOR).await;

        let req = AssignPermissionsRequest {
            permission_ids: vec![Uuid::new_v4()],
            mode: AssignMode::Replace,
        };
        let err = fx.service.assign_permissions(actor, editor, req).await.unwrap_err();
        assert_eq!(err.fields()[0].field, "permission_ids.0");
    }

    #[tokio::test]
    async fn test_editor_cannot_list_roles() {
        let fx = Fixture::new();
        let actor = fx.user(&[RoleName::EDITOR]).await;
        assert!(matches!(
            fx.service.list_roles(actor).await,
            Err(AppError::Forbidden)
        ));
    }
}
