//! 默认数据
//! 权限目录、系统角色 super_admin / admin 以及非系统角色 editor

use super::RbacState;
use crate::models::{Permission, Role, RoleName, User};
use crate::policy::registry;
use std::collections::BTreeSet;
use uuid::Uuid;

impl RbacState {
    /// 写入权限目录与默认角色；提供 bootstrap 用户时为其授予 super_admin
    pub fn seeded(bootstrap_super_admin: Option<Uuid>) -> Self {
        let mut state = RbacState::default();

        let mut all = BTreeSet::new();
        let mut unrestricted = BTreeSet::new();
        let mut editor = BTreeSet::new();
        let editor_names: BTreeSet<_> = registry::editor_defaults().collect();

        for (name, display_name) in registry::catalogue() {
            let restricted = registry::is_restricted(&name);
            let for_editor = editor_names.contains(&name);
            let permission = state.insert_permission(Permission::new(name, display_name, None));
            all.insert(permission.id);
            if !restricted {
                unrestricted.insert(permission.id);
            }
            if for_editor {
                editor.insert(permission.id);
            }
        }

        let super_admin = state.insert_role(Role::new(RoleName::SUPER_ADMIN, "Super Administrator", true));
        let admin = state.insert_role(Role::new(RoleName::ADMIN, "Administrator", true));
        let editor_role = state.insert_role(Role::new(RoleName::EDITOR, "Editor", false));

        // 系统角色的权限集合只在这里写入
        state.role_permissions.insert(super_admin.id, all);
        state.role_permissions.insert(admin.id, unrestricted);
        state.set_role_permissions(editor_role.id, editor);

        if let Some(user_id) = bootstrap_super_admin {
            state.insert_user(User::new(user_id, "Super Administrator", "admin@localhost"));
            state.set_user_roles(user_id, [super_admin.id].into_iter().collect());
            tracing::info!(user_id = %user_id, "Bootstrap super admin created");
        }

        tracing::info!(
            permissions = state.permissions.len(),
            roles = state.roles.len(),
            "Default RBAC data seeded"
        );

        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PermissionName;

    #[test]
    fn test_seeded_system_roles() {
        let state = RbacState::seeded(None);

        let super_admin = state.find_role_by_name(&RoleName::SUPER_ADMIN).unwrap();
        let admin = state.find_role_by_name(&RoleName::ADMIN).unwrap();
        let editor = state.find_role_by_name(&RoleName::EDITOR).unwrap();
        assert!(super_admin.is_system);
        assert!(admin.is_system);
        assert!(!editor.is_system);

        assert_eq!(
            state.role_permission_ids(super_admin.id).len(),
            registry::CATALOGUE.len()
        );
        let admin_names = state.role_permission_names(admin.id);
        assert!(admin_names.iter().all(|p| !registry::is_restricted(p)));
        assert!(admin_names.contains(&PermissionName::USER_ROLES_ASSIGN));
    }

    #[test]
    fn test_bootstrap_user_is_super_admin() {
        let id = Uuid::new_v4();
        let state = RbacState::seeded(Some(id));
        let actor = state.resolve_actor(id).unwrap();
        assert!(actor.is_super_admin());
        assert!(actor.has_permission(&PermissionName::ADMIN_MAINTENANCE));
    }
}
