//! Role policy (strict flavor) and role-permission graph rules

use super::{registry, Action, Policy, Resource};
use crate::models::{Actor, Permission, PermissionName, Role};

pub struct RolePolicy;

impl Policy for RolePolicy {
    const RESOURCE: Resource = Resource::Roles;
    type Target = Role;

    /// System roles are immutable whoever asks
    fn update(actor: &Actor, role: &Role) -> bool {
        !role.is_system && Self::allows(actor, Action::Update)
    }

    fn delete(actor: &Actor, role: &Role) -> bool {
        !role.is_system && Self::allows(actor, Action::Delete)
    }

    fn force_delete(actor: &Actor, role: &Role) -> bool {
        !role.is_system && Self::allows(actor, Action::ForceDelete)
    }
}

impl RolePolicy {
    pub fn assign_permissions(actor: &Actor, role: &Role) -> bool {
        !role.is_system && actor.has_permission(&PermissionName::ROLES_ASSIGN_PERMISSIONS)
    }

    /// Check order matters: the system-role and base-permission checks run
    /// before the super admin shortcut, the restricted list only after it.
    pub fn can_assign_permission(actor: &Actor, role: &Role, permission: &Permission) -> bool {
        if role.is_system {
            return false;
        }
        if !actor.has_permission(&PermissionName::ROLES_ASSIGN_PERMISSIONS) {
            return false;
        }
        if actor.is_super_admin() {
            return true;
        }
        !registry::is_restricted(&permission.name)
    }
}
