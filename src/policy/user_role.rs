//! User-role assignment policy
//!
//! Admin-tier actors may manage roles of ordinary users only; peers and
//! super admins are out of their reach.

use super::{Policy, Resource};
use crate::models::{Actor, PermissionName, RoleName};

pub struct UserRolePolicy;

impl Policy for UserRolePolicy {
    const RESOURCE: Resource = Resource::UserRoles;
    /// The user whose roles are being read or changed
    type Target = Actor;

    fn view(actor: &Actor, target: &Actor) -> bool {
        actor.has_permission(&PermissionName::USER_ROLES_VIEW) || actor.id == target.id
    }
}

impl UserRolePolicy {
    pub fn assign_role(actor: &Actor, target: &Actor) -> bool {
        if actor.is_super_admin() {
            return true;
        }
        Self::admin_may_manage(actor, target, &PermissionName::USER_ROLES_ASSIGN)
    }

    /// A super admin may drop their own super admin role but not another's
    pub fn remove_role(actor: &Actor, target: &Actor) -> bool {
        if actor.is_super_admin() {
            return !(target.is_super_admin() && actor.id != target.id);
        }
        Self::admin_may_manage(actor, target, &PermissionName::USER_ROLES_REMOVE)
    }

    pub fn sync_roles(actor: &Actor, target: &Actor) -> bool {
        Self::assign_role(actor, target)
    }

    fn admin_may_manage(actor: &Actor, target: &Actor, permission: &PermissionName) -> bool {
        actor.has_role(&RoleName::ADMIN) && !target.is_admin_tier() && actor.has_permission(permission)
    }
}
