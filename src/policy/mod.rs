//! Authorization evaluator
//!
//! Every decision here is a pure predicate over the actor's resolved roles
//! and permissions and the target's attributes. Callers turn `false` into
//! an access-denied response.
//!
//! Two policy flavors coexist and are declared per resource in
//! [`POLICY_TABLE`]:
//!
//! - **permissive**: exact permission, the resource's `.manage` permission,
//!   or membership in `admin` / `super_admin`
//! - **strict**: exact permission only

pub mod content;
pub mod menu;
pub mod permission;
pub mod registry;
pub mod role;
pub mod user;
pub mod user_role;

pub use content::ContentPolicy;
pub use menu::MenuPolicy;
pub use permission::PermissionPolicy;
pub use role::RolePolicy;
pub use user::UserPolicy;
pub use user_role::UserRolePolicy;

use crate::models::{Actor, PermissionName, RoleName};
use serde::Serialize;

/// Resource families that carry policies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Content,
    Menus,
    Roles,
    Permissions,
    Users,
    UserRoles,
}

impl Resource {
    /// Permission name prefix
    pub fn as_str(self) -> &'static str {
        match self {
            Resource::Content => "content",
            Resource::Menus => "menus",
            Resource::Roles => "roles",
            Resource::Permissions => "permissions",
            Resource::Users => "users",
            Resource::UserRoles => "user_roles",
        }
    }

    pub fn flavor(self) -> Flavor {
        POLICY_TABLE
            .iter()
            .find(|rule| rule.resource == self)
            .map(|rule| rule.flavor)
            .unwrap_or(Flavor::Strict)
    }

    /// The exact permission that grants `action` on this resource
    pub fn permission_for(self, action: Action) -> PermissionName {
        PermissionName::scoped(self.as_str(), action.permission_suffix())
    }

    /// Coarse `<resource>.manage` permission
    pub fn manage_permission(self) -> PermissionName {
        PermissionName::scoped(self.as_str(), "manage")
    }
}

/// Generic actions shared by every resource, plus the two resource-specific ones
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    ViewAny,
    View,
    Create,
    Update,
    Delete,
    Restore,
    ForceDelete,
    /// Content only
    Publish,
    /// Menus only
    Reorder,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Action::ViewAny => "view_any",
            Action::View => "view",
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::Restore => "restore",
            Action::ForceDelete => "force_delete",
            Action::Publish => "publish",
            Action::Reorder => "reorder",
        }
    }

    /// `view_any` and `view` share one permission
    fn permission_suffix(self) -> &'static str {
        match self {
            Action::ViewAny | Action::View => "view",
            other => other.as_str(),
        }
    }
}

/// Authorization flavor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Flavor {
    Permissive,
    Strict,
}

const ADMIN_TIER: &[RoleName] = &[RoleName::ADMIN, RoleName::SUPER_ADMIN];
const NO_ROLES: &[RoleName] = &[];

impl Flavor {
    /// Whether `<resource>.manage` stands in for every scoped permission
    pub fn grants_manage(self) -> bool {
        matches!(self, Flavor::Permissive)
    }

    /// Roles that pass every check regardless of permissions
    pub fn bypass_roles(self) -> &'static [RoleName] {
        match self {
            Flavor::Permissive => ADMIN_TIER,
            Flavor::Strict => NO_ROLES,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PolicyRule {
    pub resource: Resource,
    pub flavor: Flavor,
}

/// Declared flavor per resource
pub const POLICY_TABLE: &[PolicyRule] = &[
    PolicyRule { resource: Resource::Content, flavor: Flavor::Permissive },
    PolicyRule { resource: Resource::Menus, flavor: Flavor::Permissive },
    PolicyRule { resource: Resource::Roles, flavor: Flavor::Strict },
    PolicyRule { resource: Resource::Permissions, flavor: Flavor::Strict },
    PolicyRule { resource: Resource::Users, flavor: Flavor::Strict },
    PolicyRule { resource: Resource::UserRoles, flavor: Flavor::Strict },
];

/// Apply the resource's flavor to one action
pub fn evaluate(actor: &Actor, resource: Resource, action: Action) -> bool {
    let flavor = resource.flavor();

    actor.has_permission(&resource.permission_for(action))
        || (flavor.grants_manage() && actor.has_permission(&resource.manage_permission()))
        || actor.has_any_role(flavor.bypass_roles())
}

/// Standard per-resource policy surface.
///
/// Defaults apply [`evaluate`]; implementations override the actions whose
/// outcome also depends on the target.
pub trait Policy {
    const RESOURCE: Resource;
    type Target;

    fn allows(actor: &Actor, action: Action) -> bool {
        evaluate(actor, Self::RESOURCE, action)
    }

    fn view_any(actor: &Actor) -> bool {
        Self::allows(actor, Action::ViewAny)
    }

    fn view(actor: &Actor, _target: &Self::Target) -> bool {
        Self::allows(actor, Action::View)
    }

    fn create(actor: &Actor) -> bool {
        Self::allows(actor, Action::Create)
    }

    fn update(actor: &Actor, _target: &Self::Target) -> bool {
        Self::allows(actor, Action::Update)
    }

    fn delete(actor: &Actor, _target: &Self::Target) -> bool {
        Self::allows(actor, Action::Delete)
    }

    fn restore(actor: &Actor, _target: &Self::Target) -> bool {
        Self::allows(actor, Action::Restore)
    }

    fn force_delete(actor: &Actor, _target: &Self::Target) -> bool {
        Self::allows(actor, Action::ForceDelete)
    }
}
