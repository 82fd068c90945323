//! Permission registry: the canonical catalogue seeded into the store and
//! the list of names only a super admin may grant.

use crate::models::PermissionName;

/// (name, display name)
pub const CATALOGUE: &[(&str, &str)] = &[
    ("content.view", "View content"),
    ("content.create", "Create content"),
    ("content.update", "Update content"),
    ("content.delete", "Delete content"),
    ("content.restore", "Restore content"),
    ("content.force_delete", "Permanently delete content"),
    ("content.publish", "Publish content"),
    ("content.manage", "Manage content"),
    ("menus.view", "View menus"),
    ("menus.create", "Create menus"),
    ("menus.update", "Update menus"),
    ("menus.delete", "Delete menus"),
    ("menus.restore", "Restore menus"),
    ("menus.force_delete", "Permanently delete menus"),
    ("menus.reorder", "Reorder menus"),
    ("menus.manage", "Manage menus"),
    ("roles.view", "View roles"),
    ("roles.create", "Create roles"),
    ("roles.update", "Update roles"),
    ("roles.delete", "Delete roles"),
    ("roles.restore", "Restore roles"),
    ("roles.force_delete", "Permanently delete roles"),
    ("roles.assign_permissions", "Assign permissions to roles"),
    ("permissions.view", "View permissions"),
    ("permissions.create", "Create permissions"),
    ("permissions.update", "Update permissions"),
    ("permissions.delete", "Delete permissions"),
    ("user_roles.view", "View user roles"),
    ("user_roles.assign", "Assign roles to users"),
    ("user_roles.remove", "Remove roles from users"),
    ("users.view", "View users"),
    ("users.create", "Create users"),
    ("users.update", "Update users"),
    ("users.delete", "Delete users"),
    ("admin.settings", "Manage system settings"),
    ("admin.maintenance", "Run maintenance tasks"),
];

/// Names only a super admin may grant to a role
pub const RESTRICTED: &[PermissionName] = &[
    PermissionName::ROLES_CREATE,
    PermissionName::ROLES_DELETE,
    PermissionName::USERS_DELETE,
    PermissionName::PERMISSIONS_CREATE,
    PermissionName::PERMISSIONS_DELETE,
    PermissionName::ADMIN_SETTINGS,
    PermissionName::ADMIN_MAINTENANCE,
];

pub fn is_restricted(name: &PermissionName) -> bool {
    RESTRICTED.contains(name)
}

/// Catalogue names as typed values
pub fn catalogue() -> impl Iterator<Item = (PermissionName, &'static str)> {
    CATALOGUE.iter().filter_map(|(name, display)| {
        PermissionName::parse(*name).ok().map(|name| (name, *display))
    })
}

/// Catalogue names granted to the seeded `editor` role
pub fn editor_defaults() -> impl Iterator<Item = PermissionName> {
    catalogue()
        .map(|(name, _)| name)
        .filter(|name| matches!(name.group(), "content" | "menus"))
        .filter(|name| !name.as_str().ends_with(".force_delete"))
}
