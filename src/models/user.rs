//! User domain models

use super::{PermissionName, RoleName};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

/// User account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(id: Uuid, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            created_at: Utc::now(),
        }
    }
}

/// A user with roles and effective permissions resolved.
///
/// Effective permissions are the union of the permissions of every assigned
/// role. Role-based bypasses are applied by the policies, not folded in here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Actor {
    pub id: Uuid,
    roles: BTreeSet<RoleName>,
    permissions: BTreeSet<PermissionName>,
}

impl Actor {
    pub fn new(
        id: Uuid,
        roles: impl IntoIterator<Item = RoleName>,
        permissions: impl IntoIterator<Item = PermissionName>,
    ) -> Self {
        Self {
            id,
            roles: roles.into_iter().collect(),
            permissions: permissions.into_iter().collect(),
        }
    }

    pub fn has_role(&self, role: &RoleName) -> bool {
        self.roles.contains(role)
    }

    pub fn has_any_role(&self, roles: &[RoleName]) -> bool {
        roles.iter().any(|r| self.roles.contains(r))
    }

    pub fn has_permission(&self, permission: &PermissionName) -> bool {
        self.permissions.contains(permission)
    }

    pub fn is_super_admin(&self) -> bool {
        self.has_role(&RoleName::SUPER_ADMIN)
    }

    /// Holds `admin` or `super_admin`
    pub fn is_admin_tier(&self) -> bool {
        self.has_any_role(&[RoleName::ADMIN, RoleName::SUPER_ADMIN])
    }

    pub fn roles(&self) -> impl Iterator<Item = &RoleName> {
        self.roles.iter()
    }

    pub fn permissions(&self) -> impl Iterator<Item = &PermissionName> {
        self.permissions.iter()
    }
}

/// Create user request
#[derive(Debug, Deserialize, validator::Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 255, message = "The name field is required."))]
    pub name: String,
    #[validate(email(message = "The email must be a valid email address."))]
    pub email: String,
}

/// Update user request
#[derive(Debug, Deserialize, validator::Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 255, message = "The name field is required."))]
    pub name: Option<String>,
    #[validate(email(message = "The email must be a valid email address."))]
    pub email: Option<String>,
}

/// Assign role request
#[derive(Debug, Deserialize)]
pub struct AssignRoleRequest {
    pub role_id: Uuid,
}

/// Sync roles request
#[derive(Debug, Deserialize)]
pub struct SyncRolesRequest {
    pub role_ids: Vec<Uuid>,
}

/// Roles held by a user
#[derive(Debug, Serialize)]
pub struct UserRolesResponse {
    pub user_id: Uuid,
    pub roles: Vec<RoleSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoleSummary {
    pub id: Uuid,
    pub name: RoleName,
    pub display_name: String,
    pub is_system: bool,
}
