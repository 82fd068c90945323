//! Role domain models

use super::{NameError, PermissionName};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use uuid::Uuid;

/// Allowed shape of a role name
pub static ROLE_NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z0-9_-]+$").unwrap());

/// A validated role name such as `super_admin`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RoleName(Cow<'static, str>);

impl RoleName {
    pub const SUPER_ADMIN: Self = Self(Cow::Borrowed("super_admin"));
    pub const ADMIN: Self = Self(Cow::Borrowed("admin"));
    pub const EDITOR: Self = Self(Cow::Borrowed("editor"));

    const ALLOWED: &'static str = "lowercase letters, digits, hyphens and underscores";

    /// Parse and validate a role name
    pub fn parse(name: impl Into<String>) -> Result<Self, NameError> {
        let name = name.into();
        if name.is_empty() {
            return Err(NameError::Empty);
        }
        if !ROLE_NAME_RE.is_match(&name) {
            return Err(NameError::Pattern {
                value: name,
                allowed: Self::ALLOWED,
            });
        }
        Ok(Self(Cow::Owned(name)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for RoleName {
    type Error = NameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<RoleName> for String {
    fn from(name: RoleName) -> Self {
        name.0.into_owned()
    }
}

/// Role
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    pub id: Uuid,
    pub name: RoleName,
    pub display_name: String,
    pub description: Option<String>,
    /// System roles can never be updated, deleted, or have permissions changed
    pub is_system: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Role {
    pub fn new(name: RoleName, display_name: impl Into<String>, is_system: bool) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            display_name: display_name.into(),
            description: None,
            is_system,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Role together with its permission names
#[derive(Debug, Clone, Serialize)]
pub struct RoleWithPermissions {
    #[serde(flatten)]
    pub role: Role,
    pub permissions: Vec<PermissionName>,
}

/// Create or update role request
#[derive(Debug, Deserialize, validator::Validate)]
pub struct RoleRequest {
    #[validate(
        length(min = 1, max = 255, message = "The name field is required."),
        regex(
            path = *ROLE_NAME_RE,
            message = "The name may only contain lowercase letters, digits, hyphens and underscores."
        )
    )]
    pub name: String,
    #[validate(length(min = 1, max = 255, message = "The display name field is required."))]
    pub display_name: String,
    #[validate(length(max = 1000, message = "The description may not be greater than 1000 characters."))]
    pub description: Option<String>,
}

/// How an assignment combines with the role's current permission set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignMode {
    /// End state equals the requested set
    #[default]
    Replace,
    /// Requested permissions are added to the current set
    Augment,
}

/// Assign permissions to role request
#[derive(Debug, Deserialize)]
pub struct AssignPermissionsRequest {
    pub permission_ids: Vec<Uuid>,
    #[serde(default)]
    pub mode: AssignMode,
}
