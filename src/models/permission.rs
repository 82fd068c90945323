//! Permission domain models

use super::NameError;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use uuid::Uuid;

/// Allowed shape of a permission name
pub static PERMISSION_NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z0-9._-]+$").unwrap());

/// A validated permission name such as `content.update`.
///
/// Names are checked once when they enter the system; everything past that
/// point compares typed values instead of raw strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PermissionName(Cow<'static, str>);

impl PermissionName {
    pub const CONTENT_MANAGE: Self = Self::known("content.manage");
    pub const MENUS_MANAGE: Self = Self::known("menus.manage");

    pub const ROLES_CREATE: Self = Self::known("roles.create");
    pub const ROLES_DELETE: Self = Self::known("roles.delete");
    pub const ROLES_ASSIGN_PERMISSIONS: Self = Self::known("roles.assign_permissions");

    pub const PERMISSIONS_CREATE: Self = Self::known("permissions.create");
    pub const PERMISSIONS_DELETE: Self = Self::known("permissions.delete");

    pub const USER_ROLES_VIEW: Self = Self::known("user_roles.view");
    pub const USER_ROLES_ASSIGN: Self = Self::known("user_roles.assign");
    pub const USER_ROLES_REMOVE: Self = Self::known("user_roles.remove");

    pub const USERS_DELETE: Self = Self::known("users.delete");

    pub const ADMIN_SETTINGS: Self = Self::known("admin.settings");
    pub const ADMIN_MAINTENANCE: Self = Self::known("admin.maintenance");

    const ALLOWED: &'static str = "lowercase letters, digits, dots, hyphens and underscores";

    const fn known(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// Parse and validate a permission name
    pub fn parse(name: impl Into<String>) -> Result<Self, NameError> {
        let name = name.into();
        if name.is_empty() {
            return Err(NameError::Empty);
        }
        if !PERMISSION_NAME_RE.is_match(&name) {
            return Err(NameError::Pattern {
                value: name,
                allowed: Self::ALLOWED,
            });
        }
        Ok(Self(Cow::Owned(name)))
    }

    /// `<prefix>.<action>` built from two fixed identifiers
    pub(crate) fn scoped(prefix: &'static str, action: &'static str) -> Self {
        Self(Cow::Owned(format!("{}.{}", prefix, action)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Group label: the segment before the first dot
    pub fn group(&self) -> &str {
        self.0.split('.').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for PermissionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for PermissionName {
    type Error = NameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<PermissionName> for String {
    fn from(name: PermissionName) -> Self {
        name.0.into_owned()
    }
}

/// Permission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Permission {
    pub id: Uuid,
    pub name: PermissionName,
    pub display_name: String,
    pub description: Option<String>,
    pub group: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Permission {
    pub fn new(name: PermissionName, display_name: impl Into<String>, description: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            group: name.group().to_string(),
            name,
            display_name: display_name.into(),
            description,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Create or update permission request
#[derive(Debug, Deserialize, validator::Validate)]
pub struct PermissionRequest {
    #[validate(
        length(min = 1, max = 255, message = "The name field is required."),
        regex(
            path = *PERMISSION_NAME_RE,
            message = "The name may only contain lowercase letters, digits, dots, hyphens and underscores."
        )
    )]
    pub name: String,
    #[validate(length(min = 1, max = 255, message = "The display name field is required."))]
    pub display_name: String,
    #[validate(length(max = 1000, message = "The description may not be greater than 1000 characters."))]
    pub description: Option<String>,
    /// Defaults to the name's group label
    #[validate(length(min = 1, max = 255, message = "The group may not be empty."))]
    pub group: Option<String>,
}
