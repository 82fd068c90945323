//! Menu domain models

use super::{Actor, Content, PermissionName};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Menu node. Hierarchy is expressed through `parent_id`; siblings are
/// ordered by `order`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Menu {
    pub id: Uuid,
    pub parent_id: Option<Uuid>,
    pub title: String,
    pub url: Option<String>,
    pub order: i32,
    pub is_active: bool,
    pub content_id: Option<Uuid>,
    pub required_permission: Option<PermissionName>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Menu {
    /// Evaluated per node; a parent's outcome is never inherited.
    ///
    /// `linked` is the content behind `content_id`, if it could be found. A
    /// link that does not resolve makes the node inaccessible.
    pub fn is_accessible_by(&self, actor: &Actor, linked: Option<&Content>) -> bool {
        if !self.is_active {
            return false;
        }
        if let Some(permission) = &self.required_permission {
            if !actor.has_permission(permission) {
                return false;
            }
        }
        match (self.content_id, linked) {
            (None, _) => true,
            (Some(id), Some(content)) if content.id == id => content.is_accessible_by(actor),
            (Some(_), _) => false,
        }
    }
}

/// Create menu request
#[derive(Debug, Deserialize, validator::Validate)]
pub struct CreateMenuRequest {
    pub parent_id: Option<Uuid>,
    #[validate(length(min = 1, max = 255, message = "The title field is required."))]
    pub title: String,
    #[validate(length(max = 2048, message = "The url may not be greater than 2048 characters."))]
    pub url: Option<String>,
    #[serde(default)]
    pub order: i32,
    #[serde(default = "default_active")]
    pub is_active: bool,
    pub content_id: Option<Uuid>,
    pub required_permission: Option<PermissionName>,
}

fn default_active() -> bool {
    true
}

/// New position of one menu node
#[derive(Debug, Clone, Deserialize)]
pub struct MenuPosition {
    pub id: Uuid,
    pub parent_id: Option<Uuid>,
    pub order: i32,
}

/// Reorder menus request
#[derive(Debug, Deserialize)]
pub struct ReorderMenusRequest {
    pub items: Vec<MenuPosition>,
}
