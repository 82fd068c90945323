//! Content domain models

use super::{Actor, RoleName};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

/// Publication state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentStatus {
    Draft,
    Published,
    Archived,
}

/// Who may see a published node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "roles", rename_all = "lowercase")]
pub enum Visibility {
    Public,
    /// Holders of any listed role
    Roles(BTreeSet<RoleName>),
    /// Creator only
    Private,
}

/// Content node
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub body: String,
    pub status: ContentStatus,
    pub visibility: Visibility,
    pub created_by: Uuid,
    pub updated_by: Uuid,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Content {
    /// The creator always has access; anyone else only once the node is
    /// published and its visibility admits them.
    pub fn is_accessible_by(&self, actor: &Actor) -> bool {
        if self.created_by == actor.id {
            return true;
        }
        if self.status != ContentStatus::Published {
            return false;
        }
        match &self.visibility {
            Visibility::Public => true,
            Visibility::Roles(roles) => roles.iter().any(|r| actor.has_role(r)),
            Visibility::Private => false,
        }
    }
}

/// Create content request
#[derive(Debug, Deserialize, validator::Validate)]
pub struct CreateContentRequest {
    #[validate(length(min = 1, max = 255, message = "The title field is required."))]
    pub title: String,
    #[validate(length(min = 1, max = 255, message = "The slug field is required."))]
    pub slug: String,
    #[serde(default)]
    pub body: String,
    #[serde(default = "default_visibility")]
    pub visibility: Visibility,
}

/// Update content request
#[derive(Debug, Deserialize, validator::Validate)]
pub struct UpdateContentRequest {
    #[validate(length(min = 1, max = 255, message = "The title field is required."))]
    pub title: Option<String>,
    pub body: Option<String>,
    pub visibility: Option<Visibility>,
}

fn default_visibility() -> Visibility {
    Visibility::Public
}
