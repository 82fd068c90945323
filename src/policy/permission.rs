//! Permission management policy (strict flavor)

use super::{Policy, Resource};
use crate::models::Permission;

pub struct PermissionPolicy;

impl Policy for PermissionPolicy {
    const RESOURCE: Resource = Resource::Permissions;
    type Target = Permission;
}
