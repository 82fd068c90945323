//! User account policy (strict flavor)
//!
//! Admin-tier accounts can only be edited by a super admin or by their owner.
//! No one deletes their own account or a super admin's.

use super::{Action, Policy, Resource};
use crate::models::Actor;

pub struct UserPolicy;

impl Policy for UserPolicy {
    const RESOURCE: Resource = Resource::Users;
    /// The account being read or changed, with its roles resolved
    type Target = Actor;

    fn update(actor: &Actor, target: &Actor) -> bool {
        Self::allows(actor, Action::Update)
            && (actor.id == target.id || actor.is_super_admin() || !target.is_admin_tier())
    }

    fn delete(actor: &Actor, target: &Actor) -> bool {
        Self::allows(actor, Action::Delete) && actor.id != target.id && !target.is_super_admin()
    }
}
