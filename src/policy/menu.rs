//! Menu policy (permissive flavor)

use super::{Action, Policy, Resource};
use crate::models::{Actor, Menu};

pub struct MenuPolicy;

impl Policy for MenuPolicy {
    const RESOURCE: Resource = Resource::Menus;
    type Target = Menu;
}

impl MenuPolicy {
    /// Reordering applies to the whole tree, not one node
    pub fn reorder(actor: &Actor) -> bool {
        Self::allows(actor, Action::Reorder)
    }
}
