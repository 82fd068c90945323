//! Content policy (permissive flavor)

use super::{Action, Policy, Resource};
use crate::models::{Actor, Content};

pub struct ContentPolicy;

impl Policy for ContentPolicy {
    const RESOURCE: Resource = Resource::Content;
    type Target = Content;
}

impl ContentPolicy {
    pub fn publish(actor: &Actor, _content: &Content) -> bool {
        Self::allows(actor, Action::Publish)
    }

    /// Withdrawing a node is the reverse of publishing it
    pub fn archive(actor: &Actor, content: &Content) -> bool {
        Self::publish(actor, content)
    }
}
