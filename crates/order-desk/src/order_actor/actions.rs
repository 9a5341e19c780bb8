//! Custom actions for the Order actor.
//!
//! These actions are handled by
//! [`ActorEntity::handle_action`](resource_actor::ActorEntity::handle_action) on a pending
//! [`Order`](crate::model::Order).

/// Custom actions for Order entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderAction {
    /// Marks the order completed and stamps `completedAt`.
    ///
    /// The completed order reports itself archived, so the actor moves it into the history
    /// partition before replying. The action result is the completed record.
    Complete,
}
