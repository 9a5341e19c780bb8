//! # ActorEntity Trait
//!
//! The `ActorEntity` trait defines the contract that every resource (menu items, orders, …)
//! must implement to be managed by the generic `ResourceActor`. It specifies associated types
//! for IDs, DTOs, actions, context and errors, and provides lifecycle hooks (`on_create`,
//! `on_update`, `on_delete`, `handle_action`).
//!
//! # Live and Archived Records
//! Every actor keeps two partitions: **live** records, which accept updates and actions, and
//! **archived** records, which are read-only. After a successful action the actor asks
//! [`ActorEntity::is_archived`]; when it answers `true` the record is moved from the live
//! partition into the archive inside the same message, so no request ever sees it in both
//! or in neither.
//!
//! # Provided Methods (Hooks)
//! - [`ActorEntity::on_create`]
//! - [`ActorEntity::on_delete`]
//! - [`ActorEntity::is_archived`]
//!
//! The default implementations do nothing (`Ok(())` / `false`).

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any resource entity must implement to be managed by ResourceActor.
///
/// # Async & Context
/// This trait is `#[async_trait]` to allow asynchronous operations in hooks. The `Context`
/// type is injected into every hook, so dependencies can be passed to `run()` instead of
/// `new()`.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The unique identifier for this entity.
    /// Converts to and from `u32` so the actor can hand out sequential IDs and resume the
    /// sequence after reloading persisted records.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + From<u32> + Into<u32>;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// The data required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// Enum representing resource-specific operations (e.g. `Complete`).
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// The error type for this entity.
    ///
    /// One enum per actor rather than one per message: clients match on a single type, at the
    /// cost of every operation sharing the union of failure modes.
    type Error: std::error::Error + Send + Sync + 'static;

    /// The identifier this record was created with.
    fn id(&self) -> Self::Id;

    /// Construct the full Entity from the ID and Payload.
    /// This is called synchronously before `on_create`; validation belongs here.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    // --- Lifecycle Hooks (Async) ---

    /// Called immediately after the entity is created and initialized.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when an update request is received.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called immediately before the entity is removed from the system.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler (Async) ---

    /// Handle a custom resource-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;

    /// Whether this record belongs in the archive partition.
    fn is_archived(&self) -> bool {
        false
    }
}
