//! # Resource Actor
//!
//! This crate provides the building blocks for type-safe, concurrent stores of records built
//! on the **Actor Model**. Each resource type (menu items, orders, …) is owned by exactly one
//! actor task; every read and write is a message, handled one at a time.
//!
//! ## Architecture Overview
//!
//! The framework separates concerns into four layers:
//!
//! 1. **Entity Layer** ([`ActorEntity`]) - Domain records, validation and lifecycle hooks
//! 2. **Runtime Layer** ([`ResourceActor`]) - Message processing, ID assignment, archiving
//! 3. **Interface Layer** ([`ResourceClient`], [`ActorClient`]) - Type-safe communication
//! 4. **Persistence Layer** ([`Snapshot`], [`Storage`]) - Where each partition is written
//!
//! Business rules are written once in the entity trait; the framework handles the message
//! passing, rollback and state management.
//!
//! ## Defining an Entity
//!
//! ```rust
//! use resource_actor::{ActorEntity, ResourceActor};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)]
//! struct Ticket {
//!     id: u32,
//!     table: u32,
//!     served: bool,
//! }
//!
//! #[derive(Debug)] struct TicketCreate { table: u32 }
//! #[derive(Debug)] struct TicketUpdate { table: Option<u32> }
//! #[derive(Debug)] enum TicketAction { Serve }
//! #[derive(Debug, thiserror::Error)] #[error("{0}")] struct TicketError(String);
//!
//! #[async_trait]
//! impl ActorEntity for Ticket {
//!     type Id = u32;
//!     type Create = TicketCreate;
//!     type Update = TicketUpdate;
//!     type Action = TicketAction;
//!     type ActionResult = ();
//!     type Context = ();
//!     type Error = TicketError;
//!
//!     fn id(&self) -> u32 { self.id }
//!
//!     fn from_create_params(id: u32, params: TicketCreate) -> Result<Self, Self::Error> {
//!         if params.table == 0 {
//!             return Err(TicketError("table must be positive".into()));
//!         }
//!         Ok(Self { id, table: params.table, served: false })
//!     }
//!
//!     async fn on_update(&mut self, update: TicketUpdate, _: &()) -> Result<(), Self::Error> {
//!         if let Some(table) = update.table { self.table = table; }
//!         Ok(())
//!     }
//!
//!     async fn handle_action(&mut self, action: TicketAction, _: &()) -> Result<(), Self::Error> {
//!         match action {
//!             TicketAction::Serve => self.served = true,
//!         }
//!         Ok(())
//!     }
//!
//!     fn is_archived(&self) -> bool {
//!         self.served
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = ResourceActor::<Ticket>::new(10);
//!     tokio::spawn(actor.run(()));
//!
//!     let ticket = client.create(TicketCreate { table: 4 }).await.unwrap();
//!     client.perform_action(ticket.id, TicketAction::Serve).await.unwrap();
//!
//!     assert!(client.list().await.unwrap().is_empty());
//!     assert_eq!(client.list_archived().await.unwrap().len(), 1);
//! }
//! ```
//!
//! ## Context Injection Pattern
//!
//! Dependencies are injected at **runtime** via the `run()` method, not at construction time,
//! so actors can be created first and wired to each other afterwards.
//!
//! ## Archiving
//!
//! Every actor holds a live and an archived partition. An action that leaves a record with
//! [`ActorEntity::is_archived`] returning `true` moves it to the archive before the reply is
//! sent. Updates and actions only reach live records; lookups see both.
//!
//! ## Persistence
//!
//! [`ResourceActor::open`] loads both partitions from a [`Storage`] pair and writes every
//! accepted change back before replying. A failed write rolls the in-memory change back and
//! surfaces as [`FrameworkError::Storage`]. [`JsonFile`] keeps one JSON array per partition;
//! [`Volatile`] keeps nothing.
//!
//! ## Concurrency Model
//!
//! - Each actor runs in its own Tokio task
//! - Messages are processed **sequentially** within an actor (no locks needed)
//! - Multiple actors run in **parallel**
//!
//! ## Testing
//!
//! The [`mock`] module provides a **MockClient** that answers `ResourceClient<T>` requests from
//! a queue of expectations, so domain clients can be unit tested without spawning actors.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod store;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::{FrameworkError, StoreError};
pub use message::{Placement, ResourceRequest, Response};
pub use store::{JsonFile, Snapshot, Storage, Volatile};
