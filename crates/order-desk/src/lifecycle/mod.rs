//! # System Lifecycle & Orchestration
//!
//! This module manages the runtime lifecycle of the restaurant backend: starting the Menu and
//! Order actors, handing their clients to the HTTP layer, and shutting everything down in
//! order.
//!
//! ## The RestaurantSystem Pattern
//!
//! [`RestaurantSystem`] is the conductor:
//!
//! ```rust,ignore
//! impl RestaurantSystem {
//!     pub fn new(buffer: usize) -> Self {
//!         // 1. Create actors
//!         let (menu_actor, menu_client) = menu_actor::new(buffer);
//!         let (order_actor, order_client) = order_actor::new(buffer);
//!
//!         // 2. Start actors (neither depends on the other, so Context = ())
//!         let menu_handle = tokio::spawn(menu_actor.run(()));
//!         let order_handle = tokio::spawn(order_actor.run(()));
//!
//!         Self { menu_client, order_client, handles: vec![menu_handle, order_handle] }
//!     }
//! }
//! ```
//!
//! [`RestaurantSystem::open`] does the same with file-backed stores, loading whatever the data
//! directory already holds before any request is served.
//!
//! ## Graceful Shutdown
//!
//! 1. **Stop accepting requests** - [`shutdown_signal`] resolves on Ctrl+C or SIGTERM and the
//!    server drains in-flight requests
//! 2. **Drop all clients** - Closes the sender side of every actor channel
//! 3. **Actors detect closure** - `receiver.recv()` returns `None`, the loop logs its final
//!    sizes and exits
//! 4. **Await completion** - Wait for all actor tasks to finish
//!
//! Every accepted mutation was already written before its reply was sent, so there is no
//! flush step.
//!
//! ## Observability & Tracing
//!
//! The [`setup_tracing`] function initializes structured logging for the entire system.
//!
//! ```bash
//! RUST_LOG=info cargo run      # Compact logs
//! RUST_LOG=debug cargo run     # Full payloads
//! ```

pub mod restaurant;
pub mod signal;
pub mod tracing;

pub use self::tracing::*;
pub use restaurant::*;
pub use signal::*;
