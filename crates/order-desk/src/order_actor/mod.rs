//! # Order Actor
//!
//! This module implements the Order resource actor. It owns both the Order Store (pending
//! orders, the actor's live partition) and the Order History Store (completed orders, the
//! archive partition).
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](resource_actor::ActorEntity) implementation for [`Order`]
//! - [`error`] - [`OrderError`] type for type-safe error handling
//! - [`actions`] - [`OrderAction`] for the pending → completed transition
//! - [`new()`] / [`open()`] - Factory functions that create the actor and client
//!
//! ## Completion
//!
//! `OrderAction::Complete` runs inside the actor's message loop, and the relocation into
//! history happens in the same message. Two concurrent completions of one order therefore
//! serialize: the first moves it, the second no longer finds it among the pending orders and
//! fails with [`OrderError::NotFound`].
//!
//! ```rust
//! use order_desk::order_actor::{self, OrderError};
//! use order_desk::model::OrderCreate;
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, client) = order_actor::new(8);
//!     tokio::spawn(actor.run(()));
//!
//!     let params: OrderCreate = serde_json::from_value(json!({
//!         "name": "Asha", "phone": "9999999999", "tableNo": "4",
//!         "items": [{ "name": "Tea", "price": 20, "quantity": 2 }], "total": 40
//!     }))?;
//!     let order = client.place_order(params).await?;
//!
//!     client.complete(order.id).await?;
//!     assert!(matches!(client.complete(order.id).await, Err(OrderError::NotFound(_))));
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::OrderClient;
use crate::model::Order;
use resource_actor::{JsonFile, ResourceActor, StoreError, Storage};
use std::path::Path;

/// File name of the pending-order snapshot inside the data directory.
pub const ORDERS_FILE: &str = "orders.json";
/// File name of the order-history snapshot inside the data directory.
pub const HISTORY_FILE: &str = "orderhistory.json";

/// Creates a new in-memory Order actor and its client.
pub fn new(buffer: usize) -> (ResourceActor<Order>, OrderClient) {
    let (actor, generic_client) = ResourceActor::new(buffer);
    (actor, OrderClient::new(generic_client))
}

/// Creates an Order actor backed by `orders.json` and `orderhistory.json` in `data_dir`.
pub async fn open(
    buffer: usize,
    data_dir: &Path,
) -> Result<(ResourceActor<Order>, OrderClient), StoreError> {
    let storage = Storage::new(
        JsonFile::new(data_dir.join(ORDERS_FILE)),
        JsonFile::new(data_dir.join(HISTORY_FILE)),
    );
    let (actor, generic_client) = ResourceActor::open(buffer, storage).await?;
    Ok((actor, OrderClient::new(generic_client)))
}
