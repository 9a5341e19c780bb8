//! # Menu Actor
//!
//! This module implements the Menu resource actor: plain CRUD over [`MenuItem`] records, with
//! no custom actions and nothing ever archived.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](resource_actor::ActorEntity) implementation for [`MenuItem`]
//! - [`error`] - [`MenuError`] type for type-safe error handling
//! - [`new()`] / [`open()`] - Factory functions that create the actor and client
//!
//! ## Usage
//!
//! ```rust
//! use order_desk::menu_actor;
//! use order_desk::model::MenuItemInput;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, client) = menu_actor::new(8);
//!     tokio::spawn(actor.run(()));
//!
//!     let tea = client.add_item(MenuItemInput::named("Masala Tea", 20.0)).await?;
//!     assert_eq!(client.list_items().await?, vec![tea]);
//!     Ok(())
//! }
//! ```

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::MenuClient;
use crate::model::MenuItem;
use resource_actor::{JsonFile, ResourceActor, StoreError, Storage, Volatile};
use std::path::Path;

/// File name of the menu snapshot inside the data directory.
pub const MENU_FILE: &str = "menu.json";

/// Creates a new in-memory Menu actor and its client.
pub fn new(buffer: usize) -> (ResourceActor<MenuItem>, MenuClient) {
    let (actor, generic_client) = ResourceActor::new(buffer);
    (actor, MenuClient::new(generic_client))
}

/// Creates a Menu actor backed by `menu.json` in `data_dir`, loading what is already there.
pub async fn open(
    buffer: usize,
    data_dir: &Path,
) -> Result<(ResourceActor<MenuItem>, MenuClient), StoreError> {
    let storage = Storage::new(JsonFile::new(data_dir.join(MENU_FILE)), Volatile);
    let (actor, generic_client) = ResourceActor::open(buffer, storage).await?;
    Ok((actor, MenuClient::new(generic_client)))
}
