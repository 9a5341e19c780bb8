//! # Menu Client
//!
//! Provides a high‑level API for interacting with the `MenuItem` actor.
//! It wraps a `ResourceClient<MenuItem>` and exposes domain‑specific methods.
use crate::menu_actor::MenuError;
use crate::model::{MenuItem, MenuItemId, MenuItemInput};
use async_trait::async_trait;
use resource_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, info, instrument};

/// Client for interacting with the Menu actor.
#[derive(Clone)]
pub struct MenuClient {
    inner: ResourceClient<MenuItem>,
}

impl MenuClient {
    pub fn new(inner: ResourceClient<MenuItem>) -> Self {
        Self { inner }
    }

    /// Every menu item, by ascending id.
    #[instrument(skip(self))]
    pub async fn list_items(&self) -> Result<Vec<MenuItem>, MenuError> {
        self.list().await
    }

    #[instrument(skip(self, input))]
    pub async fn add_item(&self, input: MenuItemInput) -> Result<MenuItem, MenuError> {
        debug!(?input, "add_item called");
        self.inner.create(input).await.map_err(Self::map_error)
    }

    /// Merges the present fields of `input` into the item.
    #[instrument(skip(self, input))]
    pub async fn update_item(
        &self,
        id: MenuItemId,
        input: MenuItemInput,
    ) -> Result<MenuItem, MenuError> {
        debug!(?input, "update_item called");
        self.inner.update(id, input).await.map_err(Self::map_error)
    }

    /// Removes the item. Removing an item that is not on the menu is not an error.
    #[instrument(skip(self))]
    pub async fn remove_item(&self, id: MenuItemId) -> Result<(), MenuError> {
        match self.inner.delete(id).await.map_err(Self::map_error)? {
            Some(item) => info!(name = %item.name, "Menu item removed"),
            None => debug!("Menu item already absent"),
        }
        Ok(())
    }
}

#[async_trait]
impl ActorClient<MenuItem> for MenuClient {
    type Error = MenuError;

    fn inner(&self) -> &ResourceClient<MenuItem> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.downcast_entity::<MenuError>() {
            Ok(domain) => domain,
            Err(FrameworkError::NotFound(id)) => MenuError::NotFound(id),
            Err(FrameworkError::Storage(err)) => MenuError::DatabaseError(err.to_string()),
            Err(other) => MenuError::ActorCommunicationError(other.to_string()),
        }
    }
}
