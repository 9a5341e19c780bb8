//! Entity trait implementation for the menu.
//!
//! This module contains the [`ActorEntity`] trait implementation
//! that enables [`MenuItem`] to be managed by the generic [`resource_actor::ResourceActor`].

use super::error::MenuError;
use crate::model::{MenuItem, MenuItemId, MenuItemInput};
use async_trait::async_trait;
use resource_actor::ActorEntity;
use std::convert::Infallible;

#[async_trait]
impl ActorEntity for MenuItem {
    type Id = MenuItemId;
    type Create = MenuItemInput;
    type Update = MenuItemInput;
    type Action = Infallible;
    type ActionResult = ();
    type Context = ();
    type Error = MenuError;

    fn id(&self) -> MenuItemId {
        self.id
    }

    /// Creates a new MenuItem; the name is required and the price coerced.
    fn from_create_params(id: MenuItemId, params: MenuItemInput) -> Result<Self, Self::Error> {
        MenuItem::from_input(id, params)
    }

    /// Merges the fields present in the update.
    async fn on_update(&mut self, update: MenuItemInput, _ctx: &()) -> Result<(), Self::Error> {
        self.apply(update)
    }

    async fn handle_action(&mut self, action: Infallible, _ctx: &()) -> Result<(), Self::Error> {
        match action {}
    }
}
