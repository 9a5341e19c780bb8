//! Entity trait implementation for the Order domain type.
//!
//! This module contains the [`ActorEntity`] trait implementation
//! that enables [`Order`] to be managed by the generic [`resource_actor::ResourceActor`].
//!
//! See the trait implementation on [`Order`] for method documentation.

use super::actions::OrderAction;
use super::error::OrderError;
use crate::model::{Order, OrderCreate, OrderId, OrderStatus};
use async_trait::async_trait;
use chrono::Utc;
use resource_actor::ActorEntity;
use std::convert::Infallible;

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = Infallible; // Orders are never edited, only completed
    type Action = OrderAction;
    type ActionResult = Order;
    type Context = ();
    type Error = OrderError;

    fn id(&self) -> OrderId {
        self.id
    }

    /// Validates the payload and creates a pending Order stamped with the current time.
    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, Self::Error> {
        Order::from_params(id, params, Utc::now())
    }

    async fn on_update(&mut self, update: Infallible, _ctx: &()) -> Result<(), Self::Error> {
        match update {}
    }

    /// Handles custom actions for the Order entity.
    ///
    /// # Actions
    /// - `Complete`: pending → completed, returns the completed record
    async fn handle_action(
        &mut self,
        action: OrderAction,
        _ctx: &(),
    ) -> Result<Order, Self::Error> {
        match action {
            OrderAction::Complete => {
                if self.is_completed() {
                    return Err(OrderError::NotFound(self.id.to_string()));
                }
                self.status = OrderStatus::Completed;
                self.completed_at = Some(Utc::now());
                Ok(self.clone())
            }
        }
    }

    fn is_archived(&self) -> bool {
        self.is_completed()
    }
}
