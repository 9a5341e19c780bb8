//! # Order Client
//!
//! Provides a high‑level API for interacting with the `Order` actor.
//! It wraps a `ResourceClient<Order>` and turns the actor's live and archive partitions into
//! the pending-order and order-history views.
use crate::model::{LocatedOrder, Location, Order, OrderCreate, OrderId};
use crate::order_actor::{OrderAction, OrderError};
use async_trait::async_trait;
use resource_actor::{ActorClient, FrameworkError, Placement, ResourceClient};
use tracing::{debug, info, instrument};

/// Client for interacting with the Order actor.
///
/// Validation happens in the Order actor's `from_create_params`; this client only maps
/// errors and orders the listings.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, params))]
    pub async fn place_order(&self, params: OrderCreate) -> Result<Order, OrderError> {
        debug!(?params, "place_order called");
        let order = self.inner.create(params).await.map_err(Self::map_error)?;
        info!(order_id = %order.id, table_no = order.table_no, "Order placed");
        Ok(order)
    }

    /// Pending orders, oldest first.
    #[instrument(skip(self))]
    pub async fn pending(&self) -> Result<Vec<Order>, OrderError> {
        let mut orders = self.list().await?;
        orders.sort_by(|a, b| a.timestamp.cmp(&b.timestamp).then(a.id.cmp(&b.id)));
        Ok(orders)
    }

    /// Completes a pending order and returns it as stored in history.
    #[instrument(skip(self))]
    pub async fn complete(&self, id: OrderId) -> Result<Order, OrderError> {
        let order = self
            .inner
            .perform_action(id, OrderAction::Complete)
            .await
            .map_err(Self::map_error)?;
        info!(order_id = %order.id, "Order completed");
        Ok(order)
    }

    /// Completed orders, most recently completed first.
    #[instrument(skip(self))]
    pub async fn history(&self) -> Result<Vec<Order>, OrderError> {
        let mut orders = self.list_archived().await?;
        orders.sort_by(|a, b| b.completed_at.cmp(&a.completed_at).then(b.id.cmp(&a.id)));
        Ok(orders)
    }

    /// Finds an order in either store.
    #[instrument(skip(self))]
    pub async fn locate(&self, id: OrderId) -> Result<Option<LocatedOrder>, OrderError> {
        let found = self.lookup(id).await?;
        Ok(found.map(|placement| match placement {
            Placement::Live(order) => LocatedOrder {
                location: Location::Pending,
                order,
            },
            Placement::Archived(order) => LocatedOrder {
                location: Location::History,
                order,
            },
        }))
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.downcast_entity::<OrderError>() {
            Ok(domain) => domain,
            Err(FrameworkError::NotFound(id)) => OrderError::NotFound(id),
            Err(FrameworkError::Storage(err)) => OrderError::DatabaseError(err.to_string()),
            Err(other) => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Loose, OrderStatus};
    use chrono::{DateTime, Duration, Utc};
    use resource_actor::mock::{create_mock_client, expect_action, expect_create, MockClient};

    fn order(id: u32, placed: DateTime<Utc>, completed: Option<DateTime<Utc>>) -> Order {
        Order {
            id: OrderId(id),
            name: "Asha".to_string(),
            phone: "9999999999".to_string(),
            table_no: 4,
            items: vec![],
            total: 40.0,
            status: if completed.is_some() {
                OrderStatus::Completed
            } else {
                OrderStatus::Pending
            },
            timestamp: placed,
            completed_at: completed,
        }
    }

    fn ids(orders: &[Order]) -> Vec<u32> {
        orders.iter().map(|o| o.id.0).collect()
    }

    #[tokio::test]
    async fn test_pending_sorted_oldest_first() {
        let t0 = Utc::now();
        let mut mock = MockClient::<Order>::new();
        mock.expect_list().return_ok(vec![
            order(1, t0 + Duration::seconds(5), None),
            order(2, t0, None),
            order(3, t0 + Duration::seconds(5), None),
        ]);

        let client = OrderClient::new(mock.client());
        assert_eq!(ids(&client.pending().await.unwrap()), vec![2, 1, 3]);
    }

    #[tokio::test]
    async fn test_history_sorted_newest_completion_first() {
        let t0 = Utc::now();
        let mut mock = MockClient::<Order>::new();
        mock.expect_list_archived().return_ok(vec![
            order(1, t0, Some(t0 + Duration::minutes(9))),
            order(2, t0, Some(t0 + Duration::minutes(1))),
            order(3, t0, Some(t0 + Duration::minutes(9))),
        ]);

        let client = OrderClient::new(mock.client());
        assert_eq!(ids(&client.history().await.unwrap()), vec![3, 1, 2]);
    }

    #[tokio::test]
    async fn test_complete_unknown_order_is_not_found() {
        let mut mock = MockClient::<Order>::new();
        mock.expect_action(OrderId(42))
            .return_err(FrameworkError::NotFound("42".to_string()));

        let client = OrderClient::new(mock.client());
        let err = client.complete(OrderId(42)).await.unwrap_err();
        assert_eq!(err, OrderError::NotFound("42".to_string()));
    }

    #[tokio::test]
    async fn test_complete_sends_complete_action() {
        let (generic, mut receiver) = create_mock_client::<Order>(4);
        let client = OrderClient::new(generic);

        let task = tokio::spawn(async move { client.complete(OrderId(5)).await });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id, OrderId(5));
        assert_eq!(action, OrderAction::Complete);
        let now = Utc::now();
        responder.send(Ok(order(5, now, Some(now)))).unwrap();

        let completed = task.await.unwrap().unwrap();
        assert_eq!(completed.status, OrderStatus::Completed);
    }

    #[tokio::test]
    async fn test_place_order_forwards_params_and_maps_validation() {
        let (generic, mut receiver) = create_mock_client::<Order>(4);
        let client = OrderClient::new(generic);

        let task = tokio::spawn(async move {
            client
                .place_order(OrderCreate {
                    phone: Some(Loose::from("12345")),
                    ..OrderCreate::default()
                })
                .await
        });

        let (params, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected Create request");
        assert_eq!(params.phone, Some(Loose::from("12345")));
        responder
            .send(Err(FrameworkError::EntityError(Box::new(
                OrderError::validation("phone", "must be exactly 10 digits"),
            ))))
            .unwrap();

        let err = task.await.unwrap().unwrap_err();
        assert!(matches!(err, OrderError::Validation { field: "phone", .. }));
    }

    #[tokio::test]
    async fn test_locate_reports_store() {
        let now = Utc::now();
        let mut mock = MockClient::<Order>::new();
        mock.expect_lookup(OrderId(1))
            .return_ok(Some(Placement::Archived(order(1, now, Some(now)))));
        mock.expect_lookup(OrderId(2)).return_ok(None);

        let client = OrderClient::new(mock.client());
        let found = client.locate(OrderId(1)).await.unwrap().unwrap();
        assert_eq!(found.location, Location::History);
        assert!(client.locate(OrderId(2)).await.unwrap().is_none());
        mock.verify();
    }
}
