use crate::model::Loose;
use crate::order_actor::OrderError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub u32);

impl From<u32> for OrderId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<OrderId> for u32 {
    fn from(id: OrderId) -> Self {
        id.0
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Completed,
}

/// One cart line, copied from the menu at ordering time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    pub price: f64,
    pub quantity: u32,
}

/// A customer order.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](resource_actor::ActorEntity) trait,
/// allowing it to be managed by a [`ResourceActor`](resource_actor::ResourceActor).
/// Pending orders live in the actor's live partition; completing one moves it to the archive,
/// which is the order history.
///
/// See [`impl ActorEntity for Order`](#impl-ActorEntity-for-Order) for details on:
/// - Creation parameters ([`OrderCreate`])
/// - Custom actions ([`OrderAction`](crate::order_actor::OrderAction))
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub name: String,
    pub phone: String,
    pub table_no: u32,
    pub items: Vec<LineItem>,
    pub total: f64,
    pub status: OrderStatus,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

/// A cart line as posted. Extra fields the client copies from the menu item are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LineItemInput {
    pub name: Option<String>,
    pub price: Option<Loose>,
    pub quantity: Option<Loose>,
}

/// Payload for creating a new order, as posted by the client app.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreate {
    pub name: Option<Loose>,
    pub phone: Option<Loose>,
    pub table_no: Option<Loose>,
    #[serde(default)]
    pub items: Vec<LineItemInput>,
    pub total: Option<Loose>,
}

impl Order {
    /// Validates `params` and builds a pending order stamped with `timestamp`.
    ///
    /// Checks run in a fixed order (phone, name, tableNo, items, total) and the first failure
    /// is reported. The total is taken as given.
    pub fn from_params(
        id: OrderId,
        params: OrderCreate,
        timestamp: DateTime<Utc>,
    ) -> Result<Self, OrderError> {
        let phone = params
            .phone
            .as_ref()
            .and_then(Loose::text)
            .filter(|p| p.len() == 10 && p.bytes().all(|b| b.is_ascii_digit()))
            .ok_or_else(|| OrderError::validation("phone", "must be exactly 10 digits"))?;

        let name = params
            .name
            .as_ref()
            .and_then(Loose::text)
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .ok_or_else(|| OrderError::validation("name", "is required"))?;

        let table_no = match &params.table_no {
            None => return Err(OrderError::validation("tableNo", "is required")),
            Some(raw) if raw.is_blank() => {
                return Err(OrderError::validation("tableNo", "is required"))
            }
            Some(raw) => raw
                .whole()
                .and_then(|n| u32::try_from(n).ok())
                .filter(|n| *n > 0)
                .ok_or_else(|| OrderError::validation("tableNo", "must be a positive integer"))?,
        };

        let items = params
            .items
            .into_iter()
            .map(LineItem::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let total = match &params.total {
            None => 0.0,
            Some(raw) => raw
                .number()
                .filter(|t| *t >= 0.0)
                .ok_or_else(|| OrderError::validation("total", "must be a non-negative number"))?,
        };

        Ok(Self {
            id,
            name,
            phone,
            table_no,
            items,
            total,
            status: OrderStatus::Pending,
            timestamp,
            completed_at: None,
        })
    }

    pub fn is_completed(&self) -> bool {
        self.status == OrderStatus::Completed
    }
}

impl TryFrom<LineItemInput> for LineItem {
    type Error = OrderError;

    fn try_from(input: LineItemInput) -> Result<Self, Self::Error> {
        let quantity = input
            .quantity
            .as_ref()
            .and_then(Loose::whole)
            .and_then(|q| u32::try_from(q).ok())
            .filter(|q| *q > 0)
            .ok_or_else(|| OrderError::validation("items", "quantity must be a positive integer"))?;
        let price = match &input.price {
            None => 0.0,
            Some(raw) => raw
                .number()
                .filter(|p| *p >= 0.0)
                .ok_or_else(|| {
                    OrderError::validation("items", "price must be a non-negative number")
                })?,
        };
        Ok(Self {
            name: input.name.unwrap_or_default(),
            price,
            quantity,
        })
    }
}

/// Which store currently holds an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Pending,
    History,
}

/// An order together with the store it was found in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocatedOrder {
    pub location: Location,
    pub order: Order,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(value: serde_json::Value) -> OrderCreate {
        serde_json::from_value(value).unwrap()
    }

    fn asha() -> serde_json::Value {
        json!({
            "name": "Asha",
            "phone": "9999999999",
            "tableNo": "4",
            "items": [{ "name": "Tea", "price": 20, "quantity": 2 }],
            "total": 40
        })
    }

    fn field_of(err: OrderError) -> &'static str {
        match err {
            OrderError::Validation { field, .. } => field,
            other => panic!("expected a validation error, got {other:?}"),
        }
    }

    #[test]
    fn valid_order_is_pending() {
        let now = Utc::now();
        let order = Order::from_params(OrderId(1), params(asha()), now).unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.table_no, 4);
        assert_eq!(order.total, 40.0);
        assert_eq!(order.timestamp, now);
        assert_eq!(order.completed_at, None);
        assert_eq!(
            order.items,
            vec![LineItem {
                name: "Tea".into(),
                price: 20.0,
                quantity: 2
            }]
        );
    }

    #[test]
    fn phone_must_be_ten_digits() {
        for bad in ["12345", "12345678901", "98765x3210", " 9876543210", ""] {
            let mut body = asha();
            body["phone"] = json!(bad);
            let err = Order::from_params(OrderId(1), params(body), Utc::now()).unwrap_err();
            assert_eq!(field_of(err), "phone", "phone {bad:?} accepted");
        }

        let mut body = asha();
        body["phone"] = json!("9876543210");
        assert!(Order::from_params(OrderId(1), params(body), Utc::now()).is_ok());
    }

    #[test]
    fn phone_is_checked_before_name() {
        let body = json!({ "phone": "123", "tableNo": 2 });
        let err = Order::from_params(OrderId(1), params(body), Utc::now()).unwrap_err();
        assert_eq!(field_of(err), "phone");
    }

    #[test]
    fn name_and_table_required() {
        let mut body = asha();
        body["name"] = json!("   ");
        let err = Order::from_params(OrderId(1), params(body), Utc::now()).unwrap_err();
        assert_eq!(field_of(err), "name");

        for bad in [json!(null), json!(""), json!(0), json!("abc"), json!(-3), json!(2.5)] {
            let mut body = asha();
            body["tableNo"] = bad.clone();
            let err = Order::from_params(OrderId(1), params(body), Utc::now()).unwrap_err();
            assert_eq!(field_of(err), "tableNo", "tableNo {bad} accepted");
        }
    }

    #[test]
    fn items_need_positive_quantity() {
        let mut body = asha();
        body["items"] = json!([{ "name": "Tea", "price": 20, "quantity": 0 }]);
        let err = Order::from_params(OrderId(1), params(body), Utc::now()).unwrap_err();
        assert_eq!(field_of(err), "items");
    }

    #[test]
    fn total_is_trusted_not_recomputed() {
        let mut body = asha();
        body["total"] = json!("35.5");
        let order = Order::from_params(OrderId(1), params(body), Utc::now()).unwrap();
        assert_eq!(order.total, 35.5);

        let mut body = asha();
        body["total"] = json!(-1);
        let err = Order::from_params(OrderId(1), params(body), Utc::now()).unwrap_err();
        assert_eq!(field_of(err), "total");
    }

    #[test]
    fn wire_format_is_camel_case() {
        let order = Order::from_params(OrderId(7), params(asha()), Utc::now()).unwrap();
        let value = serde_json::to_value(&order).unwrap();
        assert_eq!(value["id"], json!(7));
        assert_eq!(value["tableNo"], json!(4));
        assert_eq!(value["status"], json!("pending"));
        assert!(value.get("completedAt").is_none());
    }
}
