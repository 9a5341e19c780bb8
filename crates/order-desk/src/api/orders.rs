use super::{parse_id, ApiError, AppState};
use crate::model::{LocatedOrder, Order, OrderCreate};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

/// Body of `PUT /api/orders/{id}`.
#[derive(Debug, Deserialize)]
pub struct StatusChange {
    pub status: Option<String>,
}

pub async fn pending(State(state): State<AppState>) -> Result<Json<Vec<Order>>, ApiError> {
    Ok(Json(state.orders.pending().await?))
}

pub async fn history(State(state): State<AppState>) -> Result<Json<Vec<Order>>, ApiError> {
    Ok(Json(state.orders.history().await?))
}

pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<OrderCreate>, JsonRejection>,
) -> Result<(StatusCode, Json<Order>), ApiError> {
    let Json(params) = body?;
    let order = state.orders.place_order(params).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

pub async fn complete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Order>, ApiError> {
    Ok(Json(state.orders.complete(parse_id(&id)?).await?))
}

/// Accepts only `{"status": "completed"}`, which behaves like `PATCH .../complete`.
pub async fn set_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<StatusChange>, JsonRejection>,
) -> Result<Json<Order>, ApiError> {
    let id = parse_id(&id)?;
    let Json(change) = body?;
    match change.status {
        Some(status) if status == "completed" => {
            Ok(Json(state.orders.complete(id).await?))
        }
        other => Err(ApiError::BadRequest(format!(
            "Invalid status: {}",
            other.as_deref().unwrap_or("missing")
        ))),
    }
}

pub async fn locate(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<LocatedOrder>, ApiError> {
    let id = parse_id(&id)?;
    state
        .orders
        .locate(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Order not found: {id}")))
}
