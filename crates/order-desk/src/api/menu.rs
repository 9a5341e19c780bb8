use super::{parse_id, ApiError, AppState};
use crate::model::{MenuItem, MenuItemInput};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<MenuItem>>, ApiError> {
    Ok(Json(state.menu.list_items().await?))
}

pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<MenuItemInput>, JsonRejection>,
) -> Result<(StatusCode, Json<MenuItem>), ApiError> {
    let Json(input) = body?;
    let item = state.menu.add_item(input).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<MenuItemInput>, JsonRejection>,
) -> Result<Json<MenuItem>, ApiError> {
    let id = parse_id(&id)?;
    let Json(input) = body?;
    Ok(Json(state.menu.update_item(id, input).await?))
}

/// 204 whether or not the item existed.
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.menu.remove_item(parse_id(&id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}
