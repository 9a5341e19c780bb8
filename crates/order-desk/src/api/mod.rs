//! # HTTP API
//!
//! JSON over HTTP in front of the two actors. Handlers hold only cloned clients, so any number
//! of requests can be in flight while each store still applies its mutations one at a time.
//!
//! | Method | Path                        | Success |
//! |--------|-----------------------------|---------|
//! | GET    | `/api/health`               | 200     |
//! | GET    | `/api/menu`                 | 200     |
//! | POST   | `/api/menu`                 | 201     |
//! | PUT    | `/api/menu/{id}`            | 200     |
//! | DELETE | `/api/menu/{id}`            | 204     |
//! | GET    | `/api/orders`               | 200     |
//! | POST   | `/api/orders`               | 201     |
//! | GET    | `/api/orders/history`       | 200     |
//! | GET    | `/api/orders/{id}`          | 200     |
//! | PUT    | `/api/orders/{id}`          | 200     |
//! | PATCH  | `/api/orders/{id}/complete` | 200     |
//!
//! Failures are `{"error": "<message>"}` with 400, 404 or 500.

mod error;
mod health;
mod menu;
mod orders;

pub use error::ApiError;

use crate::clients::{MenuClient, OrderClient};
use axum::http::{header::CONTENT_TYPE, HeaderValue, Method};
use axum::routing::{get, patch, put};
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub menu: MenuClient,
    pub orders: OrderClient,
}

/// Builds the full application router. An origin of `*` allows any origin.
pub fn router(state: AppState, origins: Vec<HeaderValue>) -> Router {
    let allow_origin = if origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins)
    };
    let cors = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route("/api/health", get(health::health))
        .route("/api/menu", get(menu::list).post(menu::create))
        .route("/api/menu/{id}", put(menu::update).delete(menu::remove))
        .route("/api/orders", get(orders::pending).post(orders::create))
        .route("/api/orders/history", get(orders::history))
        .route("/api/orders/{id}", get(orders::locate).put(orders::set_status))
        .route("/api/orders/{id}/complete", patch(orders::complete))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Path ids are plain unsigned integers; anything else is a bad request.
fn parse_id<I: From<u32>>(raw: &str) -> Result<I, ApiError> {
    raw.parse::<u32>()
        .map(I::from)
        .map_err(|_| ApiError::BadRequest(format!("Invalid id: {raw}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::OrderId;

    #[test]
    fn ids_must_be_unsigned_integers() {
        assert_eq!(parse_id::<OrderId>("12"), Ok(OrderId(12)));
        for bad in ["", "-1", "abc", "1.5", "99999999999"] {
            assert!(parse_id::<OrderId>(bad).is_err(), "{bad:?} accepted");
        }
    }
}
