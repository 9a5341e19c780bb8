use crate::menu_actor::MenuError;
use crate::order_actor::OrderError;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Every failure a handler can report. Rendered as `{"error": "<message>"}`.
#[derive(Error, Debug, PartialEq)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "Request failed");
        } else {
            warn!(status = status.as_u16(), error = %self, "Request rejected");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<MenuError> for ApiError {
    fn from(e: MenuError) -> Self {
        match e {
            MenuError::Validation { .. } => ApiError::BadRequest(e.to_string()),
            MenuError::NotFound(_) => ApiError::NotFound(e.to_string()),
            MenuError::DatabaseError(_) | MenuError::ActorCommunicationError(_) => {
                ApiError::Internal(e.to_string())
            }
        }
    }
}

impl From<OrderError> for ApiError {
    fn from(e: OrderError) -> Self {
        match e {
            OrderError::Validation { .. } => ApiError::BadRequest(e.to_string()),
            OrderError::NotFound(_) => ApiError::NotFound(e.to_string()),
            OrderError::DatabaseError(_) | OrderError::ActorCommunicationError(_) => {
                ApiError::Internal(e.to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_map_to_status() {
        let cases = [
            (ApiError::from(OrderError::validation("phone", "must be exactly 10 digits")), 400),
            (ApiError::from(OrderError::NotFound("3".into())), 404),
            (ApiError::from(OrderError::DatabaseError("disk full".into())), 500),
            (ApiError::from(MenuError::validation("price", "must not be negative")), 400),
            (ApiError::from(MenuError::NotFound("8".into())), 404),
            (ApiError::from(MenuError::ActorCommunicationError("Actor closed".into())), 500),
        ];
        for (err, status) in cases {
            assert_eq!(err.status().as_u16(), status, "{err}");
        }
    }

    #[test]
    fn validation_message_names_the_field() {
        let err = ApiError::from(OrderError::validation("tableNo", "is required"));
        assert_eq!(err.to_string(), "Invalid tableNo: is required");
    }
}
