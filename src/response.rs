use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Uniform `{success, status, message, payload}` body returned by every endpoint.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub status: u16,
    pub message: String,
    pub payload: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(status: StatusCode, message: impl Into<String>, payload: Option<T>) -> Self {
        Self {
            success: status.is_success(),
            status: status.as_u16(),
            message: message.into(),
            payload,
        }
    }

    pub fn ok(message: impl Into<String>, payload: T) -> Self {
        Self::new(StatusCode::OK, message, Some(payload))
    }

    pub fn created(message: impl Into<String>, payload: T) -> Self {
        Self::new(StatusCode::CREATED, message, Some(payload))
    }
}

impl ApiResponse<()> {
    pub fn failure(status: StatusCode, message: impl Into<String>) -> Self {
        Self::new(status, message, None)
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}
