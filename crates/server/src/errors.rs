use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::errors::StorageError;
use tracing::error;

/// JSON error response: status code, short title, optional detail.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub title: &'static str,
    pub detail: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, title: &'static str, detail: Option<String>) -> Self {
        Self { status, title, detail }
    }

    /// Storage failures surface as 500; the body names the error kind.
    pub fn from_storage(e: StorageError) -> Self {
        let title = match &e {
            StorageError::DataFile(_) => "Data File Error",
            StorageError::DataFormat(_) => "Data Format Error",
        };
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, title, Some(e.to_string()))
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, title = self.title, detail = ?self.detail, "request failed");
        }
        let body = serde_json::json!({"error": self.title, "detail": self.detail});
        (self.status, Json(body)).into_response()
    }
}
