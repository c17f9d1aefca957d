use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use pharmastock_infra::{QueryError, StoreError};

pub const INVALID_DATA: &str = "Invalid data";
pub const STORE_UNAVAILABLE: &str = "Store unavailable";
pub const STORED_DATA_UNREADABLE: &str = "Stored data could not be read";

pub fn query_error_to_response(err: QueryError) -> axum::response::Response {
    match err {
        QueryError::InvalidInput(reason) => {
            tracing::debug!(%reason, "rejected request body");
            json_error(StatusCode::BAD_REQUEST, INVALID_DATA)
        }
        QueryError::NotFound(message) => json_error(StatusCode::NOT_FOUND, message),
        QueryError::Store(StoreError::Decode(reason)) => {
            tracing::error!(%reason, "stored document has an unexpected shape");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, STORED_DATA_UNREADABLE)
        }
        QueryError::Store(e) => {
            tracing::error!("store operation failed: {e}");
            json_error(StatusCode::SERVICE_UNAVAILABLE, STORE_UNAVAILABLE)
        }
    }
}

pub fn json_error(status: StatusCode, message: impl Into<String>) -> axum::response::Response {
    (status, axum::Json(json!({ "error": message.into() }))).into_response()
}
