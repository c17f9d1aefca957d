use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};

use crate::app::errors;
use crate::app::services::AppServices;

/// Liveness plus store reachability.
pub async fn health(Extension(services): Extension<AppServices>) -> axum::response::Response {
    match services.queries().health().await {
        Ok(()) => (StatusCode::OK, Json(serde_json::json!({ "status": "ok" }))).into_response(),
        Err(e) => errors::query_error_to_response(e),
    }
}
