use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::app::errors;
use crate::app::services::AppServices;

pub async fn list_pharmacies(Extension(services): Extension<AppServices>) -> axum::response::Response {
    match services.queries().list_pharmacies().await {
        Ok(pharmacies) => (StatusCode::OK, Json(pharmacies)).into_response(),
        Err(e) => errors::query_error_to_response(e),
    }
}

/// `name` arrives percent-decoded from the path segment.
pub async fn get_pharmacy(
    Extension(services): Extension<AppServices>,
    Path(name): Path<String>,
) -> axum::response::Response {
    match services.queries().get_pharmacy(&name).await {
        Ok(detail) => (StatusCode::OK, Json(detail)).into_response(),
        Err(e) => errors::query_error_to_response(e),
    }
}
