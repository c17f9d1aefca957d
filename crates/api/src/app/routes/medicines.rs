use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub async fn list_medicines(Extension(services): Extension<AppServices>) -> axum::response::Response {
    match services.queries().list_medicines().await {
        Ok(medicines) => (StatusCode::OK, Json(medicines)).into_response(),
        Err(e) => errors::query_error_to_response(e),
    }
}

pub async fn search_medicine(
    Extension(services): Extension<AppServices>,
    body: Result<Json<dto::SearchRequest>, JsonRejection>,
) -> axum::response::Response {
    let medicine = match dto::search_term(body) {
        Ok(m) => m,
        Err(e) => return errors::query_error_to_response(e),
    };

    match services.queries().search_medicine(&medicine).await {
        Ok(hits) => (StatusCode::OK, Json(hits)).into_response(),
        Err(e) => errors::query_error_to_response(e),
    }
}

pub async fn update_stock(
    Extension(services): Extension<AppServices>,
    body: Result<Json<dto::UpdateStockRequest>, JsonRejection>,
) -> axum::response::Response {
    let update = match dto::stock_update(body) {
        Ok(u) => u,
        Err(e) => return errors::query_error_to_response(e),
    };

    match services.queries().update_stock(&update).await {
        Ok(message) => (StatusCode::OK, Json(serde_json::json!({ "message": message }))).into_response(),
        Err(e) => errors::query_error_to_response(e),
    }
}
