use axum::{
    routing::{get, post},
    Router,
};

pub mod medicines;
pub mod pharmacies;
pub mod system;

/// Router for the pharmacy inventory endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/pharmacies", get(pharmacies::list_pharmacies))
        .route("/pharmacy/:name", get(pharmacies::get_pharmacy))
        .route("/medicines", get(medicines::list_medicines))
        .route("/search", post(medicines::search_medicine))
        .route("/update_stock", post(medicines::update_stock))
}
