use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde::Deserialize;

use pharmastock_infra::QueryError;
use pharmastock_inventory::StockUpdate;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub medicine: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStockRequest {
    pub pharmacy: String,
    pub medicine: String,
    pub stock: i64,
}

// -------------------------
// Body validation helpers
// -------------------------

fn rejected(rejection: JsonRejection) -> QueryError {
    QueryError::InvalidInput(rejection.body_text())
}

/// Medicine to search for; a missing or null field means "nothing".
pub fn search_term(body: Result<Json<SearchRequest>, JsonRejection>) -> Result<String, QueryError> {
    let Json(req) = body.map_err(rejected)?;
    Ok(req.medicine.unwrap_or_default())
}

/// Validated stock update.
///
/// `stock` must be a JSON integer: strings, floats and booleans are rejected by the
/// typed DTO before any domain check runs.
pub fn stock_update(body: Result<Json<UpdateStockRequest>, JsonRejection>) -> Result<StockUpdate, QueryError> {
    let Json(req) = body.map_err(rejected)?;
    Ok(StockUpdate::new(&req.pharmacy, &req.medicine, req.stock)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update(body: serde_json::Value) -> Result<StockUpdate, QueryError> {
        let parsed = serde_json::from_value::<UpdateStockRequest>(body)
            .map_err(|e| QueryError::InvalidInput(e.to_string()))?;
        stock_update(Ok(Json(parsed)))
    }

    #[test]
    fn update_dto_requires_integer_stock() {
        for stock in [serde_json::json!("10"), serde_json::json!(10.5), serde_json::json!(true)] {
            let body = serde_json::json!({ "pharmacy": "CVS", "medicine": "Aspirin", "stock": stock });
            assert!(matches!(update(body), Err(QueryError::InvalidInput(_))));
        }
    }

    #[test]
    fn update_dto_rejects_blank_names_and_negative_stock() {
        let blank = serde_json::json!({ "pharmacy": " ", "medicine": "Aspirin", "stock": 1 });
        assert!(matches!(update(blank), Err(QueryError::InvalidInput(_))));

        let negative = serde_json::json!({ "pharmacy": "CVS", "medicine": "Aspirin", "stock": -4 });
        assert!(matches!(update(negative), Err(QueryError::InvalidInput(_))));
    }

    #[test]
    fn update_dto_accepts_valid_body() {
        let ok = update(serde_json::json!({ "pharmacy": "cvs", "medicine": "aspirin", "stock": 10 })).unwrap();
        assert_eq!(ok.stock(), 10);
        assert_eq!(ok.pharmacy(), "cvs");
    }

    #[test]
    fn search_defaults_to_empty_term() {
        let req: SearchRequest = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(search_term(Ok(Json(req))).unwrap(), "");

        let req: SearchRequest = serde_json::from_value(serde_json::json!({ "medicine": null })).unwrap();
        assert_eq!(search_term(Ok(Json(req))).unwrap(), "");
    }
}
