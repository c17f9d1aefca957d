use serde::{Deserialize, Serialize};

use pharmastock_core::{DomainError, DomainResult};

/// Command: set the stock of one medicine at one pharmacy.
///
/// Names must contain something other than whitespace and are kept exactly as
/// given; stock must be non-negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockUpdate {
    pharmacy: String,
    medicine: String,
    stock: i64,
}

impl StockUpdate {
    pub fn new(pharmacy: &str, medicine: &str, stock: i64) -> DomainResult<Self> {
        if pharmacy.trim().is_empty() {
            return Err(DomainError::validation("pharmacy cannot be empty"));
        }
        if medicine.trim().is_empty() {
            return Err(DomainError::validation("medicine cannot be empty"));
        }
        if stock < 0 {
            return Err(DomainError::validation("stock cannot be negative"));
        }

        Ok(Self {
            pharmacy: pharmacy.to_string(),
            medicine: medicine.to_string(),
            stock,
        })
    }

    pub fn pharmacy(&self) -> &str {
        &self.pharmacy
    }

    pub fn medicine(&self) -> &str {
        &self.medicine
    }

    pub fn stock(&self) -> i64 {
        self.stock
    }

    /// Confirmation text, echoing the names as the caller wrote them.
    pub fn confirmation(&self) -> String {
        format!(
            "Stock updated to {} for {} at {}",
            self.stock, self.medicine, self.pharmacy
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_update() {
        let update = StockUpdate::new("cvs", "aspirin", 10).unwrap();
        assert_eq!(update.pharmacy(), "cvs");
        assert_eq!(update.medicine(), "aspirin");
        assert_eq!(update.stock(), 10);
        assert_eq!(update.confirmation(), "Stock updated to 10 for aspirin at cvs");
    }

    #[test]
    fn keeps_names_as_written() {
        let update = StockUpdate::new("  CVS ", "\tAspirin\n", 0).unwrap();
        assert_eq!(update.pharmacy(), "  CVS ");
        assert_eq!(update.medicine(), "\tAspirin\n");
        assert_eq!(update.confirmation(), "Stock updated to 0 for \tAspirin\n at   CVS ");
    }

    #[test]
    fn rejects_blank_names() {
        for (pharmacy, medicine) in [("", "aspirin"), ("   ", "aspirin"), ("cvs", ""), ("cvs", "  ")] {
            let err = StockUpdate::new(pharmacy, medicine, 1).unwrap_err();
            assert!(err.is_validation(), "expected validation error for {pharmacy:?}/{medicine:?}");
        }
    }

    #[test]
    fn rejects_negative_stock() {
        match StockUpdate::new("cvs", "aspirin", -1).unwrap_err() {
            DomainError::Validation(_) => {}
            other => panic!("Expected Validation error, got {other:?}"),
        }
    }
}
