//! Query and aggregation layer: one method per endpoint.
//!
//! Builds store reads/writes, applies the matching and availability rules, and shapes
//! results. Subscription decoration is done with sequential count lookups (one per
//! pharmacy for the listing, one per inventory item for the detail view).

use thiserror::Error;
use tracing::{debug, instrument};

use pharmastock_core::DomainError;
use pharmastock_inventory::{
    search_hits, ItemSubscriptions, PharmacyDetail, PharmacySummary, SearchHit, StockUpdate,
};

use crate::store::{PharmacyStore, StockWrite, StoreError};

pub const PHARMACY_NOT_FOUND: &str = "Pharmacy not found";
pub const STOCK_TARGET_NOT_FOUND: &str = "Pharmacy or medicine not found";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QueryError {
    /// Request data was missing or malformed.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The referenced record does not exist; carries the caller-facing message.
    #[error("{0}")]
    NotFound(&'static str),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<DomainError> for QueryError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => QueryError::InvalidInput(msg),
        }
    }
}

/// Pharmacy queries over an injected store.
#[derive(Debug, Clone)]
pub struct PharmacyQueries<S> {
    store: S,
}

impl<S> PharmacyQueries<S>
where
    S: PharmacyStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// All pharmacies with `total_stock` and `total_subscriptions`.
    #[instrument(skip(self))]
    pub async fn list_pharmacies(&self) -> Result<Vec<PharmacySummary>, QueryError> {
        let pharmacies = self.store.list_pharmacies().await?;
        let mut out = Vec::with_capacity(pharmacies.len());
        for pharmacy in pharmacies {
            let subscriptions = self.store.count_subscriptions(&pharmacy.name, None).await?;
            out.push(PharmacySummary::new(pharmacy, subscriptions));
        }
        Ok(out)
    }

    /// Distinct medicine names, ascending.
    #[instrument(skip(self))]
    pub async fn list_medicines(&self) -> Result<Vec<String>, QueryError> {
        Ok(self.store.distinct_medicines().await?)
    }

    /// One pharmacy with per-item subscription counts.
    #[instrument(skip(self))]
    pub async fn get_pharmacy(&self, name: &str) -> Result<PharmacyDetail, QueryError> {
        let Some(pharmacy) = self.store.find_pharmacy(name).await? else {
            debug!(name, "pharmacy lookup missed");
            return Err(QueryError::NotFound(PHARMACY_NOT_FOUND));
        };

        let mut inventory = Vec::with_capacity(pharmacy.inventory.len());
        for item in pharmacy.inventory {
            let subscriptions = self
                .store
                .count_subscriptions(&pharmacy.name, Some(&item.medicine))
                .await?;
            inventory.push(ItemSubscriptions::new(item, subscriptions));
        }

        Ok(PharmacyDetail {
            name: pharmacy.name,
            address: pharmacy.address,
            inventory,
        })
    }

    /// Where `medicine` is currently in stock. Blank input yields no results.
    #[instrument(skip(self))]
    pub async fn search_medicine(&self, medicine: &str) -> Result<Vec<SearchHit>, QueryError> {
        let medicine = medicine.trim();
        if medicine.is_empty() {
            return Ok(Vec::new());
        }

        let candidates = self.store.pharmacies_stocking(medicine).await?;
        Ok(search_hits(&candidates, medicine))
    }

    /// Set the stock of one `(pharmacy, medicine)` element and return the confirmation text.
    #[instrument(skip(self, update), fields(pharmacy = update.pharmacy(), medicine = update.medicine()))]
    pub async fn update_stock(&self, update: &StockUpdate) -> Result<String, QueryError> {
        match self
            .store
            .set_stock(update.pharmacy(), update.medicine(), update.stock())
            .await?
        {
            StockWrite::Applied => Ok(update.confirmation()),
            StockWrite::NoMatch => {
                debug!("stock update matched nothing");
                Err(QueryError::NotFound(STOCK_TARGET_NOT_FOUND))
            }
        }
    }

    /// Store connectivity check.
    pub async fn health(&self) -> Result<(), QueryError> {
        Ok(self.store.ping().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryPharmacyStore;
    use pharmastock_inventory::{Customer, InventoryItem, Pharmacy, Subscription};

    fn queries() -> PharmacyQueries<InMemoryPharmacyStore> {
        PharmacyQueries::new(InMemoryPharmacyStore::seeded(
            vec![
                Pharmacy::new(
                    "CVS",
                    "1 Main St",
                    vec![InventoryItem::new("Aspirin", 5), InventoryItem::new("Zinc", 0)],
                ),
                Pharmacy::new(
                    "Walgreens",
                    "2 Oak Ave",
                    vec![InventoryItem::new("aspirin", 3), InventoryItem::new("Aspirin Extra", 2)],
                ),
            ],
            vec![
                Customer::new(vec![
                    Subscription::new("cvs", "ASPIRIN"),
                    Subscription::new("CVS", "Zinc"),
                ]),
                Customer::new(vec![Subscription::new("Cvs", "aspirin")]),
            ],
        ))
    }

    #[tokio::test]
    async fn list_pharmacies_decorates_totals() {
        let list = queries().list_pharmacies().await.unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].pharmacy.name, "CVS");
        assert_eq!(list[0].total_stock, 5);
        assert_eq!(list[0].total_subscriptions, 3);
        assert_eq!(list[1].total_stock, 5);
        assert_eq!(list[1].total_subscriptions, 0);
    }

    #[tokio::test]
    async fn list_medicines_is_sorted_and_distinct() {
        let meds = queries().list_medicines().await.unwrap();
        assert_eq!(meds, vec!["Aspirin", "Aspirin Extra", "Zinc", "aspirin"]);
    }

    #[tokio::test]
    async fn get_pharmacy_is_case_insensitive_and_counts_per_item() {
        let q = queries();
        let lower = q.get_pharmacy("cvs").await.unwrap();
        let upper = q.get_pharmacy("CVS").await.unwrap();
        assert_eq!(lower, upper);
        assert_eq!(lower.name, "CVS");
        assert_eq!(lower.inventory[0].subscriptions, 2);
        assert_eq!(lower.inventory[1].subscriptions, 1);
    }

    #[tokio::test]
    async fn get_missing_pharmacy_is_not_found() {
        assert_eq!(
            queries().get_pharmacy("Rite Aid").await.unwrap_err(),
            QueryError::NotFound(PHARMACY_NOT_FOUND)
        );
    }

    #[tokio::test]
    async fn search_skips_blank_input_and_empty_stock() {
        let q = queries();
        assert!(q.search_medicine("").await.unwrap().is_empty());
        assert!(q.search_medicine("   ").await.unwrap().is_empty());
        assert!(q.search_medicine("zinc").await.unwrap().is_empty());

        let hits = q.search_medicine(" ASPIRIN ").await.unwrap();
        let names: Vec<_> = hits.iter().map(|h| h.pharmacy.as_str()).collect();
        assert_eq!(names, vec!["CVS", "Walgreens"]);
        assert_eq!(hits[1].stock, 3);
    }

    #[tokio::test]
    async fn update_stock_then_read_back() {
        let q = queries();
        let update = StockUpdate::new("cvs", "aspirin", 10).unwrap();
        assert_eq!(q.update_stock(&update).await.unwrap(), "Stock updated to 10 for aspirin at cvs");

        let cvs = q.get_pharmacy("CVS").await.unwrap();
        assert_eq!(cvs.inventory[0].stock, 10);
    }

    #[tokio::test]
    async fn update_stock_without_match_is_not_found() {
        let update = StockUpdate::new("CVS", "Paracetamol", 1).unwrap();
        assert_eq!(
            queries().update_stock(&update).await.unwrap_err(),
            QueryError::NotFound(STOCK_TARGET_NOT_FOUND)
        );
    }

    #[tokio::test]
    async fn store_failures_surface_as_store_errors() {
        let q = queries();
        q.store().set_offline(true);
        assert!(matches!(q.list_pharmacies().await, Err(QueryError::Store(StoreError::Unavailable(_)))));
        assert!(matches!(q.health().await, Err(QueryError::Store(_))));
        // Blank searches never touch the store.
        assert!(q.search_medicine("").await.unwrap().is_empty());
    }

    #[test]
    fn domain_validation_maps_to_invalid_input() {
        let err: QueryError = DomainError::validation("stock cannot be negative").into();
        assert_eq!(err, QueryError::InvalidInput("stock cannot be negative".to_string()));
    }
}
