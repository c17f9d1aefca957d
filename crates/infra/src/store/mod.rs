//! Pharmacy document store abstraction and its adapters.
//!
//! The query layer only talks to [`PharmacyStore`]; which backend sits behind it is
//! decided at wiring time (MongoDB in production, in-memory for tests/dev).

pub mod in_memory;
#[cfg(feature = "mongo")]
pub mod mongo;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use pharmastock_inventory::Pharmacy;

pub use in_memory::InMemoryPharmacyStore;
#[cfg(feature = "mongo")]
pub use mongo::MongoPharmacyStore;

/// Store-level failure.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The backend could not be reached or rejected the operation.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A stored document did not have the expected shape.
    #[error("failed to decode stored document: {0}")]
    Decode(String),
}

/// Outcome of a stock write.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StockWrite {
    /// A `(pharmacy, medicine)` element matched and now holds the new stock.
    Applied,
    /// Nothing matched; the store is unchanged.
    NoMatch,
}

/// Collection-level operations over pharmacies and customers.
///
/// All name arguments are matched case-insensitively against the full stored string.
#[async_trait]
pub trait PharmacyStore: Send + Sync {
    /// Every pharmacy, in store order.
    async fn list_pharmacies(&self) -> Result<Vec<Pharmacy>, StoreError>;

    /// First pharmacy whose name matches `name`.
    async fn find_pharmacy(&self, name: &str) -> Result<Option<Pharmacy>, StoreError>;

    /// Pharmacies with at least one inventory item for `medicine` (any stock level).
    async fn pharmacies_stocking(&self, medicine: &str) -> Result<Vec<Pharmacy>, StoreError>;

    /// Distinct medicine names across all inventories, ascending in byte order.
    async fn distinct_medicines(&self) -> Result<Vec<String>, StoreError>;

    /// Number of customer subscriptions for `pharmacy`, narrowed to `medicine` when given.
    async fn count_subscriptions(&self, pharmacy: &str, medicine: Option<&str>) -> Result<u64, StoreError>;

    /// Set the stock of the first element matching `(pharmacy, medicine)`.
    async fn set_stock(&self, pharmacy: &str, medicine: &str, stock: i64) -> Result<StockWrite, StoreError>;

    /// Cheap connectivity check.
    async fn ping(&self) -> Result<(), StoreError>;
}

#[async_trait]
impl<S> PharmacyStore for Arc<S>
where
    S: PharmacyStore + ?Sized,
{
    async fn list_pharmacies(&self) -> Result<Vec<Pharmacy>, StoreError> {
        (**self).list_pharmacies().await
    }

    async fn find_pharmacy(&self, name: &str) -> Result<Option<Pharmacy>, StoreError> {
        (**self).find_pharmacy(name).await
    }

    async fn pharmacies_stocking(&self, medicine: &str) -> Result<Vec<Pharmacy>, StoreError> {
        (**self).pharmacies_stocking(medicine).await
    }

    async fn distinct_medicines(&self) -> Result<Vec<String>, StoreError> {
        (**self).distinct_medicines().await
    }

    async fn count_subscriptions(&self, pharmacy: &str, medicine: Option<&str>) -> Result<u64, StoreError> {
        (**self).count_subscriptions(pharmacy, medicine).await
    }

    async fn set_stock(&self, pharmacy: &str, medicine: &str, stock: i64) -> Result<StockWrite, StoreError> {
        (**self).set_stock(pharmacy, medicine, stock).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        (**self).ping().await
    }
}
