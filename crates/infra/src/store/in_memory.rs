use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use pharmastock_inventory::{count_subscriptions, distinct_medicines, Customer, Pharmacy};

use super::{PharmacyStore, StockWrite, StoreError};

/// In-memory pharmacy store for tests/dev.
///
/// Keeps insertion order, so "first match" means first seeded. Can be flipped offline
/// to exercise the unavailable-store path.
#[derive(Debug, Default)]
pub struct InMemoryPharmacyStore {
    pharmacies: RwLock<Vec<Pharmacy>>,
    customers: RwLock<Vec<Customer>>,
    offline: AtomicBool,
}

impl InMemoryPharmacyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(pharmacies: Vec<Pharmacy>, customers: Vec<Customer>) -> Self {
        Self {
            pharmacies: RwLock::new(pharmacies),
            customers: RwLock::new(customers),
            offline: AtomicBool::new(false),
        }
    }

    pub fn insert_pharmacy(&self, pharmacy: Pharmacy) -> Result<(), StoreError> {
        self.pharmacies
            .write()
            .map_err(|_| StoreError::Unavailable("pharmacy lock poisoned".to_string()))?
            .push(pharmacy);
        Ok(())
    }

    pub fn insert_customer(&self, customer: Customer) -> Result<(), StoreError> {
        self.customers
            .write()
            .map_err(|_| StoreError::Unavailable("customer lock poisoned".to_string()))?
            .push(customer);
        Ok(())
    }

    /// Simulate losing (or regaining) the connection to the backend.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn ensure_online(&self) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("in-memory store is offline".to_string()));
        }
        Ok(())
    }

    fn read_pharmacies(&self) -> Result<std::sync::RwLockReadGuard<'_, Vec<Pharmacy>>, StoreError> {
        self.ensure_online()?;
        self.pharmacies
            .read()
            .map_err(|_| StoreError::Unavailable("pharmacy lock poisoned".to_string()))
    }
}

#[async_trait]
impl PharmacyStore for InMemoryPharmacyStore {
    async fn list_pharmacies(&self) -> Result<Vec<Pharmacy>, StoreError> {
        Ok(self.read_pharmacies()?.clone())
    }

    async fn find_pharmacy(&self, name: &str) -> Result<Option<Pharmacy>, StoreError> {
        Ok(self.read_pharmacies()?.iter().find(|p| p.is_named(name)).cloned())
    }

    async fn pharmacies_stocking(&self, medicine: &str) -> Result<Vec<Pharmacy>, StoreError> {
        Ok(self
            .read_pharmacies()?
            .iter()
            .filter(|p| p.stocks(medicine))
            .cloned()
            .collect())
    }

    async fn distinct_medicines(&self) -> Result<Vec<String>, StoreError> {
        Ok(distinct_medicines(self.read_pharmacies()?.iter()))
    }

    async fn count_subscriptions(&self, pharmacy: &str, medicine: Option<&str>) -> Result<u64, StoreError> {
        self.ensure_online()?;
        let customers = self
            .customers
            .read()
            .map_err(|_| StoreError::Unavailable("customer lock poisoned".to_string()))?;
        Ok(count_subscriptions(customers.iter(), pharmacy, medicine))
    }

    async fn set_stock(&self, pharmacy: &str, medicine: &str, stock: i64) -> Result<StockWrite, StoreError> {
        self.ensure_online()?;
        let mut pharmacies = self
            .pharmacies
            .write()
            .map_err(|_| StoreError::Unavailable("pharmacy lock poisoned".to_string()))?;

        // Single-document semantics: first pharmacy with a matching element wins.
        let target = pharmacies
            .iter_mut()
            .find(|p| p.is_named(pharmacy) && p.stocks(medicine));

        match target {
            Some(p) => {
                p.set_stock(medicine, stock);
                Ok(StockWrite::Applied)
            }
            None => Ok(StockWrite::NoMatch),
        }
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.ensure_online()
    }
}
