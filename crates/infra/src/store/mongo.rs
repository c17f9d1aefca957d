//! MongoDB-backed pharmacy store.
//!
//! Case-insensitive exact matching is pushed down to the server with a
//! secondary-strength collation: equality ignores case but still compares the whole
//! string, so no pattern matching (and no escaping of user input) is involved.
//!
//! ## Collation vs. `names_match`
//!
//! Collation equality follows ICU rules, which is broader than the lowercase comparison
//! used by `pharmastock_core::names_match` (and so by the in-memory store). For example
//! `"straße"` and `"STRASSE"` are equal here but not in memory. Lookups, subscription
//! counts and stock updates follow the server's rule. Search results are filtered again
//! through `names_match`, so `/search` agrees across adapters. For plain ASCII names the
//! two rules coincide.
//!
//! ## Error Mapping
//!
//! | Driver error | StoreError |
//! |--------------|------------|
//! | BSON deserialization | `Decode` |
//! | Anything else (network, auth, server selection, command failure) | `Unavailable` |

use futures_util::TryStreamExt;
use mongodb::bson::{doc, Bson, Document};
use mongodb::error::ErrorKind;
use mongodb::options::{Collation, CollationStrength};
use mongodb::{Client, Collection, Database};
use tracing::instrument;

use pharmastock_inventory::{Customer, Pharmacy};

use super::{PharmacyStore, StockWrite, StoreError};
use crate::config::StoreConfig;

/// Pharmacy store over the `pharmacies` and `customers` collections.
#[derive(Debug, Clone)]
pub struct MongoPharmacyStore {
    db: Database,
    pharmacies: Collection<Pharmacy>,
    customers: Collection<Customer>,
}

impl MongoPharmacyStore {
    /// Connect and verify the server answers a ping.
    pub async fn connect(config: &StoreConfig) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(&config.uri).await.map_err(map_err)?;
        let store = Self::from_database(client.database(&config.database), config);
        store.ping().await?;
        tracing::info!(database = %config.database, "connected to document store");
        Ok(store)
    }

    pub fn from_database(db: Database, config: &StoreConfig) -> Self {
        Self {
            pharmacies: db.collection(&config.pharmacies_collection),
            customers: db.collection(&config.customers_collection),
            db,
        }
    }
}

fn case_insensitive() -> Collation {
    Collation::builder()
        .locale("en")
        .strength(CollationStrength::Secondary)
        .build()
}

fn map_err(err: mongodb::error::Error) -> StoreError {
    match *err.kind {
        ErrorKind::BsonDeserialization(_) => StoreError::Decode(err.to_string()),
        _ => StoreError::Unavailable(err.to_string()),
    }
}

fn hide_id() -> Document {
    doc! { "_id": 0 }
}

pub(crate) fn medicines_pipeline() -> Vec<Document> {
    vec![
        doc! { "$unwind": "$inventory" },
        doc! { "$group": { "_id": "$inventory.medicine" } },
        doc! { "$sort": { "_id": 1 } },
    ]
}

pub(crate) fn subscription_count_pipeline(pharmacy: &str, medicine: Option<&str>) -> Vec<Document> {
    let mut filter = doc! { "subscriptions.pharmacy": pharmacy };
    if let Some(medicine) = medicine {
        filter.insert("subscriptions.medicine", medicine);
    }
    vec![
        doc! { "$unwind": "$subscriptions" },
        doc! { "$match": filter },
        doc! { "$count": "n" },
    ]
}

pub(crate) fn stock_filter(pharmacy: &str, medicine: &str) -> Document {
    doc! {
        "name": pharmacy,
        "inventory": { "$elemMatch": { "medicine": medicine } },
    }
}

pub(crate) fn stock_update(stock: i64) -> Document {
    doc! { "$set": { "inventory.$.stock": stock } }
}

fn count_from(doc: Option<Document>) -> u64 {
    match doc.as_ref().and_then(|d| d.get("n")) {
        Some(Bson::Int32(n)) => u64::try_from(*n).unwrap_or(0),
        Some(Bson::Int64(n)) => u64::try_from(*n).unwrap_or(0),
        _ => 0,
    }
}

#[async_trait::async_trait]
impl PharmacyStore for MongoPharmacyStore {
    #[instrument(skip(self), err)]
    async fn list_pharmacies(&self) -> Result<Vec<Pharmacy>, StoreError> {
        let cursor = self
            .pharmacies
            .find(doc! {})
            .projection(hide_id())
            .await
            .map_err(map_err)?;
        cursor.try_collect::<Vec<_>>().await.map_err(map_err)
    }

    #[instrument(skip(self), err)]
    async fn find_pharmacy(&self, name: &str) -> Result<Option<Pharmacy>, StoreError> {
        self.pharmacies
            .find_one(doc! { "name": name })
            .projection(hide_id())
            .collation(case_insensitive())
            .await
            .map_err(map_err)
    }

    #[instrument(skip(self), err)]
    async fn pharmacies_stocking(&self, medicine: &str) -> Result<Vec<Pharmacy>, StoreError> {
        let cursor = self
            .pharmacies
            .find(doc! { "inventory.medicine": medicine })
            .projection(hide_id())
            .collation(case_insensitive())
            .await
            .map_err(map_err)?;
        cursor.try_collect::<Vec<_>>().await.map_err(map_err)
    }

    #[instrument(skip(self), err)]
    async fn distinct_medicines(&self) -> Result<Vec<String>, StoreError> {
        // Default (simple) collation: grouping by exact spelling, byte-order sort.
        let mut cursor = self
            .pharmacies
            .aggregate(medicines_pipeline())
            .await
            .map_err(map_err)?;

        let mut names = Vec::new();
        while let Some(group) = cursor.try_next().await.map_err(map_err)? {
            match group.get("_id") {
                Some(Bson::String(name)) => names.push(name.clone()),
                other => tracing::warn!(?other, "skipping non-string medicine name"),
            }
        }
        Ok(names)
    }

    #[instrument(skip(self), err)]
    async fn count_subscriptions(&self, pharmacy: &str, medicine: Option<&str>) -> Result<u64, StoreError> {
        let mut cursor = self
            .customers
            .aggregate(subscription_count_pipeline(pharmacy, medicine))
            .collation(case_insensitive())
            .await
            .map_err(map_err)?;
        let first = cursor.try_next().await.map_err(map_err)?;
        Ok(count_from(first))
    }

    #[instrument(skip(self), err)]
    async fn set_stock(&self, pharmacy: &str, medicine: &str, stock: i64) -> Result<StockWrite, StoreError> {
        let result = self
            .pharmacies
            .update_one(stock_filter(pharmacy, medicine), stock_update(stock))
            .collation(case_insensitive())
            .await
            .map_err(map_err)?;

        if result.matched_count == 0 {
            Ok(StockWrite::NoMatch)
        } else {
            Ok(StockWrite::Applied)
        }
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.db
            .run_command(doc! { "ping": 1 })
            .await
            .map(|_| ())
            .map_err(map_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn medicines_pipeline_groups_and_sorts() {
        let pipeline = medicines_pipeline();
        assert_eq!(pipeline.len(), 3);
        assert_eq!(pipeline[0], doc! { "$unwind": "$inventory" });
        assert_eq!(pipeline[2], doc! { "$sort": { "_id": 1 } });
    }

    #[test]
    fn subscription_pipeline_narrows_by_medicine_when_given() {
        let by_pharmacy = subscription_count_pipeline("CVS", None);
        assert_eq!(by_pharmacy[1], doc! { "$match": { "subscriptions.pharmacy": "CVS" } });

        let by_item = subscription_count_pipeline("CVS", Some("Aspirin"));
        assert_eq!(
            by_item[1],
            doc! { "$match": { "subscriptions.pharmacy": "CVS", "subscriptions.medicine": "Aspirin" } }
        );
        assert_eq!(by_item[2], doc! { "$count": "n" });
    }

    #[test]
    fn user_input_is_never_a_pattern() {
        let filter = stock_filter("C.*", "^asp");
        assert_eq!(filter.get_str("name").unwrap(), "C.*");
        let elem = filter.get_document("inventory").unwrap().get_document("$elemMatch").unwrap();
        assert_eq!(elem.get_str("medicine").unwrap(), "^asp");
    }

    #[test]
    fn stock_update_uses_positional_operator() {
        assert_eq!(stock_update(10), doc! { "$set": { "inventory.$.stock": 10_i64 } });
    }

    #[test]
    fn count_reads_int32_and_int64() {
        assert_eq!(count_from(None), 0);
        assert_eq!(count_from(Some(doc! { "n": 3_i32 })), 3);
        assert_eq!(count_from(Some(doc! { "n": 4_i64 })), 4);
        assert_eq!(count_from(Some(doc! { "other": 1 })), 0);
    }
}
