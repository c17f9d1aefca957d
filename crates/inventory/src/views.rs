//! Response shapes derived from pharmacy records.
//!
//! Everything here is deterministic and IO-free; the decorating counts are supplied by
//! the caller, which is responsible for fetching them from the store.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::pharmacy::{InventoryItem, Pharmacy};

/// Pharmacy listing entry: the full record plus per-pharmacy totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PharmacySummary {
    #[serde(flatten)]
    pub pharmacy: Pharmacy,
    pub total_stock: i64,
    pub total_subscriptions: u64,
}

impl PharmacySummary {
    pub fn new(pharmacy: Pharmacy, total_subscriptions: u64) -> Self {
        let total_stock = pharmacy.total_stock();
        Self {
            pharmacy,
            total_stock,
            total_subscriptions,
        }
    }
}

/// Inventory item decorated with the number of customers subscribed to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSubscriptions {
    pub medicine: String,
    pub stock: i64,
    pub subscriptions: u64,
}

impl ItemSubscriptions {
    pub fn new(item: InventoryItem, subscriptions: u64) -> Self {
        Self {
            medicine: item.medicine,
            stock: item.stock,
            subscriptions,
        }
    }
}

/// Single-pharmacy view with per-item subscription counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PharmacyDetail {
    pub name: String,
    pub address: String,
    pub inventory: Vec<ItemSubscriptions>,
}

/// One place where a searched medicine is available.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub pharmacy: String,
    pub stock: i64,
    pub address: String,
}

/// Availability of `medicine` across `pharmacies`.
///
/// Emits one hit per matching item with positive stock, in store order. Pharmacies
/// where the medicine is out of stock are left out entirely.
pub fn search_hits<'a>(pharmacies: impl IntoIterator<Item = &'a Pharmacy>, medicine: &str) -> Vec<SearchHit> {
    pharmacies
        .into_iter()
        .flat_map(|p| {
            p.items_for(medicine)
                .filter(|item| item.in_stock())
                .map(move |item| SearchHit {
                    pharmacy: p.name.clone(),
                    stock: item.stock,
                    address: p.address.clone(),
                })
        })
        .collect()
}

/// Distinct medicine names across all inventories, ascending in byte order.
///
/// Grouping is by exact spelling: "Aspirin" and "aspirin" are two entries.
pub fn distinct_medicines<'a>(pharmacies: impl IntoIterator<Item = &'a Pharmacy>) -> Vec<String> {
    pharmacies
        .into_iter()
        .flat_map(|p| p.inventory.iter().map(|item| item.medicine.clone()))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
