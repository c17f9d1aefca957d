//! Pharmacy inventory domain.
//!
//! Records (pharmacies, inventory items, customers and their subscriptions), the
//! response shapes built from them, and the stock update command. Pure logic only:
//! no IO, no HTTP, no storage.

pub mod pharmacy;
pub mod stock;
pub mod views;

pub use pharmacy::{count_subscriptions, Customer, InventoryItem, Pharmacy, Subscription};
pub use stock::StockUpdate;
pub use views::{
    distinct_medicines, search_hits, ItemSubscriptions, PharmacyDetail, PharmacySummary, SearchHit,
};
