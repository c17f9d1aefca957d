use serde::{Deserialize, Serialize};

use pharmastock_core::names_match;

/// A medicine stocked by a pharmacy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub medicine: String,
    pub stock: i64,
}

impl InventoryItem {
    pub fn new(medicine: impl Into<String>, stock: i64) -> Self {
        Self {
            medicine: medicine.into(),
            stock,
        }
    }

    pub fn is_medicine(&self, medicine: &str) -> bool {
        names_match(&self.medicine, medicine)
    }

    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

/// A named pharmacy location and the medicines it stocks.
///
/// Identified by `name`, matched case-insensitively. Store-internal identifiers are
/// never part of this shape, so they cannot leak into responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pharmacy {
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub inventory: Vec<InventoryItem>,
}

impl Pharmacy {
    pub fn new(name: impl Into<String>, address: impl Into<String>, inventory: Vec<InventoryItem>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            inventory,
        }
    }

    pub fn is_named(&self, name: &str) -> bool {
        names_match(&self.name, name)
    }

    /// Sum of stock across the whole inventory, saturating at `i64::MAX`/`i64::MIN`.
    pub fn total_stock(&self) -> i64 {
        self.inventory
            .iter()
            .fold(0i64, |total, item| total.saturating_add(item.stock))
    }

    /// Inventory items whose medicine matches `medicine` (case-insensitive exact).
    pub fn items_for<'a>(&'a self, medicine: &'a str) -> impl Iterator<Item = &'a InventoryItem> + 'a {
        self.inventory.iter().filter(move |item| item.is_medicine(medicine))
    }

    pub fn stocks(&self, medicine: &str) -> bool {
        self.items_for(medicine).next().is_some()
    }

    /// Set the stock of the first item matching `medicine`.
    ///
    /// Returns false (and changes nothing) when no item matches.
    pub fn set_stock(&mut self, medicine: &str, stock: i64) -> bool {
        match self.inventory.iter_mut().find(|item| item.is_medicine(medicine)) {
            Some(item) => {
                item.stock = stock;
                true
            }
            None => false,
        }
    }
}

/// A customer's interest in a medicine at a pharmacy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    pub pharmacy: String,
    pub medicine: String,
}

impl Subscription {
    pub fn new(pharmacy: impl Into<String>, medicine: impl Into<String>) -> Self {
        Self {
            pharmacy: pharmacy.into(),
            medicine: medicine.into(),
        }
    }

    /// True when this subscription is for `pharmacy` and, if given, for `medicine`.
    pub fn matches(&self, pharmacy: &str, medicine: Option<&str>) -> bool {
        names_match(&self.pharmacy, pharmacy)
            && medicine.is_none_or(|m| names_match(&self.medicine, m))
    }
}

/// Read-only customer record; only its subscriptions are of interest here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(default)]
    pub subscriptions: Vec<Subscription>,
}

impl Customer {
    pub fn new(subscriptions: Vec<Subscription>) -> Self {
        Self { subscriptions }
    }
}

/// Count subscriptions across `customers` for a pharmacy, optionally narrowed to one medicine.
pub fn count_subscriptions<'a>(
    customers: impl IntoIterator<Item = &'a Customer>,
    pharmacy: &str,
    medicine: Option<&str>,
) -> u64 {
    customers
        .into_iter()
        .flat_map(|c| c.subscriptions.iter())
        .filter(|s| s.matches(pharmacy, medicine))
        .count() as u64
}
