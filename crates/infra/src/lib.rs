//! Infrastructure layer: document store adapters, configuration, and the
//! query/aggregation layer that sits on top of them.

pub mod config;
pub mod queries;
pub mod store;

pub use config::{AppConfig, ConfigError, StoreConfig};
pub use queries::{PharmacyQueries, QueryError};
pub use store::{InMemoryPharmacyStore, PharmacyStore, StockWrite, StoreError};
