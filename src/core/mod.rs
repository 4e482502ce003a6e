//! Core module - storage, session cache, filtering and aggregation

pub mod config;
pub mod dataset;
pub mod filter;
pub mod metrics;
pub mod session;
pub mod store;

#[cfg(test)]
pub(crate) mod testutil;

pub use config::Config;
pub use dataset::Dataset;
pub use filter::{ClaimWithFood, FilterOptions, FilteredView, Selection};
pub use metrics::{Chart, ChartKind, ChartPoint, KeyMetrics};
pub use session::{FoodRepository, Session};
pub use store::{SqliteStore, StoreError};
