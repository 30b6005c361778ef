//! Gridwatch-specific error, configuration, identifier and report primitives.
#![warn(missing_docs)]

mod config;
mod dataset;
mod error;
mod ids;
mod reports;

pub use config::{
    CacheConfig, DEFAULT_BIWEEKLY_ANCHOR, GridwatchConfig, OverridePrecedence, Resolution,
};
pub use dataset::Dataset;
pub use error::GridError;
pub use ids::{ConnectorKey, UnitId};
pub use reports::{FetchWarning, ViewStatus};
