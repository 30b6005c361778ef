//! gridwatch-core
//!
//! Record model, connector traits, and the reconciliation logic shared across
//! the gridwatch workspace.
//!
//! - `records`: the four upstream interval datasets and the derived outputs.
//! - `unit`: unit ids, unit sets, assets and selections.
//! - `window`: live query windows and settlement-date ranges.
//! - `connector`: the `MarketDataConnector` trait and dataset role traits.
//! - `wire`: decoding of upstream stream payloads.
//! - `timeseries`: axis building, point resolution, aggregation, bucketing and
//!   downsampling.
//!
//! Everything in `timeseries` is synchronous and pure; only connector calls
//! are async.
#![warn(missing_docs)]

/// Connector capability traits and the primary `MarketDataConnector` interface.
pub mod connector;
pub mod records;
/// Time-series reconciliation and bucketing.
pub mod timeseries;
pub mod unit;
pub mod window;
pub mod wire;

pub use connector::MarketDataConnector;
pub use gridwatch_types::*;
pub use records::*;
pub use timeseries::aggregate::{Reconciliation, reconcile, unit_points_at};
pub use timeseries::axis::build_time_axis;
pub use timeseries::bucket::Bucketizer;
pub use timeseries::downsample::downsample;
pub use timeseries::resolve::{ResolveOptions, StepSeries, UnitPoint, UnitTimeline};
pub use unit::{Asset, FuelType, UnitSelection, UnitSet};
pub use window::{QueryWindow, SettlementRange};
pub use wire::Decoded;
