//! Gridwatch reconciles electricity-market feeds into actual, potential and
//! curtailed generation for wind assets.
//!
//! Overview
//! - Fans requests out to connectors that implement the `gridwatch_core`
//!   contracts: one request per unit per dataset, joined before reconciliation.
//! - Tries connectors in priority order with a per-provider timeout; failures
//!   are tagged and collapsed, then absorbed as report warnings.
//! - Memoizes joined series per unit set in a session cache owned by the
//!   orchestrator.
//! - Cancels fetches for a superseded unit selection.
//!
//! Key behaviors and trade-offs
//! - Partial failure: a unit whose dataset cannot be fetched contributes an
//!   empty series. Views stay renderable at the cost of understating totals;
//!   check `warnings`.
//! - Cache slots: one per unit set. A slot serves any window it covers while
//!   within its TTL; view windows are aligned to the settlement period, so a
//!   moving clock refetches once per period. An uncovered window replaces the
//!   slot instead of keeping both.
//! - Malformed upstream rows are dropped and counted in `skipped_rows`.
//! - Overrides are not clamped to potential by default, matching the market
//!   feeds; enable `clamp_override_to_potential` to cap them.
//!
//! Examples
//! ```rust,ignore
//! use std::sync::Arc;
//! use gridwatch::{Gridwatch, UnitSelection};
//! use gridwatch_mock::MockConnector;
//!
//! let gw = Gridwatch::builder()
//!     .with_connector(Arc::new(MockConnector::new()))
//!     .build()?;
//! let asset = &MockConnector::assets()?[0];
//! let token = gw.begin_selection();
//! let view = gw
//!     .generation_view(asset, &UnitSelection::All, chrono::Utc::now(), &token)
//!     .await?;
//! for s in &view.preview {
//!     println!("{} {} {}", s.ts, s.actual_total, s.curtailment_total);
//! }
//! ```
//!
//! See `demos/examples/` for runnable end-to-end demonstrations.
#![warn(missing_docs)]

mod cache;
pub(crate) mod core;
mod report;
mod router;
mod scope;

pub use core::{Gridwatch, GridwatchBuilder, tag_err};
pub use report::{EnergyFetch, GenerationView, HistoricalView, LiveFetch, LiveStatus, UnitStatus};
pub use router::util::{collapse_errors, join_with_deadline};
pub use tokio_util::sync::CancellationToken;

// Re-export core types for convenience
pub use gridwatch_core::{
    // Configuration
    CacheConfig,
    GridwatchConfig,
    OverridePrecedence,
    Resolution,
    // Errors and reporting
    Dataset,
    FetchWarning,
    GridError,
    ViewStatus,
    // Units and windows
    Asset,
    FuelType,
    QueryWindow,
    SettlementRange,
    UnitId,
    UnitSelection,
    UnitSet,
    // Records and outputs
    BaselineRecord,
    CapacityLimit,
    EnergyRecord,
    HistoricalBucket,
    LiveSeries,
    OverrideInstruction,
    ReconciledSample,
    StepRecord,
    UnitPoint,
    // Connector contract
    Decoded,
    MarketDataConnector,
};
