//! Results returned by the orchestrator.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use gridwatch_core::{
    EnergyRecord, FetchWarning, HistoricalBucket, LiveSeries, QueryWindow, ReconciledSample,
    Resolution, SettlementRange, UnitId, UnitPoint, UnitSet, ViewStatus,
};

/// Joined live records for a unit set, plus the failures absorbed while fetching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LiveFetch {
    /// Window the records were requested for.
    pub window: QueryWindow,
    /// Records from every unit, in unit order.
    pub series: LiveSeries,
    /// One entry per failed unit and dataset.
    pub warnings: Vec<FetchWarning>,
    /// Malformed upstream rows dropped while decoding.
    pub skipped_rows: usize,
}

/// Joined settlement energy for a unit set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnergyFetch {
    /// Range the records were requested for.
    pub range: SettlementRange,
    /// Records from every unit, in unit order.
    pub records: Vec<EnergyRecord>,
    /// One entry per failed unit.
    pub warnings: Vec<FetchWarning>,
    /// Malformed upstream rows dropped while decoding.
    pub skipped_rows: usize,
}

/// Actual vs potential vs curtailed output for a selection of an asset's units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationView {
    /// Asset display name.
    pub asset: String,
    /// Units aggregated into the samples.
    pub units: UnitSet,
    /// Cutoff instant the view was derived at.
    pub now: DateTime<Utc>,
    /// One reconciled sample per axis instant.
    pub samples: Vec<ReconciledSample>,
    /// Downsampled copy of `samples` for compact rendering.
    pub preview: Vec<ReconciledSample>,
    /// Whether any selected unit is under an override at `now`.
    pub currently_curtailed: bool,
    /// `DataUnavailable` when no baseline exists for the selection.
    pub status: ViewStatus,
    /// Absorbed upstream failures.
    pub warnings: Vec<FetchWarning>,
    /// Malformed upstream rows dropped while decoding.
    pub skipped_rows: usize,
}

/// Settlement energy re-aggregated into calendar buckets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoricalView {
    /// Asset display name.
    pub asset: String,
    /// Units aggregated into the buckets.
    pub units: UnitSet,
    /// Settlement dates covered.
    pub range: SettlementRange,
    /// Bucket resolution.
    pub resolution: Resolution,
    /// Ascending buckets.
    pub buckets: Vec<HistoricalBucket>,
    /// Sum of all bucket quantities in MWh.
    pub total: Decimal,
    /// `DataUnavailable` when no energy exists for the selection.
    pub status: ViewStatus,
    /// Absorbed upstream failures.
    pub warnings: Vec<FetchWarning>,
    /// Malformed upstream rows dropped while decoding.
    pub skipped_rows: usize,
}

/// Point-in-time position of one unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitStatus {
    /// Unit id.
    pub unit: UnitId,
    /// Resolved levels at `now`.
    pub point: UnitPoint,
}

/// Point-in-time position of every selected unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LiveStatus {
    /// Instant the status was resolved at.
    pub now: DateTime<Utc>,
    /// Per-unit positions, in unit order.
    pub units: Vec<UnitStatus>,
    /// Whether any selected unit is under an override at `now`.
    pub currently_curtailed: bool,
    /// Absorbed upstream failures.
    pub warnings: Vec<FetchWarning>,
    /// Malformed upstream rows dropped while decoding.
    pub skipped_rows: usize,
}
