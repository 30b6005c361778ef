use chrono::{DateTime, TimeDelta, Utc};
use rust_decimal::Decimal;
use tokio_util::sync::CancellationToken;

use gridwatch_core::{
    Asset, GridError, QueryWindow, Resolution, ResolveOptions, SettlementRange, UnitSelection,
    ViewStatus, downsample, reconcile, unit_points_at,
};

use crate::Gridwatch;
use crate::report::{GenerationView, HistoricalView, LiveStatus, UnitStatus};

#[cfg(feature = "tracing")]
fn note_discard(e: &GridError) {
    if e.is_cancelled() {
        tracing::debug!("selection superseded; discarding view");
    }
}

#[cfg(not(feature = "tracing"))]
const fn note_discard(_: &GridError) {}

impl Gridwatch {
    /// Start a new unit selection, cancelling fetches issued under the previous one.
    ///
    /// Pass the returned token to the view methods. Any in-flight call holding
    /// an older token resolves to `GridError::Cancelled`.
    pub fn begin_selection(&self) -> CancellationToken {
        self.scope.begin()
    }

    /// Token of the active selection.
    #[must_use]
    pub fn current_selection(&self) -> CancellationToken {
        self.scope.current()
    }

    /// Drop every cached series.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Default live query window for `now`, aligned to its settlement period.
    ///
    /// Views derived within one settlement period share a window and so share
    /// the cached fetch for their unit set.
    ///
    /// # Errors
    /// Returns `InvalidArg` if the configured spans overflow.
    pub fn live_window(&self, now: DateTime<Utc>) -> Result<QueryWindow, GridError> {
        QueryWindow::around_period(now, self.cfg.live_lookback, self.cfg.live_lookahead)
    }

    /// Actual, potential and curtailed output for the selected units of `asset`.
    ///
    /// Upstream failures are reported in `warnings`. When no baseline exists
    /// for the selection the view is empty with status `DataUnavailable`.
    ///
    /// # Errors
    /// - `InvalidArg` for a selection outside `asset`.
    /// - `Cancelled` when `cancel` fires first; callers should discard silently.
    /// - `RequestTimeout` if the request deadline elapses.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "gridwatch::generation_view",
            skip(self, asset, selection, cancel),
            fields(asset = %asset.name, now = %now),
        )
    )]
    pub async fn generation_view(
        &self,
        asset: &Asset,
        selection: &UnitSelection,
        now: DateTime<Utc>,
        cancel: &CancellationToken,
    ) -> Result<GenerationView, GridError> {
        let units = selection.resolve(asset)?;
        let window = self.live_window(now)?;
        let fetched = self
            .live_series(&units, window, cancel)
            .await
            .inspect_err(note_discard)?;

        let lookback = TimeDelta::from_std(self.cfg.axis_lookback).map_err(|_| {
            GridError::InvalidArg(format!(
                "axis lookback {:?} out of range",
                self.cfg.axis_lookback
            ))
        })?;
        let rec = reconcile(
            &fetched.series,
            &units,
            now,
            lookback,
            ResolveOptions::from(&self.cfg),
        );
        let status = if rec.samples.is_empty() {
            ViewStatus::DataUnavailable
        } else {
            ViewStatus::Available
        };
        let preview = downsample(&rec.samples, self.cfg.preview_points);

        Ok(GenerationView {
            asset: asset.name.clone(),
            units,
            now,
            samples: rec.samples,
            preview,
            currently_curtailed: rec.currently_curtailed,
            status,
            warnings: fetched.warnings.clone(),
            skipped_rows: fetched.skipped_rows,
        })
    }

    /// Settlement energy for the selected units, bucketed at `resolution`.
    ///
    /// # Errors
    /// Same as [`generation_view`](Self::generation_view).
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "gridwatch::historical_view",
            skip(self, asset, selection, cancel),
            fields(asset = %asset.name, resolution = resolution.as_str()),
        )
    )]
    pub async fn historical_view(
        &self,
        asset: &Asset,
        selection: &UnitSelection,
        range: SettlementRange,
        resolution: Resolution,
        cancel: &CancellationToken,
    ) -> Result<HistoricalView, GridError> {
        let units = selection.resolve(asset)?;
        let fetched = self
            .energy_history(&units, range, cancel)
            .await
            .inspect_err(note_discard)?;

        let buckets = self
            .bucketizer
            .historical(&fetched.records, &units, range, resolution);
        let total = buckets.iter().map(|b| b.quantity).sum::<Decimal>();
        let status = if buckets.is_empty() {
            ViewStatus::DataUnavailable
        } else {
            ViewStatus::Available
        };

        Ok(HistoricalView {
            asset: asset.name.clone(),
            units,
            range,
            resolution,
            buckets,
            total,
            status,
            warnings: fetched.warnings.clone(),
            skipped_rows: fetched.skipped_rows,
        })
    }

    /// Each selected unit's baseline, capacity, override and actual level at `now`.
    ///
    /// # Errors
    /// Same as [`generation_view`](Self::generation_view).
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "gridwatch::live_status",
            skip(self, asset, selection, cancel),
            fields(asset = %asset.name, now = %now),
        )
    )]
    pub async fn live_status(
        &self,
        asset: &Asset,
        selection: &UnitSelection,
        now: DateTime<Utc>,
        cancel: &CancellationToken,
    ) -> Result<LiveStatus, GridError> {
        let units = selection.resolve(asset)?;
        let window = self.live_window(now)?;
        let fetched = self
            .live_series(&units, window, cancel)
            .await
            .inspect_err(note_discard)?;

        let units: Vec<UnitStatus> =
            unit_points_at(&fetched.series, &units, now, ResolveOptions::from(&self.cfg))
                .into_iter()
                .map(|(unit, point)| UnitStatus { unit, point })
                .collect();
        let currently_curtailed = units.iter().any(|u| u.point.override_level.is_some());

        Ok(LiveStatus {
            now,
            units,
            currently_curtailed,
            warnings: fetched.warnings.clone(),
            skipped_rows: fetched.skipped_rows,
        })
    }
}
