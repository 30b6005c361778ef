use std::sync::Arc;

use gridwatch_core::{Dataset, GridError, LiveSeries, QueryWindow, UnitId, UnitSet};
use tokio_util::sync::CancellationToken;

use crate::Gridwatch;
use crate::report::LiveFetch;
use crate::router::util::{FetchNotes, join_with_deadline};

impl Gridwatch {
    async fn fetch_unit_live(
        &self,
        unit: &UnitId,
        window: QueryWindow,
    ) -> (LiveSeries, FetchNotes) {
        let (baseline, overrides, capacity) = futures::join!(
            self.fetch_baseline(unit, window),
            self.fetch_overrides(unit, window),
            self.fetch_capacity(unit, window),
        );
        let mut notes = FetchNotes::default();
        let series = LiveSeries {
            baseline: notes.absorb(baseline, unit, Dataset::Baseline),
            overrides: notes.absorb(overrides, unit, Dataset::Override),
            capacity: notes.absorb(capacity, unit, Dataset::Capacity),
        };
        (series, notes)
    }

    /// Fetch baseline, override and capacity records for every unit in `units`.
    ///
    /// One request per unit and dataset runs concurrently; a failed request
    /// contributes an empty series and a warning. The joined result is cached
    /// per unit set and served again for any `window` the cached one covers;
    /// the returned `window` is the one actually fetched.
    ///
    /// # Errors
    /// - `Cancelled` if `cancel` fires before the join completes. Nothing is cached.
    /// - `RequestTimeout` if the configured request deadline elapses.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "gridwatch::live_series",
            skip(self, units, cancel),
            fields(units = %units.key(), from = %window.from(), to = %window.to()),
        )
    )]
    pub async fn live_series(
        &self,
        units: &UnitSet,
        window: QueryWindow,
        cancel: &CancellationToken,
    ) -> Result<Arc<LiveFetch>, GridError> {
        if cancel.is_cancelled() {
            return Err(GridError::Cancelled);
        }
        if let Some(hit) = self.cache.live(units, window).await {
            return Ok(hit);
        }

        let tasks = units.iter().map(|u| self.fetch_unit_live(u, window));
        let joined = tokio::select! {
            biased;
            () = cancel.cancelled() => Err(GridError::Cancelled),
            res = join_with_deadline(tasks, self.cfg.request_timeout) => {
                res.map_err(|_| GridError::request_timeout("live"))
            }
        }?;

        let mut series = LiveSeries::default();
        let mut notes = FetchNotes::default();
        for (s, n) in joined {
            series.extend(s);
            notes.merge(n);
        }

        // A selection change that lands after the join must not populate the cache.
        if cancel.is_cancelled() {
            return Err(GridError::Cancelled);
        }
        let fetched = Arc::new(LiveFetch {
            window,
            series,
            warnings: notes.warnings,
            skipped_rows: notes.skipped_rows,
        });
        self.cache.put_live(units, Arc::clone(&fetched)).await;
        Ok(fetched)
    }
}
