use std::sync::Arc;

use gridwatch_core::{Dataset, GridError, SettlementRange, UnitSet};
use tokio_util::sync::CancellationToken;

use crate::Gridwatch;
use crate::report::EnergyFetch;
use crate::router::util::{FetchNotes, join_with_deadline};

impl Gridwatch {
    /// Fetch settlement-period energy for every unit in `units`.
    ///
    /// Behaves like [`live_series`](Self::live_series): concurrent per-unit
    /// requests, absorbed failures, and a per-unit-set cache slot that serves
    /// any `range` the cached one covers.
    ///
    /// # Errors
    /// - `Cancelled` if `cancel` fires before the join completes.
    /// - `RequestTimeout` if the configured request deadline elapses.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "gridwatch::energy_history",
            skip(self, units, cancel),
            fields(units = %units.key(), from = %range.from(), to = %range.to()),
        )
    )]
    pub async fn energy_history(
        &self,
        units: &UnitSet,
        range: SettlementRange,
        cancel: &CancellationToken,
    ) -> Result<Arc<EnergyFetch>, GridError> {
        if cancel.is_cancelled() {
            return Err(GridError::Cancelled);
        }
        if let Some(hit) = self.cache.energy(units, range).await {
            return Ok(hit);
        }

        let tasks = units
            .iter()
            .map(|u| async move { (u, self.fetch_energy(u, range).await) });
        let joined = tokio::select! {
            biased;
            () = cancel.cancelled() => Err(GridError::Cancelled),
            res = join_with_deadline(tasks, self.cfg.request_timeout) => {
                res.map_err(|_| GridError::request_timeout("energy"))
            }
        }?;

        let mut records = Vec::new();
        let mut notes = FetchNotes::default();
        for (unit, res) in joined {
            records.extend(notes.absorb(res, unit, Dataset::Energy));
        }

        if cancel.is_cancelled() {
            return Err(GridError::Cancelled);
        }
        let fetched = Arc::new(EnergyFetch {
            range,
            records,
            warnings: notes.warnings,
            skipped_rows: notes.skipped_rows,
        });
        self.cache.put_energy(units, Arc::clone(&fetched)).await;
        Ok(fetched)
    }
}
