use std::sync::Arc;

use moka::future::Cache;

use gridwatch_core::{CacheConfig, QueryWindow, SettlementRange, UnitSet};

use crate::report::{EnergyFetch, LiveFetch};

/// Per-session memo of joined upstream series, keyed by unit set.
///
/// Each unit set holds one slot per dataset family. A lookup hits while the
/// slot is within its TTL and its window (or range) covers the requested one;
/// otherwise the caller refetches and the insert replaces the slot. Entries
/// are inserted whole.
pub(crate) struct SeriesCache {
    live: Option<Cache<String, Arc<LiveFetch>>>,
    energy: Option<Cache<String, Arc<EnergyFetch>>>,
}

fn build<V>(cfg: &CacheConfig) -> Option<Cache<String, V>>
where
    V: Clone + Send + Sync + 'static,
{
    let ttl = cfg.ttl()?;
    Some(
        Cache::builder()
            .max_capacity(cfg.max_entries)
            .time_to_live(ttl)
            .build(),
    )
}

impl SeriesCache {
    pub(crate) fn new(cfg: &CacheConfig) -> Self {
        Self {
            live: build(cfg),
            energy: build(cfg),
        }
    }

    pub(crate) async fn live(&self, units: &UnitSet, window: QueryWindow) -> Option<Arc<LiveFetch>> {
        let hit = self.live.as_ref()?.get(&units.key()).await?;
        hit.window.covers(&window).then_some(hit)
    }

    pub(crate) async fn put_live(&self, units: &UnitSet, value: Arc<LiveFetch>) {
        if let Some(c) = &self.live {
            c.insert(units.key(), value).await;
        }
    }

    pub(crate) async fn energy(
        &self,
        units: &UnitSet,
        range: SettlementRange,
    ) -> Option<Arc<EnergyFetch>> {
        let hit = self.energy.as_ref()?.get(&units.key()).await?;
        hit.range.covers(&range).then_some(hit)
    }

    pub(crate) async fn put_energy(&self, units: &UnitSet, value: Arc<EnergyFetch>) {
        if let Some(c) = &self.energy {
            c.insert(units.key(), value).await;
        }
    }

    pub(crate) fn clear(&self) {
        if let Some(c) = &self.live {
            c.invalidate_all();
        }
        if let Some(c) = &self.energy {
            c.invalidate_all();
        }
    }
}
