use gridwatch_core::{
    BaselineRecord, CapacityLimit, Dataset, Decoded, EnergyRecord, OverrideInstruction, QueryWindow,
    SettlementRange,
};

use crate::Gridwatch;

impl Gridwatch {
    gridwatch_unit_fetch! {
        /// Baseline declarations for one unit.
        method: fetch_baseline(window: QueryWindow) -> Decoded<BaselineRecord>,
        accessor: as_baseline_provider,
        capability: Dataset::Baseline,
        call: baseline
    }

    gridwatch_unit_fetch! {
        /// Dispatch overrides for one unit.
        method: fetch_overrides(window: QueryWindow) -> Decoded<OverrideInstruction>,
        accessor: as_override_provider,
        capability: Dataset::Override,
        call: overrides
    }

    gridwatch_unit_fetch! {
        /// Capacity limits for one unit.
        method: fetch_capacity(window: QueryWindow) -> Decoded<CapacityLimit>,
        accessor: as_capacity_provider,
        capability: Dataset::Capacity,
        call: capacity
    }

    gridwatch_unit_fetch! {
        /// Settlement energy for one unit.
        method: fetch_energy(range: SettlementRange) -> Decoded<EnergyRecord>,
        accessor: as_energy_provider,
        capability: Dataset::Energy,
        call: energy
    }
}
