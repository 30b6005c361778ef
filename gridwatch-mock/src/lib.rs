//! Mock gridwatch connectors for tests and examples.
//!
//! - [`MockConnector`] serves deterministic fixture payloads for a few real
//!   offshore wind units, decoded through `gridwatch_core::wire`.
//! - [`DynamicMockConnector`] defers every call to rules set through a
//!   [`DynamicMockController`].
use async_trait::async_trait;
use gridwatch_core::connector::{
    BaselineProvider, CapacityProvider, EnergyProvider, MarketDataConnector, OverrideProvider,
};
use gridwatch_core::{
    Asset, BaselineRecord, CapacityLimit, Dataset, Decoded, EnergyRecord, GridError,
    OverrideInstruction, QueryWindow, SettlementRange, UnitId, wire,
};

mod dynamic;
mod fixtures;

pub use dynamic::{DynamicMockConnector, DynamicMockController, MockBehavior};
pub use fixtures::{MORAY_EAST_1, MORAY_EAST_2, SEAGREEN};

/// Mock connector for CI-safe examples. Provides deterministic data from static fixtures.
///
/// Live fixtures cover 2024-05-01 00:00 to 02:00 UTC; energy fixtures cover
/// 2024-04-01 to 2024-05-31. The unit codes `FAIL` and `TIMEOUT` force a
/// connector error and a 200 ms delay respectively.
pub struct MockConnector;

impl Default for MockConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl MockConnector {
    /// Create the fixture connector.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Assets whose units have fixtures.
    ///
    /// # Errors
    /// Never in practice; fixture unit codes are valid.
    pub fn assets() -> Result<Vec<Asset>, GridError> {
        fixtures::assets()
    }

    fn not_found(dataset: Dataset, unit: &UnitId) -> GridError {
        GridError::not_found(format!("{dataset} for {unit}"))
    }

    async fn maybe_fail_or_timeout(unit: &UnitId, dataset: Dataset) -> Result<(), GridError> {
        match unit.as_str() {
            "FAIL" => Err(GridError::connector(
                "gridwatch-mock",
                format!("forced failure: {dataset}"),
            )),
            "TIMEOUT" => {
                // Short enough to keep tests fast; the orchestrator may time out first.
                tokio::time::sleep(std::time::Duration::from_millis(200)).await;
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

fn within(window: QueryWindow, t: chrono::DateTime<chrono::Utc>) -> bool {
    window.from() <= t && t < window.to()
}

impl MarketDataConnector for MockConnector {
    fn name(&self) -> &'static str {
        "gridwatch-mock"
    }

    fn as_baseline_provider(&self) -> Option<&dyn BaselineProvider> {
        Some(self as &dyn BaselineProvider)
    }
    fn as_override_provider(&self) -> Option<&dyn OverrideProvider> {
        Some(self as &dyn OverrideProvider)
    }
    fn as_capacity_provider(&self) -> Option<&dyn CapacityProvider> {
        Some(self as &dyn CapacityProvider)
    }
    fn as_energy_provider(&self) -> Option<&dyn EnergyProvider> {
        Some(self as &dyn EnergyProvider)
    }
}

#[async_trait]
impl BaselineProvider for MockConnector {
    async fn baseline(
        &self,
        unit: &UnitId,
        window: QueryWindow,
    ) -> Result<Decoded<BaselineRecord>, GridError> {
        Self::maybe_fail_or_timeout(unit, Dataset::Baseline).await?;
        let payload = fixtures::live::baseline(unit.as_str())
            .ok_or_else(|| Self::not_found(Dataset::Baseline, unit))?;
        let mut decoded = wire::decode_baseline(payload, unit)?;
        decoded.records.retain(|r| within(window, r.start));
        Ok(decoded)
    }
}

#[async_trait]
impl OverrideProvider for MockConnector {
    async fn overrides(
        &self,
        unit: &UnitId,
        window: QueryWindow,
    ) -> Result<Decoded<OverrideInstruction>, GridError> {
        Self::maybe_fail_or_timeout(unit, Dataset::Override).await?;
        let payload = fixtures::live::overrides(unit.as_str())
            .ok_or_else(|| Self::not_found(Dataset::Override, unit))?;
        let mut decoded = wire::decode_overrides(payload, unit)?;
        decoded
            .records
            .retain(|o| o.start < window.to() && window.from() < o.end);
        Ok(decoded)
    }
}

#[async_trait]
impl CapacityProvider for MockConnector {
    async fn capacity(
        &self,
        unit: &UnitId,
        window: QueryWindow,
    ) -> Result<Decoded<CapacityLimit>, GridError> {
        Self::maybe_fail_or_timeout(unit, Dataset::Capacity).await?;
        let payload = fixtures::live::capacity(unit.as_str())
            .ok_or_else(|| Self::not_found(Dataset::Capacity, unit))?;
        let mut decoded = wire::decode_capacity(payload, unit)?;
        decoded.records.retain(|r| within(window, r.start));
        Ok(decoded)
    }
}

#[async_trait]
impl EnergyProvider for MockConnector {
    async fn energy(
        &self,
        unit: &UnitId,
        range: SettlementRange,
    ) -> Result<Decoded<EnergyRecord>, GridError> {
        Self::maybe_fail_or_timeout(unit, Dataset::Energy).await?;
        let payload = fixtures::energy::payload(unit.as_str(), range)
            .ok_or_else(|| Self::not_found(Dataset::Energy, unit))?;
        wire::decode_energy(&payload, unit)
    }
}
