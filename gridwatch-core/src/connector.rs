use async_trait::async_trait;

use crate::records::{BaselineRecord, CapacityLimit, EnergyRecord, OverrideInstruction};
use crate::window::{QueryWindow, SettlementRange};
use crate::wire::Decoded;
pub use gridwatch_types::ConnectorKey;
use gridwatch_types::{GridError, UnitId};

/// Focused role trait for connectors that provide baseline declarations (PN).
///
/// Every role returns [`Decoded`] records: connectors that parse upstream rows
/// report how many malformed rows they dropped, others convert a plain `Vec`
/// with `Decoded::from`.
#[async_trait]
pub trait BaselineProvider: Send + Sync {
    /// Fetch baseline records for `unit` whose start falls inside `window`.
    async fn baseline(
        &self,
        unit: &UnitId,
        window: QueryWindow,
    ) -> Result<Decoded<BaselineRecord>, GridError>;
}

/// Focused role trait for connectors that provide dispatch overrides (BOAL).
#[async_trait]
pub trait OverrideProvider: Send + Sync {
    /// Fetch override instructions for `unit` overlapping `window`.
    async fn overrides(
        &self,
        unit: &UnitId,
        window: QueryWindow,
    ) -> Result<Decoded<OverrideInstruction>, GridError>;
}

/// Focused role trait for connectors that provide capacity limits (MEL).
#[async_trait]
pub trait CapacityProvider: Send + Sync {
    /// Fetch capacity limits for `unit` whose start falls inside `window`.
    async fn capacity(
        &self,
        unit: &UnitId,
        window: QueryWindow,
    ) -> Result<Decoded<CapacityLimit>, GridError>;
}

/// Focused role trait for connectors that provide metered settlement energy (B1610).
#[async_trait]
pub trait EnergyProvider: Send + Sync {
    /// Fetch settlement-period energy for `unit` over an inclusive date range.
    async fn energy(
        &self,
        unit: &UnitId,
        range: SettlementRange,
    ) -> Result<Decoded<EnergyRecord>, GridError>;
}

/// Main connector trait implemented by market-data sources.
///
/// Capabilities are advertised through the `as_*_provider` accessors; the
/// orchestrator skips connectors that return `None` for a dataset.
pub trait MarketDataConnector: Send + Sync {
    /// A stable identifier for priority lists (e.g., "elexon-bmrs", "gridwatch-mock").
    fn name(&self) -> &'static str;

    /// Canonical connector key constructed from the static name.
    fn key(&self) -> ConnectorKey {
        ConnectorKey::new(self.name())
    }

    /// Whether this connector claims to serve `unit`.
    ///
    /// Default: every unit.
    fn supports_unit(&self, unit: &UnitId) -> bool {
        let _ = unit;
        true
    }

    /// If implemented, returns a trait object for baseline declarations.
    fn as_baseline_provider(&self) -> Option<&dyn BaselineProvider> {
        None
    }

    /// If implemented, returns a trait object for dispatch overrides.
    fn as_override_provider(&self) -> Option<&dyn OverrideProvider> {
        None
    }

    /// If implemented, returns a trait object for capacity limits.
    fn as_capacity_provider(&self) -> Option<&dyn CapacityProvider> {
        None
    }

    /// If implemented, returns a trait object for settlement energy.
    fn as_energy_provider(&self) -> Option<&dyn EnergyProvider> {
        None
    }
}
