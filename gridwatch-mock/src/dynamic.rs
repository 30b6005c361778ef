use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use gridwatch_core::connector::{
    BaselineProvider, CapacityProvider, EnergyProvider, MarketDataConnector, OverrideProvider,
};
use gridwatch_core::{
    BaselineRecord, CapacityLimit, Dataset, Decoded, EnergyRecord, GridError, OverrideInstruction,
    QueryWindow, SettlementRange, UnitId,
};

/// Instruction for how a method should behave for a given input.
#[derive(Clone)]
pub enum MockBehavior<T> {
    /// Return the provided value immediately.
    Return(T),
    /// Fail immediately with the provided error.
    Fail(GridError),
    /// Hang indefinitely (simulate a timeout).
    Hang,
}

#[derive(Default)]
struct InternalState {
    baseline_rules: HashMap<UnitId, MockBehavior<Vec<BaselineRecord>>>,
    override_rules: HashMap<UnitId, MockBehavior<Vec<OverrideInstruction>>>,
    capacity_rules: HashMap<UnitId, MockBehavior<Vec<CapacityLimit>>>,
    energy_rules: HashMap<UnitId, MockBehavior<Vec<EnergyRecord>>>,
    calls: Vec<(UnitId, Dataset)>,
}

/// Controller handle used by tests to drive the dynamic mock from the outside.
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockController {
    /// Set the behavior for `baseline` calls for a specific unit.
    pub async fn set_baseline_behavior(
        &self,
        unit: UnitId,
        behavior: MockBehavior<Vec<BaselineRecord>>,
    ) {
        self.state.lock().await.baseline_rules.insert(unit, behavior);
    }

    /// Set the behavior for `overrides` calls for a specific unit.
    pub async fn set_override_behavior(
        &self,
        unit: UnitId,
        behavior: MockBehavior<Vec<OverrideInstruction>>,
    ) {
        self.state.lock().await.override_rules.insert(unit, behavior);
    }

    /// Set the behavior for `capacity` calls for a specific unit.
    pub async fn set_capacity_behavior(
        &self,
        unit: UnitId,
        behavior: MockBehavior<Vec<CapacityLimit>>,
    ) {
        self.state.lock().await.capacity_rules.insert(unit, behavior);
    }

    /// Set the behavior for `energy` calls for a specific unit.
    pub async fn set_energy_behavior(&self, unit: UnitId, behavior: MockBehavior<Vec<EnergyRecord>>) {
        self.state.lock().await.energy_rules.insert(unit, behavior);
    }

    /// Number of calls made for `dataset` so far.
    pub async fn call_count(&self, dataset: Dataset) -> usize {
        let guard = self.state.lock().await;
        guard.calls.iter().filter(|(_, d)| *d == dataset).count()
    }

    /// Return a copy of the call log in arrival order.
    pub async fn calls(&self) -> Vec<(UnitId, Dataset)> {
        self.state.lock().await.calls.clone()
    }

    /// Clear all configured behaviors and the call log.
    pub async fn clear_all_behaviors(&self) {
        let mut guard = self.state.lock().await;
        guard.baseline_rules.clear();
        guard.override_rules.clear();
        guard.capacity_rules.clear();
        guard.energy_rules.clear();
        guard.calls.clear();
    }
}

/// A connector that defers all behavior to an external controller.
///
/// Units without a configured rule fail with `NotFound`.
pub struct DynamicMockConnector {
    name: &'static str,
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockConnector {
    /// Create a new dynamic mock connector and its controller.
    #[must_use]
    pub fn new_with_controller(
        name: &'static str,
    ) -> (Arc<dyn MarketDataConnector>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let controller = DynamicMockController {
            state: Arc::clone(&state),
        };
        let me = Arc::new(Self { name, state });
        (me as Arc<dyn MarketDataConnector>, controller)
    }

    /// Log the call and snapshot the matching rule without holding the lock
    /// across the behavior's await point.
    async fn rule_for<T: Clone>(
        &self,
        unit: &UnitId,
        dataset: Dataset,
        pick: impl FnOnce(&InternalState) -> Option<&MockBehavior<T>>,
    ) -> Option<MockBehavior<T>> {
        let mut guard = self.state.lock().await;
        guard.calls.push((unit.clone(), dataset));
        pick(&*guard).cloned()
    }
}

async fn play<T>(
    behavior: Option<MockBehavior<T>>,
    unit: &UnitId,
    dataset: Dataset,
) -> Result<T, GridError> {
    match behavior {
        Some(MockBehavior::Return(v)) => Ok(v),
        Some(MockBehavior::Fail(e)) => Err(e),
        Some(MockBehavior::Hang) => std::future::pending().await,
        None => Err(GridError::not_found(format!("{dataset} for {unit}"))),
    }
}

impl MarketDataConnector for DynamicMockConnector {
    fn name(&self) -> &'static str {
        self.name
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
impl BaselineProvider for DynamicMockConnector {
    async fn baseline(
        &self,
        unit: &UnitId,
        _window: QueryWindow,
    ) -> Result<Decoded<BaselineRecord>, GridError> {
        let rule = self
            .rule_for(unit, Dataset::Baseline, |s| s.baseline_rules.get(unit))
            .await;
        play(rule, unit, Dataset::Baseline).await.map(Decoded::from)
    }
}

#[async_trait]
impl OverrideProvider for DynamicMockConnector {
    async fn overrides(
        &self,
        unit: &UnitId,
        _window: QueryWindow,
    ) -> Result<Decoded<OverrideInstruction>, GridError> {
        let rule = self
            .rule_for(unit, Dataset::Override, |s| s.override_rules.get(unit))
            .await;
        play(rule, unit, Dataset::Override).await.map(Decoded::from)
    }
}

#[async_trait]
impl CapacityProvider for DynamicMockConnector {
    async fn capacity(
        &self,
        unit: &UnitId,
        _window: QueryWindow,
    ) -> Result<Decoded<CapacityLimit>, GridError> {
        let rule = self
            .rule_for(unit, Dataset::Capacity, |s| s.capacity_rules.get(unit))
            .await;
        play(rule, unit, Dataset::Capacity).await.map(Decoded::from)
    }
}

#[async_trait]
impl EnergyProvider for DynamicMockConnector {
    async fn energy(
        &self,
        unit: &UnitId,
        _range: SettlementRange,
    ) -> Result<Decoded<EnergyRecord>, GridError> {
        let rule = self
            .rule_for(unit, Dataset::Energy, |s| s.energy_rules.get(unit))
            .await;
        play(rule, unit, Dataset::Energy).await.map(Decoded::from)
    }
}
