use core::cmp::Reverse;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::records::{LiveSeries, OverrideInstruction, StepRecord};
use gridwatch_types::{GridwatchConfig, OverridePrecedence, UnitId};

/// Knobs that change how a unit's point is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResolveOptions {
    /// Tie-break among simultaneously active overrides.
    pub precedence: OverridePrecedence,
    /// Cap `actual` at `potential` before computing curtailment.
    pub clamp_override_to_potential: bool,
}

impl From<&GridwatchConfig> for ResolveOptions {
    fn from(cfg: &GridwatchConfig) -> Self {
        Self {
            precedence: cfg.override_precedence,
            clamp_override_to_potential: cfg.clamp_override_to_potential,
        }
    }
}

/// A step function over time built from stepwise level records.
///
/// The value at `t` is the level of the record with the latest `start <= t`;
/// among equal starts the one appearing last in input order applies.
#[derive(Debug, Clone, Default)]
pub struct StepSeries {
    steps: Vec<(DateTime<Utc>, Decimal)>,
}

impl StepSeries {
    /// Build from records in feed order.
    pub fn new<'a>(records: impl IntoIterator<Item = &'a StepRecord>) -> Self {
        let mut steps: Vec<_> = records.into_iter().map(|r| (r.start, r.level)).collect();
        // Stable: equal starts keep feed order, so the last one wins on lookup.
        steps.sort_by_key(|(start, _)| *start);
        Self { steps }
    }

    /// Level applying at `t`, if any step has started.
    #[must_use]
    pub fn level_at(&self, t: DateTime<Utc>) -> Option<Decimal> {
        let idx = self.steps.partition_point(|(start, _)| *start <= t);
        idx.checked_sub(1).map(|i| self.steps[i].1)
    }
}

/// Override instructions for one unit, sorted by start.
#[derive(Debug, Clone, Default)]
pub struct OverrideSet {
    // (feed position, instruction)
    items: Vec<(usize, OverrideInstruction)>,
}

impl OverrideSet {
    /// Build from instructions in feed order.
    pub fn new<'a>(instructions: impl IntoIterator<Item = &'a OverrideInstruction>) -> Self {
        let mut items: Vec<_> = instructions.into_iter().cloned().enumerate().collect();
        items.sort_by_key(|(_, o)| o.start);
        Self { items }
    }

    /// The instruction governing `t`, chosen by `precedence` when several match.
    #[must_use]
    pub fn active_at(
        &self,
        t: DateTime<Utc>,
        precedence: OverridePrecedence,
    ) -> Option<&OverrideInstruction> {
        let started = self.items.partition_point(|(_, o)| o.start <= t);
        let active = self.items[..started].iter().filter(|(_, o)| t < o.end);
        let chosen = match precedence {
            OverridePrecedence::LatestAcceptance => active.max_by_key(|(idx, o)| {
                (o.acceptance_number, o.accepted_at, Reverse(*idx))
            }),
            OverridePrecedence::LatestStart => active.max_by_key(|(idx, o)| (o.start, Reverse(*idx))),
            OverridePrecedence::FirstInInput | _ => active.min_by_key(|(idx, _)| *idx),
        };
        chosen.map(|(_, o)| o)
    }

    /// True when any instruction is active at `t`.
    #[must_use]
    pub fn any_active_at(&self, t: DateTime<Utc>) -> bool {
        let started = self.items.partition_point(|(_, o)| o.start <= t);
        self.items[..started].iter().any(|(_, o)| t < o.end)
    }
}

/// Actual, potential and curtailment for one unit at one instant, plus the
/// inputs they were derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitPoint {
    /// Baseline level, zero when no step has started.
    pub baseline: Decimal,
    /// Capacity level, zero when no step has started.
    pub capacity: Decimal,
    /// Level of the governing override, if any.
    pub override_level: Option<Decimal>,
    /// Instructed output if overridden, else baseline.
    pub actual: Decimal,
    /// `max(baseline, capacity)`.
    pub potential: Decimal,
    /// `max(0, baseline - actual)`.
    pub curtailment: Decimal,
}

/// One unit's three series, pre-sorted for repeated lookups.
#[derive(Debug, Clone, Default)]
pub struct UnitTimeline {
    /// Baseline declarations.
    pub baseline: StepSeries,
    /// Capacity limits.
    pub capacity: StepSeries,
    /// Dispatch overrides.
    pub overrides: OverrideSet,
}

impl UnitTimeline {
    /// Extract `unit`'s records from a mixed series.
    #[must_use]
    pub fn for_unit(series: &LiveSeries, unit: &UnitId) -> Self {
        Self {
            baseline: StepSeries::new(series.baseline.iter().filter(|r| &r.unit == unit)),
            capacity: StepSeries::new(series.capacity.iter().filter(|r| &r.unit == unit)),
            overrides: OverrideSet::new(series.overrides.iter().filter(|o| &o.unit == unit)),
        }
    }

    /// Resolve the unit's point at `t`.
    #[must_use]
    pub fn resolve(&self, t: DateTime<Utc>, opts: ResolveOptions) -> UnitPoint {
        let baseline = self.baseline.level_at(t).unwrap_or(Decimal::ZERO);
        let capacity = self.capacity.level_at(t).unwrap_or(Decimal::ZERO);
        let override_level = self.overrides.active_at(t, opts.precedence).map(|o| o.level);
        let potential = baseline.max(capacity);
        let mut actual = override_level.unwrap_or(baseline);
        if opts.clamp_override_to_potential {
            actual = actual.min(potential);
        }
        let curtailment = (baseline - actual).max(Decimal::ZERO);
        UnitPoint {
            baseline,
            capacity,
            override_level,
            actual,
            potential,
            curtailment,
        }
    }
}
