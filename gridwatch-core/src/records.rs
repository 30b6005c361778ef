//! Interval record model for the four upstream datasets and the derived outputs.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use gridwatch_types::UnitId;

/// A stepwise level declaration for one unit.
///
/// Applies from `start` until superseded by the next record for the same unit.
/// Used for both baseline notifications (PN) and capacity limits (MEL).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord {
    /// Unit the record belongs to.
    pub unit: UnitId,
    /// Instant from which the level applies.
    pub start: DateTime<Utc>,
    /// Declared end of the record's own interval, if the feed supplied one.
    pub end: Option<DateTime<Utc>>,
    /// Level in MW.
    pub level: Decimal,
}

impl StepRecord {
    /// Convenience constructor for a record without an explicit end.
    #[must_use]
    pub const fn new(unit: UnitId, start: DateTime<Utc>, level: Decimal) -> Self {
        Self {
            unit,
            start,
            end: None,
            level,
        }
    }

    /// Attach an explicit end.
    #[must_use]
    pub const fn with_end(mut self, end: DateTime<Utc>) -> Self {
        self.end = Some(end);
        self
    }

    /// Declared end, defaulting to `start`.
    #[must_use]
    pub fn end(&self) -> DateTime<Utc> {
        self.end.unwrap_or(self.start)
    }
}

/// Baseline output declaration (PN).
pub type BaselineRecord = StepRecord;

/// Maximum export limit (MEL).
pub type CapacityLimit = StepRecord;

/// A dispatch override (BOAL) forcing output to `level` over `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideInstruction {
    /// Unit the instruction targets.
    pub unit: UnitId,
    /// Inclusive start.
    pub start: DateTime<Utc>,
    /// Exclusive end.
    pub end: DateTime<Utc>,
    /// Instructed level in MW.
    pub level: Decimal,
    /// Upstream acceptance number, when known.
    pub acceptance_number: Option<i64>,
    /// Upstream acceptance time, when known.
    pub accepted_at: Option<DateTime<Utc>>,
}

impl OverrideInstruction {
    /// Construct an instruction without acceptance metadata.
    #[must_use]
    pub const fn new(
        unit: UnitId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        level: Decimal,
    ) -> Self {
        Self {
            unit,
            start,
            end,
            level,
            acceptance_number: None,
            accepted_at: None,
        }
    }

    /// Attach acceptance metadata.
    #[must_use]
    pub const fn with_acceptance(mut self, number: i64, at: Option<DateTime<Utc>>) -> Self {
        self.acceptance_number = Some(number);
        self.accepted_at = at;
        self
    }

    /// True when `start <= t < end`.
    #[must_use]
    pub fn is_active_at(&self, t: DateTime<Utc>) -> bool {
        self.start <= t && t < self.end
    }
}

/// Metered energy for one settlement period (B1610).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnergyRecord {
    /// Unit the reading belongs to.
    pub unit: UnitId,
    /// Settlement date in market local time.
    pub settlement_date: NaiveDate,
    /// Settlement period, 1-based, 30 minutes each.
    pub settlement_period: u8,
    /// Energy in MWh.
    pub quantity: Decimal,
}

/// The three live datasets for a set of units, as returned by the connectors.
///
/// Records from different units are interleaved; consumers filter by unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveSeries {
    /// Baseline declarations (PN).
    pub baseline: Vec<BaselineRecord>,
    /// Dispatch overrides (BOAL).
    pub overrides: Vec<OverrideInstruction>,
    /// Capacity limits (MEL).
    pub capacity: Vec<CapacityLimit>,
}

impl LiveSeries {
    /// Append another unit's records, preserving input order.
    pub fn extend(&mut self, other: Self) {
        self.baseline.extend(other.baseline);
        self.overrides.extend(other.overrides);
        self.capacity.extend(other.capacity);
    }
}

/// One point-in-time aggregate across the selected units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciledSample {
    /// Sample instant.
    pub ts: DateTime<Utc>,
    /// Summed actual output in MW.
    pub actual_total: Decimal,
    /// Summed potential output in MW.
    pub potential_total: Decimal,
    /// Summed curtailment in MW.
    pub curtailment_total: Decimal,
}

/// Energy summed across units at one settlement instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstantSample {
    /// Settlement period start.
    pub ts: DateTime<Utc>,
    /// Energy in MWh.
    pub quantity: Decimal,
}

/// Energy summed over one calendar-aligned bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoricalBucket {
    /// Bucket start.
    pub start: DateTime<Utc>,
    /// Energy in MWh.
    pub quantity: Decimal,
}
