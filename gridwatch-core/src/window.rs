//! Query windows for live and settlement datasets.

use chrono::{DateTime, DurationRound, NaiveDate, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use gridwatch_types::GridError;

const PERIOD_MINUTES: i64 = 30;

fn span(d: core::time::Duration) -> Result<TimeDelta, GridError> {
    TimeDelta::from_std(d).map_err(|_| GridError::InvalidArg(format!("window span {d:?} out of range")))
}

/// Half-open `[from, to)` instant window for live datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueryWindow {
    from: DateTime<Utc>,
    to: DateTime<Utc>,
}

impl QueryWindow {
    /// Validate and build a window.
    ///
    /// # Errors
    /// Returns `InvalidArg` unless `from < to`.
    pub fn try_new(from: DateTime<Utc>, to: DateTime<Utc>) -> Result<Self, GridError> {
        if from >= to {
            return Err(GridError::InvalidArg(format!(
                "query window start {from} must precede end {to}"
            )));
        }
        Ok(Self { from, to })
    }

    /// `[now - lookback, now + lookahead)`.
    ///
    /// # Errors
    /// Returns `InvalidArg` when both spans are zero or the bounds overflow.
    pub fn around(
        now: DateTime<Utc>,
        lookback: core::time::Duration,
        lookahead: core::time::Duration,
    ) -> Result<Self, GridError> {
        let from = now
            .checked_sub_signed(span(lookback)?)
            .ok_or_else(|| GridError::InvalidArg("window start out of range".into()))?;
        let to = now
            .checked_add_signed(span(lookahead)?)
            .ok_or_else(|| GridError::InvalidArg("window end out of range".into()))?;
        Self::try_new(from, to)
    }

    /// Like [`around`](Self::around), but anchored to the settlement period
    /// containing `now`: `[period_start - lookback, period_end + lookahead)`.
    ///
    /// Every `now` inside one settlement period yields the same window, and
    /// that window always covers `[now - lookback, now + lookahead)`.
    ///
    /// # Errors
    /// Returns `InvalidArg` when the bounds overflow.
    pub fn around_period(
        now: DateTime<Utc>,
        lookback: core::time::Duration,
        lookahead: core::time::Duration,
    ) -> Result<Self, GridError> {
        let period_start = now
            .duration_trunc(TimeDelta::minutes(PERIOD_MINUTES))
            .map_err(|e| GridError::InvalidArg(format!("cannot align {now} to a period: {e}")))?;
        let from = period_start
            .checked_sub_signed(span(lookback)?)
            .ok_or_else(|| GridError::InvalidArg("window start out of range".into()))?;
        let ahead = span(lookahead)? + TimeDelta::minutes(PERIOD_MINUTES);
        let to = period_start
            .checked_add_signed(ahead)
            .ok_or_else(|| GridError::InvalidArg("window end out of range".into()))?;
        Self::try_new(from, to)
    }

    /// True when every instant of `other` lies within `self`.
    #[must_use]
    pub fn covers(&self, other: &Self) -> bool {
        self.from <= other.from && other.to <= self.to
    }

    /// Inclusive start.
    #[must_use]
    pub const fn from(&self) -> DateTime<Utc> {
        self.from
    }

    /// Exclusive end.
    #[must_use]
    pub const fn to(&self) -> DateTime<Utc> {
        self.to
    }
}

/// Inclusive settlement-date range for the energy dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SettlementRange {
    from: NaiveDate,
    to: NaiveDate,
}

impl SettlementRange {
    /// Validate and build a range.
    ///
    /// # Errors
    /// Returns `InvalidArg` when `from > to`.
    pub fn try_new(from: NaiveDate, to: NaiveDate) -> Result<Self, GridError> {
        if from > to {
            return Err(GridError::InvalidArg(format!(
                "settlement range start {from} is after end {to}"
            )));
        }
        Ok(Self { from, to })
    }

    /// First settlement date.
    #[must_use]
    pub const fn from(&self) -> NaiveDate {
        self.from
    }

    /// Last settlement date (inclusive).
    #[must_use]
    pub const fn to(&self) -> NaiveDate {
        self.to
    }

    /// True when `date` lies within the range.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }

    /// True when every date of `other` lies within `self`.
    #[must_use]
    pub fn covers(&self, other: &Self) -> bool {
        self.from <= other.from && other.to <= self.to
    }
}
