use std::collections::BTreeMap;

use chrono::offset::LocalResult;
use chrono::{DateTime, Datelike, NaiveDate, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;
use rust_decimal::Decimal;

use crate::records::{EnergyRecord, HistoricalBucket, InstantSample};
use crate::unit::UnitSet;
use crate::window::SettlementRange;
use gridwatch_types::{GridError, GridwatchConfig, Resolution};

const PERIOD_MINUTES: i64 = 30;
const MAX_PERIOD: u8 = 50;
// Quarter hours in a day; no DST gap is longer.
const GAP_SEARCH_STEPS: i64 = 96;

fn local_midnight_utc_for_date(date: NaiveDate, tz: Tz) -> Option<DateTime<Utc>> {
    let naive_midnight = date.and_hms_opt(0, 0, 0)?;
    match tz.from_local_datetime(&naive_midnight) {
        LocalResult::Single(dt) => Some(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(dt1, _) => Some(dt1.with_timezone(&Utc)),
        // Midnight skipped by a DST jump: the day starts at the first valid local instant.
        LocalResult::None => (1..=GAP_SEARCH_STEPS).find_map(|q| {
            let candidate = naive_midnight.checked_add_signed(TimeDelta::minutes(15 * q))?;
            tz.from_local_datetime(&candidate)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc))
        }),
    }
}

fn week_start_date(date: NaiveDate) -> NaiveDate {
    let days_from_monday = i64::from(date.weekday().num_days_from_monday());
    date.checked_sub_signed(TimeDelta::days(days_from_monday))
        .unwrap_or(date)
}

/// Groups settlement-period energy into calendar-aligned buckets in a market
/// time zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucketizer {
    tz: Tz,
    anchor: NaiveDate,
}

impl Bucketizer {
    /// Build a bucketizer for `tz` with fortnights aligned to `anchor`.
    ///
    /// # Errors
    /// Returns `InvalidArg` when `anchor` is not a Monday.
    pub fn new(tz: Tz, anchor: NaiveDate) -> Result<Self, GridError> {
        if anchor.weekday() != chrono::Weekday::Mon {
            return Err(GridError::InvalidArg(format!(
                "bi-weekly anchor {anchor} is not a Monday"
            )));
        }
        Ok(Self { tz, anchor })
    }

    /// Build from the configured market time zone and anchor.
    ///
    /// # Errors
    /// Returns `InvalidArg` for an unknown time zone name or a non-Monday anchor.
    pub fn from_config(cfg: &GridwatchConfig) -> Result<Self, GridError> {
        let tz: Tz = cfg.market_timezone.parse().map_err(|_| {
            GridError::InvalidArg(format!("unknown time zone '{}'", cfg.market_timezone))
        })?;
        Self::new(tz, cfg.biweekly_anchor)
    }

    /// Start instant of a settlement period: local midnight plus
    /// `(period - 1) * 30` minutes of elapsed time.
    ///
    /// Returns `None` for periods outside 1-50.
    #[must_use]
    pub fn period_start(&self, date: NaiveDate, period: u8) -> Option<DateTime<Utc>> {
        if !(1..=MAX_PERIOD).contains(&period) {
            return None;
        }
        let midnight = local_midnight_utc_for_date(date, self.tz)?;
        midnight.checked_add_signed(TimeDelta::minutes(i64::from(period - 1) * PERIOD_MINUTES))
    }

    /// Sum energy by exact settlement instant for the given units and range.
    ///
    /// Records outside the range or unit set are ignored; records whose
    /// period is outside 1-50 are dropped.
    #[must_use]
    pub fn instant_samples(
        &self,
        records: &[EnergyRecord],
        units: &UnitSet,
        range: SettlementRange,
    ) -> Vec<InstantSample> {
        let mut by_instant: BTreeMap<DateTime<Utc>, Decimal> = BTreeMap::new();
        for r in records {
            if !units.contains(&r.unit) || !range.contains(r.settlement_date) {
                continue;
            }
            let Some(ts) = self.period_start(r.settlement_date, r.settlement_period) else {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    unit = %r.unit,
                    date = %r.settlement_date,
                    period = r.settlement_period,
                    "dropping energy record with out-of-range settlement period"
                );
                continue;
            };
            *by_instant.entry(ts).or_insert(Decimal::ZERO) += r.quantity;
        }
        by_instant
            .into_iter()
            .map(|(ts, quantity)| InstantSample { ts, quantity })
            .collect()
    }

    /// Bucket start for `ts` at the given resolution.
    #[must_use]
    pub fn bucket_start(&self, ts: DateTime<Utc>, resolution: Resolution) -> Option<DateTime<Utc>> {
        let date = ts.with_timezone(&self.tz).date_naive();
        let key_date = match resolution {
            Resolution::Daily => date,
            Resolution::Weekly => week_start_date(date),
            Resolution::BiWeekly => {
                let monday = week_start_date(date);
                let fortnights = (monday - self.anchor).num_days().div_euclid(14);
                self.anchor
                    .checked_add_signed(TimeDelta::days(fortnights * 14))?
            }
            Resolution::Monthly => date.with_day(1)?,
            Resolution::Raw | _ => return Some(ts),
        };
        local_midnight_utc_for_date(key_date, self.tz)
    }

    /// Re-aggregate instant samples into ascending buckets.
    ///
    /// The bucket quantities sum to exactly the input quantities.
    #[must_use]
    pub fn bucketize(
        &self,
        samples: &[InstantSample],
        resolution: Resolution,
    ) -> Vec<HistoricalBucket> {
        let mut buckets: BTreeMap<DateTime<Utc>, Decimal> = BTreeMap::new();
        for s in samples {
            let start = self.bucket_start(s.ts, resolution).unwrap_or(s.ts);
            *buckets.entry(start).or_insert(Decimal::ZERO) += s.quantity;
        }
        buckets
            .into_iter()
            .map(|(start, quantity)| HistoricalBucket { start, quantity })
            .collect()
    }

    /// `instant_samples` followed by `bucketize`.
    #[must_use]
    pub fn historical(
        &self,
        records: &[EnergyRecord],
        units: &UnitSet,
        range: SettlementRange,
        resolution: Resolution,
    ) -> Vec<HistoricalBucket> {
        self.bucketize(&self.instant_samples(records, units, range), resolution)
    }
}
