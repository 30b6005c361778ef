//! Decoding of upstream stream payloads into records.
//!
//! Payloads are JSON arrays of rows (optionally wrapped as `{"data": [...]}`).
//! Each row is decoded on its own: rows missing a required field, or carrying
//! an unparsable time, are skipped and counted instead of failing the payload.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use crate::records::{BaselineRecord, CapacityLimit, EnergyRecord, OverrideInstruction, StepRecord};
use gridwatch_types::{Dataset, GridError, UnitId};

/// Records decoded from one payload plus the number of rows skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded<T> {
    /// Successfully decoded records, in payload order.
    pub records: Vec<T>,
    /// Rows that were malformed and dropped.
    pub skipped: usize,
}

impl<T> From<Vec<T>> for Decoded<T> {
    fn from(records: Vec<T>) -> Self {
        Self {
            records,
            skipped: 0,
        }
    }
}

impl<T> Default for Decoded<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            skipped: 0,
        }
    }
}

/// Row shape shared by the PN, MEL and BOAL streams.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelRow {
    /// Unit code.
    pub bm_unit: Option<String>,
    /// Interval start (RFC 3339).
    pub time_from: Option<String>,
    /// Interval end (RFC 3339).
    pub time_to: Option<String>,
    /// Level at `time_from` in MW.
    pub level_from: Option<Decimal>,
    /// Level at `time_to` in MW.
    pub level_to: Option<Decimal>,
    /// BOAL only.
    pub acceptance_number: Option<i64>,
    /// BOAL only.
    pub acceptance_time: Option<String>,
}

/// Row shape of the B1610 stream.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnergyRow {
    /// Unit code.
    pub bm_unit: Option<String>,
    /// Settlement date, `YYYY-MM-DD`.
    pub settlement_date: Option<String>,
    /// Settlement period, 1-based.
    pub settlement_period: Option<i64>,
    /// Metered energy in MWh.
    pub quantity: Option<Decimal>,
}

fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}

fn required_instant(raw: Option<&str>, field: &str) -> Result<DateTime<Utc>, String> {
    let raw = raw.ok_or_else(|| format!("missing {field}"))?;
    parse_instant(raw).ok_or_else(|| format!("unparsable {field} '{raw}'"))
}

fn row_unit(raw: Option<&str>, fallback: &UnitId) -> Result<UnitId, String> {
    match raw {
        None => Ok(fallback.clone()),
        Some(code) => UnitId::new(code).map_err(|e| e.to_string()),
    }
}

fn rows(payload: &str) -> Result<Vec<Value>, GridError> {
    let value: Value = serde_json::from_str(payload)
        .map_err(|e| GridError::Data(format!("invalid payload: {e}")))?;
    match value {
        Value::Array(rows) => Ok(rows),
        Value::Object(mut obj) => match obj.remove("data") {
            Some(Value::Array(rows)) => Ok(rows),
            _ => Err(GridError::Data("payload object has no 'data' array".into())),
        },
        _ => Err(GridError::Data("payload is not an array".into())),
    }
}

#[cfg(feature = "tracing")]
fn note_malformed(dataset: Dataset, idx: usize, reason: &str) {
    let err = GridError::malformed(dataset.as_str(), format!("row {idx}: {reason}"));
    tracing::warn!(dataset = %dataset, error = %err, "skipping malformed row");
}

#[cfg(not(feature = "tracing"))]
const fn note_malformed(_: Dataset, _: usize, _: &str) {}

fn decode_with<R, T, F>(payload: &str, dataset: Dataset, convert: F) -> Result<Decoded<T>, GridError>
where
    R: for<'de> Deserialize<'de>,
    F: Fn(R) -> Result<T, String>,
{
    let mut out = Decoded::default();
    for (idx, raw) in rows(payload)?.into_iter().enumerate() {
        let decoded = serde_json::from_value::<R>(raw)
            .map_err(|e| e.to_string())
            .and_then(&convert);
        match decoded {
            Ok(record) => out.records.push(record),
            Err(reason) => {
                out.skipped += 1;
                note_malformed(dataset, idx, &reason);
            }
        }
    }
    Ok(out)
}

fn level_row_to_step(row: LevelRow, unit: &UnitId) -> Result<StepRecord, String> {
    let unit = row_unit(row.bm_unit.as_deref(), unit)?;
    let start = required_instant(row.time_from.as_deref(), "timeFrom")?;
    let level = row.level_from.ok_or("missing levelFrom")?;
    let end = match row.time_to.as_deref() {
        None => None,
        Some(raw) => Some(parse_instant(raw).ok_or_else(|| format!("unparsable timeTo '{raw}'"))?),
    };
    Ok(StepRecord {
        unit,
        start,
        end,
        level,
    })
}

/// Decode a PN payload. Rows without `bmUnit` are attributed to `unit`.
///
/// # Errors
/// Returns `GridError::Data` when the payload is not a JSON array of rows.
pub fn decode_baseline(payload: &str, unit: &UnitId) -> Result<Decoded<BaselineRecord>, GridError> {
    decode_with(payload, Dataset::Baseline, |row: LevelRow| {
        level_row_to_step(row, unit)
    })
}

/// Decode a MEL payload. Rows without `bmUnit` are attributed to `unit`.
///
/// # Errors
/// Returns `GridError::Data` when the payload is not a JSON array of rows.
pub fn decode_capacity(payload: &str, unit: &UnitId) -> Result<Decoded<CapacityLimit>, GridError> {
    decode_with(payload, Dataset::Capacity, |row: LevelRow| {
        level_row_to_step(row, unit)
    })
}

/// Decode a BOAL payload. `timeFrom`, `timeTo` and `levelFrom` are required.
///
/// # Errors
/// Returns `GridError::Data` when the payload is not a JSON array of rows.
pub fn decode_overrides(
    payload: &str,
    unit: &UnitId,
) -> Result<Decoded<OverrideInstruction>, GridError> {
    decode_with(payload, Dataset::Override, |row: LevelRow| {
        let unit = row_unit(row.bm_unit.as_deref(), unit)?;
        let start = required_instant(row.time_from.as_deref(), "timeFrom")?;
        let end = required_instant(row.time_to.as_deref(), "timeTo")?;
        let level = row.level_from.ok_or("missing levelFrom")?;
        Ok(OverrideInstruction {
            unit,
            start,
            end,
            level,
            acceptance_number: row.acceptance_number,
            accepted_at: row.acceptance_time.as_deref().and_then(parse_instant),
        })
    })
}

/// Decode a B1610 payload.
///
/// Periods are only checked to fit a `u8`; the 1-50 bound is enforced when
/// energy is bucketed.
///
/// # Errors
/// Returns `GridError::Data` when the payload is not a JSON array of rows.
pub fn decode_energy(payload: &str, unit: &UnitId) -> Result<Decoded<EnergyRecord>, GridError> {
    decode_with(payload, Dataset::Energy, |row: EnergyRow| {
        let unit = row_unit(row.bm_unit.as_deref(), unit)?;
        let raw_date = row.settlement_date.ok_or("missing settlementDate")?;
        let settlement_date = NaiveDate::parse_from_str(raw_date.trim(), "%Y-%m-%d")
            .map_err(|_| format!("unparsable settlementDate '{raw_date}'"))?;
        let period = row.settlement_period.ok_or("missing settlementPeriod")?;
        let settlement_period =
            u8::try_from(period).map_err(|_| format!("settlementPeriod {period} out of range"))?;
        let quantity = row.quantity.ok_or("missing quantity")?;
        Ok(EnergyRecord {
            unit,
            settlement_date,
            settlement_period,
            quantity,
        })
    })
}
