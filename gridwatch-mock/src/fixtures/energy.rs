//! Generated B1610 payloads: 48 periods a day from 2024-04-01 to 2024-05-31.

use chrono::NaiveDate;
use gridwatch_core::SettlementRange;
use serde_json::{Value, json};

use super::{MORAY_EAST_1, MORAY_EAST_2, SEAGREEN};

const PERIODS_PER_DAY: u8 = 48;

fn first_day() -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(2024, 4, 1)
}

fn last_day() -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(2024, 5, 31)
}

// Tenths of a MWh per period; varies by period so buckets are distinguishable.
fn tenths(base: i64, period: u8) -> i64 {
    base + (i64::from(period) % 7) * 5
}

pub fn payload(unit: &str, range: SettlementRange) -> Option<String> {
    let base = match unit {
        SEAGREEN => 400,
        MORAY_EAST_1 => 300,
        MORAY_EAST_2 => 280,
        _ => return None,
    };
    let (first, last) = (first_day()?, last_day()?);
    let from = range.from().max(first);
    let to = range.to().min(last);

    let mut rows: Vec<Value> = Vec::new();
    let mut day = from;
    while day <= to {
        for period in 1..=PERIODS_PER_DAY {
            let q = tenths(base, period);
            rows.push(json!({
                "bmUnit": unit,
                "settlementDate": day.format("%Y-%m-%d").to_string(),
                "settlementPeriod": period,
                "quantity": format!("{}.{}", q / 10, q % 10),
            }));
        }
        day = day.succ_opt()?;
    }
    Some(Value::Array(rows).to_string())
}
