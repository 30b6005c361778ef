#![allow(dead_code)]


use chrono::{DateTime, NaiveDate, Utc};
use gridwatch_core::{
    Asset, EnergyRecord, FuelType, OverrideInstruction, StepRecord, UnitId,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

pub use mock_connector::{MockConnector, MockConnectorBuilder};

// ---------- Lightweight fixtures and helpers for tests ----------

pub const U1: &str = "U1";
pub const U2: &str = "U2";

/// Construct a UTC `DateTime` from components for readability in tests.
pub fn dt(y: i32, m: u32, d: u32, hh: u32, mm: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(hh, mm, 0))
        .expect("valid test timestamp")
        .and_utc()
}

/// 2024-05-01 at `hh:mm` UTC.
pub fn may1(hh: u32, mm: u32) -> DateTime<Utc> {
    dt(2024, 5, 1, hh, mm)
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

pub fn unit(code: &str) -> UnitId {
    UnitId::new(code).expect("valid static test unit")
}

pub fn asset(name: &str, codes: &[&str]) -> Asset {
    Asset::new(name, codes.iter().map(|c| unit(c)), FuelType::Wind).expect("non-empty asset")
}

pub fn step(code: &str, start: DateTime<Utc>, level: Decimal) -> StepRecord {
    StepRecord::new(unit(code), start, level)
}

pub fn boal(
    code: &str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    level: Decimal,
) -> OverrideInstruction {
    OverrideInstruction::new(unit(code), start, end, level)
}

pub fn energy(code: &str, day: NaiveDate, period: u8, quantity: Decimal) -> EnergyRecord {
    EnergyRecord {
        unit: unit(code),
        settlement_date: day,
        settlement_period: period,
        quantity,
    }
}

/// Connector serving the reference scenario for every unit it is asked about:
/// PN 100 from 00:00 and 120 from 00:30, MEL 150 from 00:00, and an override
/// to 80 over [00:15, 00:45).
pub fn scenario_connector(name: &'static str) -> MockConnectorBuilder {
    MockConnector::builder()
        .name(name)
        .with_baseline_fn(|u, _w| {
            Ok(vec![
                StepRecord::new(u.clone(), may1(0, 0), dec!(100)),
                StepRecord::new(u.clone(), may1(0, 30), dec!(120)),
            ])
        })
        .with_capacity_fn(|u, _w| Ok(vec![StepRecord::new(u.clone(), may1(0, 0), dec!(150))]))
        .with_overrides_fn(|u, _w| {
            Ok(vec![OverrideInstruction::new(
                u.clone(),
                may1(0, 15),
                may1(0, 45),
                dec!(80),
            )])
        })
}

/// Connector serving periods 1 (10 MWh) and 2 (12 MWh) on every requested date.
pub fn energy_connector(name: &'static str) -> MockConnectorBuilder {
    MockConnector::builder().name(name).with_energy_fn(|u, range| {
        let mut out = Vec::new();
        let mut day = range.from();
        while day <= range.to() {
            out.push(EnergyRecord {
                unit: u.clone(),
                settlement_date: day,
                settlement_period: 1,
                quantity: dec!(10),
            });
            out.push(EnergyRecord {
                unit: u.clone(),
                settlement_date: day,
                settlement_period: 2,
                quantity: dec!(12),
            });
            day = day.succ_opt().expect("date in range");
        }
        Ok(out)
    })
}
