use std::sync::Arc;

use gridwatch::{Gridwatch, Resolution, SettlementRange, UnitSelection};
use gridwatch_mock::MockConnector as FixtureConnector;
use rust_decimal_macros::dec;

use crate::helpers::{date, dt};

#[tokio::test]
async fn monthly_buckets_for_fixture_asset() {
    let gw = Gridwatch::builder()
        .with_connector(Arc::new(FixtureConnector::new()))
        .build()
        .unwrap();
    let seagreen = FixtureConnector::assets()
        .unwrap()
        .into_iter()
        .find(|a| a.name == "Seagreen")
        .unwrap();
    let token = gw.begin_selection();
    let range = SettlementRange::try_new(date(2024, 4, 1), date(2024, 5, 31)).unwrap();

    let view = gw
        .historical_view(&seagreen, &UnitSelection::All, range, Resolution::Monthly, &token)
        .await
        .unwrap();
    assert!(view.warnings.is_empty());
    assert_eq!(view.buckets.len(), 2);
    // Local midnight on the 1st, in BST.
    assert_eq!(view.buckets[0].start, dt(2024, 3, 31, 23, 0));
    assert_eq!(view.buckets[1].start, dt(2024, 4, 30, 23, 0));
    // 1993.5 MWh a day.
    assert_eq!(view.buckets[0].quantity, dec!(59805.0));
    assert_eq!(view.buckets[1].quantity, dec!(61798.5));
    assert_eq!(view.total, dec!(121603.5));
}

#[tokio::test]
async fn daily_totals_match_raw_totals() {
    let gw = Gridwatch::builder()
        .with_connector(Arc::new(FixtureConnector::new()))
        .build()
        .unwrap();
    let moray = FixtureConnector::assets()
        .unwrap()
        .into_iter()
        .find(|a| a.name == "Moray East")
        .unwrap();
    let token = gw.begin_selection();
    let range = SettlementRange::try_new(date(2024, 5, 1), date(2024, 5, 3)).unwrap();

    let raw = gw
        .historical_view(&moray, &UnitSelection::All, range, Resolution::Raw, &token)
        .await
        .unwrap();
    let daily = gw
        .historical_view(&moray, &UnitSelection::All, range, Resolution::Daily, &token)
        .await
        .unwrap();
    assert_eq!(raw.buckets.len(), 3 * 48);
    assert_eq!(daily.buckets.len(), 3);
    assert_eq!(raw.total, daily.total);
}
