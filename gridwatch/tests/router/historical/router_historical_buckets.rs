use gridwatch::{Gridwatch, GridError, Resolution, SettlementRange, UnitSelection, ViewStatus};
use gridwatch_mock::{DynamicMockConnector, MockBehavior};
use rust_decimal_macros::dec;

use crate::helpers::{U1, U2, asset, date, dt, energy, energy_connector, unit};

fn range(from: (i32, u32, u32), to: (i32, u32, u32)) -> SettlementRange {
    SettlementRange::try_new(date(from.0, from.1, from.2), date(to.0, to.1, to.2)).unwrap()
}

#[tokio::test]
async fn two_periods_make_one_daily_bucket() {
    let gw = Gridwatch::builder()
        .with_connector(energy_connector("mock").build())
        .build()
        .unwrap();
    let token = gw.begin_selection();

    let view = gw
        .historical_view(
            &asset("A", &[U1]),
            &UnitSelection::All,
            range((2024, 5, 1), (2024, 5, 1)),
            Resolution::Daily,
            &token,
        )
        .await
        .unwrap();
    assert_eq!(view.status, ViewStatus::Available);
    assert_eq!(view.buckets.len(), 1);
    assert_eq!(view.buckets[0].quantity, dec!(22));
    assert_eq!(view.buckets[0].start, dt(2024, 4, 30, 23, 0));
    assert_eq!(view.total, dec!(22));
}

#[tokio::test]
async fn every_resolution_conserves_energy() {
    let gw = Gridwatch::builder()
        .with_connector(energy_connector("mock").build())
        .build()
        .unwrap();
    let a = asset("A", &[U1, U2]);
    let token = gw.begin_selection();
    // Monday 2024-05-06 through Sunday 2024-05-19, two units.
    let r = range((2024, 5, 6), (2024, 5, 19));

    let mut counts = Vec::new();
    for res in [
        Resolution::Raw,
        Resolution::Daily,
        Resolution::Weekly,
        Resolution::BiWeekly,
        Resolution::Monthly,
    ] {
        let view = gw
            .historical_view(&a, &UnitSelection::All, r, res, &token)
            .await
            .unwrap();
        assert_eq!(view.total, dec!(616), "{res:?}");
        counts.push(view.buckets.len());
    }
    assert_eq!(counts, vec![28, 14, 2, 1, 1]);
}

#[tokio::test]
async fn weekly_and_fortnight_bucket_starts() {
    let gw = Gridwatch::builder()
        .with_connector(energy_connector("mock").build())
        .build()
        .unwrap();
    let a = asset("A", &[U1]);
    let token = gw.begin_selection();
    let r = range((2024, 5, 6), (2024, 5, 19));

    let weekly = gw
        .historical_view(&a, &UnitSelection::All, r, Resolution::Weekly, &token)
        .await
        .unwrap();
    let starts: Vec<_> = weekly.buckets.iter().map(|b| b.start).collect();
    assert_eq!(starts, vec![dt(2024, 5, 5, 23, 0), dt(2024, 5, 12, 23, 0)]);
    assert!(weekly.buckets.iter().all(|b| b.quantity == dec!(154)));

    // 2024-05-06 is 18 weeks after the 2024-01-01 anchor.
    let fortnight = gw
        .historical_view(&a, &UnitSelection::All, r, Resolution::BiWeekly, &token)
        .await
        .unwrap();
    assert_eq!(fortnight.buckets.len(), 1);
    assert_eq!(fortnight.buckets[0].start, dt(2024, 5, 5, 23, 0));
    assert_eq!(fortnight.buckets[0].quantity, dec!(308));
}

#[tokio::test]
async fn energy_is_cached_per_range() {
    let mock = energy_connector("mock").build();
    let gw = Gridwatch::builder()
        .with_connector(mock.clone())
        .build()
        .unwrap();
    let a = asset("A", &[U1]);
    let token = gw.begin_selection();
    let r = range((2024, 5, 1), (2024, 5, 7));

    gw.historical_view(&a, &UnitSelection::All, r, Resolution::Daily, &token)
        .await
        .unwrap();
    gw.historical_view(&a, &UnitSelection::All, r, Resolution::Weekly, &token)
        .await
        .unwrap();
    assert_eq!(mock.call_count(), 1);

    gw.historical_view(
        &a,
        &UnitSelection::All,
        range((2024, 5, 1), (2024, 5, 8)),
        Resolution::Daily,
        &token,
    )
    .await
    .unwrap();
    assert_eq!(mock.call_count(), 2);
}

#[tokio::test]
async fn failed_unit_is_reported_and_out_of_range_periods_dropped() {
    let (mock, ctl) = DynamicMockConnector::new_with_controller("dyn");
    let day = date(2024, 5, 1);
    ctl.set_energy_behavior(
        unit(U1),
        MockBehavior::Return(vec![
            energy(U1, day, 1, dec!(10)),
            energy(U1, day, 2, dec!(12)),
            energy(U1, day, 0, dec!(99)),
            energy(U1, day, 51, dec!(99)),
        ]),
    )
    .await;
    ctl.set_energy_behavior(
        unit(U2),
        MockBehavior::Fail(GridError::connector("dyn", "timeout at gateway")),
    )
    .await;

    let gw = Gridwatch::builder().with_connector(mock).build().unwrap();
    let token = gw.begin_selection();
    let view = gw
        .historical_view(
            &asset("A", &[U1, U2]),
            &UnitSelection::All,
            range((2024, 5, 1), (2024, 5, 1)),
            Resolution::Daily,
            &token,
        )
        .await
        .unwrap();
    assert_eq!(view.total, dec!(22));
    assert_eq!(view.warnings.len(), 1);
    assert_eq!(view.warnings[0].unit, unit(U2));
}

#[tokio::test]
async fn no_energy_means_data_unavailable() {
    let (mock, _ctl) = DynamicMockConnector::new_with_controller("dyn");
    let gw = Gridwatch::builder().with_connector(mock).build().unwrap();
    let token = gw.begin_selection();
    let view = gw
        .historical_view(
            &asset("A", &[U1]),
            &UnitSelection::All,
            range((2024, 5, 1), (2024, 5, 2)),
            Resolution::Daily,
            &token,
        )
        .await
        .unwrap();
    assert_eq!(view.status, ViewStatus::DataUnavailable);
    assert_eq!(view.total, dec!(0));
    assert!(matches!(
        view.warnings[0].error,
        GridError::NotFound { .. }
    ));
}
