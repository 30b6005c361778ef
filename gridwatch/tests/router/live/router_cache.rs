use chrono::TimeDelta;
use gridwatch::{CacheConfig, Gridwatch, QueryWindow, UnitSelection, UnitSet};

use crate::helpers::{U1, U2, asset, may1, scenario_connector, unit};

#[tokio::test]
async fn same_window_is_served_from_cache() {
    let mock = scenario_connector("mock").build();
    let gw = Gridwatch::builder()
        .with_connector(mock.clone())
        .build()
        .unwrap();
    let a = asset("A", &[U1, U2]);
    let token = gw.begin_selection();

    let first = gw
        .generation_view(&a, &UnitSelection::All, may1(0, 20), &token)
        .await
        .unwrap();
    assert_eq!(mock.call_count(), 6);

    let second = gw
        .generation_view(&a, &UnitSelection::All, may1(0, 20), &token)
        .await
        .unwrap();
    assert_eq!(mock.call_count(), 6);
    assert_eq!(first, second);
}

#[tokio::test]
async fn advancing_clock_within_a_period_reuses_the_fetch() {
    let mock = scenario_connector("mock").build();
    let gw = Gridwatch::builder()
        .with_connector(mock.clone())
        .build()
        .unwrap();
    let a = asset("A", &[U1]);
    let token = gw.begin_selection();

    let first = gw
        .generation_view(&a, &UnitSelection::All, may1(0, 20), &token)
        .await
        .unwrap();
    assert_eq!(mock.call_count(), 3);

    for secs in [1, 5, 59] {
        let now = may1(0, 20) + TimeDelta::seconds(secs);
        let view = gw
            .generation_view(&a, &UnitSelection::All, now, &token)
            .await
            .unwrap();
        assert_eq!(view.now, now);
        assert_eq!(view.samples.last().unwrap().ts, now);
        gw.live_status(&a, &UnitSelection::All, now, &token)
            .await
            .unwrap();
    }
    assert_eq!(mock.call_count(), 3);
    assert_eq!(first.samples.len(), 3);

    // The next settlement period needs a later window.
    gw.generation_view(&a, &UnitSelection::All, may1(0, 31), &token)
        .await
        .unwrap();
    assert_eq!(mock.call_count(), 6);
}

#[tokio::test]
async fn uncovered_window_replaces_the_slot() {
    let mock = scenario_connector("mock").build();
    let gw = Gridwatch::builder()
        .with_connector(mock.clone())
        .build()
        .unwrap();
    let units = UnitSet::new([unit(U1)]);
    let token = gw.begin_selection();
    let narrow = QueryWindow::try_new(may1(0, 0), may1(1, 0)).unwrap();
    let wide = QueryWindow::try_new(may1(0, 0), may1(2, 0)).unwrap();
    let later = QueryWindow::try_new(may1(1, 0), may1(3, 0)).unwrap();

    gw.live_series(&units, narrow, &token).await.unwrap();
    gw.live_series(&units, wide, &token).await.unwrap();
    assert_eq!(mock.call_count(), 6);

    // The wide fetch covers the narrow window.
    let hit = gw.live_series(&units, narrow, &token).await.unwrap();
    assert_eq!(hit.window, wide);
    assert_eq!(mock.call_count(), 6);

    gw.live_series(&units, later, &token).await.unwrap();
    assert_eq!(mock.call_count(), 9);
    gw.live_series(&units, wide, &token).await.unwrap();
    assert_eq!(mock.call_count(), 12);
}

#[tokio::test]
async fn key_ignores_unit_order_and_duplicates() {
    let mock = scenario_connector("mock").build();
    let gw = Gridwatch::builder()
        .with_connector(mock.clone())
        .build()
        .unwrap();
    let token = gw.begin_selection();
    let w = QueryWindow::try_new(may1(0, 0), may1(1, 0)).unwrap();

    let a = UnitSet::new([unit(U2), unit(U1)]);
    let b = UnitSet::new([unit(U1), unit(U2), unit(U1)]);
    gw.live_series(&a, w, &token).await.unwrap();
    let cached = gw.live_series(&b, w, &token).await.unwrap();
    assert_eq!(mock.call_count(), 6);
    assert_eq!(cached.series.baseline.len(), 4);
}

#[tokio::test]
async fn clear_cache_forces_refetch() {
    let mock = scenario_connector("mock").build();
    let gw = Gridwatch::builder()
        .with_connector(mock.clone())
        .build()
        .unwrap();
    let units = UnitSet::new([unit(U1)]);
    let token = gw.begin_selection();
    let w = QueryWindow::try_new(may1(0, 0), may1(1, 0)).unwrap();

    gw.live_series(&units, w, &token).await.unwrap();
    gw.clear_cache();
    gw.live_series(&units, w, &token).await.unwrap();
    assert_eq!(mock.call_count(), 6);
}

#[tokio::test]
async fn zero_ttl_disables_caching() {
    let mock = scenario_connector("mock").build();
    let gw = Gridwatch::builder()
        .with_connector(mock.clone())
        .cache(CacheConfig {
            ttl_ms: 0,
            max_entries: 16,
        })
        .build()
        .unwrap();
    let units = UnitSet::new([unit(U1)]);
    let token = gw.begin_selection();
    let w = QueryWindow::try_new(may1(0, 0), may1(1, 0)).unwrap();

    gw.live_series(&units, w, &token).await.unwrap();
    gw.live_series(&units, w, &token).await.unwrap();
    assert_eq!(mock.call_count(), 6);
}
