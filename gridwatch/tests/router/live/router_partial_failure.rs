use std::time::Duration;

use gridwatch::{Dataset, Gridwatch, GridError, UnitSelection, ViewStatus};
use gridwatch_mock::{DynamicMockConnector, MockBehavior};
use rust_decimal_macros::dec;

use crate::helpers::{U1, U2, asset, may1, scenario_connector, step, unit};

#[tokio::test]
async fn unit_without_a_provider_contributes_nothing() {
    let u1_only = scenario_connector("u1-only").units(&[U1]).build();
    let gw = Gridwatch::builder()
        .with_connector(u1_only)
        .build()
        .unwrap();
    let token = gw.begin_selection();

    let view = gw
        .generation_view(&asset("A", &[U1, U2]), &UnitSelection::All, may1(0, 20), &token)
        .await
        .unwrap();
    assert_eq!(view.status, ViewStatus::Available);
    assert_eq!(view.warnings.len(), 3);
    assert!(view.warnings.iter().all(|w| w.unit == unit(U2)));
    let last = view.samples.last().unwrap();
    assert_eq!(last.actual_total, dec!(80));
    assert_eq!(last.curtailment_total, dec!(20));
}

#[tokio::test]
async fn slow_provider_times_out_into_a_warning() {
    let slow = scenario_connector("slow").delay(200).build();
    let gw = Gridwatch::builder()
        .with_connector(slow)
        .provider_timeout(Duration::from_millis(20))
        .build()
        .unwrap();
    let token = gw.begin_selection();

    let view = gw
        .generation_view(&asset("A", &[U1]), &UnitSelection::All, may1(0, 20), &token)
        .await
        .unwrap();
    assert_eq!(view.status, ViewStatus::DataUnavailable);
    assert_eq!(view.warnings.len(), 3);
    assert!(
        view.warnings
            .iter()
            .all(|w| matches!(w.error, GridError::AllProvidersTimedOut { .. }))
    );
}

#[tokio::test]
async fn one_failed_dataset_leaves_the_others() {
    let (mock, ctl) = DynamicMockConnector::new_with_controller("dyn");
    let u1 = unit(U1);
    ctl.set_baseline_behavior(
        u1.clone(),
        MockBehavior::Return(vec![step(U1, may1(0, 0), dec!(100))]),
    )
    .await;
    ctl.set_capacity_behavior(
        u1.clone(),
        MockBehavior::Return(vec![step(U1, may1(0, 0), dec!(150))]),
    )
    .await;
    ctl.set_override_behavior(
        u1.clone(),
        MockBehavior::Fail(GridError::Other("feed down".into())),
    )
    .await;

    let gw = Gridwatch::builder().with_connector(mock).build().unwrap();
    let token = gw.begin_selection();
    let view = gw
        .generation_view(&asset("A", &[U1]), &UnitSelection::All, may1(0, 20), &token)
        .await
        .unwrap();

    assert_eq!(view.warnings.len(), 1);
    let w = &view.warnings[0];
    assert_eq!(w.dataset, Dataset::Override);
    assert_eq!(
        w.error,
        GridError::Connector {
            connector: "dyn".into(),
            msg: "unknown error: feed down".into(),
        }
    );
    let last = view.samples.last().unwrap();
    assert_eq!(last.actual_total, dec!(100));
    assert_eq!(last.curtailment_total, dec!(0));
    assert_eq!(ctl.call_count(Dataset::Override).await, 1);
}

#[tokio::test]
async fn hanging_provider_falls_back_after_timeout() {
    let (hanging, ctl) = DynamicMockConnector::new_with_controller("hang");
    let u1 = unit(U1);
    ctl.set_baseline_behavior(u1.clone(), MockBehavior::Hang).await;
    ctl.set_override_behavior(u1.clone(), MockBehavior::Hang).await;
    ctl.set_capacity_behavior(u1.clone(), MockBehavior::Hang).await;

    let gw = Gridwatch::builder()
        .with_connector(hanging)
        .with_connector(scenario_connector("backup").build())
        .provider_timeout(Duration::from_millis(20))
        .build()
        .unwrap();
    let token = gw.begin_selection();
    let view = gw
        .generation_view(&asset("A", &[U1]), &UnitSelection::All, may1(0, 20), &token)
        .await
        .unwrap();
    assert!(view.warnings.is_empty());
    assert_eq!(view.samples.last().unwrap().curtailment_total, dec!(20));
}
