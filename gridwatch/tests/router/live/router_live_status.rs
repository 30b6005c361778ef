use std::sync::Arc;

use gridwatch::{Gridwatch, UnitSelection};
use gridwatch_mock::{MORAY_EAST_1, MORAY_EAST_2, MockConnector as FixtureConnector};
use rust_decimal_macros::dec;

use crate::helpers::{may1, unit};

#[tokio::test]
async fn status_reports_each_unit_at_now() {
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

    let status = gw
        .live_status(&moray, &UnitSelection::All, may1(1, 0), &token)
        .await
        .unwrap();
    assert!(status.currently_curtailed);
    assert_eq!(status.units.len(), 2);

    let me1 = &status.units[0];
    assert_eq!(me1.unit, unit(MORAY_EAST_1));
    assert_eq!(me1.point.baseline, dec!(210));
    assert_eq!(me1.point.capacity, dec!(250));
    assert_eq!(me1.point.override_level, Some(dec!(150)));
    assert_eq!(me1.point.curtailment, dec!(60));

    let me2 = &status.units[1];
    assert_eq!(me2.unit, unit(MORAY_EAST_2));
    assert_eq!(me2.point.override_level, None);
    assert_eq!(me2.point.actual, dec!(195));

    let before = gw
        .live_status(&moray, &UnitSelection::All, may1(0, 40), &token)
        .await
        .unwrap();
    assert!(!before.currently_curtailed);
}
