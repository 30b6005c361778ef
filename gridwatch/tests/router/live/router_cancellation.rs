use std::time::Duration;

use gridwatch::{CancellationToken, Gridwatch, GridError, UnitSelection};

use crate::helpers::{U1, asset, may1, scenario_connector};

#[tokio::test]
async fn cancelled_token_short_circuits() {
    let mock = scenario_connector("mock").build();
    let gw = Gridwatch::builder()
        .with_connector(mock.clone())
        .build()
        .unwrap();
    let token = CancellationToken::new();
    token.cancel();

    let err = gw
        .generation_view(&asset("A", &[U1]), &UnitSelection::All, may1(0, 20), &token)
        .await
        .unwrap_err();
    assert_eq!(err, GridError::Cancelled);
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn new_selection_cancels_in_flight_fetch() {
    let mock = scenario_connector("slow").delay(100).build();
    let gw = Gridwatch::builder()
        .with_connector(mock.clone())
        .build()
        .unwrap();
    let a = asset("A", &[U1]);
    let stale = gw.begin_selection();

    let (res, fresh) = tokio::join!(
        gw.generation_view(&a, &UnitSelection::All, may1(0, 20), &stale),
        async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            gw.begin_selection()
        }
    );
    assert_eq!(res.unwrap_err(), GridError::Cancelled);
    assert!(stale.is_cancelled());
    assert!(!fresh.is_cancelled());
    assert!(!gw.current_selection().is_cancelled());

    // Nothing was cached for the superseded request.
    let calls_before = mock.call_count();
    let view = gw
        .generation_view(&a, &UnitSelection::All, may1(0, 20), &fresh)
        .await
        .unwrap();
    assert_eq!(view.samples.len(), 3);
    assert_eq!(mock.call_count(), calls_before + 3);
}

#[tokio::test]
async fn request_deadline_fails_the_whole_fetch() {
    let mock = scenario_connector("slow").delay(200).build();
    let gw = Gridwatch::builder()
        .with_connector(mock)
        .request_timeout(Duration::from_millis(30))
        .build()
        .unwrap();
    let token = gw.begin_selection();

    let err = gw
        .generation_view(&asset("A", &[U1]), &UnitSelection::All, may1(0, 20), &token)
        .await
        .unwrap_err();
    match err {
        GridError::RequestTimeout { capability } => assert_eq!(capability, "live"),
        other => panic!("unexpected: {other:?}"),
    }
}
