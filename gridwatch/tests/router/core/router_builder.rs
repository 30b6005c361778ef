use std::time::Duration;

use gridwatch::{Gridwatch, GridError};

use crate::helpers::{date, scenario_connector};

#[test]
fn build_requires_a_connector() {
    let err = Gridwatch::builder().build().err().expect("must fail");
    assert!(matches!(err, GridError::InvalidArg(_)));
}

#[test]
fn build_rejects_unknown_time_zone() {
    let err = Gridwatch::builder()
        .with_connector(scenario_connector("a").build())
        .market_timezone("Mars/Olympus_Mons")
        .build()
        .err()
        .expect("must fail");
    match err {
        GridError::InvalidArg(msg) => assert!(msg.contains("Mars/Olympus_Mons")),
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn build_rejects_non_monday_anchor() {
    let err = Gridwatch::builder()
        .with_connector(scenario_connector("a").build())
        .biweekly_anchor(date(2024, 1, 3))
        .build()
        .err()
        .expect("must fail");
    assert!(matches!(err, GridError::InvalidArg(_)));
}

#[test]
fn build_rejects_empty_live_window_and_zero_timeout() {
    let err = Gridwatch::builder()
        .with_connector(scenario_connector("a").build())
        .live_window(Duration::ZERO, Duration::ZERO)
        .build()
        .err()
        .expect("must fail");
    assert!(matches!(err, GridError::InvalidArg(_)));

    let err = Gridwatch::builder()
        .with_connector(scenario_connector("a").build())
        .provider_timeout(Duration::ZERO)
        .build()
        .err()
        .expect("must fail");
    assert!(matches!(err, GridError::InvalidArg(_)));
}

#[test]
fn builder_setters_land_in_config() {
    let gw = Gridwatch::builder()
        .with_connector(scenario_connector("a").build())
        .provider_timeout(Duration::from_millis(750))
        .request_timeout(Duration::from_secs(3))
        .preview_points(12)
        .clamp_override_to_potential(true)
        .market_timezone("Europe/Berlin")
        .build()
        .unwrap();
    let cfg = gw.config();
    assert_eq!(cfg.provider_timeout, Duration::from_millis(750));
    assert_eq!(cfg.request_timeout, Some(Duration::from_secs(3)));
    assert_eq!(cfg.preview_points, 12);
    assert!(cfg.clamp_override_to_potential);
    assert_eq!(cfg.market_timezone, "Europe/Berlin");
}
