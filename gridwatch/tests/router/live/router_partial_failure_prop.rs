use gridwatch::{Asset, FuelType, Gridwatch, UnitId, UnitSelection};
use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::helpers::{MockConnector, may1};

const CODES: [&str; 6] = ["U0", "U1", "U2", "U3", "U4", "U5"];

fn healthy_connector(healthy: &[&'static str]) -> std::sync::Arc<MockConnector> {
    crate::helpers::scenario_connector("partial")
        .units(healthy)
        .build()
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 40, .. ProptestConfig::default() })]

    #[test]
    fn failed_units_only_remove_their_share(mask in proptest::collection::vec(any::<bool>(), 1..=6)) {
        let codes: Vec<&'static str> = CODES[..mask.len()].to_vec();
        let healthy: Vec<&'static str> = codes
            .iter()
            .zip(&mask)
            .filter(|(_, ok)| **ok)
            .map(|(c, _)| *c)
            .collect();
        let failing = codes.len() - healthy.len();

        let gw = Gridwatch::builder()
            .with_connector(healthy_connector(&healthy))
            .build()
            .unwrap();
        let asset = Asset::new(
            "P",
            codes.iter().map(|c| UnitId::new(c).unwrap()),
            FuelType::Wind,
        )
        .unwrap();
        let token = gw.begin_selection();

        let view = tokio_test::block_on(gw.generation_view(
            &asset,
            &UnitSelection::All,
            may1(0, 20),
            &token,
        ))
        .unwrap();

        prop_assert_eq!(view.warnings.len(), failing * 3);
        let n = Decimal::from(healthy.len());
        match view.samples.last() {
            Some(last) => {
                prop_assert_eq!(last.actual_total, Decimal::from(80) * n);
                prop_assert_eq!(last.potential_total, Decimal::from(150) * n);
                prop_assert_eq!(last.curtailment_total, Decimal::from(20) * n);
            }
            None => prop_assert!(healthy.is_empty()),
        }
    }
}
