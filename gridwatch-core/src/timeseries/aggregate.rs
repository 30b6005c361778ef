use chrono::{DateTime, TimeDelta, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::axis::build_time_axis;
use super::resolve::{ResolveOptions, UnitPoint, UnitTimeline};
use crate::records::{LiveSeries, ReconciledSample};
use crate::unit::UnitSet;
use gridwatch_types::UnitId;

/// Reconciled signal for a unit set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reconciliation {
    /// One sample per axis instant, ascending.
    pub samples: Vec<ReconciledSample>,
    /// Whether any selected unit is under an override at `now`.
    pub currently_curtailed: bool,
}

fn timelines(series: &LiveSeries, units: &UnitSet) -> Vec<(UnitId, UnitTimeline)> {
    units
        .iter()
        .map(|u| (u.clone(), UnitTimeline::for_unit(series, u)))
        .collect()
}

/// Resolve every selected unit at every axis instant and sum.
///
/// The axis is built from the selected units' records only; the output has
/// exactly one sample per axis instant.
#[must_use]
pub fn reconcile(
    series: &LiveSeries,
    units: &UnitSet,
    now: DateTime<Utc>,
    lookback: TimeDelta,
    opts: ResolveOptions,
) -> Reconciliation {
    let axis = build_time_axis(series, units, now, lookback);
    let timelines = timelines(series, units);

    let samples = axis
        .into_iter()
        .map(|ts| {
            let mut sample = ReconciledSample {
                ts,
                actual_total: Decimal::ZERO,
                potential_total: Decimal::ZERO,
                curtailment_total: Decimal::ZERO,
            };
            for (_, tl) in &timelines {
                let p = tl.resolve(ts, opts);
                sample.actual_total += p.actual;
                sample.potential_total += p.potential;
                sample.curtailment_total += p.curtailment;
            }
            sample
        })
        .collect();

    let currently_curtailed = timelines
        .iter()
        .any(|(_, tl)| tl.overrides.any_active_at(now));

    Reconciliation {
        samples,
        currently_curtailed,
    }
}

/// Each selected unit's resolved point at `now`, in unit order.
#[must_use]
pub fn unit_points_at(
    series: &LiveSeries,
    units: &UnitSet,
    now: DateTime<Utc>,
    opts: ResolveOptions,
) -> Vec<(UnitId, UnitPoint)> {
    timelines(series, units)
        .into_iter()
        .map(|(u, tl)| {
            let p = tl.resolve(now, opts);
            (u, p)
        })
        .collect()
}
