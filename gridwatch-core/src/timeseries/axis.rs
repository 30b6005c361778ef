use std::collections::BTreeSet;

use chrono::{DateTime, TimeDelta, Utc};

use crate::records::LiveSeries;
use crate::unit::UnitSet;

/// Candidate instants at which the reconciled signal can change.
///
/// Candidates are every start and end across the selected units' baseline,
/// override and capacity records, plus `now`. The result is bounded to
/// `[earliest baseline start - lookback, now]`, strictly ascending, and
/// independent of input order. No baseline record for the selection yields an
/// empty axis.
#[must_use]
pub fn build_time_axis(
    series: &LiveSeries,
    units: &UnitSet,
    now: DateTime<Utc>,
    lookback: TimeDelta,
) -> Vec<DateTime<Utc>> {
    let Some(earliest) = series
        .baseline
        .iter()
        .filter(|r| units.contains(&r.unit))
        .map(|r| r.start)
        .min()
    else {
        return Vec::new();
    };
    let anchor = earliest
        .checked_sub_signed(lookback)
        .unwrap_or(DateTime::<Utc>::MIN_UTC);

    let steps = series
        .baseline
        .iter()
        .chain(series.capacity.iter())
        .filter(|r| units.contains(&r.unit))
        .flat_map(|r| [r.start, r.end()]);
    let overrides = series
        .overrides
        .iter()
        .filter(|o| units.contains(&o.unit))
        .flat_map(|o| [o.start, o.end]);

    steps
        .chain(overrides)
        .chain(std::iter::once(now))
        .filter(|t| anchor <= *t && *t <= now)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
