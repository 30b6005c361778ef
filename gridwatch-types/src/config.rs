//! Configuration types shared across the orchestrator and the reconciliation core.

use std::time::Duration;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Tie-break applied when several override instructions are active for the same
/// unit at the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum OverridePrecedence {
    /// The first matching instruction in feed order wins.
    #[default]
    FirstInInput,
    /// The instruction with the highest acceptance number wins; acceptance time
    /// and then feed order break remaining ties.
    LatestAcceptance,
    /// The instruction with the latest start wins; feed order breaks ties.
    LatestStart,
}

/// Calendar resolution for historical energy buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Resolution {
    /// One bucket per settlement instant; no aggregation.
    #[default]
    Raw,
    /// Local calendar days.
    Daily,
    /// ISO weeks starting Monday.
    Weekly,
    /// Fortnights aligned to a fixed reference Monday.
    BiWeekly,
    /// Calendar months.
    Monthly,
}

impl Resolution {
    /// Stable lowercase label for logs and query strings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Raw => "raw",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::BiWeekly => "biweekly",
            Self::Monthly => "monthly",
        }
    }
}

/// Per-session cache for joined upstream series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Entry time-to-live in milliseconds. `0` disables caching.
    pub ttl_ms: u64,
    /// Maximum number of unit-set slots kept per dataset family.
    pub max_entries: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_ms: 5 * 60 * 1000,
            max_entries: 64,
        }
    }
}

impl CacheConfig {
    /// Effective TTL, or `None` when caching is disabled.
    #[must_use]
    pub const fn ttl(&self) -> Option<Duration> {
        if self.ttl_ms == 0 || self.max_entries == 0 {
            None
        } else {
            Some(Duration::from_millis(self.ttl_ms))
        }
    }
}

/// Global configuration for the `Gridwatch` orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridwatchConfig {
    /// Timeout for individual provider requests.
    pub provider_timeout: Duration,
    /// Optional overall deadline for a fan-out across all units and datasets.
    pub request_timeout: Option<Duration>,
    /// Buffer subtracted from the earliest baseline start to anchor the time axis.
    pub axis_lookback: Duration,
    /// How far before `now` the default live query window starts.
    pub live_lookback: Duration,
    /// How far after `now` the default live query window ends.
    pub live_lookahead: Duration,
    /// Tie-break for overlapping override instructions.
    pub override_precedence: OverridePrecedence,
    /// Cap the instructed level at the unit's potential before computing curtailment.
    pub clamp_override_to_potential: bool,
    /// IANA time zone used for settlement dates and calendar buckets.
    pub market_timezone: String,
    /// Reference Monday for bi-weekly bucket alignment.
    pub biweekly_anchor: NaiveDate,
    /// Maximum number of points in a preview sequence.
    pub preview_points: usize,
    /// Per-session cache settings.
    pub cache: CacheConfig,
}

/// Default reference Monday for fortnight alignment.
pub const DEFAULT_BIWEEKLY_ANCHOR: (i32, u32, u32) = (2024, 1, 1);

impl Default for GridwatchConfig {
    fn default() -> Self {
        let (y, m, d) = DEFAULT_BIWEEKLY_ANCHOR;
        Self {
            provider_timeout: Duration::from_secs(5),
            request_timeout: None,
            axis_lookback: Duration::from_secs(30 * 60),
            live_lookback: Duration::from_secs(24 * 60 * 60),
            live_lookahead: Duration::from_secs(60 * 60),
            override_precedence: OverridePrecedence::default(),
            clamp_override_to_potential: false,
            market_timezone: "Europe/London".to_string(),
            biweekly_anchor: NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN),
            preview_points: 200,
            cache: CacheConfig::default(),
        }
    }
}
