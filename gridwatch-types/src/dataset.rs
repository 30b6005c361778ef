use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::GridError;

/// Upstream datasets consumed by gridwatch.
///
/// These map one-to-one with connector role traits and give consistent
/// Display formatting for logs, errors, and report warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Dataset {
    /// Physical notifications: declared baseline output, stepwise.
    Baseline,
    /// Bid-offer acceptance levels: dispatch overrides over `[start, end)`.
    Override,
    /// Maximum export limits: capacity ceiling, stepwise.
    Capacity,
    /// Settlement-period metered energy.
    Energy,
}

impl Dataset {
    /// Upstream dataset code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Baseline => "PN",
            Self::Override => "BOAL",
            Self::Capacity => "MEL",
            Self::Energy => "B1610",
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dataset {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PN" => Ok(Self::Baseline),
            "BOAL" => Ok(Self::Override),
            "MEL" => Ok(Self::Capacity),
            "B1610" => Ok(Self::Energy),
            other => Err(GridError::InvalidArg(format!("unknown dataset code '{other}'"))),
        }
    }
}
