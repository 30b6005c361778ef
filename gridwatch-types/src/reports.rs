//! Report fragments produced by the orchestrator.

use serde::{Deserialize, Serialize};

use crate::dataset::Dataset;
use crate::error::GridError;
use crate::ids::UnitId;

/// A non-fatal upstream failure absorbed while fetching one unit's dataset.
///
/// The unit contributes an empty series for `dataset`; the rest of the request
/// proceeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchWarning {
    /// Unit whose request failed.
    pub unit: UnitId,
    /// Dataset that could not be fetched.
    pub dataset: Dataset,
    /// The collapsed provider error.
    pub error: GridError,
}

impl FetchWarning {
    /// Convenience constructor.
    #[must_use]
    pub const fn new(unit: UnitId, dataset: Dataset, error: GridError) -> Self {
        Self {
            unit,
            dataset,
            error,
        }
    }
}

/// Availability of a derived view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ViewStatus {
    /// Samples were derived.
    #[default]
    Available,
    /// No baseline (or energy) data exists for the selected units and window.
    DataUnavailable,
}
