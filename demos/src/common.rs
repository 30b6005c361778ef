use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use gridwatch_core::{Asset, GridError, MarketDataConnector};

/// Return a connector for demos.
///
/// Only the fixture connector ships with the workspace.
#[must_use]
pub fn get_connector() -> Arc<dyn MarketDataConnector> {
    println!("--- (Using fixture connector) ---");
    Arc::new(gridwatch_mock::MockConnector::new())
}

/// Look up a fixture asset by display name.
///
/// # Errors
/// Returns `NotFound` when no fixture asset has that name.
pub fn fixture_asset(name: &str) -> Result<Asset, GridError> {
    gridwatch_mock::MockConnector::assets()?
        .into_iter()
        .find(|a| a.name == name)
        .ok_or_else(|| GridError::not_found(format!("asset '{name}'")))
}

/// A fixed "now" inside the live fixture day, so demo output is stable.
///
/// # Errors
/// Never in practice; the timestamp is valid.
pub fn fixture_now(hour: u32, minute: u32) -> Result<DateTime<Utc>, GridError> {
    Utc.with_ymd_and_hms(2024, 5, 1, hour, minute, 0)
        .single()
        .ok_or_else(|| GridError::InvalidArg(format!("invalid fixture time {hour}:{minute}")))
}
