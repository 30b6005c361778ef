pub mod energy;
pub mod live;

use gridwatch_core::{Asset, FuelType, GridError, UnitId};

pub const SEAGREEN: &str = "T_SGRWO-1";
pub const MORAY_EAST_1: &str = "T_MOWEO-1";
pub const MORAY_EAST_2: &str = "T_MOWEO-2";

pub fn assets() -> Result<Vec<Asset>, GridError> {
    Ok(vec![
        Asset::new("Seagreen", [UnitId::new(SEAGREEN)?], FuelType::Wind)?,
        Asset::new(
            "Moray East",
            [UnitId::new(MORAY_EAST_1)?, UnitId::new(MORAY_EAST_2)?],
            FuelType::Wind,
        )?,
    ])
}
