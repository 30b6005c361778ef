//! Units, assets, and unit-set selection.

use core::fmt;

use serde::{Deserialize, Serialize};

use gridwatch_types::{GridError, UnitId};

/// Closed set of fuel categories an asset can be tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum FuelType {
    /// Onshore and offshore wind.
    Wind,
    /// Combined-cycle gas turbines.
    Ccgt,
    /// Open-cycle gas turbines.
    Ocgt,
    /// Nuclear.
    Nuclear,
    /// Biomass.
    Biomass,
    /// Run-of-river hydro.
    Hydro,
    /// Pumped storage.
    PumpedStorage,
    /// Coal.
    Coal,
    /// Oil.
    Oil,
    /// Solar.
    Solar,
    /// Battery storage.
    Battery,
    /// Anything else.
    Other,
}

const FUEL_TABLE: &[(FuelType, &str, &str)] = &[
    (FuelType::Wind, "WIND", "Wind"),
    (FuelType::Ccgt, "CCGT", "Gas (CCGT)"),
    (FuelType::Ocgt, "OCGT", "Gas (OCGT)"),
    (FuelType::Nuclear, "NUCLEAR", "Nuclear"),
    (FuelType::Biomass, "BIOMASS", "Biomass"),
    (FuelType::Hydro, "NPSHYD", "Hydro"),
    (FuelType::PumpedStorage, "PS", "Pumped storage"),
    (FuelType::Coal, "COAL", "Coal"),
    (FuelType::Oil, "OIL", "Oil"),
    (FuelType::Solar, "SOLAR", "Solar"),
    (FuelType::Battery, "BATTERY", "Battery"),
    (FuelType::Other, "OTHER", "Other"),
];

impl FuelType {
    /// Upstream fuel code.
    #[must_use]
    pub fn code(self) -> &'static str {
        FUEL_TABLE
            .iter()
            .find(|(f, _, _)| *f == self)
            .map_or("OTHER", |(_, code, _)| *code)
    }

    /// Human-readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        FUEL_TABLE
            .iter()
            .find(|(f, _, _)| *f == self)
            .map_or("Other", |(_, _, label)| *label)
    }

    /// Map an upstream code to a category; unknown codes map to `Other`.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        let code = code.trim();
        FUEL_TABLE
            .iter()
            .find(|(_, c, _)| c.eq_ignore_ascii_case(code))
            .map_or(Self::Other, |(f, _, _)| *f)
    }
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Sorted, de-duplicated set of unit ids.
///
/// Two sets built from the same ids in any order compare equal and share the
/// same [`UnitSet::key`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct UnitSet(Vec<UnitId>);

impl UnitSet {
    /// Build from any iterator of ids.
    pub fn new(units: impl IntoIterator<Item = UnitId>) -> Self {
        let mut v: Vec<UnitId> = units.into_iter().collect();
        v.sort();
        v.dedup();
        Self(v)
    }

    /// Membership test.
    #[must_use]
    pub fn contains(&self, unit: &UnitId) -> bool {
        self.0.binary_search(unit).is_ok()
    }

    /// Ids in ascending order.
    #[must_use]
    pub fn as_slice(&self) -> &[UnitId] {
        &self.0
    }

    /// Iterate ids in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &UnitId> {
        self.0.iter()
    }

    /// Number of units.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the set holds no units.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Stable cache key, e.g. `T_MOWEO-1,T_MOWEO-2`.
    #[must_use]
    pub fn key(&self) -> String {
        self.0
            .iter()
            .map(UnitId::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl FromIterator<UnitId> for UnitSet {
    fn from_iter<T: IntoIterator<Item = UnitId>>(iter: T) -> Self {
        Self::new(iter)
    }
}

/// A generating asset composed of one or more units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    /// Display name, e.g. "Moray East".
    pub name: String,
    /// Member units.
    pub units: UnitSet,
    /// Fuel category.
    pub fuel: FuelType,
}

impl Asset {
    /// Build an asset, rejecting an empty unit list.
    ///
    /// # Errors
    /// Returns `InvalidArg` when `units` is empty.
    pub fn new(
        name: impl Into<String>,
        units: impl IntoIterator<Item = UnitId>,
        fuel: FuelType,
    ) -> Result<Self, GridError> {
        let name = name.into();
        let units = UnitSet::new(units);
        if units.is_empty() {
            return Err(GridError::InvalidArg(format!(
                "asset '{name}' must have at least one unit"
            )));
        }
        Ok(Self { name, units, fuel })
    }
}

/// Which of an asset's units a view aggregates.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UnitSelection {
    /// Every unit of the asset.
    #[default]
    All,
    /// Exactly one unit.
    Single(UnitId),
}

impl UnitSelection {
    /// Resolve against an asset.
    ///
    /// # Errors
    /// Returns `InvalidArg` when a `Single` unit is not a member of `asset`.
    pub fn resolve(&self, asset: &Asset) -> Result<UnitSet, GridError> {
        match self {
            Self::All => Ok(asset.units.clone()),
            Self::Single(unit) if asset.units.contains(unit) => {
                Ok(UnitSet::new([unit.clone()]))
            }
            Self::Single(unit) => Err(GridError::InvalidArg(format!(
                "unit {unit} is not part of asset '{}'",
                asset.name
            ))),
        }
    }
}
