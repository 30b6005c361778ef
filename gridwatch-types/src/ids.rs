//! Identifier newtypes shared across crates.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GridError;

/// Typed key for identifying connectors in priority configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectorKey(pub &'static str);

impl ConnectorKey {
    /// Construct a new typed connector key from a static name.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// Returns the inner static string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        self.0
    }
}

/// Balancing-mechanism unit identifier (e.g. `T_SGRWO-1`).
///
/// Surrounding whitespace is trimmed; empty ids and ids containing inner
/// whitespace are rejected. Ordering is lexical, which is what unit-set cache
/// keys sort by.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UnitId(String);

impl UnitId {
    /// Validate and wrap a unit code.
    ///
    /// # Errors
    /// Returns `InvalidArg` for empty codes or codes with inner whitespace.
    pub fn new(code: impl AsRef<str>) -> Result<Self, GridError> {
        let trimmed = code.as_ref().trim();
        if trimmed.is_empty() {
            return Err(GridError::InvalidArg("unit id must not be empty".into()));
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(GridError::InvalidArg(format!(
                "unit id '{trimmed}' must not contain whitespace"
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Borrow the raw code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for UnitId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for UnitId {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for UnitId {
    type Error = GridError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UnitId> for String {
    fn from(id: UnitId) -> Self {
        id.0
    }
}
