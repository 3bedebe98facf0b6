//! Strongly-typed identifiers used across the analytics crates.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Identifier of a parcel (the unit of health classification).
///
/// Parcels are owned by the external persistence layer, which keys them by
/// integer; the core treats the value as opaque.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParcelId(u64);

impl ParcelId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl core::fmt::Display for ParcelId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<u64> for ParcelId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl FromStr for ParcelId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|e| DomainError::invalid_id(format!("ParcelId: {e}")))
    }
}

/// Identifier attached to a simulation result before it is handed to persistence.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SimulationId(Uuid);

impl SimulationId {
    /// Create a new identifier.
    ///
    /// Uses UUIDv7 (time-ordered). Prefer passing IDs explicitly in tests
    /// for determinism.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for SimulationId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for SimulationId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for SimulationId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let uuid =
            Uuid::from_str(s).map_err(|e| DomainError::invalid_id(format!("SimulationId: {e}")))?;
        Ok(Self(uuid))
    }
}
