//! Strongly-typed identifiers.

use std::fmt;

/// Identifies a registered grid area within a world's grid registry.
///
/// Allocated by the registry from a monotonic counter on registration;
/// never reused within one registry, so a stale id after unregistration
/// simply fails lookups instead of aliasing a different area.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AreaId(pub u64);

impl fmt::Display for AreaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for AreaId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// Opaque handle to a placed building, used as the owner value in the
/// concurrent spatial index.
///
/// The engine glue maps these to whatever actor/entity representation it
/// uses; the placement core only compares them for identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BuildingId(pub u64);

impl fmt::Display for BuildingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for BuildingId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}
