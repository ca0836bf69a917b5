//! Core type definitions used throughout the codebase

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Lower bound of every bounded country stat
pub const STAT_MIN: f64 = 0.0;

/// Upper bound of every bounded country stat
pub const STAT_MAX: f64 = 100.0;

/// Turn counter (simulation time unit)
pub type Turn = u32;

/// Clamp a bounded stat into [STAT_MIN, STAT_MAX]
pub fn clamp_stat(value: f64) -> f64 {
    value.clamp(STAT_MIN, STAT_MAX)
}

/// Unique identifier for countries ("usa", "china", ...)
#[derive(Debug, Display, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CountryId(pub String);

impl CountryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CountryId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Unique identifier for alliances ("NATO", "EU", ...)
#[derive(Debug, Display, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AllianceId(pub String);

impl AllianceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AllianceId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}
