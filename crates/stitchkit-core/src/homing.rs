//! Homing state reported by the motion system.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Whether the machine has completed a homing cycle.
///
/// Callers that enforce the home-before-run guard refuse to generate motion
/// unless the state is [`HomeState::Homed`]. The state also passes through
/// into the planner payload defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HomeState {
    /// No homing cycle has been reported.
    Unknown,
    /// A homing cycle completed and axis zero positions are trusted.
    Homed,
}

impl Default for HomeState {
    fn default() -> Self {
        Self::Unknown
    }
}

impl fmt::Display for HomeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => write!(f, "unknown"),
            Self::Homed => write!(f, "homed"),
        }
    }
}

impl FromStr for HomeState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "unknown" => Ok(Self::Unknown),
            "homed" => Ok(Self::Homed),
            _ => Err(format!("Unknown home state: {}", s)),
        }
    }
}
