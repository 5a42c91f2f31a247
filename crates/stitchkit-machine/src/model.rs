//! Axis definitions and travel enforcement.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use stitchkit_core::error::{CommandLocation, PatternError, PatternResult};

/// Controller parameters for a single axis.
///
/// The name is carried separately from the serialized form: profile files key
/// axes by name, and the planner payload embeds them the same way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisProfile {
    /// Upper-case axis name ("X", "Y", "Z", "E", ...).
    #[serde(skip)]
    pub name: String,
    /// Driver microstepping factor.
    pub microstepping: u32,
    /// Full steps (times microstepping) per millimeter of travel.
    pub steps_per_mm: f64,
    /// Lower travel bound in millimeters.
    #[serde(alias = "min_mm", alias = "min")]
    pub travel_min_mm: f64,
    /// Upper travel bound in millimeters.
    #[serde(alias = "max_mm", alias = "max")]
    pub travel_max_mm: f64,
}

impl AxisProfile {
    /// Accepts `position_mm` when it lies inside the inclusive travel range.
    pub fn ensure_within(&self, position_mm: f64, location: CommandLocation) -> PatternResult<()> {
        if self.travel_min_mm <= position_mm && position_mm <= self.travel_max_mm {
            return Ok(());
        }
        Err(PatternError::AxisOutOfRange {
            axis: self.name.clone(),
            position_mm,
            travel_min_mm: self.travel_min_mm,
            travel_max_mm: self.travel_max_mm,
            location,
        })
    }
}

/// Axis definitions for a motion system.
///
/// Axes are keyed by upper-case name. A `BTreeMap` keeps serialization and
/// iteration in sorted axis order, which the deterministic planner output
/// relies on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineProfile {
    /// Axis definitions keyed by upper-case axis name.
    pub axes: BTreeMap<String, AxisProfile>,
}

impl MachineProfile {
    /// Builds a profile from axis definitions, keyed by their names.
    pub fn new(axes: impl IntoIterator<Item = AxisProfile>) -> Self {
        Self {
            axes: axes
                .into_iter()
                .map(|axis| (axis.name.clone(), axis))
                .collect(),
        }
    }

    /// Ensures `axis` stays inside its configured travel range.
    ///
    /// Consulting an axis the profile does not define is an error; the
    /// translator consults X, Y, and Z.
    pub fn ensure_within(
        &self,
        axis: &str,
        position_mm: f64,
        location: CommandLocation,
    ) -> PatternResult<()> {
        let key = axis.to_uppercase();
        let profile = self
            .axes
            .get(&key)
            .ok_or(PatternError::MissingAxis { axis: key })?;
        profile.ensure_within(position_mm, location)
    }
}
