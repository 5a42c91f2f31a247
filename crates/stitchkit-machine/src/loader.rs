//! Machine profile loading from JSON or YAML files.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::{ProfileError, ProfileResult};
use crate::model::{AxisProfile, MachineProfile};

#[derive(Debug, Deserialize)]
struct RawProfile {
    axes: BTreeMap<String, AxisProfile>,
}

/// Loads a machine profile from a JSON or YAML file.
///
/// The format is chosen by extension: `.yaml`/`.yml` parse as YAML,
/// everything else as JSON. Axis names are upper-cased, and every axis is
/// validated before the profile is returned.
pub fn load_machine_profile(path: impl AsRef<Path>) -> ProfileResult<MachineProfile> {
    let path = path.as_ref();
    let raw_text = fs::read_to_string(path)?;

    let is_yaml = matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml") | Some("yml")
    );
    let raw: RawProfile = if is_yaml {
        serde_yaml::from_str(&raw_text)?
    } else {
        serde_json::from_str(&raw_text)?
    };

    let profile = profile_from_raw(raw)?;
    debug!(
        path = %path.display(),
        axes = profile.axes.len(),
        "loaded machine profile"
    );
    Ok(profile)
}

fn profile_from_raw(raw: RawProfile) -> ProfileResult<MachineProfile> {
    if raw.axes.is_empty() {
        return Err(ProfileError::MissingAxes);
    }
    let mut axes = BTreeMap::new();
    for (raw_name, mut axis) in raw.axes {
        let name = raw_name.to_uppercase();
        axis.name = name.clone();
        validate_axis(&axis)?;
        axes.insert(name, axis);
    }
    Ok(MachineProfile { axes })
}

fn validate_axis(axis: &AxisProfile) -> ProfileResult<()> {
    if axis.microstepping == 0 {
        return Err(ProfileError::InvalidAxis {
            axis: axis.name.clone(),
            reason: "microstepping must be at least 1".to_string(),
        });
    }
    if !(axis.steps_per_mm.is_finite() && axis.steps_per_mm > 0.0) {
        return Err(ProfileError::InvalidAxis {
            axis: axis.name.clone(),
            reason: format!("steps_per_mm {} must be a positive number", axis.steps_per_mm),
        });
    }
    if !(axis.travel_min_mm.is_finite() && axis.travel_max_mm.is_finite()) {
        return Err(ProfileError::InvalidAxis {
            axis: axis.name.clone(),
            reason: "travel bounds must be finite".to_string(),
        });
    }
    if axis.travel_max_mm <= axis.travel_min_mm {
        return Err(ProfileError::InvalidAxis {
            axis: axis.name.clone(),
            reason: format!(
                "invalid travel range {} to {}",
                axis.travel_min_mm, axis.travel_max_mm
            ),
        });
    }
    Ok(())
}
