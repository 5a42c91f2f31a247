//! Error types for machine profile loading and validation.

use std::io;

use thiserror::Error;

/// Errors that can occur while loading a machine profile file.
#[derive(Error, Debug)]
pub enum ProfileError {
    /// The profile file could not be read.
    #[error("Unable to read machine profile: {0}")]
    Read(#[from] io::Error),

    /// The profile is not valid JSON.
    #[error("Invalid machine profile JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The profile is not valid YAML.
    #[error("Invalid machine profile YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The profile defines no axes at all.
    #[error("Machine profile must define at least one axis")]
    MissingAxes,

    /// An axis definition fails validation.
    #[error("Axis {axis}: {reason}")]
    InvalidAxis {
        /// The axis whose definition is invalid.
        axis: String,
        /// Why the definition was rejected.
        reason: String,
    },
}

/// Result type alias for profile operations.
pub type ProfileResult<T> = Result<T, ProfileError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_axes_display() {
        assert_eq!(
            ProfileError::MissingAxes.to_string(),
            "Machine profile must define at least one axis"
        );
    }

    #[test]
    fn test_invalid_axis_display() {
        let err = ProfileError::InvalidAxis {
            axis: "Z".to_string(),
            reason: "travel range 5 to 5 is empty".to_string(),
        };
        assert_eq!(err.to_string(), "Axis Z: travel range 5 to 5 is empty");
    }
}
