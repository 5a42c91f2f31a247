//! Error taxonomy for pattern translation.
//!
//! Every failure a translation run can surface is one of the variants of
//! [`PatternError`]. Callers match on the variant rather than inspecting
//! message text. All errors abort the run immediately; nothing is retried.

use std::fmt;

use thiserror::Error;

/// Where an offending value came from.
///
/// Bounds violations either point at a source line of the pattern or at a
/// command the translator generated itself (the safe-height raise).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandLocation {
    /// A numbered line of the pattern source (1-based).
    Line(u32),
    /// A command emitted implicitly, with no corresponding source line.
    Generated,
}

impl fmt::Display for CommandLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Line(n) => write!(f, "line {}", n),
            Self::Generated => write!(f, "generated command"),
        }
    }
}

/// Pattern translation error type
///
/// Represents every failure mode of the pattern-to-motion pipeline:
/// dispatch, argument validation, axis travel enforcement, and SVG import.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PatternError {
    /// The command keyword is not part of the pattern language.
    #[error("Unknown command '{command}' on line {line_number}")]
    UnknownCommand {
        /// The source line carrying the keyword.
        line_number: u32,
        /// The keyword as written (normalized upper-case).
        command: String,
    },

    /// An argument is missing, has the wrong arity, or is not a finite number.
    #[error("{command} on line {line_number} {reason}")]
    MalformedArguments {
        /// The source line carrying the command.
        line_number: u32,
        /// The command whose arguments are malformed.
        command: String,
        /// What was expected, e.g. "requires an integer count".
        reason: String,
    },

    /// A count, duration, row height, or MOVE coordinate is zero or negative.
    #[error("{command} on line {line_number}: {what} must be positive")]
    NonPositiveValue {
        /// The source line carrying the command.
        line_number: u32,
        /// The command whose value is out of the working envelope.
        command: String,
        /// The value that must be positive, e.g. "count" or "coordinates".
        what: String,
    },

    /// A candidate position falls outside the machine profile's travel range.
    #[error(
        "Axis {axis} position {position_mm:.2} mm outside travel range \
         {travel_min_mm:.2} mm to {travel_max_mm:.2} mm ({location})"
    )]
    AxisOutOfRange {
        /// The axis whose travel range was violated.
        axis: String,
        /// The rejected position.
        position_mm: f64,
        /// Lower travel bound from the machine profile.
        travel_min_mm: f64,
        /// Upper travel bound from the machine profile.
        travel_max_mm: f64,
        /// The source line, or the generated command, that produced the value.
        location: CommandLocation,
    },

    /// The machine profile does not define an axis the translation consulted.
    #[error("Machine profile is missing axis '{axis}'")]
    MissingAxis {
        /// The axis name that was looked up.
        axis: String,
    },

    /// The SVG source could not be turned into MOVE commands.
    #[error("SVG geometry error: {reason}")]
    Geometry {
        /// Why the document was rejected.
        reason: String,
    },
}

impl PatternError {
    /// Check if this is a travel bounds violation
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, PatternError::AxisOutOfRange { .. })
    }

    /// Check if this is an SVG geometry error
    pub fn is_geometry_error(&self) -> bool {
        matches!(self, PatternError::Geometry { .. })
    }
}

/// Result type using PatternError
pub type PatternResult<T> = Result<T, PatternError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_command_display() {
        let err = PatternError::UnknownCommand {
            line_number: 3,
            command: "WEAVE".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown command 'WEAVE' on line 3");
    }

    #[test]
    fn test_malformed_arguments_display() {
        let err = PatternError::MalformedArguments {
            line_number: 1,
            command: "CHAIN".to_string(),
            reason: "requires an integer count".to_string(),
        };
        assert_eq!(err.to_string(), "CHAIN on line 1 requires an integer count");
    }

    #[test]
    fn test_non_positive_value_display() {
        let err = PatternError::NonPositiveValue {
            line_number: 2,
            command: "PAUSE".to_string(),
            what: "duration".to_string(),
        };
        assert_eq!(err.to_string(), "PAUSE on line 2: duration must be positive");
    }

    #[test]
    fn test_axis_out_of_range_display() {
        let err = PatternError::AxisOutOfRange {
            axis: "X".to_string(),
            position_mm: 10.0,
            travel_min_mm: 0.0,
            travel_max_mm: 9.0,
            location: CommandLocation::Line(1),
        };
        assert_eq!(
            err.to_string(),
            "Axis X position 10.00 mm outside travel range 0.00 mm to 9.00 mm (line 1)"
        );
        assert!(err.is_out_of_range());
    }

    #[test]
    fn test_generated_location_display() {
        assert_eq!(CommandLocation::Generated.to_string(), "generated command");
        assert_eq!(CommandLocation::Line(12).to_string(), "line 12");
    }
}
