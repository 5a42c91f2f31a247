//! Instruction and machine state data model.

use serde::{Deserialize, Serialize};

/// A single G-code-like instruction with an optional trailing comment.
///
/// Immutable once created. The structured output format serializes these
/// directly, omitting absent comments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    /// The machine command, e.g. `G0 X5.00 Y0.00 F1200`.
    pub command: String,
    /// Human-readable annotation rendered after `;` in text output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl Instruction {
    /// Creates an instruction without a comment.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            comment: None,
        }
    }

    /// Creates an instruction with a trailing comment.
    pub fn with_comment(command: impl Into<String>, comment: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            comment: Some(comment.into()),
        }
    }

    /// Renders the instruction as a single output line.
    pub fn as_text(&self) -> String {
        match &self.comment {
            Some(comment) => format!("{} ; {}", self.command, comment),
            None => self.command.clone(),
        }
    }
}

/// Position and extrusion state captured immediately after an instruction
/// executes.
///
/// Snapshots pair 1:1, in order, with the instructions of a translation run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MachineState {
    /// Cursor X in millimeters.
    pub x_mm: f64,
    /// Cursor Y in millimeters.
    pub y_mm: f64,
    /// Tool Z in millimeters.
    pub z_mm: f64,
    /// Cumulative yarn fed, in millimeters.
    pub extrusion_mm: f64,
}
