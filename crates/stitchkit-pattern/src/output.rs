//! Output serialization.
//!
//! Renders a translation run in three formats: plain instruction text, a
//! structured command list, and a planner payload carrying computed bounds,
//! defaults, and per-command machine state for visualization and replay
//! tooling. All output is deterministic: fixed decimal formatting, axis maps
//! serialized in sorted order.

use serde::{Deserialize, Serialize};

use stitchkit_core::constants::{
    DEFAULT_ROW_HEIGHT_MM, FABRIC_PLANE_Z_MM, PLANNER_LOOP_SECONDS, PLANNER_METADATA_SOURCE,
    PLANNER_VERSION, PLUNGE_FEED_RATE, SAFE_Z_MM, TRAVEL_FEED_RATE, YARN_FEED_RATE,
};
use stitchkit_core::homing::HomeState;
use stitchkit_core::instruction::{Instruction, MachineState};
use stitchkit_machine::MachineProfile;

/// Renders instructions as machine-readable text, one line each.
pub fn render_text(instructions: &[Instruction]) -> String {
    let mut text = instructions
        .iter()
        .map(Instruction::as_text)
        .collect::<Vec<_>>()
        .join("\n");
    text.push('\n');
    text
}

/// Renders instructions as a pretty-printed JSON command list.
///
/// The structured format round-trips: deserializing the output yields the
/// original command/comment pairs exactly.
pub fn render_structured(instructions: &[Instruction]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(instructions)
}

/// Inclusive min/max of one axis across a translation run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    /// Smallest value observed.
    pub min: f64,
    /// Largest value observed.
    pub max: f64,
}

/// Axis-wise bounds computed across all state snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionBounds {
    /// Cursor X range.
    pub x_mm: AxisRange,
    /// Cursor Y range.
    pub y_mm: AxisRange,
    /// Tool Z range.
    pub z_mm: AxisRange,
    /// Cumulative yarn feed range.
    pub extrusion_mm: AxisRange,
}

/// Fixed descriptive metadata for planner consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerMetadata {
    /// Loop duration used by replay tooling.
    pub duration_seconds: f64,
    /// Identifies the producer of the payload.
    pub source: String,
}

/// The motion defaults a planner needs to reproduce the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerDefaults {
    /// Safe retreat height.
    pub safe_z_mm: f64,
    /// Z of the working surface.
    pub fabric_plane_z_mm: f64,
    /// Horizontal travel feed rate.
    pub travel_feed_rate_mm_min: u32,
    /// Plunge/raise feed rate.
    pub plunge_feed_rate_mm_min: u32,
    /// Yarn feed rate.
    pub yarn_feed_rate_mm_min: u32,
    /// Row height applied by TURN without an argument.
    pub default_row_height_mm: f64,
    /// Whether the caller enforced the home-before-run guard.
    pub require_home: bool,
    /// Homing state reported by the caller.
    pub home_state: HomeState,
}

/// One instruction paired with the machine state after it executes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerCommand {
    /// Position in the instruction sequence, from zero.
    pub index: usize,
    /// The machine command text.
    pub command: String,
    /// Optional annotation carried through from the instruction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Machine state after the command executes.
    pub state: MachineState,
}

/// The aggregated planner payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerPayload {
    /// Payload schema version.
    pub version: u32,
    /// Unit system label; always millimeters.
    pub units: String,
    /// Fixed descriptive metadata.
    pub metadata: PlannerMetadata,
    /// Motion defaults, including the homing-guard pass-through.
    pub defaults: PlannerDefaults,
    /// Axis-wise bounds across the run.
    pub bounds: MotionBounds,
    /// Every instruction with its paired state.
    pub commands: Vec<PlannerCommand>,
    /// Axis definitions embedded verbatim when a profile was supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub machine_profile: Option<MachineProfile>,
}

/// Builds the planner payload for a successful translation run.
///
/// `instructions` and `snapshots` must be the paired sequences produced by
/// one `translate` call.
pub fn planner_payload(
    instructions: &[Instruction],
    snapshots: &[MachineState],
    machine_profile: Option<&MachineProfile>,
    require_home: bool,
    home_state: HomeState,
) -> PlannerPayload {
    debug_assert_eq!(instructions.len(), snapshots.len());
    let commands = instructions
        .iter()
        .zip(snapshots)
        .enumerate()
        .map(|(index, (instruction, state))| PlannerCommand {
            index,
            command: instruction.command.clone(),
            comment: instruction.comment.clone(),
            state: *state,
        })
        .collect();

    PlannerPayload {
        version: PLANNER_VERSION,
        units: "millimeters".to_string(),
        metadata: PlannerMetadata {
            duration_seconds: PLANNER_LOOP_SECONDS,
            source: PLANNER_METADATA_SOURCE.to_string(),
        },
        defaults: PlannerDefaults {
            safe_z_mm: SAFE_Z_MM,
            fabric_plane_z_mm: FABRIC_PLANE_Z_MM,
            travel_feed_rate_mm_min: TRAVEL_FEED_RATE,
            plunge_feed_rate_mm_min: PLUNGE_FEED_RATE,
            yarn_feed_rate_mm_min: YARN_FEED_RATE,
            default_row_height_mm: DEFAULT_ROW_HEIGHT_MM,
            require_home,
            home_state,
        },
        bounds: MotionBounds {
            x_mm: range_of(snapshots.iter().map(|s| s.x_mm)),
            y_mm: range_of(snapshots.iter().map(|s| s.y_mm)),
            z_mm: range_of(snapshots.iter().map(|s| s.z_mm)),
            extrusion_mm: range_of(snapshots.iter().map(|s| s.extrusion_mm)),
        },
        commands,
        machine_profile: machine_profile.cloned(),
    }
}

fn range_of(values: impl Iterator<Item = f64>) -> AxisRange {
    let mut range = AxisRange {
        min: f64::INFINITY,
        max: f64::NEG_INFINITY,
    };
    for value in values {
        range.min = range.min.min(value);
        range.max = range.max.max(value);
    }
    if range.min > range.max {
        return AxisRange { min: 0.0, max: 0.0 };
    }
    range
}
