//! # Stitchkit Core
//!
//! Core types and utilities for Stitchkit.
//! Provides the instruction/state data model, the built-in stitch catalog,
//! motion constants, and the error taxonomy shared by the translator and
//! the machine profile layer.

pub mod constants;
pub mod error;
pub mod homing;
pub mod instruction;
pub mod stitches;

pub use constants::{
    DEFAULT_ROW_HEIGHT_MM, FABRIC_PLANE_Z_MM, MIN_MOVE_COORD_MM, PLANNER_LOOP_SECONDS,
    PLANNER_METADATA_SOURCE, PLANNER_VERSION, PLUNGE_FEED_RATE, SAFE_Z_MM, TRAVEL_FEED_RATE,
    YARN_FEED_RATE,
};
pub use error::{CommandLocation, PatternError, PatternResult};
pub use homing::HomeState;
pub use instruction::{Instruction, MachineState};
pub use stitches::{stitch_definition, StitchDefinition, StitchKind};
