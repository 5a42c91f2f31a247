//! Motion and planner constants.
//!
//! All distances are millimeters; feed rates are millimeters per minute.

/// Z height the tool retreats to between stitches and before horizontal travel.
pub const SAFE_Z_MM: f64 = 4.0;

/// Nominal Z of the working surface. Stitches plunge below it.
pub const FABRIC_PLANE_Z_MM: f64 = 0.0;

/// Feed rate for horizontal travel moves.
pub const TRAVEL_FEED_RATE: u32 = 1200;

/// Feed rate for plunge and raise moves.
pub const PLUNGE_FEED_RATE: u32 = 600;

/// Feed rate for yarn feed moves.
pub const YARN_FEED_RATE: u32 = 300;

/// Row height applied by TURN when no argument is given.
pub const DEFAULT_ROW_HEIGHT_MM: f64 = 6.0;

/// Smallest coordinate accepted by MOVE; SVG imports are shifted so every
/// point clears it.
pub const MIN_MOVE_COORD_MM: f64 = 1e-3;

/// Schema version of the planner payload.
pub const PLANNER_VERSION: u32 = 1;

/// Loop duration reported in planner metadata for replay tooling.
pub const PLANNER_LOOP_SECONDS: f64 = 14.0;

/// Source tag reported in planner metadata.
pub const PLANNER_METADATA_SOURCE: &str = "stitchkit pattern preview";
