//! # Stitchkit Pattern
//!
//! The pattern-to-motion compiler: consumes stitch pattern text (or an SVG
//! polyline converted to MOVE commands), drives the per-axis motion and
//! yarn-feed state machine under axis travel enforcement, and serializes the
//! result as instruction text, a structured command list, or a planner
//! payload with computed bounds and metadata.

pub mod output;
pub mod svg_import;
pub mod translator;

pub use output::{
    planner_payload, render_structured, render_text, AxisRange, MotionBounds, PlannerCommand,
    PlannerDefaults, PlannerMetadata, PlannerPayload,
};
pub use svg_import::SvgImporter;
pub use translator::{translate_pattern, PatternTranslator};
