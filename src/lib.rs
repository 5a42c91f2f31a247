//! # Stitchkit
//!
//! Translates a small textual stitch-pattern language into ordered motion
//! and yarn-feed instructions for a fiber-crafting machine.
//!
//! ## Architecture
//!
//! Stitchkit is organized as a workspace with multiple crates:
//!
//! 1. **stitchkit-core** - Instruction/state data model, stitch catalog,
//!    motion constants, error taxonomy
//! 2. **stitchkit-machine** - Machine profiles with axis travel limits,
//!    loaded from JSON or YAML
//! 3. **stitchkit-pattern** - The translator, SVG importer, and output
//!    serializers (instruction text, structured JSON, planner payload)
//! 4. **stitchkit** - The CLI binary that integrates all crates
//!
//! The pattern language is one command per line: `SLIP`/`CHAIN`/`SINGLE`/
//! `DOUBLE` with a repeat count, `MOVE x y`, `PAUSE seconds`, and
//! `TURN [height]`. Blank lines and `#` comments are ignored.

pub use stitchkit_core::{
    CommandLocation, HomeState, Instruction, MachineState, PatternError, PatternResult,
    StitchDefinition, StitchKind,
};
pub use stitchkit_machine::{
    load_machine_profile, AxisProfile, MachineProfile, ProfileError, ProfileResult,
};
pub use stitchkit_pattern::{
    planner_payload, render_structured, render_text, translate_pattern, PatternTranslator,
    PlannerPayload, SvgImporter,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output on stderr, keeping stdout clean for generated programs
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    Ok(())
}
