//! # Stitchkit Machine
//!
//! Machine profile management for Stitchkit: axis definitions with travel
//! limits, loaded from JSON or YAML, consulted (never mutated) by the
//! pattern translator to keep generated motion inside the working envelope.

pub mod error;
pub mod loader;
pub mod model;

pub use error::{ProfileError, ProfileResult};
pub use loader::load_machine_profile;
pub use model::{AxisProfile, MachineProfile};
