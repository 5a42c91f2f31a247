//! Pattern translation state machine.
//!
//! [`PatternTranslator`] consumes pattern source text line by line and emits
//! a synchronized pair of records per instruction: the instruction itself and
//! a snapshot of machine state after it executes. All motion is validated
//! against the machine profile's travel limits before any state mutates, so
//! a failed translation never hands back a partial sequence.

use tracing::debug;

use stitchkit_core::constants::{
    DEFAULT_ROW_HEIGHT_MM, FABRIC_PLANE_Z_MM, PLUNGE_FEED_RATE, SAFE_Z_MM, TRAVEL_FEED_RATE,
    YARN_FEED_RATE,
};
use stitchkit_core::error::{CommandLocation, PatternError, PatternResult};
use stitchkit_core::instruction::{Instruction, MachineState};
use stitchkit_core::stitches::{stitch_definition, StitchDefinition};
use stitchkit_machine::MachineProfile;

/// Translates pattern lines into motion and yarn-feed instructions.
///
/// The translator is the single owner of all mutable state: cursor position,
/// cumulative extrusion, and the paired instruction/snapshot buffers. Each
/// [`translate`](Self::translate) call fully resets that state, so one
/// instance can be reused across runs; it must not be shared between
/// concurrent translations.
pub struct PatternTranslator {
    machine_profile: Option<MachineProfile>,
    instructions: Vec<Instruction>,
    snapshots: Vec<MachineState>,
    x_mm: f64,
    y_mm: f64,
    z_mm: f64,
    extrusion_mm: f64,
}

impl PatternTranslator {
    /// Creates a translator without travel enforcement.
    pub fn new() -> Self {
        Self {
            machine_profile: None,
            instructions: Vec::new(),
            snapshots: Vec::new(),
            x_mm: 0.0,
            y_mm: 0.0,
            z_mm: SAFE_Z_MM,
            extrusion_mm: 0.0,
        }
    }

    /// Creates a translator that validates every move against `profile`.
    pub fn with_profile(profile: MachineProfile) -> Self {
        Self {
            machine_profile: Some(profile),
            ..Self::new()
        }
    }

    /// Translates a stitch description into motion commands.
    ///
    /// On success returns the full instruction sequence; the paired state
    /// snapshots stay queryable through [`snapshots`](Self::snapshots) until
    /// the next call. On failure nothing is returned and the internal
    /// buffers are reset by the next run.
    pub fn translate(&mut self, source: &str) -> PatternResult<Vec<Instruction>> {
        self.reset_state();
        for (index, raw_line) in source.lines().enumerate() {
            let line_number = index as u32 + 1;
            let stripped = raw_line.trim();
            if stripped.is_empty() || stripped.starts_with('#') {
                continue;
            }
            let mut tokens = stripped.split_whitespace();
            let Some(first) = tokens.next() else {
                continue;
            };
            let command = first.to_uppercase();
            let arguments: Vec<&str> = tokens.collect();

            if let Some(definition) = stitch_definition(&command) {
                let count = parse_positive_count(&arguments, line_number, &command)?;
                self.emit_stitches(definition, count, line_number)?;
            } else {
                match command.as_str() {
                    "MOVE" => self.handle_move(&arguments, line_number)?,
                    "PAUSE" => self.handle_pause(&arguments, line_number)?,
                    "TURN" => self.handle_turn(&arguments, line_number)?,
                    _ => {
                        return Err(PatternError::UnknownCommand {
                            line_number,
                            command,
                        })
                    }
                }
            }
        }
        debug!(instructions = self.instructions.len(), "translated pattern");
        Ok(self.instructions.clone())
    }

    /// State snapshots paired 1:1, in order, with the last run's instructions.
    pub fn snapshots(&self) -> &[MachineState] {
        &self.snapshots
    }

    fn reset_state(&mut self) {
        self.instructions.clear();
        self.snapshots.clear();
        self.x_mm = 0.0;
        self.y_mm = 0.0;
        self.z_mm = SAFE_Z_MM;
        self.extrusion_mm = 0.0;
        self.emit(Instruction::with_comment("G21", "use millimeters"));
        self.emit(Instruction::with_comment("G90", "absolute positioning"));
        self.emit(Instruction::with_comment(
            format!(
                "G92 X{:.2} Y{:.2} Z{:.2} E0",
                self.x_mm, self.y_mm, SAFE_Z_MM
            ),
            "zero axes",
        ));
    }

    fn emit(&mut self, instruction: Instruction) {
        self.instructions.push(instruction);
        self.snapshots.push(MachineState {
            x_mm: self.x_mm,
            y_mm: self.y_mm,
            z_mm: self.z_mm,
            extrusion_mm: self.extrusion_mm,
        });
    }

    fn ensure_within(
        &self,
        axis: &str,
        position_mm: f64,
        location: CommandLocation,
    ) -> PatternResult<()> {
        match &self.machine_profile {
            Some(profile) => profile.ensure_within(axis, position_mm, location),
            None => Ok(()),
        }
    }

    /// Raises the tool to safe height before horizontal travel.
    ///
    /// The raise is a generated command, not tied to a source line.
    fn ensure_safe_height(&mut self) -> PatternResult<()> {
        if self.z_mm != SAFE_Z_MM {
            self.ensure_within("Z", SAFE_Z_MM, CommandLocation::Generated)?;
            self.z_mm = SAFE_Z_MM;
            self.emit(Instruction::with_comment(
                format!("G1 Z{:.2} F{}", SAFE_Z_MM, PLUNGE_FEED_RATE),
                "raise to safe height",
            ));
        }
        Ok(())
    }

    fn emit_stitches(
        &mut self,
        definition: &StitchDefinition,
        count: u32,
        line_number: u32,
    ) -> PatternResult<()> {
        let location = CommandLocation::Line(line_number);
        for index in 1..=count {
            let stitch_label = format!("{} stitch {} of {}", definition.kind.label(), index, count);

            let plunge_z = FABRIC_PLANE_Z_MM - definition.plunge_depth_mm;
            self.ensure_within("Z", plunge_z, location)?;
            self.z_mm = plunge_z;
            self.emit(Instruction::with_comment(
                format!("G1 Z{:.2} F{}", plunge_z, PLUNGE_FEED_RATE),
                format!("{}: plunge", stitch_label),
            ));

            self.extrusion_mm += definition.yarn_feed_mm;
            self.emit(Instruction::with_comment(
                format!("G1 E{:.2} F{}", self.extrusion_mm, YARN_FEED_RATE),
                format!("{}: feed yarn", stitch_label),
            ));

            self.ensure_within("Z", SAFE_Z_MM, location)?;
            self.z_mm = SAFE_Z_MM;
            self.emit(Instruction::with_comment(
                format!("G1 Z{:.2} F{}", SAFE_Z_MM, PLUNGE_FEED_RATE),
                format!("{}: raise", stitch_label),
            ));

            let new_x = self.x_mm + definition.spacing_mm;
            self.ensure_within("X", new_x, location)?;
            self.x_mm = new_x;
            self.emit(Instruction::with_comment(
                format!(
                    "G0 X{:.2} Y{:.2} F{}",
                    self.x_mm, self.y_mm, TRAVEL_FEED_RATE
                ),
                format!("{}: advance", stitch_label),
            ));
        }
        Ok(())
    }

    fn handle_move(&mut self, arguments: &[&str], line_number: u32) -> PatternResult<()> {
        if arguments.len() < 2 {
            return Err(PatternError::MalformedArguments {
                line_number,
                command: "MOVE".to_string(),
                reason: "requires X and Y values".to_string(),
            });
        }
        if arguments.len() > 2 {
            return Err(PatternError::MalformedArguments {
                line_number,
                command: "MOVE".to_string(),
                reason: "accepts exactly two values".to_string(),
            });
        }
        let x_value = parse_finite_float(arguments[0], line_number, "MOVE")?;
        let y_value = parse_finite_float(arguments[1], line_number, "MOVE")?;
        if x_value <= 0.0 || y_value <= 0.0 {
            return Err(PatternError::NonPositiveValue {
                line_number,
                command: "MOVE".to_string(),
                what: "coordinates".to_string(),
            });
        }
        self.ensure_safe_height()?;
        let location = CommandLocation::Line(line_number);
        self.ensure_within("X", x_value, location)?;
        self.ensure_within("Y", y_value, location)?;
        self.x_mm = x_value;
        self.y_mm = y_value;
        self.emit(Instruction::with_comment(
            format!(
                "G0 X{:.2} Y{:.2} F{}",
                self.x_mm, self.y_mm, TRAVEL_FEED_RATE
            ),
            "reposition",
        ));
        Ok(())
    }

    fn handle_pause(&mut self, arguments: &[&str], line_number: u32) -> PatternResult<()> {
        if arguments.len() != 1 {
            return Err(PatternError::MalformedArguments {
                line_number,
                command: "PAUSE".to_string(),
                reason: "requires exactly one value".to_string(),
            });
        }
        let seconds = parse_finite_float(arguments[0], line_number, "PAUSE")?;
        if seconds <= 0.0 {
            return Err(PatternError::NonPositiveValue {
                line_number,
                command: "PAUSE".to_string(),
                what: "duration".to_string(),
            });
        }
        let milliseconds = (seconds * 1000.0).round_ties_even() as i64;
        self.emit(Instruction::with_comment(
            format!("G4 P{}", milliseconds),
            format!("pause for {:.3} s", seconds),
        ));
        Ok(())
    }

    fn handle_turn(&mut self, arguments: &[&str], line_number: u32) -> PatternResult<()> {
        if arguments.len() > 1 {
            return Err(PatternError::MalformedArguments {
                line_number,
                command: "TURN".to_string(),
                reason: "accepts at most one value".to_string(),
            });
        }
        let step = match arguments.first() {
            Some(value) => parse_finite_float(value, line_number, "TURN")?,
            None => DEFAULT_ROW_HEIGHT_MM,
        };
        if step <= 0.0 {
            return Err(PatternError::NonPositiveValue {
                line_number,
                command: "TURN".to_string(),
                what: "row height".to_string(),
            });
        }
        self.ensure_safe_height()?;
        let location = CommandLocation::Line(line_number);
        self.ensure_within("X", 0.0, location)?;
        self.x_mm = 0.0;
        let new_y = self.y_mm + step;
        self.ensure_within("Y", new_y, location)?;
        self.y_mm = new_y;
        self.emit(Instruction::with_comment(
            format!(
                "G0 X{:.2} Y{:.2} F{}",
                self.x_mm, self.y_mm, TRAVEL_FEED_RATE
            ),
            "turn to next row",
        ));
        Ok(())
    }
}

impl Default for PatternTranslator {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience wrapper running a single translation.
pub fn translate_pattern(
    source: &str,
    machine_profile: Option<MachineProfile>,
) -> PatternResult<Vec<Instruction>> {
    let mut translator = match machine_profile {
        Some(profile) => PatternTranslator::with_profile(profile),
        None => PatternTranslator::new(),
    };
    translator.translate(source)
}

fn parse_positive_count(arguments: &[&str], line_number: u32, command: &str) -> PatternResult<u32> {
    let raw = arguments.first().ok_or_else(|| PatternError::MalformedArguments {
        line_number,
        command: command.to_string(),
        reason: "requires a count".to_string(),
    })?;
    let count: i64 = raw.parse().map_err(|_| PatternError::MalformedArguments {
        line_number,
        command: command.to_string(),
        reason: "requires an integer count".to_string(),
    })?;
    if count <= 0 {
        return Err(PatternError::NonPositiveValue {
            line_number,
            command: command.to_string(),
            what: "count".to_string(),
        });
    }
    u32::try_from(count).map_err(|_| PatternError::MalformedArguments {
        line_number,
        command: command.to_string(),
        reason: "requires an integer count".to_string(),
    })
}

fn parse_finite_float(value: &str, line_number: u32, command: &str) -> PatternResult<f64> {
    let number: f64 = value.parse().map_err(|_| PatternError::MalformedArguments {
        line_number,
        command: command.to_string(),
        reason: "expects numeric values".to_string(),
    })?;
    if !number.is_finite() {
        return Err(PatternError::MalformedArguments {
            line_number,
            command: command.to_string(),
            reason: "expects finite values".to_string(),
        });
    }
    Ok(number)
}
