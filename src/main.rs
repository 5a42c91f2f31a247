use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};

use stitchkit::{
    init_logging, load_machine_profile, planner_payload, render_structured, render_text,
    HomeState, MachineProfile, PatternTranslator, SvgImporter,
};

#[derive(Parser, Debug)]
#[command(
    name = "stitchkit",
    version,
    about = "Translate a crochet pattern into G-code-like instructions"
)]
struct Cli {
    /// Path to a pattern file (defaults to stdin)
    pattern: Option<PathBuf>,

    /// Inline pattern text; overrides the positional file if provided
    #[arg(long)]
    text: Option<String>,

    /// Path to an SVG polyline or polygon to convert into MOVE commands
    #[arg(long)]
    svg: Option<PathBuf>,

    /// Scale factor applied to SVG coordinates before conversion
    #[arg(long, default_value_t = 1.0)]
    svg_scale: f64,

    /// X offset (mm) applied after scaling SVG coordinates
    #[arg(long, default_value_t = 0.0)]
    svg_offset_x: f64,

    /// Y offset (mm) applied after scaling SVG coordinates
    #[arg(long, default_value_t = 0.0)]
    svg_offset_y: f64,

    /// Optional file to write output; defaults to stdout
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Gcode)]
    format: OutputFormat,

    /// Path to a JSON or YAML machine profile containing axis limits;
    /// generated moves are checked against those limits
    #[arg(long)]
    machine_profile: Option<PathBuf>,

    /// Reported homing state of the motion system
    #[arg(long, default_value = "unknown", value_parser = parse_home_state)]
    home_state: HomeState,

    /// Abort translation if the reported homing state is not 'homed'
    #[arg(long)]
    require_home: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    /// Instruction text, one command per line
    Gcode,
    /// Structured command list as JSON
    Json,
    /// Planner payload with bounds and metadata
    Planner,
}

fn parse_home_state(value: &str) -> Result<HomeState, String> {
    HomeState::from_str(value)
}

fn main() -> ExitCode {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run() -> anyhow::Result<()> {
    init_logging()?;
    let cli = Cli::parse();

    let pattern_text = load_pattern(&cli)?;

    let machine_profile: Option<MachineProfile> = cli
        .machine_profile
        .as_deref()
        .map(load_machine_profile)
        .transpose()?;

    if cli.require_home && cli.home_state != HomeState::Homed {
        bail!(
            "Refusing to generate motion: home state is '{}' (expected 'homed'). \
             Run the machine homing sequence or omit --require-home.",
            cli.home_state
        );
    }

    let mut translator = match machine_profile.clone() {
        Some(profile) => PatternTranslator::with_profile(profile),
        None => PatternTranslator::new(),
    };
    let instructions = translator.translate(&pattern_text)?;

    let rendered = match cli.format {
        OutputFormat::Gcode => render_text(&instructions),
        OutputFormat::Json => render_structured(&instructions)?,
        OutputFormat::Planner => {
            let payload = planner_payload(
                &instructions,
                translator.snapshots(),
                machine_profile.as_ref(),
                cli.require_home,
                cli.home_state,
            );
            serde_json::to_string_pretty(&payload)?
        }
    };

    match &cli.output {
        Some(path) => fs::write(path, rendered)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => print!("{rendered}"),
    }
    Ok(())
}

/// Resolves the pattern source from the mutually exclusive inputs:
/// inline text, an SVG file, a pattern file, or stdin.
fn load_pattern(cli: &Cli) -> anyhow::Result<String> {
    if cli.svg.is_some() && (cli.text.is_some() || cli.pattern.is_some()) {
        bail!("Provide SVG input without additional pattern text or files");
    }
    if let Some(text) = &cli.text {
        return Ok(text.clone());
    }
    if let Some(svg_path) = &cli.svg {
        let svg = fs::read_to_string(svg_path)
            .with_context(|| format!("failed to read {}", svg_path.display()))?;
        let importer = SvgImporter::new(cli.svg_scale, cli.svg_offset_x, cli.svg_offset_y);
        return Ok(importer.pattern_from_svg(&svg)?);
    }
    if let Some(path) = &cli.pattern {
        return fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()));
    }
    let mut source = String::new();
    std::io::stdin()
        .read_to_string(&mut source)
        .context("failed to read pattern from stdin")?;
    Ok(source)
}
