//! End-to-end translation tests covering the full instruction sequences.

use stitchkit_core::error::PatternError;
use stitchkit_core::homing::HomeState;
use stitchkit_machine::{AxisProfile, MachineProfile};
use stitchkit_pattern::{planner_payload, render_text, PatternTranslator};

fn axis(name: &str, min: f64, max: f64) -> AxisProfile {
    AxisProfile {
        name: name.to_string(),
        microstepping: 16,
        steps_per_mm: if name == "Z" { 400.0 } else { 80.0 },
        travel_min_mm: min,
        travel_max_mm: max,
    }
}

fn sample_profile(x_max: f64, y_max: f64, z_min: f64, z_max: f64) -> MachineProfile {
    MachineProfile::new([
        axis("X", 0.0, x_max),
        axis("Y", 0.0, y_max),
        axis("Z", z_min, z_max),
    ])
}

fn as_text(instructions: &[stitchkit_core::Instruction]) -> Vec<String> {
    instructions.iter().map(|i| i.as_text()).collect()
}

#[test]
fn translates_basic_pattern() {
    let pattern = "CHAIN 2\nPAUSE 0.5\nMOVE 10 5\nTURN 6\nSINGLE 1";
    let mut translator = PatternTranslator::new();
    let text = as_text(&translator.translate(pattern).unwrap());

    assert_eq!(
        &text[..3],
        [
            "G21 ; use millimeters",
            "G90 ; absolute positioning",
            "G92 X0.00 Y0.00 Z4.00 E0 ; zero axes",
        ]
    );
    assert_eq!(text[3], "G1 Z-1.50 F600 ; chain stitch 1 of 2: plunge");
    assert_eq!(text[4], "G1 E0.50 F300 ; chain stitch 1 of 2: feed yarn");
    assert_eq!(text[5], "G1 Z4.00 F600 ; chain stitch 1 of 2: raise");
    assert_eq!(text[6], "G0 X5.00 Y0.00 F1200 ; chain stitch 1 of 2: advance");
    assert_eq!(text[7], "G1 Z-1.50 F600 ; chain stitch 2 of 2: plunge");
    assert_eq!(text[10], "G0 X10.00 Y0.00 F1200 ; chain stitch 2 of 2: advance");
    assert!(text.contains(&"G4 P500 ; pause for 0.500 s".to_string()));
    assert!(text.contains(&"G0 X10.00 Y5.00 F1200 ; reposition".to_string()));

    let turn_index = text
        .iter()
        .position(|line| line == "G0 X0.00 Y11.00 F1200 ; turn to next row")
        .unwrap();
    assert_eq!(
        text[turn_index + 1],
        "G1 Z-2.00 F600 ; single stitch 1 of 1: plunge"
    );
    assert_eq!(
        text.last().unwrap(),
        "G0 X4.50 Y11.00 F1200 ; single stitch 1 of 1: advance"
    );
}

#[test]
fn snapshots_pair_with_instructions() {
    let mut translator = PatternTranslator::new();
    let instructions = translator.translate("CHAIN 1").unwrap();

    let snapshots = translator.snapshots();
    assert_eq!(snapshots.len(), instructions.len());
    assert_eq!(instructions[0].command, "G21");
    let last = snapshots.last().unwrap();
    assert!(instructions.last().unwrap().command.starts_with("G0 X5.00"));
    assert_eq!(last.x_mm, 5.0);
    assert_eq!(last.y_mm, 0.0);
    assert_eq!(last.z_mm, 4.0);
    assert_eq!(last.extrusion_mm, 0.5);
}

#[test]
fn ignores_comments_and_blank_lines() {
    let pattern = "# heading\n\n   \nSLIP 1\n  # trailing note\n";
    let mut translator = PatternTranslator::new();
    let instructions = translator.translate(pattern).unwrap();
    assert_eq!(instructions.len(), 3 + 4);
}

#[test]
fn keywords_are_case_insensitive() {
    let mut translator = PatternTranslator::new();
    let lower = as_text(&translator.translate("chain 1\nmove 10 5\nturn").unwrap());
    let upper = as_text(&translator.translate("CHAIN 1\nMOVE 10 5\nTURN").unwrap());
    assert_eq!(lower, upper);
}

#[test]
fn move_then_stitch_advances_from_new_position() {
    let mut translator = PatternTranslator::new();
    translator.translate("MOVE 10 5\nSINGLE 1").unwrap();
    let last = translator.snapshots().last().unwrap();
    assert_eq!(last.x_mm, 14.5);
    assert_eq!(last.y_mm, 5.0);
}

#[test]
fn turn_without_argument_uses_default_height() {
    let mut translator = PatternTranslator::new();
    let text = as_text(&translator.translate("TURN").unwrap());
    assert_eq!(
        text.last().unwrap(),
        "G0 X0.00 Y6.00 F1200 ; turn to next row"
    );
}

#[test]
fn respects_x_axis_limit() {
    let mut translator = PatternTranslator::with_profile(sample_profile(9.0, 120.0, -10.0, 15.0));
    let err = translator.translate("CHAIN 2").unwrap_err();
    match &err {
        PatternError::AxisOutOfRange { axis, position_mm, .. } => {
            assert_eq!(axis, "X");
            assert_eq!(*position_mm, 10.0);
        }
        other => panic!("expected AxisOutOfRange, got {:?}", other),
    }
    assert!(err.to_string().contains("Axis X"));
}

#[test]
fn respects_z_axis_limit() {
    let mut translator = PatternTranslator::with_profile(sample_profile(120.0, 120.0, -1.0, 15.0));
    let err = translator.translate("SINGLE 1").unwrap_err();
    assert!(matches!(err, PatternError::AxisOutOfRange { ref axis, .. } if axis == "Z"));
}

#[test]
fn stitches_pass_within_limits() {
    let mut translator = PatternTranslator::with_profile(sample_profile(120.0, 120.0, -10.0, 15.0));
    let instructions = translator.translate("CHAIN 2\nTURN\nSINGLE 1").unwrap();
    assert!(!instructions.is_empty());
}

#[test]
fn rejects_malformed_arguments() {
    let cases = [
        "MOVE 10",
        "MOVE 10 5 1",
        "MOVE ten 5",
        "MOVE nan 5",
        "MOVE inf 5",
        "PAUSE",
        "PAUSE 1 2",
        "PAUSE soon",
        "TURN 5 5",
        "TURN tall",
        "CHAIN",
        "CHAIN 1.5",
    ];
    for pattern in cases {
        let mut translator = PatternTranslator::new();
        let err = translator.translate(pattern).unwrap_err();
        assert!(
            matches!(err, PatternError::MalformedArguments { .. }),
            "{:?} for {:?}",
            err,
            pattern
        );
    }
}

#[test]
fn rejects_non_positive_values() {
    let cases = ["MOVE 0 5", "MOVE 10 -2", "PAUSE 0", "PAUSE -1", "TURN 0", "CHAIN 0", "SLIP -3"];
    for pattern in cases {
        let mut translator = PatternTranslator::new();
        let err = translator.translate(pattern).unwrap_err();
        assert!(
            matches!(err, PatternError::NonPositiveValue { .. }),
            "{:?} for {:?}",
            err,
            pattern
        );
    }
}

#[test]
fn unknown_command_names_the_line() {
    let mut translator = PatternTranslator::new();
    let err = translator.translate("CHAIN 1\nWEAVE 2").unwrap_err();
    assert_eq!(err.to_string(), "Unknown command 'WEAVE' on line 2");
}

#[test]
fn reruns_produce_independent_results() {
    let mut translator = PatternTranslator::new();
    let first = translator.translate("CHAIN 3").unwrap();
    let first_snapshots = translator.snapshots().to_vec();

    let second = translator.translate("MOVE 2 2").unwrap();
    assert_ne!(first.len(), second.len());
    assert_eq!(translator.snapshots().len(), second.len());

    // The first run's data must not leak into the second.
    let rerun_first = translator.translate("CHAIN 3").unwrap();
    assert_eq!(rerun_first, first);
    assert_eq!(translator.snapshots(), &first_snapshots[..]);
}

#[test]
fn planner_payload_embeds_machine_profile_sorted() {
    let profile = sample_profile(120.0, 120.0, -10.0, 15.0);
    let mut translator = PatternTranslator::with_profile(profile.clone());
    let instructions = translator.translate("CHAIN 1").unwrap();

    let payload = planner_payload(
        &instructions,
        translator.snapshots(),
        Some(&profile),
        false,
        HomeState::Unknown,
    );
    let embedded = payload.machine_profile.as_ref().unwrap();
    let names: Vec<&str> = embedded.axes.keys().map(String::as_str).collect();
    assert_eq!(names, ["X", "Y", "Z"]);

    let json = serde_json::to_string_pretty(&payload).unwrap();
    assert!(json.contains(r#""machine_profile""#));
    assert!(json.contains(r#""microstepping": 16"#));
    assert!(json.contains(r#""steps_per_mm": 400.0"#));
}

#[test]
fn text_output_matches_instruction_sequence() {
    let mut translator = PatternTranslator::new();
    let instructions = translator.translate("SLIP 1").unwrap();
    let text = render_text(&instructions);
    assert!(text.starts_with("G21 ; use millimeters\n"));
    assert!(text.ends_with("G0 X3.50 Y0.00 F1200 ; slip stitch 1 of 1: advance\n"));
}
