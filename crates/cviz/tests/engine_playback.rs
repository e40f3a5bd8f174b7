//! End-to-end tests: JSON trace in, animated playback out.

use std::time::Duration;

use cviz::prelude::*;

fn short_durations() -> PhaseDurations {
    PhaseDurations {
        enter: Duration::from_millis(10),
        transform: Duration::from_millis(10),
        exit: Duration::from_millis(10),
        loop_pause: Duration::from_millis(10),
    }
}

fn config(family: Family) -> EngineConfig {
    EngineConfig {
        family,
        durations: short_durations(),
        legacy_text_parsing: true,
    }
}

const PLAYFAIR_TRACE: &str = r#"{
    "steps": [
        {"description": "Matrix Generation", "phase": "Matrix Generation"},
        {"description": "Même ligne: 'A' (0, 0) et 'B' (0, 1)",
         "input_digram": "AB", "output_digram": "BC", "phase": "Encryption"},
        {"description": "Rectangle: 'A' (0, 0) -> 'G' (1, 1)",
         "input_digram": "AG", "output_digram": "BF", "phase": "Encryption"}
    ],
    "input_text": "ABAG",
    "final_result": "BCBF",
    "matrix": [
        ["A", "B", "C", "D", "E"],
        ["F", "G", "H", "I", "K"],
        ["L", "M", "N", "O", "P"],
        ["Q", "R", "S", "T", "U"],
        ["V", "W", "X", "Y", "Z"]
    ]
}"#;

#[test]
fn digraph_trace_builds_frames_with_geometric_rules() {
    let engine = cviz::Engine::from_json(PLAYFAIR_TRACE, config(Family::Digraph)).unwrap();
    // The setup step is structural; two digram steps animate.
    assert_eq!(engine.frames().len(), 2);

    let first = &engine.frames()[0];
    assert_eq!(first.spatial.rule, RuleKind::Row);
    assert_eq!(first.spatial.input_cells, vec![Cell::new(0, 0), Cell::new(0, 1)]);
    assert_eq!(first.plain_prefix, "AB");
    assert_eq!(first.cipher_prefix, "BC");

    let second = &engine.frames()[1];
    assert_eq!(second.spatial.rule, RuleKind::Rectangle);
    assert_eq!(second.plain_prefix, "ABAG");
    assert_eq!(second.cipher_prefix, "BCBF");
}

#[test]
fn empty_trace_never_leaves_idle() {
    let mut engine =
        cviz::Engine::from_json(r#"{"steps": []}"#, config(Family::Substitution)).unwrap();
    assert!(engine.is_idle());
    for _ in 0..50 {
        engine.tick(Duration::from_millis(100));
        assert!(engine.output().is_none());
        assert!(engine.drain_events().is_empty());
    }
}

#[test]
fn keyword_trace_cycles_key_cursor() {
    // 7 renderable steps, key length 3.
    let steps: Vec<String> = "MESSAGE"
        .chars()
        .map(|c| {
            format!(
                r#"{{"description": "sub", "current_char": "{c}", "output_char": "X"}}"#
            )
        })
        .collect();
    let doc = format!(
        r#"{{"steps": [{}], "input_text": "MESSAGE", "keyword": "KEY"}}"#,
        steps.join(",")
    );
    let engine = cviz::Engine::from_json(&doc, config(Family::Keyword)).unwrap();
    let cursors: Vec<&str> = engine
        .frames()
        .iter()
        .map(|f| f.key_cursor.as_str())
        .collect();
    assert_eq!(cursors, vec!["K", "E", "Y", "K", "E", "Y", "K"]);
    // Alphabetic steps whose trace omitted the per-step key char are
    // inconclusive, never classified as pass-through.
    assert!(
        engine
            .frames()
            .iter()
            .all(|f| f.spatial.rule != RuleKind::Ignored)
    );
}

#[test]
fn keyword_step_with_key_char_locates_tableau_cell() {
    let doc = r#"{
        "steps": [
            {"description": "sub", "current_char": "C", "output_char": "D",
             "key_char_used": "B"}
        ],
        "input_text": "C",
        "keyword": "B"
    }"#;
    let engine = cviz::Engine::from_json(doc, config(Family::Keyword)).unwrap();
    // Key row 1 ('B'), plain column 2 ('C').
    assert_eq!(
        engine.frames()[0].spatial.input_cells,
        vec![Cell::new(1, 2)]
    );
}

#[test]
fn replacement_mid_transform_is_atomic() {
    let mut engine = cviz::Engine::from_json(PLAYFAIR_TRACE, config(Family::Digraph)).unwrap();
    // Park mid-transform on frame 1 (10ms enter + 10ms enter/exit math:
    // 35ms lands 5ms into frame 1's transform).
    engine.tick(Duration::from_millis(45));
    assert_eq!(engine.output().unwrap().frame.step.index, 2);
    engine.drain_events();

    // Replace with a single-step substitution trace.
    let replacement = RawTrace::from_json(
        r#"{"steps": [{"description": "sub", "current_char": "Z", "output_char": "Q"}],
            "input_text": "Z"}"#,
    )
    .unwrap();
    engine.replace_trace(replacement);

    let events = engine.drain_events();
    assert!(events.contains(&PlaybackEvent::TraceReplaced));

    // The very next tick renders frame 0 of the new trace; nothing from the
    // old trace is observable.
    engine.tick(Duration::from_millis(1));
    let out = engine.output().unwrap();
    assert_eq!(out.frame.step.index, 0);
    assert_eq!(out.frame.step.current_char, Some('Z'));
    assert_eq!(out.phase, Phase::Entering);
}

#[test]
fn parse_error_frames_still_play_through_all_phases() {
    // One pair where two are required, non-blank digram, no grid: the
    // resolver flags a parse error but playback is unaffected.
    let doc = r#"{
        "steps": [
            {"description": "'A' is at (0,0) but the rest got lost",
             "input_digram": "AQ", "output_digram": "QA", "phase": "Encryption"}
        ],
        "input_text": "AQ"
    }"#;
    let mut engine = cviz::Engine::from_json(doc, config(Family::Digraph)).unwrap();
    assert_eq!(engine.frames()[0].spatial.rule, RuleKind::ParseError);

    let mut phases_seen = Vec::new();
    for _ in 0..6 {
        engine.tick(Duration::from_millis(10));
        if let Some(out) = engine.output() {
            phases_seen.push(out.phase);
        }
    }
    assert!(phases_seen.contains(&Phase::Transforming));
    assert!(phases_seen.contains(&Phase::Exiting));
    // Looped back around: parse-error frames animate like any other.
    assert!(phases_seen.contains(&Phase::Entering));
}

#[test]
fn transposition_trace_uses_structured_positions() {
    let doc = r#"{
        "steps": [
            {"description": "write T", "current_pos": [0, 0], "phase": "Écriture"},
            {"description": "write E", "current_pos": [0, 1], "phase": "Écriture"},
            {"description": "read column 0", "current_pos": [0, 0], "phase": "Lecture"}
        ],
        "input_text": "TE"
    }"#;
    let engine = cviz::Engine::from_json(doc, config(Family::Transposition)).unwrap();
    assert_eq!(engine.frames().len(), 3);
    assert_eq!(engine.frames()[0].spatial.rule, RuleKind::Row);
    assert_eq!(engine.frames()[2].spatial.rule, RuleKind::Column);
    assert_eq!(
        engine.frames()[1].spatial.input_cells,
        vec![Cell::new(0, 1)]
    );
}

#[test]
fn rebuilt_frames_are_identical() {
    let a = cviz::Engine::from_json(PLAYFAIR_TRACE, config(Family::Digraph)).unwrap();
    let b = cviz::Engine::from_json(PLAYFAIR_TRACE, config(Family::Digraph)).unwrap();
    assert_eq!(a.frames(), b.frames());
}
