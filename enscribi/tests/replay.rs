// enscribi/tests/replay.rs
//
// Integration tests for scripted sessions.
//
// Tests cover:
// - Script parsing, including unit and defaulted steps
// - A full session: candidates, picks, keys, send and mode requests
// - Steps addressed to unknown slots or carrying unknown signals

use enscribi::{AppConfig, Script, Session, Step};
use enscribi_core::{KeyboardMode, Message, Stroke};

const SESSION: &str = r#"[
    { "candidates": { "slot": 0, "texts": ["水", "木", "火"] } },
    { "pick": { "slot": 0, "text": "水" } },
    { "key": { "name": "BackSpace" } },
    { "pick": { "slot": 1, "text": "A" } },
    { "client_message": { "message_type": "_E_VIRTUAL_KEYBOARD_STATE",
                          "payload": "_E_VIRTUAL_KEYBOARD_NUMERIC" } },
    { "client_message": { "to_self": false,
                          "message_type": "_E_VIRTUAL_KEYBOARD_STATE",
                          "payload": "_E_VIRTUAL_KEYBOARD_OFF" } },
    "send"
]"#;

#[test]
fn test_parse_script() {
    let script = Script::from_json(SESSION).unwrap();
    assert_eq!(script.steps.len(), 7);
    assert_eq!(script.steps[6], Step::Send);
    assert_eq!(
        script.steps[4],
        Step::ClientMessage {
            to_self: true,
            message_type: "_E_VIRTUAL_KEYBOARD_STATE".to_string(),
            payload: "_E_VIRTUAL_KEYBOARD_NUMERIC".to_string(),
        }
    );
}

#[test]
fn test_parse_strokes_and_signal() {
    let script = Script::from_json(
        r#"[
            { "strokes": { "slot": 2, "strokes": [[[0, 0], [4, 4]]] } },
            { "signal": { "emission": "result,finished", "source": "result", "slot": 2 } }
        ]"#,
    )
    .unwrap();
    assert_eq!(
        script.steps[0],
        Step::Strokes {
            slot: 2,
            strokes: vec![Stroke::new(vec![(0, 0), (4, 4)])],
        }
    );
    assert!(matches!(script.steps[1], Step::Signal { slot: Some(2), .. }));
}

#[test]
fn test_invalid_script_is_an_error() {
    assert!(Script::from_json(r#"[{ "wave": {} }]"#).is_err());
    assert!(Script::from_json("{}").is_err());
}

#[test]
fn test_replay_session() {
    let mut session = Session::new(AppConfig::default()).unwrap();
    let report = session.replay(Script::from_json(SESSION).unwrap());

    assert_eq!(report.keys, vec!["U6C34", "BackSpace", "A"]);
    assert_eq!(report.modes, vec![KeyboardMode::Numeric]);
    assert_eq!(report.results, vec!["水", "A"]);

    let first_slot = &session.surface().renderers_of("enscribi/input")[0];
    assert_eq!(
        first_slot.messages()[1],
        (1, Message::IntSet(vec![27700, 26408, 28779, 0, 0, 0, 0, 0, 0]))
    );
}

#[test]
fn test_send_step_flushes_pending_results() {
    let mut session = Session::new(AppConfig::default()).unwrap();
    session
        .surface()
        .renderers_of("enscribi/input")[2]
        .set_text("result", "火");
    let report = session.replay(Script {
        steps: vec![Step::Send],
    });
    assert_eq!(report.keys, vec!["U706B"]);
    assert_eq!(report.results, vec!["火"]);
}

#[test]
fn test_strokes_then_finish() {
    let mut session = Session::new(AppConfig::default()).unwrap();
    let stroke = Stroke::new(vec![(0, 0), (10, 0)]);
    session.apply(Step::Strokes {
        slot: 0,
        strokes: vec![stroke.clone(), stroke.clone(), stroke],
    });
    let messages = session.surface().renderers_of("enscribi/input")[0].messages();
    assert_eq!(messages.len(), 6);

    // the theme has not picked anything yet
    session.apply(Step::Finish { slot: 0 });
    assert!(session.report().keys.is_empty());
}

#[test]
fn test_unknown_slot_and_signal_are_skipped() {
    let mut session = Session::new(AppConfig::default()).unwrap();
    let report = session.replay(Script {
        steps: vec![
            Step::Candidates {
                slot: 9,
                texts: vec!["口".to_string()],
            },
            Step::Pick {
                slot: 9,
                text: "口".to_string(),
            },
            Step::Signal {
                emission: "nothing".to_string(),
                source: "here".to_string(),
                slot: None,
            },
            Step::Signal {
                emission: "key,pressed".to_string(),
                source: "Return".to_string(),
                slot: None,
            },
        ],
    });
    assert_eq!(report.keys, vec!["Return"]);
    assert!(report.results.is_empty());
}

#[test]
fn test_resize_step() {
    let mut session = Session::new(AppConfig::default()).unwrap();
    session.apply(Step::Resize {
        width: 300,
        height: 100,
    });
    let slot = &session.app().slots()[1];
    assert_eq!(slot.geometry().x, 100);
    assert_eq!(slot.geometry().width, 100);
}
