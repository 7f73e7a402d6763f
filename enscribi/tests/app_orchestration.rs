// enscribi/tests/app_orchestration.rs
//
// Integration tests for the keyboard orchestrator on headless collaborators.
//
// Tests cover:
// - Construction: layout, slots swallowed into input parts, window setup
// - Confirmed selections and layout keys reaching the host
// - Flush-all on the send key
// - Keyboard mode requests from the window manager
// - Relayout on resize and ordered shutdown

use enscribi::{App, AppConfig, AppEvent};
use enscribi_core::headless::{HeadlessHost, HeadlessSurface, StrokeCountRecognizer};
use enscribi_core::{
    ClientMessage, Dispatch, Geometry, KeyboardMode, Message, Recognizer, Signal, Stroke,
    WindowHost, WindowId, WindowState,
};
use std::cell::RefCell;
use std::rc::Rc;

struct Keyboard {
    app: App<HeadlessHost>,
    surface: HeadlessSurface,
    host: Rc<RefCell<HeadlessHost>>,
}

fn keyboard_with(config: AppConfig) -> Keyboard {
    let mut surface = HeadlessSurface::with_keyboard_theme(
        &config.base.input_group,
        &config.layout_group,
        config.slot_count,
    );
    let host = Rc::new(RefCell::new(HeadlessHost::default()));
    let app = App::new(
        config,
        &mut surface,
        Rc::clone(&host),
        Rc::new(StrokeCountRecognizer::default()),
    )
    .unwrap();
    Keyboard { app, surface, host }
}

fn keyboard() -> Keyboard {
    keyboard_with(AppConfig::default())
}

impl Keyboard {
    fn pick(&mut self, slot: usize, text: &str) {
        self.surface.renderers_of("enscribi/input")[slot].set_text("result", text);
        self.app.dispatch(AppEvent::Slot {
            slot,
            signal: Signal::ResultFinished,
        });
    }

    fn pressed(&self) -> Vec<String> {
        self.host.borrow().pressed().to_vec()
    }

    fn layout_results(&self) -> Vec<Message> {
        self.surface.renderers_of("enscribi/kbd")[0]
            .messages()
            .into_iter()
            .filter(|(id, _)| *id == 188)
            .map(|(_, m)| m)
            .collect()
    }

    fn state_message(&self, payload: &str) -> ClientMessage {
        let mut host = self.host.borrow_mut();
        ClientMessage {
            window: host.window_id(),
            message_type: host.intern_atom("_E_VIRTUAL_KEYBOARD_STATE"),
            payload: host.intern_atom(payload).0,
        }
    }
}

#[test]
fn test_new_builds_layout_and_slots() {
    let k = keyboard();
    assert_eq!(k.app.slots().len(), 3);
    assert!(k.app.slots().iter().all(|s| s.is_valid() && s.has_parent()));

    let layout = &k.surface.renderers_of("enscribi/kbd")[0];
    assert_eq!(
        layout.state.borrow().swallowed,
        vec!["input/1", "input/2", "input/3"]
    );
    assert_eq!(layout.visual.borrow().geometry, Geometry::new(0, 0, 480, 160));
    assert!(layout.visual.borrow().visible);

    for canvas in k.surface.canvases() {
        assert_eq!(canvas.recognizer().as_deref(), Some("stroke-count"));
    }
}

#[test]
fn test_window_is_configured_once() {
    let k = keyboard();
    let host = k.host.borrow();
    let setup = host.setup().unwrap();
    assert_eq!(setup.title, "Virtual Keyboard");
    assert_eq!(setup.class, "Virtual-Keyboard");
    assert_eq!((setup.width, setup.height), (480, 160));
    assert_eq!(setup.states, vec![WindowState::SkipTaskbar, WindowState::SkipPager]);
    assert!(setup.virtual_keyboard);
    assert!(host.atom("_E_VIRTUAL_KEYBOARD_STATE").is_some());
}

#[test]
fn test_slots_are_laid_out_in_columns() {
    let k = keyboard();
    let geometries: Vec<Geometry> = k.app.slots().iter().map(|s| s.geometry()).collect();
    assert_eq!(
        geometries,
        vec![
            Geometry::new(0, 0, 160, 160),
            Geometry::new(160, 0, 160, 160),
            Geometry::new(320, 0, 160, 160),
        ]
    );
    assert!(k.app.slots().iter().all(|s| s.is_visible()));
}

#[test]
fn test_selection_scenario() {
    let mut k = keyboard();
    k.pick(0, "A");
    k.pick(1, "水");
    assert_eq!(k.pressed(), vec!["A", "U6C34"]);
    assert_eq!(
        k.layout_results(),
        vec![
            Message::String("A".to_string()),
            Message::String("水".to_string())
        ]
    );
}

#[test]
fn test_latin1_selection_uses_key_name() {
    let mut k = keyboard();
    k.pick(2, "é");
    k.pick(2, " ");
    assert_eq!(k.pressed(), vec!["eacute", "space"]);
}

#[test]
fn test_layout_key_is_pressed_literally() {
    let mut k = keyboard();
    k.app
        .dispatch(AppEvent::Layout(Signal::KeyPressed("BackSpace".to_string())));
    assert_eq!(k.pressed(), vec!["BackSpace"]);
    assert!(k.layout_results().is_empty());
}

#[test]
fn test_send_key_flushes_every_slot() {
    let mut k = keyboard();
    let inputs = k.surface.renderers_of("enscribi/input");
    inputs[0].set_text("result", "木");
    inputs[2].set_text("result", "火");

    k.app.dispatch(AppEvent::Layout(Signal::ResultSend));

    assert_eq!(k.pressed(), vec!["U6728", "U706B"]);
    assert_eq!(k.layout_results().len(), 2);
    assert!(inputs.iter().all(|r| r.text("result").as_deref() == Some("")));

    // nothing left to send
    assert!(k.app.flush_all().is_empty());
}

#[test]
fn test_strokes_reach_the_slot_canvas() {
    let mut k = keyboard();
    for _ in 0..4 {
        k.app.dispatch(AppEvent::Stroke {
            slot: 1,
            stroke: Stroke::new(vec![(0, 0), (5, 5)]),
        });
    }
    assert_eq!(k.surface.canvases()[1].state.borrow().strokes.len(), 4);
    assert!(k.surface.canvases()[0].state.borrow().strokes.is_empty());

    let messages = k.surface.renderers_of("enscribi/input")[1].messages();
    match &messages.last().unwrap().1 {
        Message::IntSet(cps) => assert_eq!(cps[0], '水' as i32),
        other => panic!("expected code point row, got {:?}", other),
    }
}

#[test]
fn test_unknown_slot_is_ignored() {
    let mut k = keyboard();
    k.app.dispatch(AppEvent::Slot {
        slot: 7,
        signal: Signal::ResultFinished,
    });
    k.app.dispatch(AppEvent::Stroke {
        slot: 7,
        stroke: Stroke::default(),
    });
    assert!(k.pressed().is_empty());
}

#[test]
fn test_mode_requests_are_reported() {
    let mut k = keyboard();
    let modes = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&modes);
    k.app.subscribe_modes(move |mode| sink.borrow_mut().push(*mode));

    let numeric = k.state_message("_E_VIRTUAL_KEYBOARD_NUMERIC");
    assert_eq!(
        k.app.on_client_message(&numeric),
        Dispatch::Handled(KeyboardMode::Numeric)
    );
    let off = k.state_message("_E_VIRTUAL_KEYBOARD_OFF");
    k.app.dispatch(AppEvent::ClientMessage(off));
    let odd = k.state_message("_SOMETHING_ELSE");
    k.app.dispatch(AppEvent::ClientMessage(odd));

    assert_eq!(
        *modes.borrow(),
        vec![KeyboardMode::Numeric, KeyboardMode::Off, KeyboardMode::Unknown]
    );
}

#[test]
fn test_other_window_is_not_handled() {
    let mut k = keyboard();
    let mut msg = k.state_message("_E_VIRTUAL_KEYBOARD_ALPHA");
    msg.window = WindowId(msg.window.0 + 1);
    assert_eq!(k.app.on_client_message(&msg), Dispatch::NotHandled);
}

#[test]
fn test_resize_relayouts_slots() {
    let mut k = keyboard();
    k.app.dispatch(AppEvent::Resized {
        width: 600,
        height: 200,
    });
    let layout = &k.surface.renderers_of("enscribi/kbd")[0];
    assert_eq!(layout.visual.borrow().geometry, Geometry::new(0, 0, 600, 200));
    assert_eq!(k.app.slots()[2].geometry(), Geometry::new(400, 0, 200, 200));
    assert_eq!(
        k.surface.canvases()[2].visual.borrow().geometry,
        Geometry::new(400, 0, 200, 200)
    );
}

#[test]
fn test_zero_slots_rejected() {
    let config = AppConfig {
        slot_count: 0,
        ..AppConfig::default()
    };
    let mut surface = HeadlessSurface::with_keyboard_theme("enscribi/input", "enscribi/kbd", 1);
    let host = Rc::new(RefCell::new(HeadlessHost::default()));
    let result = App::new(
        config,
        &mut surface,
        host,
        Rc::new(StrokeCountRecognizer::default()),
    );
    assert!(result.is_err());
    assert!(surface.renderers().is_empty());
}

#[test]
fn test_missing_input_part_fails_construction() {
    let config = AppConfig {
        slot_count: 4,
        ..AppConfig::default()
    };
    // the layout only has room for three inputs
    let mut surface = HeadlessSurface::with_keyboard_theme("enscribi/input", "enscribi/kbd", 3);
    let host = Rc::new(RefCell::new(HeadlessHost::default()));
    let result = App::new(
        config,
        &mut surface,
        Rc::clone(&host),
        Rc::new(StrokeCountRecognizer::default()),
    );
    assert!(result.is_err());
    assert!(surface.canvases().iter().all(|c| c.visual.borrow().released));
    assert!(host.borrow().setup().is_none());
}

#[test]
fn test_shutdown_releases_slots_then_recognizer() {
    let config = AppConfig::default();
    let mut surface = HeadlessSurface::with_keyboard_theme(
        &config.base.input_group,
        &config.layout_group,
        config.slot_count,
    );
    let host = Rc::new(RefCell::new(HeadlessHost::default()));
    let recognizer: Rc<dyn Recognizer> = Rc::new(StrokeCountRecognizer::default());
    let weak = Rc::downgrade(&recognizer);
    let app = App::new(config, &mut surface, host, recognizer).unwrap();

    app.shutdown();

    assert!(weak.upgrade().is_none());
    assert!(surface.clips().iter().all(|c| c.borrow().released));
    assert!(surface
        .canvases()
        .iter()
        .all(|c| c.visual.borrow().released));
}
