//! Replayable keyboard sessions.
//!
//! A script is a JSON list of steps. Each step stands for something a user,
//! a theme or the window manager would do, and turns into one or more
//! [`AppEvent`]s on a headless keyboard:
//!
//! ```json
//! [
//!   { "candidates": { "slot": 0, "texts": ["水", "木", "火"] } },
//!   { "pick": { "slot": 0, "text": "水" } },
//!   { "key": { "name": "BackSpace" } },
//!   "send",
//!   { "client_message": { "message_type": "_E_VIRTUAL_KEYBOARD_STATE",
//!                         "payload": "_E_VIRTUAL_KEYBOARD_NUMERIC" } }
//! ]
//! ```

use crate::app::{App, AppEvent};
use crate::config::AppConfig;
use anyhow::{Context, Result};
use enscribi_core::headless::{HeadlessHost, HeadlessSurface, StrokeCountRecognizer};
use enscribi_core::renderer::PART_RESULT;
use enscribi_core::{ClientMessage, KeyboardMode, Message, Signal, Stroke, WindowHost, WindowId};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;
use tracing::warn;

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// The recognizer of `slot` reports `texts`.
    Candidates { slot: usize, texts: Vec<String> },
    /// Ink drawn on `slot`, one stroke at a time.
    Strokes { slot: usize, strokes: Vec<Stroke> },
    /// The user taps `text` in the candidate row of `slot`.
    Pick { slot: usize, text: String },
    /// The theme of `slot` raises "result finished" on its own.
    Finish { slot: usize },
    /// A literal key of the layout is pressed.
    Key { name: String },
    /// The layout's send key is pressed.
    Send,
    /// The window manager sends a client message. Atoms are given by name.
    ClientMessage {
        #[serde(default = "default_true")]
        to_self: bool,
        message_type: String,
        payload: String,
    },
    Resize { width: i32, height: i32 },
    /// A raw theme signal, for the layout or for one slot.
    Signal {
        emission: String,
        source: String,
        #[serde(default)]
        slot: Option<usize>,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Script {
    pub steps: Vec<Step>,
}

impl Script {
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("invalid session script")
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read script {}", path.display()))?;
        Self::from_json(&content)
    }
}

/// What a replayed session did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Key names pressed on the host, in order.
    pub keys: Vec<String>,
    /// Keyboard modes requested by the window manager, in order.
    pub modes: Vec<KeyboardMode>,
    /// Results forwarded to the layout, in order.
    pub results: Vec<String>,
}

/// A keyboard running entirely on headless collaborators.
pub struct Session {
    app: App<HeadlessHost>,
    surface: HeadlessSurface,
    host: Rc<RefCell<HeadlessHost>>,
    modes: Rc<RefCell<Vec<KeyboardMode>>>,
}

impl Session {
    pub fn new(config: AppConfig) -> Result<Self> {
        let mut surface = HeadlessSurface::with_keyboard_theme(
            &config.base.input_group,
            &config.layout_group,
            config.slot_count,
        );
        let host = Rc::new(RefCell::new(HeadlessHost::default()));
        let recognizer = Rc::new(StrokeCountRecognizer::default());
        let mut app = App::new(config, &mut surface, Rc::clone(&host), recognizer)
            .context("failed to build keyboard")?;

        let modes = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&modes);
        app.subscribe_modes(move |mode| sink.borrow_mut().push(*mode));

        Ok(Self {
            app,
            surface,
            host,
            modes,
        })
    }

    pub fn app(&self) -> &App<HeadlessHost> {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut App<HeadlessHost> {
        &mut self.app
    }

    pub fn surface(&self) -> &HeadlessSurface {
        &self.surface
    }

    pub fn host(&self) -> &Rc<RefCell<HeadlessHost>> {
        &self.host
    }

    pub fn apply(&mut self, step: Step) {
        match step {
            Step::Candidates { slot, texts } => {
                let Some(canvas) = self.surface.canvases().get(slot) else {
                    warn!(slot, "candidates for unknown slot ignored");
                    return;
                };
                canvas.set_candidates(texts.as_slice());
                self.app.dispatch(AppEvent::Slot {
                    slot,
                    signal: Signal::CandidatesUpdated,
                });
            }
            Step::Strokes { slot, strokes } => {
                for stroke in strokes {
                    self.app.dispatch(AppEvent::Stroke { slot, stroke });
                }
            }
            Step::Pick { slot, text } => {
                let renderers = self.surface.renderers_of(&self.app.config().base.input_group);
                let Some(renderer) = renderers.get(slot) else {
                    warn!(slot, "pick for unknown slot ignored");
                    return;
                };
                renderer.set_text(PART_RESULT, &text);
                self.app.dispatch(AppEvent::Slot {
                    slot,
                    signal: Signal::ResultFinished,
                });
            }
            Step::Finish { slot } => self.app.dispatch(AppEvent::Slot {
                slot,
                signal: Signal::ResultFinished,
            }),
            Step::Key { name } => self.app.dispatch(AppEvent::Layout(Signal::KeyPressed(name))),
            Step::Send => self.app.dispatch(AppEvent::Layout(Signal::ResultSend)),
            Step::ClientMessage {
                to_self,
                message_type,
                payload,
            } => {
                let msg = {
                    let mut host = self.host.borrow_mut();
                    let own = host.window_id();
                    ClientMessage {
                        window: if to_self { own } else { WindowId(own.0.wrapping_add(1)) },
                        message_type: host.intern_atom(&message_type),
                        payload: host.intern_atom(&payload).0,
                    }
                };
                self.app.dispatch(AppEvent::ClientMessage(msg));
            }
            Step::Resize { width, height } => {
                self.app.dispatch(AppEvent::Resized { width, height })
            }
            Step::Signal {
                emission,
                source,
                slot,
            } => {
                let Some(signal) = Signal::from_emission(&emission, &source) else {
                    warn!(%emission, %source, "unknown signal ignored");
                    return;
                };
                let event = match slot {
                    Some(slot) => AppEvent::Slot { slot, signal },
                    None => AppEvent::Layout(signal),
                };
                self.app.dispatch(event);
            }
        }
    }

    /// Apply every step of `script` and report what happened.
    pub fn replay(&mut self, script: Script) -> Report {
        for step in script.steps {
            self.apply(step);
        }
        self.report()
    }

    pub fn report(&self) -> Report {
        let result_id = self.app.config().base.result_message_id;
        let results = self
            .surface
            .renderers_of(&self.app.config().layout_group)
            .iter()
            .flat_map(|layout| layout.messages())
            .filter_map(|(id, message)| match message {
                Message::String(text) if id == result_id => Some(text),
                _ => None,
            })
            .collect();
        Report {
            keys: self.host.borrow().pressed().to_vec(),
            modes: self.modes.borrow().clone(),
            results,
        }
    }

    pub fn shutdown(self) {
        self.app.shutdown();
    }
}
