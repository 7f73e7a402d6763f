//! Themed renderer interface and the typed signal/message vocabulary it speaks.
//!
//! Themes talk in string pairs (`emission`, `source`) and numbered messages.
//! Inside the core every signal is a [`Signal`] value; the string form only
//! exists at the boundary, via [`Signal::from_emission`] and
//! [`Signal::emission`].

use crate::visual::{Geometry, Visual};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Numeric key of a message sent to a renderer.
pub type MessageId = i32;

/// Swallow point of the recognition canvas inside a slot renderer.
pub const PART_CANVAS: &str = "canvas";

/// Text part holding the confirmed result of a slot.
pub const PART_RESULT: &str = "result";

/// Swallow point of the `n`th input slot (1-based) in the outer layout.
pub fn input_part(n: usize) -> String {
    format!("input/{n}")
}

/// Payload of a renderer message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Message {
    String(String),
    StringSet(Vec<String>),
    IntSet(Vec<i32>),
}

/// Notification raised by a renderer or by the outer layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Signal {
    /// The embedded canvas has a new candidate list.
    CandidatesUpdated,
    /// The user confirmed the text in the result part.
    ResultFinished,
    /// A literal key on the outer layout was pressed; carries the key name.
    KeyPressed(String),
    /// Flush every slot.
    ResultSend,
}

impl Signal {
    pub fn from_emission(emission: &str, source: &str) -> Option<Self> {
        match (emission, source) {
            ("canvas,matches,updated", "canvas") => Some(Signal::CandidatesUpdated),
            ("result,finished", "result") => Some(Signal::ResultFinished),
            ("key,pressed", key) if !key.is_empty() => Some(Signal::KeyPressed(key.to_string())),
            ("result,send", _) => Some(Signal::ResultSend),
            _ => None,
        }
    }

    pub fn emission(&self) -> (&'static str, &str) {
        match self {
            Signal::CandidatesUpdated => ("canvas,matches,updated", "canvas"),
            Signal::ResultFinished => ("result,finished", "result"),
            Signal::KeyPressed(key) => ("key,pressed", key.as_str()),
            Signal::ResultSend => ("result,send", "*"),
        }
    }
}

/// A drawable loaded from a theme group.
pub trait Renderer: Visual {
    /// Theme group this renderer was loaded from.
    fn group(&self) -> &str;

    fn send_message(&mut self, id: MessageId, message: Message);

    /// Current text of a text part, `None` if the part does not exist.
    fn part_text(&self, part: &str) -> Option<String>;

    fn set_part_text(&mut self, part: &str, text: &str);

    /// Mark `part` as occupied by an embedded object.
    fn swallow(&mut self, part: &str) -> Result<()>;

    /// Absolute geometry of a part, following the renderer's own geometry.
    fn part_geometry(&self, part: &str) -> Option<Geometry>;
}

/// A renderer that several owners can reach; slots only keep a `Weak` of it.
pub type SharedRenderer = Rc<RefCell<Box<dyn Renderer>>>;

/// Non-owning link to a [`SharedRenderer`].
pub type WeakRenderer = Weak<RefCell<Box<dyn Renderer>>>;
