//! Input slot controller.
//!
//! An `InputSlot` is one handwriting surface of the keyboard. It owns three
//! drawables, created and destroyed together:
//!
//! - a clip shape,
//! - a renderer loaded from the slot theme group,
//! - a recognition canvas swallowed into the renderer's `"canvas"` part.
//!
//! The slot reacts to two renderer signals. `CandidatesUpdated` repackages
//! the canvas candidates for display, `ResultFinished` extracts the
//! confirmed text, forwards it to the parent layout and raises
//! [`SlotEvent::SelectionConfirmed`] to subscribers.
//!
//! A destroyed slot keeps its handle but ignores every call.

use crate::canvas::{Canvas, Recognizer, Stroke};
use crate::extractor::extract_and_forward;
use crate::notify::Notifier;
use crate::packager::package_and_send;
use crate::renderer::{MessageId, Renderer, SharedRenderer, Signal, WeakRenderer, PART_CANVAS, PART_RESULT};
use crate::smart::{SmartClass, SmartObject};
use crate::surface::Surface;
use crate::visual::{ClipId, Color, Geometry, Visual};
use crate::{Config, Result};
use std::path::PathBuf;
use std::rc::Rc;
use tracing::{debug, trace};

/// Notification raised by a slot to its owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotEvent {
    /// The user accepted `text` in this slot.
    SelectionConfirmed(String),
}

struct Members {
    clip: Box<dyn Visual>,
    renderer: Box<dyn Renderer>,
    canvas: Box<dyn Canvas>,
}

/// Apply one `Visual` call to every member, in clip, renderer, canvas order.
macro_rules! propagate {
    ($members:expr, $method:ident($($arg:expr),*)) => {{
        let members = $members;
        members.clip.$method($($arg),*);
        members.renderer.$method($($arg),*);
        members.canvas.$method($($arg),*);
    }};
}

pub struct InputSlot {
    class: &'static SmartClass,
    geometry: Geometry,
    visible: bool,
    color: Color,
    clip_target: Option<ClipId>,
    parent: Option<WeakRenderer>,
    members: Option<Members>,
    candidates_id: MessageId,
    result_id: MessageId,
    events: Notifier<SlotEvent>,
}

impl InputSlot {
    /// Build a slot on `surface` and link it to `parent`, if any.
    pub fn create(
        class: &'static SmartClass,
        surface: &mut dyn Surface,
        config: &Config,
        parent: Option<&SharedRenderer>,
    ) -> Result<Self> {
        let mut slot = <Self as SmartObject>::add(class, surface, config)?;
        if let Some(parent) = parent {
            slot.set_parent(parent);
        }
        Ok(slot)
    }

    /// Bind the shared recognition engine to this slot's canvas.
    pub fn set_recognizer(&mut self, recognizer: Rc<dyn Recognizer>) {
        let Some(members) = self.members.as_mut() else {
            return;
        };
        debug!(recognizer = recognizer.name(), "recognizer bound");
        members.canvas.set_recognizer(recognizer);
    }

    /// Link the layout that receives forwarded results. Only a weak link is
    /// kept; the slot never keeps its parent alive.
    pub fn set_parent(&mut self, parent: &SharedRenderer) {
        if self.members.is_none() {
            return;
        }
        self.parent = Some(Rc::downgrade(parent));
    }

    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: FnMut(&SlotEvent) + 'static,
    {
        self.events.subscribe(callback);
    }

    /// Dispatch a signal raised by this slot's renderer.
    ///
    /// Layout-level signals (`KeyPressed`, `ResultSend`) are not meant for a
    /// slot and are ignored.
    pub fn handle_signal(&mut self, signal: &Signal) {
        match signal {
            Signal::CandidatesUpdated => {
                self.candidates_updated();
            }
            Signal::ResultFinished => {
                self.result_finished();
            }
            Signal::KeyPressed(_) | Signal::ResultSend => {
                trace!(?signal, "slot ignores layout signal");
            }
        }
    }

    /// Repackage the canvas candidates for the renderer.
    ///
    /// Returns how many real candidates were sent.
    pub fn candidates_updated(&mut self) -> Option<usize> {
        let members = self.members.as_mut()?;
        package_and_send(
            members.canvas.as_ref(),
            members.renderer.as_mut(),
            self.candidates_id,
        )
    }

    /// Extract the confirmed result and notify the parent and subscribers.
    pub fn result_finished(&mut self) -> Option<String> {
        let members = self.members.as_mut()?;
        let text = extract_and_forward(
            members.renderer.as_mut(),
            self.parent.as_ref(),
            self.result_id,
        )?;
        self.events.emit(&SlotEvent::SelectionConfirmed(text.clone()));
        Some(text)
    }

    /// Flush whatever the result part holds, without waiting for the
    /// renderer to finish on its own.
    pub fn send_result(&mut self) -> Option<String> {
        self.result_finished()
    }

    /// Accept `text` as if the user had tapped it in the candidate row.
    pub fn pick(&mut self, text: &str) -> Option<String> {
        let members = self.members.as_mut()?;
        members.renderer.set_part_text(PART_RESULT, text);
        self.result_finished()
    }

    /// Feed one stroke to the canvas, repackaging if the candidates changed.
    pub fn add_stroke(&mut self, stroke: Stroke) -> Option<usize> {
        let members = self.members.as_mut()?;
        if !members.canvas.add_stroke(stroke) {
            return None;
        }
        self.candidates_updated()
    }

    /// Wipe the canvas ink and candidates.
    pub fn clear_ink(&mut self) {
        if let Some(members) = self.members.as_mut() {
            members.canvas.clear();
        }
    }

    pub fn is_valid(&self) -> bool {
        self.members.is_some()
    }

    pub fn class(&self) -> &'static SmartClass {
        self.class
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn clip_target(&self) -> Option<ClipId> {
        self.clip_target
    }

    pub fn has_parent(&self) -> bool {
        self.parent.as_ref().is_some_and(|p| p.strong_count() > 0)
    }

    pub fn clip_shape(&self) -> Option<&dyn Visual> {
        self.members.as_ref().map(|m| m.clip.as_ref())
    }

    pub fn renderer(&self) -> Option<&dyn Renderer> {
        self.members.as_ref().map(|m| m.renderer.as_ref())
    }

    pub fn canvas(&self) -> Option<&dyn Canvas> {
        self.members.as_ref().map(|m| m.canvas.as_ref())
    }
}

impl SmartObject for InputSlot {
    fn add(class: &'static SmartClass, surface: &mut dyn Surface, config: &Config) -> Result<Self> {
        let theme = config
            .theme_find(&config.theme)
            .unwrap_or_else(|| PathBuf::from(&config.theme));

        let clip = surface.add_clip();
        let mut renderer = surface.add_renderer(&theme, &config.input_group)?;
        renderer.move_to(0, 0);
        renderer.show();
        let canvas = surface.add_canvas();
        renderer.swallow(PART_CANVAS)?;

        debug!(class = class.name(), group = %config.input_group, "input slot added");
        Ok(Self {
            class,
            geometry: Geometry::default(),
            visible: false,
            color: Color::default(),
            clip_target: None,
            parent: None,
            members: Some(Members {
                clip,
                renderer,
                canvas,
            }),
            candidates_id: config.candidates_message_id,
            result_id: config.result_message_id,
            events: Notifier::new(),
        })
    }

    fn destroy(&mut self) {
        let Some(members) = self.members.take() else {
            return;
        };
        let Members {
            clip,
            renderer,
            canvas,
        } = members;
        drop(clip);
        drop(renderer);
        drop(canvas);
        self.parent = None;
        debug!(class = self.class.name(), "input slot destroyed");
    }

    fn move_to(&mut self, x: i32, y: i32) {
        let Some(members) = self.members.as_mut() else {
            return;
        };
        self.geometry.x = x;
        self.geometry.y = y;
        propagate!(members, move_to(x, y));
    }

    fn resize(&mut self, width: i32, height: i32) {
        let Some(members) = self.members.as_mut() else {
            return;
        };
        self.geometry.width = width;
        self.geometry.height = height;
        propagate!(members, resize(width, height));
    }

    fn show(&mut self) {
        let Some(members) = self.members.as_mut() else {
            return;
        };
        self.visible = true;
        propagate!(members, show());
    }

    fn hide(&mut self) {
        let Some(members) = self.members.as_mut() else {
            return;
        };
        self.visible = false;
        propagate!(members, hide());
    }

    fn set_color(&mut self, color: Color) {
        let Some(members) = self.members.as_mut() else {
            return;
        };
        self.color = color;
        propagate!(members, set_color(color));
    }

    fn set_clip(&mut self, clip: ClipId) {
        let Some(members) = self.members.as_mut() else {
            return;
        };
        self.clip_target = Some(clip);
        propagate!(members, set_clip(clip));
    }

    fn clear_clip(&mut self) {
        let Some(members) = self.members.as_mut() else {
            return;
        };
        self.clip_target = None;
        propagate!(members, clear_clip());
    }
}

impl std::fmt::Debug for InputSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputSlot")
            .field("class", &self.class.name())
            .field("geometry", &self.geometry)
            .field("visible", &self.visible)
            .field("valid", &self.is_valid())
            .field("events", &self.events)
            .finish()
    }
}
