//! In-memory collaborators: surface, renderers, canvases, host and a toy
//! recognizer.
//!
//! Everything here records what it is asked to do in a shared state cell
//! (a "probe"), so tests and the replay command can inspect geometry,
//! messages and key presses after the fact. Nothing touches a display.

use crate::candidate::Candidate;
use crate::canvas::{Canvas, Recognizer, Stroke};
use crate::injector::KeyboardHost;
use crate::renderer::{Message, MessageId, Renderer, PART_CANVAS, PART_RESULT};
use crate::surface::Surface;
use crate::visual::{ClipId, Color, Geometry, Visual};
use crate::vkbd::{Atom, WindowHost, WindowId, WindowSetup};
use crate::{Error, Result};
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::trace;

/// Observable state of one drawable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisualState {
    pub geometry: Geometry,
    pub visible: bool,
    pub color: Color,
    pub clip: Option<ClipId>,
    /// Set once the owning handle has been dropped.
    pub released: bool,
}

pub type VisualProbe = Rc<RefCell<VisualState>>;

struct HeadlessVisual {
    state: VisualProbe,
}

impl HeadlessVisual {
    fn new() -> (Self, VisualProbe) {
        let state = Rc::new(RefCell::new(VisualState::default()));
        (
            Self {
                state: Rc::clone(&state),
            },
            state,
        )
    }
}

impl Visual for HeadlessVisual {
    fn move_to(&mut self, x: i32, y: i32) {
        let mut s = self.state.borrow_mut();
        s.geometry.x = x;
        s.geometry.y = y;
    }

    fn resize(&mut self, width: i32, height: i32) {
        let mut s = self.state.borrow_mut();
        s.geometry.width = width;
        s.geometry.height = height;
    }

    fn show(&mut self) {
        self.state.borrow_mut().visible = true;
    }

    fn hide(&mut self) {
        self.state.borrow_mut().visible = false;
    }

    fn set_color(&mut self, color: Color) {
        self.state.borrow_mut().color = color;
    }

    fn set_clip(&mut self, clip: ClipId) {
        self.state.borrow_mut().clip = Some(clip);
    }

    fn clear_clip(&mut self) {
        self.state.borrow_mut().clip = None;
    }

    fn geometry(&self) -> Geometry {
        self.state.borrow().geometry
    }

    fn is_visible(&self) -> bool {
        self.state.borrow().visible
    }
}

impl Drop for HeadlessVisual {
    fn drop(&mut self) {
        self.state.borrow_mut().released = true;
    }
}

/// Where a part sits inside its renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartLayout {
    /// Covers the whole renderer.
    Fill,
    /// Column `index` of `count` equal-width columns, full height.
    Column { index: usize, count: usize },
}

impl PartLayout {
    fn place(self, outer: Geometry) -> Geometry {
        match self {
            PartLayout::Fill => outer,
            PartLayout::Column { index, count } => {
                let count = count.max(1) as i32;
                let width = outer.width / count;
                Geometry::new(outer.x + width * index as i32, outer.y, width, outer.height)
            }
        }
    }
}

/// A part of a theme group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartSpec {
    pub name: String,
    pub layout: PartLayout,
    /// Text parts hold a string; the others can only swallow objects.
    pub text: bool,
}

impl PartSpec {
    pub fn swallow(name: impl Into<String>, layout: PartLayout) -> Self {
        Self {
            name: name.into(),
            layout,
            text: false,
        }
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            layout: PartLayout::Fill,
            text: true,
        }
    }
}

/// Observable state of a renderer.
#[derive(Debug, Clone, Default)]
pub struct RendererState {
    pub theme: PathBuf,
    pub group: String,
    pub parts: Vec<PartSpec>,
    pub texts: BTreeMap<String, String>,
    pub messages: Vec<(MessageId, Message)>,
    pub swallowed: Vec<String>,
}

impl RendererState {
    fn part(&self, name: &str) -> Option<&PartSpec> {
        self.parts.iter().find(|p| p.name == name)
    }
}

#[derive(Debug, Clone)]
pub struct RendererProbe {
    pub visual: VisualProbe,
    pub state: Rc<RefCell<RendererState>>,
}

impl RendererProbe {
    pub fn group(&self) -> String {
        self.state.borrow().group.clone()
    }

    pub fn messages(&self) -> Vec<(MessageId, Message)> {
        self.state.borrow().messages.clone()
    }

    pub fn text(&self, part: &str) -> Option<String> {
        self.state.borrow().texts.get(part).cloned()
    }

    /// Write a text part the way a theme script would.
    pub fn set_text(&self, part: &str, text: &str) {
        let mut state = self.state.borrow_mut();
        if state.part(part).is_some_and(|p| p.text) {
            state.texts.insert(part.to_string(), text.to_string());
        }
    }
}

struct HeadlessRenderer {
    visual: HeadlessVisual,
    group: String,
    state: Rc<RefCell<RendererState>>,
}

impl Visual for HeadlessRenderer {
    fn move_to(&mut self, x: i32, y: i32) {
        self.visual.move_to(x, y);
    }

    fn resize(&mut self, width: i32, height: i32) {
        self.visual.resize(width, height);
    }

    fn show(&mut self) {
        self.visual.show();
    }

    fn hide(&mut self) {
        self.visual.hide();
    }

    fn set_color(&mut self, color: Color) {
        self.visual.set_color(color);
    }

    fn set_clip(&mut self, clip: ClipId) {
        self.visual.set_clip(clip);
    }

    fn clear_clip(&mut self) {
        self.visual.clear_clip();
    }

    fn geometry(&self) -> Geometry {
        self.visual.geometry()
    }

    fn is_visible(&self) -> bool {
        self.visual.is_visible()
    }
}

impl Renderer for HeadlessRenderer {
    fn group(&self) -> &str {
        &self.group
    }

    fn send_message(&mut self, id: MessageId, message: Message) {
        trace!(group = %self.group, id, ?message, "renderer message");
        self.state.borrow_mut().messages.push((id, message));
    }

    fn part_text(&self, part: &str) -> Option<String> {
        let state = self.state.borrow();
        if !state.part(part)?.text {
            return None;
        }
        Some(state.texts.get(part).cloned().unwrap_or_default())
    }

    fn set_part_text(&mut self, part: &str, text: &str) {
        let mut state = self.state.borrow_mut();
        if state.part(part).is_some_and(|p| p.text) {
            state.texts.insert(part.to_string(), text.to_string());
        }
    }

    fn swallow(&mut self, part: &str) -> Result<()> {
        let mut state = self.state.borrow_mut();
        if !state.part(part).is_some_and(|p| !p.text) {
            return Err(Error::MissingPart(part.to_string()));
        }
        state.swallowed.push(part.to_string());
        Ok(())
    }

    fn part_geometry(&self, part: &str) -> Option<Geometry> {
        let layout = self.state.borrow().part(part)?.layout;
        Some(layout.place(self.visual.geometry()))
    }
}

/// Observable state of a canvas.
#[derive(Debug, Clone, Default)]
pub struct CanvasState {
    pub recognizer: Option<String>,
    pub strokes: Vec<Stroke>,
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone)]
pub struct CanvasProbe {
    pub visual: VisualProbe,
    pub state: Rc<RefCell<CanvasState>>,
}

impl CanvasProbe {
    /// Replace the candidate list, as a recognizer callback would.
    pub fn set_candidates<S: AsRef<str>>(&self, texts: &[S]) {
        self.state.borrow_mut().candidates =
            texts.iter().map(|t| Candidate::new(t.as_ref())).collect();
    }

    pub fn recognizer(&self) -> Option<String> {
        self.state.borrow().recognizer.clone()
    }
}

struct HeadlessCanvas {
    visual: HeadlessVisual,
    recognizer: Option<Rc<dyn Recognizer>>,
    state: Rc<RefCell<CanvasState>>,
}

impl Visual for HeadlessCanvas {
    fn move_to(&mut self, x: i32, y: i32) {
        self.visual.move_to(x, y);
    }

    fn resize(&mut self, width: i32, height: i32) {
        self.visual.resize(width, height);
    }

    fn show(&mut self) {
        self.visual.show();
    }

    fn hide(&mut self) {
        self.visual.hide();
    }

    fn set_color(&mut self, color: Color) {
        self.visual.set_color(color);
    }

    fn set_clip(&mut self, clip: ClipId) {
        self.visual.set_clip(clip);
    }

    fn clear_clip(&mut self) {
        self.visual.clear_clip();
    }

    fn geometry(&self) -> Geometry {
        self.visual.geometry()
    }

    fn is_visible(&self) -> bool {
        self.visual.is_visible()
    }
}

impl Canvas for HeadlessCanvas {
    fn set_recognizer(&mut self, recognizer: Rc<dyn Recognizer>) {
        self.state.borrow_mut().recognizer = Some(recognizer.name().to_string());
        self.recognizer = Some(recognizer);
    }

    fn candidates(&self) -> Vec<Candidate> {
        self.state.borrow().candidates.clone()
    }

    fn add_stroke(&mut self, stroke: Stroke) -> bool {
        let mut state = self.state.borrow_mut();
        state.strokes.push(stroke);
        let Some(recognizer) = self.recognizer.as_ref() else {
            return false;
        };
        let found: Vec<Candidate> = recognizer
            .recognize(&state.strokes)
            .into_iter()
            .map(Candidate::new)
            .collect();
        if found == state.candidates {
            return false;
        }
        state.candidates = found;
        true
    }

    fn clear(&mut self) {
        let mut state = self.state.borrow_mut();
        state.strokes.clear();
        state.candidates.clear();
    }
}

/// Surface that builds headless drawables from an in-memory theme.
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    groups: BTreeMap<String, Vec<PartSpec>>,
    clips: Vec<VisualProbe>,
    renderers: Vec<RendererProbe>,
    canvases: Vec<CanvasProbe>,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Theme with a slot group and a layout group holding `slots` inputs.
    pub fn with_keyboard_theme(slot_group: &str, layout_group: &str, slots: usize) -> Self {
        let inputs = (0..slots)
            .map(|i| {
                PartSpec::swallow(
                    crate::renderer::input_part(i + 1),
                    PartLayout::Column {
                        index: i,
                        count: slots,
                    },
                )
            })
            .collect();
        Self::new()
            .with_group(
                slot_group,
                vec![
                    PartSpec::swallow(PART_CANVAS, PartLayout::Fill),
                    PartSpec::text(PART_RESULT),
                ],
            )
            .with_group(layout_group, inputs)
    }

    pub fn with_group(mut self, group: &str, parts: Vec<PartSpec>) -> Self {
        self.groups.insert(group.to_string(), parts);
        self
    }

    pub fn clips(&self) -> &[VisualProbe] {
        &self.clips
    }

    pub fn renderers(&self) -> &[RendererProbe] {
        &self.renderers
    }

    pub fn canvases(&self) -> &[CanvasProbe] {
        &self.canvases
    }

    /// Renderers loaded from `group`, in creation order.
    pub fn renderers_of(&self, group: &str) -> Vec<RendererProbe> {
        self.renderers
            .iter()
            .filter(|r| r.state.borrow().group == group)
            .cloned()
            .collect()
    }
}

impl Surface for HeadlessSurface {
    fn add_clip(&mut self) -> Box<dyn Visual> {
        let (visual, probe) = HeadlessVisual::new();
        self.clips.push(probe);
        Box::new(visual)
    }

    fn add_renderer(&mut self, theme: &Path, group: &str) -> Result<Box<dyn Renderer>> {
        let parts = self
            .groups
            .get(group)
            .cloned()
            .ok_or_else(|| Error::MissingGroup {
                theme: theme.display().to_string(),
                group: group.to_string(),
            })?;
        let (visual, visual_probe) = HeadlessVisual::new();
        let texts = parts
            .iter()
            .filter(|p| p.text)
            .map(|p| (p.name.clone(), String::new()))
            .collect();
        let state = Rc::new(RefCell::new(RendererState {
            theme: theme.to_path_buf(),
            group: group.to_string(),
            parts,
            texts,
            ..RendererState::default()
        }));
        self.renderers.push(RendererProbe {
            visual: visual_probe,
            state: Rc::clone(&state),
        });
        Ok(Box::new(HeadlessRenderer {
            visual,
            group: group.to_string(),
            state,
        }))
    }

    fn add_canvas(&mut self) -> Box<dyn Canvas> {
        let (visual, visual_probe) = HeadlessVisual::new();
        let state = Rc::new(RefCell::new(CanvasState::default()));
        self.canvases.push(CanvasProbe {
            visual: visual_probe,
            state: Rc::clone(&state),
        });
        Box::new(HeadlessCanvas {
            visual,
            recognizer: None,
            state,
        })
    }
}

/// Host that records key presses and window configuration.
#[derive(Debug)]
pub struct HeadlessHost {
    window: WindowId,
    atoms: HashMap<String, Atom>,
    pressed: Vec<String>,
    setup: Option<WindowSetup>,
}

impl HeadlessHost {
    /// First atom handed out; low numbers are left to predefined atoms.
    const FIRST_ATOM: u32 = 0x100;

    pub fn new(window: WindowId) -> Self {
        Self {
            window,
            atoms: HashMap::new(),
            pressed: Vec::new(),
            setup: None,
        }
    }

    pub fn pressed(&self) -> &[String] {
        &self.pressed
    }

    pub fn take_pressed(&mut self) -> Vec<String> {
        std::mem::take(&mut self.pressed)
    }

    pub fn setup(&self) -> Option<&WindowSetup> {
        self.setup.as_ref()
    }

    /// Atom previously interned under `name`.
    pub fn atom(&self, name: &str) -> Option<Atom> {
        self.atoms.get(name).copied()
    }
}

impl Default for HeadlessHost {
    fn default() -> Self {
        Self::new(WindowId(1))
    }
}

impl KeyboardHost for HeadlessHost {
    fn fake_key_press(&mut self, key: &str) -> Result<()> {
        if key.is_empty() {
            return Err(Error::Injection {
                key: String::new(),
                reason: "empty key name".to_string(),
            });
        }
        self.pressed.push(key.to_string());
        Ok(())
    }
}

impl WindowHost for HeadlessHost {
    fn window_id(&self) -> WindowId {
        self.window
    }

    fn intern_atom(&mut self, name: &str) -> Atom {
        let next = Atom(Self::FIRST_ATOM + self.atoms.len() as u32);
        *self.atoms.entry(name.to_string()).or_insert(next)
    }

    fn configure_window(&mut self, setup: &WindowSetup) -> Result<()> {
        self.setup = Some(setup.clone());
        Ok(())
    }
}

/// Recognizer that guesses by stroke count alone.
#[derive(Debug, Clone)]
pub struct StrokeCountRecognizer {
    table: BTreeMap<usize, Vec<String>>,
}

impl StrokeCountRecognizer {
    pub fn new(table: BTreeMap<usize, Vec<String>>) -> Self {
        Self { table }
    }
}

impl Default for StrokeCountRecognizer {
    fn default() -> Self {
        let rows: [(usize, &[&str]); 5] = [
            (1, &["一", "乙", "丶"]),
            (2, &["二", "人", "十", "八", "力", "入", "七", "九", "刀"]),
            (3, &["三", "口", "山", "川", "大", "小", "土", "女"]),
            (4, &["水", "木", "火", "日", "月", "中", "手", "心", "王"]),
            (5, &["永", "田", "目", "石", "白", "生", "出"]),
        ];
        Self::new(
            rows.iter()
                .map(|(n, chars)| (*n, chars.iter().map(|c| c.to_string()).collect()))
                .collect(),
        )
    }
}

impl Recognizer for StrokeCountRecognizer {
    fn name(&self) -> &str {
        "stroke-count"
    }

    fn recognize(&self, strokes: &[Stroke]) -> Vec<String> {
        self.table.get(&strokes.len()).cloned().unwrap_or_default()
    }
}
