//! Recognition canvas and recognizer interfaces.
//!
//! Recognition itself lives outside this crate. A canvas collects ink,
//! asks its recognizer for suggestions and keeps the latest list; the slot
//! only ever reads a complete snapshot of that list.

use crate::candidate::Candidate;
use crate::visual::Visual;
use serde::{Deserialize, Serialize};
use std::rc::Rc;

/// One pen-down to pen-up trace in canvas coordinates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Stroke {
    pub points: Vec<(i32, i32)>,
}

impl Stroke {
    pub fn new(points: Vec<(i32, i32)>) -> Self {
        Self { points }
    }
}

/// Handwriting recognition engine, shared by every slot of the application.
pub trait Recognizer {
    /// Short engine name for logs.
    fn name(&self) -> &str;

    /// Ordered suggestions for the ink drawn so far, best first.
    fn recognize(&self, strokes: &[Stroke]) -> Vec<String>;
}

/// Drawing surface that turns ink into candidates.
pub trait Canvas: Visual {
    fn set_recognizer(&mut self, recognizer: Rc<dyn Recognizer>);

    /// Snapshot of the current candidate list, in recognizer order.
    fn candidates(&self) -> Vec<Candidate>;

    /// Append a stroke and re-run recognition. Returns `true` when the
    /// candidate list was replaced and the owner should repackage it.
    fn add_stroke(&mut self, stroke: Stroke) -> bool;

    /// Drop all ink and candidates.
    fn clear(&mut self);
}
