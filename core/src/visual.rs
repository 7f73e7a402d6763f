//! Geometry and visual state shared by every drawable collaborator.
//!
//! The input slot owns three drawables (a clip shape, a themed renderer and
//! a recognition canvas). All three implement [`Visual`], which lets the slot
//! fan each lifecycle change out with one loop instead of three call sites.

use serde::{Deserialize, Serialize};

/// Position and size in display units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Geometry {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Geometry {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    pub fn size(&self) -> (i32, i32) {
        (self.width, self.height)
    }
}

/// Premultiplied RGBA color, one byte per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgba(255, 255, 255, 255);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Opaque handle of a clip target living on the host canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClipId(pub u32);

/// Lifecycle operations every drawable supports.
pub trait Visual {
    fn move_to(&mut self, x: i32, y: i32);
    fn resize(&mut self, width: i32, height: i32);
    fn show(&mut self);
    fn hide(&mut self);
    fn set_color(&mut self, color: Color);
    fn set_clip(&mut self, clip: ClipId);
    fn clear_clip(&mut self);

    fn geometry(&self) -> Geometry;
    fn is_visible(&self) -> bool;
}
