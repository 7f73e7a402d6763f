//! Factory for the drawables a slot is built from.

use crate::canvas::Canvas;
use crate::renderer::Renderer;
use crate::visual::Visual;
use crate::Result;
use std::path::Path;

/// Host canvas that creates drawables.
pub trait Surface {
    /// A plain rectangle used as a clip shape.
    fn add_clip(&mut self) -> Box<dyn Visual>;

    /// A renderer loaded from `group` of the theme file at `theme`.
    fn add_renderer(&mut self, theme: &Path, group: &str) -> Result<Box<dyn Renderer>>;

    /// An empty recognition canvas with no recognizer bound.
    fn add_canvas(&mut self) -> Box<dyn Canvas>;
}
