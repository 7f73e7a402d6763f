//! Input slot type descriptor and the smart-object interface.
//!
//! The descriptor is registered once per process with [`register`]. The
//! application does this during startup and hands the returned token to
//! every slot it creates; slot construction never registers on its own.

use crate::surface::Surface;
use crate::visual::{ClipId, Color};
use crate::{Config, Result};
use once_cell::sync::OnceCell;
use tracing::info;

/// Revision of the smart-object interface implemented here.
pub const SMART_CLASS_VERSION: u32 = 4;

/// Name under which input slots register.
pub const INPUT_SLOT_CLASS: &str = "enscribi_input_frame";

/// Registered type descriptor for input slots.
#[derive(Debug, PartialEq, Eq)]
pub struct SmartClass {
    name: &'static str,
    version: u32,
}

impl SmartClass {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn version(&self) -> u32 {
        self.version
    }
}

static INPUT_SLOT: OnceCell<SmartClass> = OnceCell::new();

/// Register the input slot descriptor. Later calls return the same instance.
pub fn register() -> &'static SmartClass {
    INPUT_SLOT.get_or_init(|| {
        info!(class = INPUT_SLOT_CLASS, version = SMART_CLASS_VERSION, "registered smart class");
        SmartClass {
            name: INPUT_SLOT_CLASS,
            version: SMART_CLASS_VERSION,
        }
    })
}

/// The descriptor, if [`register`] has run.
pub fn registered() -> Option<&'static SmartClass> {
    INPUT_SLOT.get()
}

/// A composite drawable that forwards its lifecycle to the members it owns.
///
/// Every method after `add` is a no-op once the object has been destroyed.
pub trait SmartObject {
    fn add(class: &'static SmartClass, surface: &mut dyn Surface, config: &Config) -> Result<Self>
    where
        Self: Sized;

    fn destroy(&mut self);
    fn move_to(&mut self, x: i32, y: i32);
    fn resize(&mut self, width: i32, height: i32);
    fn show(&mut self);
    fn hide(&mut self);
    fn set_color(&mut self, color: Color);
    fn set_clip(&mut self, clip: ClipId);
    fn clear_clip(&mut self);
}
