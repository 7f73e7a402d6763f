//! Key injection of confirmed selections into the focused application.
//!
//! The injector looks only at the first character of a selection. That
//! character becomes a keysym, the keysym becomes a key name, and the host
//! synthesizes a press of that key for whatever window has focus. Any step
//! that fails drops the selection; nothing is retried.

use crate::candidate::leading_code_point;
use crate::keysym::Keysym;
use crate::Result;
use std::borrow::Cow;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, warn};

/// The host window system's keyboard input stream.
pub trait KeyboardHost {
    /// Name of `keysym` in the host symbol table.
    fn keysym_name(&self, keysym: Keysym) -> Option<Cow<'static, str>> {
        keysym.name()
    }

    /// Synthesize a press of the named key, delivered to the focused window.
    fn fake_key_press(&mut self, key: &str) -> Result<()>;
}

/// Keysym for the first character of `text`, if it has one.
pub fn keysym_for_text(text: &str) -> Option<Keysym> {
    Keysym::from_code_point(leading_code_point(text.as_bytes()))
}

pub struct KeyInjector<H> {
    host: Rc<RefCell<H>>,
}

impl<H: KeyboardHost> KeyInjector<H> {
    pub fn new(host: Rc<RefCell<H>>) -> Self {
        Self { host }
    }

    pub fn host(&self) -> &Rc<RefCell<H>> {
        &self.host
    }

    /// Key name the host would press for `text`.
    pub fn resolve(&self, text: &str) -> Option<Cow<'static, str>> {
        let keysym = keysym_for_text(text)?;
        self.host.borrow().keysym_name(keysym)
    }

    /// Press the key for the first character of `text`.
    ///
    /// Returns the key name that was pressed, `None` if the selection was
    /// dropped.
    pub fn inject_selection(&self, text: &str) -> Option<String> {
        let Some(key) = self.resolve(text) else {
            debug!(selection = %text, "selection has no key symbol, dropped");
            return None;
        };
        self.press_named(&key).then(|| key.into_owned())
    }

    /// Press a key by name, bypassing candidate decoding.
    pub fn press_named(&self, key: &str) -> bool {
        debug!(key, "injecting key press");
        match self.host.borrow_mut().fake_key_press(key) {
            Ok(()) => true,
            Err(e) => {
                warn!(key, error = %e, "key injection failed");
                false
            }
        }
    }
}

impl<H> Clone for KeyInjector<H> {
    fn clone(&self) -> Self {
        Self {
            host: Rc::clone(&self.host),
        }
    }
}
