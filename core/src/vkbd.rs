//! Virtual-keyboard protocol with the window manager.
//!
//! The window manager asks a keyboard window to switch layouts by sending it
//! a client message whose type is the keyboard-state atom and whose payload
//! is one of the mode atoms. [`ModeListener`] classifies those messages;
//! acting on the mode is left to whoever subscribes to the result.
//!
//! The listener never consumes a message. The host keeps dispatching every
//! client message to its other handlers whatever the classification.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Interned window-system atom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Atom(pub u32);

/// Host window handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WindowId(pub u32);

/// Layout requested by the window manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyboardMode {
    Off,
    /// Keyboard on, layout of the keyboard's own choosing.
    On,
    Alpha,
    Numeric,
    Pin,
    PhoneNumber,
    Hex,
    Terminal,
    Password,
    Unknown,
}

impl fmt::Display for KeyboardMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            KeyboardMode::Off => "off",
            KeyboardMode::On => "on",
            KeyboardMode::Alpha => "alpha",
            KeyboardMode::Numeric => "numeric",
            KeyboardMode::Pin => "pin",
            KeyboardMode::PhoneNumber => "phone-number",
            KeyboardMode::Hex => "hex",
            KeyboardMode::Terminal => "terminal",
            KeyboardMode::Password => "password",
            KeyboardMode::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

pub const ATOM_VIRTUAL_KEYBOARD: &str = "_E_VIRTUAL_KEYBOARD";
pub const ATOM_STATE: &str = "_E_VIRTUAL_KEYBOARD_STATE";

/// Mode atom names, paired with the mode each one requests.
pub const MODE_ATOMS: [(&str, KeyboardMode); 9] = [
    ("_E_VIRTUAL_KEYBOARD_OFF", KeyboardMode::Off),
    ("_E_VIRTUAL_KEYBOARD_ON", KeyboardMode::On),
    ("_E_VIRTUAL_KEYBOARD_ALPHA", KeyboardMode::Alpha),
    ("_E_VIRTUAL_KEYBOARD_NUMERIC", KeyboardMode::Numeric),
    ("_E_VIRTUAL_KEYBOARD_PIN", KeyboardMode::Pin),
    ("_E_VIRTUAL_KEYBOARD_PHONE_NUMBER", KeyboardMode::PhoneNumber),
    ("_E_VIRTUAL_KEYBOARD_HEX", KeyboardMode::Hex),
    ("_E_VIRTUAL_KEYBOARD_TERMINAL", KeyboardMode::Terminal),
    ("_E_VIRTUAL_KEYBOARD_PASSWORD", KeyboardMode::Password),
];

/// Client message as delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientMessage {
    pub window: WindowId,
    pub message_type: Atom,
    /// First data word, an atom for keyboard-state messages.
    pub payload: u32,
}

/// Window states a keyboard window asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WindowState {
    SkipTaskbar,
    SkipPager,
}

/// One-time window configuration requested at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSetup {
    pub title: String,
    pub name: String,
    pub class: String,
    pub width: i32,
    pub height: i32,
    pub states: Vec<WindowState>,
    pub virtual_keyboard: bool,
}

/// The host window system, as far as the keyboard window is concerned.
pub trait WindowHost {
    /// Handle of the keyboard's own window.
    fn window_id(&self) -> WindowId;

    fn intern_atom(&mut self, name: &str) -> Atom;

    /// Apply `setup` and map the window.
    fn configure_window(&mut self, setup: &WindowSetup) -> Result<()>;
}

/// The interned atoms the listener compares against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VkbdAtoms {
    /// Property advertising the window as a virtual keyboard.
    pub virtual_keyboard: Atom,
    pub state: Atom,
    pub modes: [(Atom, KeyboardMode); 9],
}

impl VkbdAtoms {
    pub fn intern<H: WindowHost + ?Sized>(host: &mut H) -> Self {
        let virtual_keyboard = host.intern_atom(ATOM_VIRTUAL_KEYBOARD);
        let state = host.intern_atom(ATOM_STATE);
        let modes = MODE_ATOMS.map(|(name, mode)| (host.intern_atom(name), mode));
        Self {
            virtual_keyboard,
            state,
            modes,
        }
    }

    /// Mode requested by `atom`, `Unknown` if it is none of ours.
    pub fn classify(&self, atom: u32) -> KeyboardMode {
        self.modes
            .iter()
            .find(|(a, _)| a.0 == atom)
            .map_or(KeyboardMode::Unknown, |&(_, mode)| mode)
    }
}

/// Outcome of offering a client message to the listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Keyboard-state message for our window, classified.
    Handled(KeyboardMode),
    /// Not ours. The host passes it on.
    NotHandled,
}

impl Dispatch {
    pub fn mode(self) -> Option<KeyboardMode> {
        match self {
            Dispatch::Handled(mode) => Some(mode),
            Dispatch::NotHandled => None,
        }
    }
}

/// Stateless classifier of keyboard-state client messages.
#[derive(Debug, Clone)]
pub struct ModeListener {
    window: WindowId,
    atoms: VkbdAtoms,
}

impl ModeListener {
    pub fn new(window: WindowId, atoms: VkbdAtoms) -> Self {
        Self { window, atoms }
    }

    pub fn window(&self) -> WindowId {
        self.window
    }

    pub fn atoms(&self) -> &VkbdAtoms {
        &self.atoms
    }

    pub fn on_client_message(&self, msg: &ClientMessage) -> Dispatch {
        if msg.window != self.window || msg.message_type != self.atoms.state {
            return Dispatch::NotHandled;
        }
        Dispatch::Handled(self.atoms.classify(msg.payload))
    }
}
