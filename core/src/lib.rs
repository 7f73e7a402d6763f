//! enscribi-core
//!
//! Input mediation for a handwriting keyboard: recognizer candidates go in,
//! synthetic key presses come out.
//!
//! This crate owns everything between the recognition canvas and the host
//! window system. Recognition, drawing and the window system itself are
//! reached through traits, with in-memory implementations in [`headless`].
//!
//! Public API:
//! - `InputSlot` - One input surface: clip, renderer and canvas lifecycle
//! - `CandidateBatch` - The nine-entry candidate form sent to renderers
//! - `KeyInjector` - Confirmed text to key press
//! - `ModeListener` - Window-manager keyboard mode requests
//! - `Config` - Theme and message configuration
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub mod error;
pub use error::{Error, Result};

pub mod visual;
pub use visual::{ClipId, Color, Geometry, Visual};

pub mod candidate;
pub use candidate::{leading_code_point, Candidate, CandidateBatch, BATCH_LEN, MAX_CANDIDATES};

pub mod renderer;
pub use renderer::{input_part, Message, MessageId, Renderer, SharedRenderer, Signal, WeakRenderer};

pub mod canvas;
pub use canvas::{Canvas, Recognizer, Stroke};

pub mod surface;
pub use surface::Surface;

pub mod notify;
pub use notify::Notifier;

pub mod packager;
pub use packager::package_and_send;

pub mod extractor;
pub use extractor::extract_and_forward;

pub mod smart;
pub use smart::{SmartClass, SmartObject};

pub mod slot;
pub use slot::{InputSlot, SlotEvent};

pub mod keysym;
pub use keysym::Keysym;

pub mod injector;
pub use injector::{keysym_for_text, KeyInjector, KeyboardHost};

pub mod vkbd;
pub use vkbd::{
    Atom, ClientMessage, Dispatch, KeyboardMode, ModeListener, VkbdAtoms, WindowHost, WindowId,
    WindowSetup, WindowState,
};

pub mod headless;

/// Theme and message configuration shared by every slot.
///
/// Application-level options (layout group, slot count, window settings)
/// live in the `enscribi` crate's `AppConfig`, which flattens this struct.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Theme name, resolved against `theme_dirs`
    pub theme: String,

    /// Directories searched for `<theme>.edj`, in order
    pub theme_dirs: Vec<PathBuf>,

    /// Theme group each input slot is loaded from
    pub input_group: String,

    /// Message id carrying a packaged candidate batch to a slot renderer
    pub candidates_message_id: MessageId,

    /// Message id carrying a confirmed result to the parent layout
    pub result_message_id: MessageId,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "enscribi".to_string(),
            theme_dirs: default_theme_dirs(),
            input_group: "enscribi/input".to_string(),
            candidates_message_id: 1,
            result_message_id: 188,
        }
    }
}

fn default_theme_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if let Ok(home) = std::env::var("HOME") {
        dirs.push(PathBuf::from(home).join(".enscribi").join("themes"));
    }
    dirs.push(PathBuf::from("/usr/share/enscribi/themes"));
    dirs
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from TOML string.
    pub fn from_toml_str(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize configuration to TOML string.
    pub fn to_toml_string(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// First `<dir>/<name>.edj` that exists in `theme_dirs`.
    pub fn theme_find(&self, name: &str) -> Option<PathBuf> {
        self.theme_dirs
            .iter()
            .map(|dir| dir.join(format!("{name}.edj")))
            .find(|path| path.is_file())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_message_ids() {
        let cfg = Config::default();
        assert_eq!(cfg.result_message_id, 188);
        assert_eq!(cfg.candidates_message_id, 1);
        assert_eq!(cfg.input_group, "enscribi/input");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let cfg = Config::from_toml_str("theme = \"dark\"\nresult_message_id = 200\n").unwrap();
        assert_eq!(cfg.theme, "dark");
        assert_eq!(cfg.result_message_id, 200);
        assert_eq!(cfg.input_group, "enscribi/input");
    }

    #[test]
    fn test_toml_roundtrip() {
        let cfg = Config {
            theme_dirs: vec![PathBuf::from("/tmp/themes")],
            ..Config::default()
        };
        let text = cfg.to_toml_string().unwrap();
        assert_eq!(Config::from_toml_str(&text).unwrap(), cfg);
    }

    #[test]
    fn test_theme_find() {
        let dir = std::env::temp_dir().join(format!("enscribi_theme_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("enscribi.edj"), b"").unwrap();

        let cfg = Config {
            theme_dirs: vec![PathBuf::from("/nonexistent"), dir.clone()],
            ..Config::default()
        };
        assert_eq!(cfg.theme_find("enscribi"), Some(dir.join("enscribi.edj")));
        assert_eq!(cfg.theme_find("missing"), None);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
