//! enscribi
//!
//! The handwriting keyboard application on top of `enscribi-core`: builds
//! the layout and its input slots, wires the shared recognizer, routes
//! confirmed text to the key injector and layout keys to the host, and
//! reports window-manager mode requests.
//!
//! Public API:
//! - `App` - Keyboard orchestrator and event dispatcher
//! - `AppConfig` - Application configuration, flattening the core `Config`
//! - `Session` - Replay of scripted events on headless collaborators

pub mod app;
pub use app::{App, AppEvent};

pub mod config;
pub use config::{AppConfig, WindowConfig};

pub mod script;
pub use script::{Report, Script, Session, Step};
