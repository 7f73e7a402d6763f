//! Application configuration that extends the base `Config` from core.
//!
//! This configuration includes:
//! - All theme and message options from `enscribi_core::Config` (flattened via serde)
//! - The outer layout group and how many input slots it holds
//! - Keyboard window settings handed to the host at startup
//!
//! # Example
//!
//! ```rust
//! use enscribi::AppConfig;
//!
//! let config = AppConfig::default();
//! assert_eq!(config.slot_count, 3);
//! ```

use enscribi_core::{Error, Result, WindowSetup, WindowState};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base configuration fields (theme, slot group, message ids)
    #[serde(flatten)]
    pub base: enscribi_core::Config,

    /// Theme group of the outer keyboard layout
    pub layout_group: String,

    /// Number of input slots swallowed into the layout (`input/1`..`input/N`)
    pub slot_count: usize,

    pub window: WindowConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: i32,
    pub height: i32,
    pub title: String,
    pub name: String,
    pub class: String,
    pub skip_taskbar: bool,
    pub skip_pager: bool,
    /// Advertise the window to the window manager as a virtual keyboard
    pub virtual_keyboard: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base: enscribi_core::Config::default(),
            layout_group: "enscribi/kbd".to_string(),
            slot_count: 3,
            window: WindowConfig::default(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 480,
            height: 160,
            title: "Virtual Keyboard".to_string(),
            name: "Enscribi".to_string(),
            class: "Virtual-Keyboard".to_string(),
            skip_taskbar: true,
            skip_pager: true,
            virtual_keyboard: true,
        }
    }
}

impl AppConfig {
    pub fn load_toml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.slot_count == 0 {
            return Err(Error::InvalidConfig("slot_count must be at least 1".to_string()));
        }
        if self.window.width <= 0 || self.window.height <= 0 {
            return Err(Error::InvalidConfig(format!(
                "window size {}x{} is not drawable",
                self.window.width, self.window.height
            )));
        }
        Ok(())
    }

    /// Get a reference to the base config
    pub fn base(&self) -> &enscribi_core::Config {
        &self.base
    }
}

impl WindowConfig {
    pub fn setup(&self) -> WindowSetup {
        let mut states = Vec::new();
        if self.skip_taskbar {
            states.push(WindowState::SkipTaskbar);
        }
        if self.skip_pager {
            states.push(WindowState::SkipPager);
        }
        WindowSetup {
            title: self.title.clone(),
            name: self.name.clone(),
            class: self.class.clone(),
            width: self.width,
            height: self.height,
            states,
            virtual_keyboard: self.virtual_keyboard,
        }
    }
}
