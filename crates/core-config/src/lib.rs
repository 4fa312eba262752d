//! Configuration loading and parsing.
//!
//! Reads `ember.toml` (or an override path supplied by the binary). Every key
//! is optional; missing files, unreadable files and parse errors all fall back
//! to defaults so a bad config never keeps the editor from starting. Unknown
//! fields are ignored.
//!
//! ```toml
//! [editor]
//! tab_stop = 8               # clamped to 1..=16
//! quit_times = 3             # extra Ctrl-Q presses needed with unsaved changes
//! message_timeout_secs = 5
//!
//! [input]
//! escape_timeout_ms = 100    # wait for the rest of an escape sequence
//! idle_timeout_ms = 1000     # input poll interval
//! ```

use anyhow::Result;
use serde::Deserialize;
use std::time::Duration;
use std::{fs, path::PathBuf};
use tracing::{info, warn};

pub const CONFIG_FILE: &str = "ember.toml";
pub const APP_DIR: &str = "ember";
pub const TAB_STOP_MAX: u8 = 16;

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    #[serde(default = "EditorConfig::default_tab_stop")]
    pub tab_stop: u8,
    #[serde(default = "EditorConfig::default_quit_times")]
    pub quit_times: u32,
    #[serde(default = "EditorConfig::default_message_timeout_secs")]
    pub message_timeout_secs: u64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tab_stop: Self::default_tab_stop(),
            quit_times: Self::default_quit_times(),
            message_timeout_secs: Self::default_message_timeout_secs(),
        }
    }
}

impl EditorConfig {
    const fn default_tab_stop() -> u8 {
        8
    }
    const fn default_quit_times() -> u32 {
        3
    }
    const fn default_message_timeout_secs() -> u64 {
        5
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct InputConfig {
    #[serde(default = "InputConfig::default_escape_timeout_ms")]
    pub escape_timeout_ms: u64,
    #[serde(default = "InputConfig::default_idle_timeout_ms")]
    pub idle_timeout_ms: u64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            escape_timeout_ms: Self::default_escape_timeout_ms(),
            idle_timeout_ms: Self::default_idle_timeout_ms(),
        }
    }
}

impl InputConfig {
    const fn default_escape_timeout_ms() -> u64 {
        100
    }
    const fn default_idle_timeout_ms() -> u64 {
        1000
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    #[serde(default)]
    pub editor: EditorConfig,
    #[serde(default)]
    pub input: InputConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub file: ConfigFile,
}

/// Config path: `./ember.toml` if present, else the platform config dir.
pub fn discover() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join(APP_DIR).join(CONFIG_FILE);
    }
    local
}

/// Directory for the log file: platform cache dir, else the temp dir.
pub fn log_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR)
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        info!(target: "config", path = %path.display(), "no config file, using defaults");
        return Ok(Config::default());
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => {
            info!(target: "config", path = %path.display(), bytes = content.len(), "loaded");
            Ok(Config { file })
        }
        Err(e) => {
            warn!(target: "config", path = %path.display(), error = %e, "parse failed, using defaults");
            Ok(Config::default())
        }
    }
}

impl Config {
    /// Tab stop clamped to `1..=16`.
    pub fn tab_stop(&self) -> usize {
        let raw = self.file.editor.tab_stop;
        let clamped = raw.clamp(1, TAB_STOP_MAX);
        if clamped != raw {
            info!(target: "config", raw, clamped, "tab_stop_clamped");
        }
        usize::from(clamped)
    }

    pub fn quit_times(&self) -> u32 {
        self.file.editor.quit_times
    }

    pub fn message_ttl(&self) -> Duration {
        Duration::from_secs(self.file.editor.message_timeout_secs)
    }

    pub fn escape_timeout(&self) -> Duration {
        Duration::from_millis(self.file.input.escape_timeout_ms)
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_millis(self.file.input.idle_timeout_ms.max(1))
    }
}
