use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

// Default configuration
pub const DEFAULT_PORTRAIT_SIZE: u32 = 36;

/// Display options for the chat decoration pass.
///
/// A pass captures one `Settings` value up front and never re-reads it
/// mid-pass, so a mode switch cannot tear a single message's rendering.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct Settings {
    /// Compact rendering: patch the host markup in place instead of
    /// re-rendering through the message template.
    pub lite_mode: bool,
    /// Tint messages authored by the current player.
    pub highlight_self: bool,
    /// Pixel size of injected portraits in lite mode.
    pub portrait_size: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            lite_mode: false,
            highlight_self: true,
            portrait_size: DEFAULT_PORTRAIT_SIZE,
        }
    }
}

pub fn settings_path() -> Option<PathBuf> {
    if let Some(proj) = ProjectDirs::from("io", "chatweave", "chatweave") {
        let dir = proj.config_dir();
        if let Err(e) = fs::create_dir_all(dir) {
            log::warn!("failed to create config dir: {}", e);
            return None;
        }
        return Some(dir.join("settings.json"));
    }
    None
}

pub fn load_settings() -> Option<Settings> {
    let path = settings_path()?;
    let content = fs::read_to_string(path).ok()?;
    serde_json::from_str(&content).ok()
}

pub fn save_settings(settings: &Settings) -> std::io::Result<()> {
    if let Some(path) = settings_path() {
        let mut file = fs::File::create(path)?;
        let data = serde_json::to_string_pretty(settings).expect("settings serialize");
        file.write_all(data.as_bytes())?;
    }
    Ok(())
}
