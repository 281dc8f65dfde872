use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The flat toggle object the settings panel edits.
///
/// `enabled` is the master toggle: when it is false, no alert channel may
/// activate regardless of the individual toggles.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default = "default_on")]
    pub enabled: bool,

    #[serde(default = "default_on")]
    pub enable_reminder: bool,

    #[serde(default)]
    pub enable_notification: bool,

    #[serde(default)]
    pub enable_tick_sound: bool,

    #[serde(default = "default_tick_sound")]
    pub tick_sound_path: String,
}

fn default_on() -> bool {
    true
}

fn default_tick_sound() -> String {
    "tick.wav".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enabled: default_on(),
            enable_reminder: default_on(),
            enable_notification: false,
            enable_tick_sound: false,
            tick_sound_path: default_tick_sound(),
        }
    }
}

/// Persistence stays an injected capability: the controller only asks for a
/// save, it never controls where or when the data lands.
pub trait SettingsStore: Send {
    fn load(&self) -> Result<Settings>;
    fn save(&self, settings: &Settings) -> Result<()>;
}

/// JSON file store under the user's config directory.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store at the default location (~/.config/reminderd/settings.json)
    pub fn default_location() -> Result<Self> {
        Ok(Self::new(settings_path()?))
    }
}

impl SettingsStore for JsonFileStore {
    fn load(&self) -> Result<Settings> {
        if !self.path.exists() {
            tracing::info!(
                "Settings file not found at {:?}, creating defaults",
                self.path
            );
            let settings = Settings::default();
            self.save(&settings)?;
            return Ok(settings);
        }

        let contents = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read settings file: {:?}", self.path))?;

        let settings: Settings = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse settings file: {:?}", self.path))?;

        tracing::info!("Loaded settings from {:?}", self.path);
        Ok(settings)
    }

    fn save(&self, settings: &Settings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create settings directory: {:?}", parent))?;
        }

        let contents =
            serde_json::to_string_pretty(settings).context("Failed to serialize settings")?;

        std::fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write settings file: {:?}", self.path))?;

        tracing::debug!("Saved settings to {:?}", self.path);
        Ok(())
    }
}

/// Get the path to the settings file
fn settings_path() -> Result<PathBuf> {
    let config_dir = if let Ok(dir) = std::env::var("XDG_CONFIG_HOME") {
        PathBuf::from(dir)
    } else {
        let home = std::env::var("HOME").context("HOME environment variable not set")?;
        PathBuf::from(home).join(".config")
    };

    Ok(config_dir.join("reminderd").join("settings.json"))
}
