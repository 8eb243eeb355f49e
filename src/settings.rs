use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Returns the path to the settings file: `~/.config/ui-cues/settings.json`
pub fn settings_path() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("ui-cues");
    path.push("settings.json");
    path
}

/// Cue playback settings.
///
/// Serialized as JSON to the platform config directory by the host app.
/// Fields use `#[serde(default)]` so that adding new settings
/// won't break existing config files.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CueSettings {
    /// Multiplier applied to every rendered sample (0.0 to 1.0)
    pub master_volume: f32,

    /// Initial mute state when the app starts
    pub start_muted: bool,

    /// How many finished voices may wait for the audio thread
    pub voice_queue_capacity: usize,

    /// Samples kept for the waveform display
    pub monitor_capacity: usize,
}

impl Default for CueSettings {
    fn default() -> Self {
        Self {
            master_volume: 1.0,
            start_muted: false,
            voice_queue_capacity: 64,
            monitor_capacity: 2048,
        }
    }
}

/// Why a settings file could not be read or written
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("settings file unavailable: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings file malformed: {0}")]
    Json(#[from] serde_json::Error),
}

impl CueSettings {
    /// Load settings from the default location, falling back to defaults on any error.
    pub fn load() -> Self {
        Self::load_from(&settings_path())
    }

    /// Load settings from `path`, falling back to defaults on any error.
    pub fn load_from(path: &Path) -> Self {
        match Self::read(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(SettingsError::Io(e)) => {
                log::info!("No settings file found ({}), using defaults", e);
                Self::default()
            }
            Err(e) => {
                log::warn!("{}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Parse `path` and pull every value back into its usable range
    pub fn read(path: &Path) -> Result<Self, SettingsError> {
        let contents = std::fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&contents)?;
        Ok(settings.sanitized())
    }

    fn sanitized(self) -> Self {
        let master_volume = if self.master_volume.is_finite() {
            self.master_volume.clamp(0.0, 1.0)
        } else {
            Self::default().master_volume
        };
        Self {
            master_volume,
            voice_queue_capacity: self.voice_queue_capacity.max(1),
            monitor_capacity: self.monitor_capacity.max(1),
            ..self
        }
    }

    /// Save settings to the default location as pretty JSON.
    pub fn save(&self) {
        self.save_to(&settings_path());
    }

    /// Save settings to `path` as pretty JSON, logging any failure.
    pub fn save_to(&self, path: &Path) {
        if let Err(e) = self.write(path) {
            log::warn!("Failed to save settings to {}: {}", path.display(), e);
        }
    }

    /// Write settings to `path`, creating its directory if needed
    pub fn write(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
