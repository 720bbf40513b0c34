//! Controller settings

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::attack::AttackConfig;
use crate::error::SettingsError;
use crate::session::KnownRadio;
use crate::sweep::DEFAULT_CAPTURE_DURATION;

/// Controller settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ControlSettings {
    /// Radio platform passed to discovery
    pub platform: String,
    /// Directory holding the engine-side procedures, relative to the
    /// working directory unless absolute
    pub procedure_root: PathBuf,
    /// Capture duration for sweeps (engine-defined unit)
    #[serde(default = "default_capture_duration")]
    pub capture_duration: f64,
    /// Radios offered for discovery besides auto-select
    #[serde(default)]
    pub known_radios: Vec<KnownRadio>,
    /// Attack parameters offered by default
    #[serde(default)]
    pub default_attack: AttackConfig,
}

fn default_capture_duration() -> f64 {
    DEFAULT_CAPTURE_DURATION
}

impl Default for ControlSettings {
    fn default() -> Self {
        Self {
            platform: "B210".to_string(),
            procedure_root: PathBuf::from("MATLAB"),
            capture_duration: DEFAULT_CAPTURE_DURATION,
            known_radios: vec![
                KnownRadio {
                    label: "USRP B210".to_string(),
                    serial_number: "8000748".to_string(),
                },
                KnownRadio {
                    label: "USRP B210".to_string(),
                    serial_number: "8000758".to_string(),
                },
            ],
            default_attack: AttackConfig::default(),
        }
    }
}

impl ControlSettings {
    /// Get the XDG config directory for ssb-jam
    /// Uses $XDG_CONFIG_HOME/ssb-jam, falls back to ~/.config/ssb-jam
    fn config_dir() -> Option<PathBuf> {
        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_config);
            if path.is_absolute() {
                return Some(path.join("ssb-jam"));
            }
        }

        dirs::home_dir().map(|h| h.join(".config").join("ssb-jam"))
    }

    /// Get the settings file path
    pub fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("settings.json"))
    }

    /// Load settings from the default location, falling back to defaults
    pub fn load() -> Self {
        match Self::settings_path() {
            Some(path) => Self::load_from(&path).unwrap_or_else(|e| {
                debug!("Using default settings ({}): {}", path.display(), e);
                Self::default()
            }),
            None => Self::default(),
        }
    }

    /// Load settings from a specific file
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Save settings to the default location
    pub fn save(&self) -> Result<(), SettingsError> {
        let path = Self::settings_path().ok_or(SettingsError::NoConfigDir)?;
        self.save_to(&path)
    }

    /// Save settings to a specific file
    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Procedure root made absolute against the working directory
    pub fn resolved_procedure_root(&self) -> PathBuf {
        if self.procedure_root.is_absolute() {
            return self.procedure_root.clone();
        }
        match std::env::current_dir() {
            Ok(cwd) => cwd.join(&self.procedure_root),
            Err(e) => {
                warn!("Cannot read working directory: {}", e);
                self.procedure_root.clone()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attack::AttackMode;

    fn scratch_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("ssb-control-{}-{}", name, std::process::id()))
    }

    #[test]
    fn test_defaults() {
        let settings = ControlSettings::default();
        assert_eq!(settings.platform, "B210");
        assert_eq!(settings.capture_duration, 40.0);
        assert_eq!(settings.known_radios.len(), 2);
        assert_eq!(settings.default_attack.frequency_hz, 1_857_850_000);
    }

    #[test]
    fn test_save_and_load() {
        let dir = scratch_dir("save");
        let path = dir.join("nested").join("settings.json");

        let mut settings = ControlSettings::default();
        settings.default_attack.mode = AttackMode::Ofdm;
        settings.capture_duration = 20.0;
        settings.save_to(&path).unwrap();

        assert_eq!(ControlSettings::load_from(&path).unwrap(), settings);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let json = r#"{ "platform": "B200", "procedure_root": "/srv/ssb" }"#;
        let settings: ControlSettings = serde_json::from_str(json).unwrap();

        assert_eq!(settings.platform, "B200");
        assert_eq!(settings.capture_duration, 40.0);
        assert!(settings.known_radios.is_empty());
        assert_eq!(settings.default_attack, AttackConfig::default());
    }

    #[test]
    fn test_load_missing_file() {
        let path = scratch_dir("missing").join("settings.json");
        assert!(matches!(
            ControlSettings::load_from(&path),
            Err(SettingsError::Io(_))
        ));
    }

    #[test]
    fn test_resolved_root_is_absolute() {
        let settings = ControlSettings::default();
        assert!(settings.resolved_procedure_root().is_absolute());
        assert!(settings.resolved_procedure_root().ends_with("MATLAB"));
    }
}
