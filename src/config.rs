// SPDX-License-Identifier: GPL-3.0-only

//! Persistent application settings
//!
//! Settings are stored as JSON under the user's config directory
//! (`~/.config/viewfinder/config.json` on Linux). Loading never fails the
//! application: a missing or unreadable file yields the defaults.

use crate::constants::defaults;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, warn};

/// Folder and file names under the config directory
const CONFIG_DIR_NAME: &str = "viewfinder";
const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Last used camera device identifier
    pub last_device_id: Option<String>,
    /// Requested capture width
    pub capture_width: u32,
    /// Requested capture height
    pub capture_height: u32,
    /// Requested capture framerate
    pub framerate: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            last_device_id: None,
            capture_width: defaults::WIDTH,
            capture_height: defaults::HEIGHT,
            framerate: defaults::FRAMERATE,
        }
    }
}

impl Config {
    /// Load settings from disk, falling back to defaults
    pub fn load() -> Self {
        let Some(path) = config_path() else {
            warn!("No config directory available, using defaults");
            return Self::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    debug!(path = %path.display(), "Loaded config");
                    config
                }
                Err(e) => {
                    warn!(error = %e, path = %path.display(), "Config unreadable, using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                // First run: no file yet
                debug!(path = %path.display(), "No config file, using defaults");
                Self::default()
            }
        }
    }

    /// Write settings to disk
    pub fn save(&self) -> std::io::Result<()> {
        let Some(path) = config_path() else {
            return Err(std::io::Error::other("no config directory available"));
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(&path, contents)?;
        debug!(path = %path.display(), "Saved config");
        Ok(())
    }
}

/// Path of the config file, if a config directory exists
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.last_device_id, None);
        assert_eq!(config.capture_width, 1280);
        assert_eq!(config.capture_height, 720);
        assert_eq!(config.framerate, 30);
    }

    #[test]
    fn test_json_roundtrip() {
        let config = Config {
            last_device_id: Some("/dev/video2".to_string()),
            capture_width: 1920,
            capture_height: 1080,
            framerate: 60,
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let back: Config = serde_json::from_str(r#"{"capture_width": 640}"#).unwrap();
        assert_eq!(back.capture_width, 640);
        assert_eq!(back.capture_height, 720);
        assert_eq!(back.framerate, 30);
    }
}
