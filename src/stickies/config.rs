use crate::error::{NotesError, Result};
use crate::model::DEFAULT_PALETTE;
use crate::store::notes::DEFAULT_DEBOUNCE_MS;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";

/// Configuration for stickies, stored as config.json next to the note data
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StickiesConfig {
    /// Quiet window for text edits, in milliseconds
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Colors new notes draw from (hex strings like "#f87171")
    #[serde(default = "default_palette")]
    pub palette: Vec<String>,
}

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

fn default_palette() -> Vec<String> {
    DEFAULT_PALETTE.clone()
}

impl Default for StickiesConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            palette: default_palette(),
        }
    }
}

impl StickiesConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(NotesError::Io)?;
        let config: StickiesConfig =
            serde_json::from_str(&content).map_err(NotesError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(NotesError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(NotesError::Serialization)?;
        fs::write(config_path, content).map_err(NotesError::Io)?;
        Ok(())
    }

    /// Get a config value by CLI key name
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "debounce-ms" => Some(self.debounce_ms.to_string()),
            "palette" => Some(self.palette.join(",")),
            _ => None,
        }
    }

    /// Set a config value by CLI key name. Returns a user-facing message on
    /// bad keys or values.
    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            "debounce-ms" => {
                let ms: u64 = value
                    .parse()
                    .map_err(|_| format!("Invalid debounce-ms value: {}", value))?;
                self.debounce_ms = ms;
                Ok(())
            }
            "palette" => {
                let colors: Vec<String> = value
                    .split(',')
                    .map(|c| c.trim().to_string())
                    .filter(|c| !c.is_empty())
                    .collect();
                if colors.is_empty() {
                    return Err("Palette cannot be empty".to_string());
                }
                self.palette = colors;
                Ok(())
            }
            _ => Err(format!("Unknown config key: {}", key)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StickiesConfig::default();
        assert_eq!(config.debounce_ms, 500);
        assert_eq!(config.palette.len(), 5);
    }

    #[test]
    fn test_load_missing_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = StickiesConfig::load(temp_dir.path()).unwrap();
        assert_eq!(config, StickiesConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = tempfile::tempdir().unwrap();

        let mut config = StickiesConfig::default();
        config.debounce_ms = 250;
        config.save(temp_dir.path()).unwrap();

        let loaded = StickiesConfig::load(temp_dir.path()).unwrap();
        assert_eq!(loaded.debounce_ms, 250);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let parsed: StickiesConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, StickiesConfig::default());

        let parsed: StickiesConfig = serde_json::from_str(r#"{"debounce_ms":100}"#).unwrap();
        assert_eq!(parsed.debounce_ms, 100);
        assert_eq!(parsed.palette, StickiesConfig::default().palette);
    }

    #[test]
    fn test_get_and_set_by_key() {
        let mut config = StickiesConfig::default();
        assert_eq!(config.get("debounce-ms").as_deref(), Some("500"));
        assert!(config.get("nope").is_none());

        config.set("debounce-ms", "200").unwrap();
        assert_eq!(config.debounce_ms, 200);
        assert!(config.set("debounce-ms", "fast").is_err());

        config.set("palette", "#111111, #222222").unwrap();
        assert_eq!(config.palette, vec!["#111111", "#222222"]);
        assert!(config.set("palette", " , ").is_err());
    }

    #[test]
    fn test_serialization_roundtrip() {
        let config = StickiesConfig {
            debounce_ms: 750,
            palette: vec!["#ffffff".to_string()],
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: StickiesConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(config, parsed);
    }
}
