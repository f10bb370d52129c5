use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::session::mode::DrillMode;

const MIN_SWIPE_THRESHOLD: u16 = 2;
const MAX_SWIPE_THRESHOLD: u16 = 40;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_drill_mode")]
    pub drill_mode: String,
    #[serde(default = "default_shuffle")]
    pub shuffle: bool,
    /// Horizontal drag distance, in columns, that counts as a swipe.
    #[serde(default = "default_swipe_threshold")]
    pub swipe_threshold: u16,
    #[serde(default)]
    pub corpus_path: Option<String>,
    #[serde(default)]
    pub data_dir: Option<String>,
}

fn default_theme() -> String {
    "sumi".to_string()
}
fn default_drill_mode() -> String {
    DrillMode::Kimariji.as_str().to_string()
}
fn default_shuffle() -> bool {
    false
}
fn default_swipe_threshold() -> u16 {
    8
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            drill_mode: default_drill_mode(),
            shuffle: default_shuffle(),
            swipe_threshold: default_swipe_threshold(),
            corpus_path: None,
            data_dir: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let mut config: Config = toml::from_str(&content)?;
            config.validate();
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("karuta")
            .join("config.toml")
    }

    pub fn mode(&self) -> DrillMode {
        DrillMode::from_name(&self.drill_mode).unwrap_or(DrillMode::Kimariji)
    }

    pub fn set_mode(&mut self, mode: DrillMode) {
        self.drill_mode = mode.as_str().to_string();
    }

    /// Resets unknown modes to the default and clamps numeric fields.
    /// Call after deserialization to handle hand-edited files.
    pub fn validate(&mut self) {
        if DrillMode::from_name(&self.drill_mode).is_none() {
            self.drill_mode = default_drill_mode();
        }
        self.swipe_threshold = self
            .swipe_threshold
            .clamp(MIN_SWIPE_THRESHOLD, MAX_SWIPE_THRESHOLD);
        if self.corpus_path.as_deref().is_some_and(str::is_empty) {
            self.corpus_path = None;
        }
        if self.data_dir.as_deref().is_some_and(str::is_empty) {
            self.data_dir = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serde_defaults_from_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.theme, "sumi");
        assert_eq!(config.mode(), DrillMode::Kimariji);
        assert!(!config.shuffle);
        assert_eq!(config.swipe_threshold, 8);
        assert!(config.corpus_path.is_none());
    }

    #[test]
    fn test_config_partial_file_keeps_other_defaults() {
        let toml_str = r#"
theme = "washi"
drill_mode = "meaning"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.theme, "washi");
        assert_eq!(config.mode(), DrillMode::Meaning);
        assert_eq!(config.swipe_threshold, 8);
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let mut config = Config::default();
        config.set_mode(DrillMode::Verse);
        config.shuffle = true;
        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(deserialized.mode(), DrillMode::Verse);
        assert!(deserialized.shuffle);
    }

    #[test]
    fn test_validate_resets_unknown_mode() {
        let mut config = Config::default();
        config.drill_mode = "typing".to_string();
        config.validate();
        assert_eq!(config.drill_mode, "kimariji");
    }

    #[test]
    fn test_validate_clamps_swipe_threshold() {
        let mut config = Config::default();
        config.swipe_threshold = 0;
        config.validate();
        assert_eq!(config.swipe_threshold, MIN_SWIPE_THRESHOLD);
        config.swipe_threshold = 500;
        config.validate();
        assert_eq!(config.swipe_threshold, MAX_SWIPE_THRESHOLD);
    }

    #[test]
    fn test_save_to_and_load_from() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        assert_eq!(Config::load_from(&path).unwrap().theme, "sumi");

        let mut config = Config::default();
        config.theme = "washi".to_string();
        config.swipe_threshold = 99;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.theme, "washi");
        assert_eq!(loaded.swipe_threshold, MAX_SWIPE_THRESHOLD);
    }

    #[test]
    fn test_validate_drops_empty_paths() {
        let mut config = Config::default();
        config.corpus_path = Some(String::new());
        config.data_dir = Some(String::new());
        config.validate();
        assert!(config.corpus_path.is_none());
        assert!(config.data_dir.is_none());
    }
}
