//! Locator Configuration
//!
//! Matching and reader settings stored in TOML format.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::LocateResult;
use crate::matching::{HomophoneTable, Matcher, DEFAULT_CONFIDENCE_THRESHOLD};

/// Locator settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LocatorConfig {
    /// Fuzzy matching settings
    pub matching: MatchingConfig,
    /// Screen reading settings
    pub reader: ReaderConfig,
}

/// Fuzzy matching settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Minimum score for a match, in (0, 1]
    pub confidence_threshold: f64,
    /// Homophone groups replacing the built-in ones
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homophones: Option<Vec<Vec<String>>>,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            homophones: None,
        }
    }
}

/// Screen reading settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    /// Half the side of the square read around a point, in pixels
    pub radius: u32,
    /// White border the OCR backend pads around its input, in pixels
    pub margin: u32,
    /// Factor by which the OCR backend upscales its input
    pub resize_factor: u32,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            radius: 100,
            margin: 0,
            resize_factor: 1,
        }
    }
}

impl LocatorConfig {
    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        self.matcher()?;
        if self.reader.resize_factor == 0 {
            anyhow::bail!("resize_factor must be at least 1");
        }
        Ok(())
    }

    /// Homophone table for these settings
    pub fn homophone_table(&self) -> HomophoneTable {
        match &self.matching.homophones {
            Some(groups) => HomophoneTable::new(groups.iter().filter(|group| {
                if group.len() < 2 {
                    warn!("Ignoring homophone group with fewer than two members: {:?}", group);
                    return false;
                }
                true
            })),
            None => HomophoneTable::default(),
        }
    }

    /// Matcher for these settings
    pub fn matcher(&self) -> LocateResult<Matcher> {
        Matcher::new(
            self.matching.confidence_threshold,
            Arc::new(self.homophone_table()),
        )
    }
}

/// Default configuration file location
pub fn default_config_path() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "screenlocate", "ScreenLocate")
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

    Ok(proj_dirs.config_dir().join("config.toml"))
}

/// Load configuration from file
pub fn load_config(path: &Path) -> Result<LocatorConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {:?}", path))?;
    let config: LocatorConfig =
        toml::from_str(&content).with_context(|| format!("Failed to parse config {:?}", path))?;
    config.validate()?;
    info!("Loaded configuration from {:?}", path);
    Ok(config)
}

/// Save configuration to file
pub fn save_config(config: &LocatorConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = LocatorConfig::default();

        assert!((config.matching.confidence_threshold - 0.75).abs() < 1e-12);
        assert!(config.matching.homophones.is_none());

        assert_eq!(config.reader.radius, 100);
        assert_eq!(config.reader.margin, 0);
        assert_eq!(config.reader.resize_factor, 1);

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let mut config = LocatorConfig::default();
        config.matching.homophones = Some(vec![vec!["right".to_string(), "write".to_string()]]);

        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: LocatorConfig = toml::from_str(&toml_str).unwrap();

        assert_eq!(parsed.matching.homophones, config.matching.homophones);
        assert_eq!(parsed.reader, config.reader);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let parsed: LocatorConfig = toml::from_str("[matching]\nconfidence_threshold = 0.9\n").unwrap();
        assert!((parsed.matching.confidence_threshold - 0.9).abs() < 1e-12);
        assert_eq!(parsed.reader, ReaderConfig::default());

        let empty: LocatorConfig = toml::from_str("").unwrap();
        assert_eq!(empty.reader.radius, 100);
    }

    #[test]
    fn test_custom_homophones() {
        let mut config = LocatorConfig::default();
        config.matching.homophones = Some(vec![vec!["Right".to_string(), "write".to_string()]]);

        let table = config.homophone_table();
        assert!(table.expand("right").contains(&"write"));
        assert!(!table.expand("4").contains(&"for"));

        assert!(LocatorConfig::default()
            .homophone_table()
            .expand("4")
            .contains(&"for"));
    }

    #[test]
    fn test_single_member_homophone_groups_ignored() {
        let mut config = LocatorConfig::default();
        config.matching.homophones = Some(vec![
            vec!["ok".to_string()],
            vec!["a".to_string(), "b".to_string()],
            vec![],
        ]);

        let table = config.homophone_table();
        assert_eq!(table.len(), 2);
        assert_eq!(table.expand("ok"), vec!["ok"]);
        assert_eq!(table.expand("a"), vec!["a", "b"]);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = LocatorConfig::default();
        config.matching.confidence_threshold = 1.2;
        assert!(config.validate().is_err());

        let mut config = LocatorConfig::default();
        config.reader.resize_factor = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_and_load_config() {
        let mut config = LocatorConfig::default();
        config.matching.confidence_threshold = 0.8;
        config.reader.margin = 50;
        config.reader.resize_factor = 2;

        let temp_file = NamedTempFile::new().unwrap();
        save_config(&config, temp_file.path()).unwrap();

        let loaded = load_config(temp_file.path()).unwrap();
        assert!((loaded.matching.confidence_threshold - 0.8).abs() < 1e-12);
        assert_eq!(loaded.reader, config.reader);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config(Path::new("/nonexistent/path/config.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "this is not valid toml {{{{").unwrap();

        let result = load_config(temp_file.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_out_of_range() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "[matching]\nconfidence_threshold = 0.0").unwrap();

        assert!(load_config(temp_file.path()).is_err());
    }

    #[test]
    fn test_default_config_path() {
        if let Ok(path) = default_config_path() {
            assert!(path.ends_with("config.toml"));
        }
    }
}
