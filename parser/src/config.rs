//! YAML configuration for run discovery.
//!
//! The interaction test harness historically hardcoded its documentation
//! directory and file pattern; this config makes both explicit so report
//! tooling can be pointed at any producer layout.
//!
//! # Example YAML
//!
//! ```yaml
//! version: "1.0"
//! root_dir: results/ai_assistant_documentation
//! file_pattern: "current_test_*.txt"
//! ```

use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::discover::{DEFAULT_FILE_PATTERN, DEFAULT_ROOT_DIR, DiscoverConfig, DiscoverError};

/// Discovery settings loaded from a YAML file.
///
/// # Examples
///
/// ```no_run
/// use interaction_report_parser::config::ReportConfig;
///
/// let config = ReportConfig::load("report.yml").unwrap();
/// let runs = interaction_report_parser::discover::discover_runs(&config.discover_config());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Configuration format version (e.g. `"1.0"`).
    pub version: String,
    /// Directory containing the run log files.
    pub root_dir: PathBuf,
    /// Glob-style file-name pattern for run files.
    pub file_pattern: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            root_dir: PathBuf::from(DEFAULT_ROOT_DIR),
            file_pattern: DEFAULT_FILE_PATTERN.to_string(),
        }
    }
}

impl ReportConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// [`DiscoverError::Io`] if the file cannot be read,
    /// [`DiscoverError::Yaml`] if it does not parse.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DiscoverError> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let config = serde_yaml::from_reader(reader)?;
        Ok(config)
    }

    /// Saves the configuration as YAML.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), DiscoverError> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }

    /// The discovery settings this configuration describes.
    pub fn discover_config(&self) -> DiscoverConfig {
        DiscoverConfig {
            root_dir: self.root_dir.clone(),
            file_pattern: self.file_pattern.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize() {
        let yaml = r#"
version: "1.0"
root_dir: /var/logs/ai_docs
file_pattern: "run_*.txt"
"#;
        let config: ReportConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.root_dir, PathBuf::from("/var/logs/ai_docs"));
        assert_eq!(config.file_pattern, "run_*.txt");
    }

    #[test]
    fn test_defaults_match_producer_layout() {
        let config = ReportConfig::default();
        assert_eq!(config.root_dir, PathBuf::from(DEFAULT_ROOT_DIR));
        assert_eq!(config.file_pattern, DEFAULT_FILE_PATTERN);
    }

    #[test]
    fn test_load_save_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.yml");

        let original = ReportConfig {
            version: "1.0".to_string(),
            root_dir: PathBuf::from("/tmp/docs"),
            file_pattern: "current_test_?.txt".to_string(),
        };
        original.save(&path).unwrap();

        let loaded = ReportConfig::load(&path).unwrap();
        assert_eq!(loaded.version, original.version);
        assert_eq!(loaded.root_dir, original.root_dir);
        assert_eq!(loaded.file_pattern, original.file_pattern);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = ReportConfig::load("/nonexistent/report.yml").unwrap_err();
        assert!(matches!(err, DiscoverError::Io(_)));
    }

    #[test]
    fn test_malformed_yaml_is_yaml_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.yml");
        std::fs::write(&path, "version: [unclosed").unwrap();
        let err = ReportConfig::load(&path).unwrap_err();
        assert!(matches!(err, DiscoverError::Yaml(_)));
    }
}
