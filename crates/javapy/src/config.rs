//! Configuration for javapy.
//!
//! Loaded from `.javapy/config.toml` in the working directory. Every field is
//! optional; flags on the command line win over the file.
//!
//! Example config.toml:
//! ```toml
//! [convert]
//! indent_width = 2
//! naming_convention = "as_is"
//!
//! [history]
//! capacity = 50
//! ```

use anyhow::Context;
use javapy_convert::ConversionOptions;
use javapy_convert::history::DEFAULT_CAPACITY;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Project-relative location of the config file.
pub const CONFIG_PATH: &str = ".javapy/config.toml";

/// History configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct HistoryConfig {
    /// Conversions remembered before the oldest is dropped.
    pub capacity: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct JavapyConfig {
    pub convert: ConversionOptions,
    pub history: HistoryConfig,
}

impl JavapyConfig {
    /// Load configuration for a project root.
    ///
    /// A missing file gives defaults; an unreadable or malformed one is
    /// reported and also gives defaults.
    pub fn load(root: &Path) -> Self {
        let path = root.join(CONFIG_PATH);
        match Self::load_file(&path) {
            Ok(Some(config)) => {
                tracing::debug!(path = %path.display(), "loaded config");
                config
            }
            Ok(None) => Self::default(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %format!("{e:#}"), "ignoring config");
                Self::default()
            }
        }
    }

    fn load_file(path: &Path) -> anyhow::Result<Option<Self>> {
        if !path.is_file() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        Ok(Some(config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use javapy_convert::NamingConvention;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, body: &str) {
        let config_dir = dir.path().join(".javapy");
        std::fs::create_dir_all(&config_dir).unwrap();
        std::fs::write(config_dir.join("config.toml"), body).unwrap();
    }

    #[test]
    fn test_missing_config_is_default() {
        let dir = TempDir::new().unwrap();
        assert_eq!(JavapyConfig::load(dir.path()), JavapyConfig::default());
    }

    #[test]
    fn test_partial_config() {
        let dir = TempDir::new().unwrap();
        write_config(
            &dir,
            r#"
[convert]
indent_width = 2
naming_convention = "as_is"
"#,
        );
        let config = JavapyConfig::load(dir.path());
        assert_eq!(config.convert.indent_width, 2);
        assert_eq!(config.convert.naming_convention, NamingConvention::AsIs);
        assert!(config.convert.include_comments);
        assert_eq!(config.history.capacity, DEFAULT_CAPACITY);
    }

    #[test]
    fn test_malformed_config_falls_back() {
        let dir = TempDir::new().unwrap();
        write_config(&dir, "[convert\nindent_width = ");
        assert_eq!(JavapyConfig::load(dir.path()), JavapyConfig::default());
    }
}
