//! Extraction settings supplied by the editor integration
//!
//! Settings are read from a TOML file:
//!
//! ```toml
//! module_system = "commonjs"
//! file_extensions = ["js", "jsx"]
//! switch_to_target_on_extract = false
//! ```
//!
//! Missing keys fall back to [`ExtractConfig::default`].

use std::fs;
use std::path::Path;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ExtractError, Result};

/// How generated components are exported and imported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ModuleSystem {
    /// `export` / `import`
    #[default]
    Esm,
    /// `module.exports` / `require`
    Commonjs,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ExtractConfig {
    pub module_system: ModuleSystem,
    /// Extensions dropped from generated import specifiers
    pub file_extensions: Vec<String>,
    /// Whether the editor should open the target file after extracting
    pub switch_to_target_on_extract: bool,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            module_system: ModuleSystem::Esm,
            file_extensions: ["js", "jsx", "ts", "tsx"]
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            switch_to_target_on_extract: true,
        }
    }
}

impl ExtractConfig {
    /// Load settings from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ExtractError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let text = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        debug!(path = %path.display(), ?config, "loaded configuration");
        Ok(config)
    }

    /// Load settings from `path` when given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| ExtractError::Config {
            message: e.to_string(),
        })
    }

    /// Whether `ext` (without the dot) is one of the configured extensions
    pub fn is_known_extension(&self, ext: &str) -> bool {
        self.file_extensions
            .iter()
            .any(|known| known.trim_start_matches('.').eq_ignore_ascii_case(ext))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ExtractConfig::default();
        assert_eq!(config.module_system, ModuleSystem::Esm);
        assert!(config.switch_to_target_on_extract);
        assert!(config.is_known_extension("jsx"));
        assert!(!config.is_known_extension("vue"));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ExtractConfig::from_toml_str("module_system = \"commonjs\"").unwrap();
        assert_eq!(config.module_system, ModuleSystem::Commonjs);
        assert!(config.switch_to_target_on_extract);
        assert_eq!(config.file_extensions.len(), 4);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let result = ExtractConfig::from_toml_str("module_system = \"amd\"");
        assert!(matches!(result, Err(ExtractError::Config { .. })));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "file_extensions = [\".js\"]\nswitch_to_target_on_extract = false"
        )
        .unwrap();

        let config = ExtractConfig::load(file.path()).unwrap();
        assert!(!config.switch_to_target_on_extract);
        assert!(config.is_known_extension("js"));
        assert!(!config.is_known_extension("tsx"));
    }

    #[test]
    fn test_missing_file() {
        let result = ExtractConfig::load(Path::new("/definitely/not/here.toml"));
        assert!(matches!(result, Err(ExtractError::FileNotFound { .. })));
    }
}
