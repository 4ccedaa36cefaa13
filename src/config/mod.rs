//! Tool configuration from `svgnorm.toml`.
//!
//! The file is optional. When `-C/--config` is not given, the default name is
//! searched upward from the current directory; no file means defaults.
//!
//! # Sections
//!
//! | Section       | Purpose                                       |
//! |---------------|-----------------------------------------------|
//! | `[normalize]` | Where normalized documents are written        |
//! | `[gather]`    | Source/output directories and manifest field  |
//!
//! # Example
//!
//! ```toml
//! [normalize]
//! output_dir = "out"
//!
//! [gather]
//! source = "kanjivg/kanji"
//! output = "out/raw"
//! field = "kanji"
//! ```
//!
//! Relative paths are resolved against the directory holding the file.

mod error;
mod util;

pub use error::ConfigError;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::log;
use util::find_config_file;

/// Config file name searched for when none is given.
pub const DEFAULT_CONFIG_NAME: &str = "svgnorm.toml";

/// Root configuration structure representing svgnorm.toml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Absolute path of the loaded file, if any (internal use only)
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    pub normalize: NormalizeConfig,
    pub gather: GatherConfig,
}

/// `[normalize]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeConfig {
    /// Directory for outputs; unset writes next to each input.
    pub output_dir: Option<PathBuf>,
}

/// `[gather]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatherConfig {
    /// Directory of `<hex>.svg` files.
    pub source: Option<PathBuf>,
    /// Destination directory.
    pub output: Option<PathBuf>,
    /// Manifest object field holding the key character.
    pub field: String,
}

impl Default for GatherConfig {
    fn default() -> Self {
        Self {
            source: None,
            output: None,
            field: "kanji".to_string(),
        }
    }
}

impl ToolConfig {
    /// Load configuration.
    ///
    /// An explicit `path` must exist. Without one, [`DEFAULT_CONFIG_NAME`] is
    /// searched upward from cwd and defaults apply when nothing is found.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match find_config_file(Path::new(DEFAULT_CONFIG_NAME)) {
                Some(found) => found,
                None => return Ok(Self::default()),
            },
        };

        let config = Self::from_path(&path)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a config file, resolving relative paths against its
    /// directory.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (mut config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        if let Some(root) = path.parent() {
            config.resolve_paths(root);
        }
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(Self::parse_with_ignored(content)?.0)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        log!("warning"; "unknown fields in {}, ignoring: {}", path.display(), fields.join(", "));
    }

    fn resolve_paths(&mut self, root: &Path) {
        let resolve = |path: &mut Option<PathBuf>| {
            if let Some(p) = path
                && p.is_relative()
            {
                *p = root.join(&*p);
            }
        };
        resolve(&mut self.normalize.output_dir);
        resolve(&mut self.gather.source);
        resolve(&mut self.gather.output);
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.gather.field.trim().is_empty() {
            return Err(ConfigError::Validation(
                "[gather] field must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_empty_uses_defaults() {
        let config = ToolConfig::parse("").unwrap();
        assert_eq!(config, ToolConfig::default());
        assert_eq!(config.gather.field, "kanji");
    }

    #[test]
    fn test_parse_sections() {
        let config = ToolConfig::parse(
            r#"
            [normalize]
            output_dir = "out"

            [gather]
            source = "kanjivg/kanji"
            field = "char"
            "#,
        )
        .unwrap();

        assert_eq!(config.normalize.output_dir, Some(PathBuf::from("out")));
        assert_eq!(config.gather.source, Some(PathBuf::from("kanjivg/kanji")));
        assert_eq!(config.gather.output, None);
        assert_eq!(config.gather.field, "char");
    }

    #[test]
    fn test_parse_collects_unknown_fields() {
        let (_, ignored) =
            ToolConfig::parse_with_ignored("[normalize]\nstroke = 3\n[extra]\na = 1\n").unwrap();
        assert_eq!(ignored.len(), 2);
        assert!(ignored.contains(&"normalize.stroke".to_string()));
    }

    #[test]
    fn test_parse_invalid_toml() {
        assert!(matches!(
            ToolConfig::parse("[normalize"),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn test_from_path_resolves_relative_paths() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(DEFAULT_CONFIG_NAME);
        fs::write(
            &path,
            "[normalize]\noutput_dir = \"out\"\n[gather]\noutput = \"/abs/dir\"\n",
        )
        .unwrap();

        let config = ToolConfig::load(Some(&path)).unwrap();

        assert_eq!(config.normalize.output_dir, Some(temp.path().join("out")));
        assert_eq!(config.gather.output, Some(PathBuf::from("/abs/dir")));
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let err = ToolConfig::load(Some(Path::new("/nonexistent/svgnorm.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io(..)));
    }

    #[test]
    fn test_load_rejects_empty_field() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(DEFAULT_CONFIG_NAME);
        fs::write(&path, "[gather]\nfield = \" \"\n").unwrap();

        assert!(matches!(
            ToolConfig::load(Some(&path)),
            Err(ConfigError::Validation(_))
        ));
    }
}
