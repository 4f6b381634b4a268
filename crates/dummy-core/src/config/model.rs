use crate::config::consts::DEFAULT_MAX_INCLUDES;
use crate::error::{DummyError, Result};
use crate::template::{EngineOptions, MissingFieldPolicy};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// dummy.toml schema
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub templates: TemplatesConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplatesConfig {
    /// Base directory for templates, relative to the config file
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    #[serde(default)]
    pub missing_field: MissingFieldPolicy,
    #[serde(default = "default_max_includes")]
    pub max_includes: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            missing_field: MissingFieldPolicy::Empty,
            max_includes: DEFAULT_MAX_INCLUDES,
        }
    }
}

fn default_max_includes() -> usize {
    DEFAULT_MAX_INCLUDES
}

impl Config {
    /// Read dummy.toml
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| DummyError::ConfigRead {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| DummyError::ConfigInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Write dummy.toml
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(|e| DummyError::ConfigInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        std::fs::write(path, content).map_err(DummyError::IoError)?;

        Ok(())
    }

    /// Template dir resolved against the directory holding `config_path`
    pub fn template_dir(&self, config_path: &Path) -> Option<PathBuf> {
        let dir = self.templates.dir.as_ref()?;
        if dir.is_absolute() {
            return Some(dir.clone());
        }

        let parent = config_path.parent().unwrap_or_else(|| Path::new(""));
        Some(parent.join(dir))
    }

    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            missing_field: self.render.missing_field,
            max_includes: self.render.max_includes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.engine_options(), EngineOptions::default());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[templates]
dir = "views"

[render]
missing_field = "literal"
max_includes = 16
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.templates.dir, Some(PathBuf::from("views")));
        assert_eq!(config.render.missing_field, MissingFieldPolicy::Literal);
        assert_eq!(config.render.max_includes, 16);
    }

    #[test]
    fn test_parse_rejects_unknown_policy() {
        let toml = r#"
[render]
missing_field = "explode"
"#;
        assert!(toml::from_str::<Config>(toml).is_err());
    }

    #[test]
    fn test_template_dir_relative_to_config() {
        let config = Config {
            templates: TemplatesConfig {
                dir: Some(PathBuf::from("views")),
            },
            ..Config::default()
        };

        assert_eq!(
            config.template_dir(Path::new("site/dummy.toml")),
            Some(PathBuf::from("site/views"))
        );
        assert_eq!(config.template_dir(Path::new("dummy.toml")), Some(PathBuf::from("views")));
        assert_eq!(Config::default().template_dir(Path::new("dummy.toml")), None);
    }

    #[test]
    fn test_round_trip_through_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("dummy.toml");
        let config = Config {
            render: RenderConfig {
                missing_field: MissingFieldPolicy::Literal,
                max_includes: 8,
            },
            ..Config::default()
        };

        config.to_file(&path).unwrap();
        assert_eq!(Config::from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_from_file_missing() {
        let result = Config::from_file("/nonexistent/dummy.toml");
        assert!(matches!(result, Err(DummyError::ConfigRead { .. })));
    }
}
