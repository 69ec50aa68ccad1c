use std::path::PathBuf;

use anyhow::Result;
use config::{Config, Environment, File};
use directories::ProjectDirs;
use serde::Deserialize;

use crate::models::{DefaultTheme, GeneratorOptions};

pub const DEFAULT_STATE_PREFIX: &str = "proser";

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub generator: GeneratorOptions,
    /// Namespace for session-state keys, e.g. `proser.sourceText`.
    pub state_prefix: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            generator: GeneratorOptions::default(),
            state_prefix: DEFAULT_STATE_PREFIX.to_string(),
        }
    }
}

pub fn config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "proser").map(|dirs| dirs.config_dir().join("config.toml"))
}

impl AppConfig {
    /// Layers the built-in defaults, `config.toml` from the user config directory and
    /// `PROSER__*` environment variables, in that order.
    pub fn load() -> Result<Self> {
        let builder = Self::builder()?;

        let builder = match config_path() {
            Some(path) if path.exists() => builder.add_source(File::from(path)),
            _ => builder,
        };

        Self::finish(builder)
    }

    /// Same layering as [`AppConfig::load`], reading `config.toml` from `path`.
    pub fn load_from(path: impl Into<PathBuf>) -> Result<Self> {
        let builder = Self::builder()?.add_source(File::from(path.into()));
        Self::finish(builder)
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>> {
        Ok(Config::builder()
            .set_default("state_prefix", DEFAULT_STATE_PREFIX)?
            .set_default("generator.default_theme", DefaultTheme::default().name())?)
    }

    fn finish(builder: config::ConfigBuilder<config::builder::DefaultState>) -> Result<Self> {
        let cfg = builder
            .add_source(Environment::with_prefix("PROSER").prefix_separator("__").separator("__"))
            .build()?;

        let app_config: AppConfig = cfg.try_deserialize()?;
        Ok(app_config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn reads_generator_options_from_a_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "state_prefix = \"editor\"\n\n[generator]\ncustom_data_root = \"/srv/paragraphs\"\ndefault_theme = \"Ghost in the Shell\"\n",
        )
        .unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.state_prefix, "editor");
        assert_eq!(config.generator.default_theme, DefaultTheme::GhostInTheShell);
        assert_eq!(
            config.generator.custom_data_root,
            Some(PathBuf::from("/srv/paragraphs"))
        );
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "").unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.state_prefix, DEFAULT_STATE_PREFIX);
        assert_eq!(config.generator, GeneratorOptions::default());
    }

    #[test]
    fn unknown_themes_fail_to_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[generator]\ndefault_theme = \"Moby Dick\"\n").unwrap();

        assert!(AppConfig::load_from(&path).is_err());
    }
}
