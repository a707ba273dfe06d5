use crate::css::Selector;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_SELECTOR: &str = "input[type=\"range\"]";
pub const DEFAULT_DISABLED_SELECTOR: &str = ".disabled";
pub const DEFAULT_THUMB_WIDTH: f64 = 15.0;
pub const ENV_PREFIX: &str = "RANGETOUCH";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub selector: Selector,
    pub thumb_width: f64,
    pub add_css: bool,
    pub disabled_selector: Selector,
    pub clamp_to_bounds: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            selector: Selector::new(DEFAULT_SELECTOR),
            thumb_width: DEFAULT_THUMB_WIDTH,
            add_css: true,
            disabled_selector: Selector::new(DEFAULT_DISABLED_SELECTOR),
            clamp_to_bounds: false,
        }
    }
}

impl Settings {
    pub fn for_selector(selector: impl Into<String>) -> Self {
        Self {
            selector: Selector::new(selector),
            ..Self::default()
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("No config directory for rangetouch on this platform")]
    ConfigDirNotFound,
    #[error("Failed to write settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid settings: {0}")]
    Config(#[from] config::ConfigError),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    ProjectDirs::from("org", "rangetouch", "rangetouch")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .ok_or(ConfigError::ConfigDirNotFound)
}

fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    match path {
        Some(p) => Ok(p.to_path_buf()),
        None => get_config_path(),
    }
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX).try_parsing(true)
}

fn build_settings(path: &Path, env: config::Environment) -> Result<Settings, ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(env)
        .build()?
        .try_deserialize()?;
    Ok(settings)
}

/// `RANGETOUCH_*` variables override the file. A missing file is not an error.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, ConfigError> {
    build_settings(&resolve_path(path)?, environment())
}

pub fn load_or_default(path: Option<&Path>) -> Settings {
    match load_settings(path) {
        Ok(settings) => settings,
        Err(e) => {
            log::warn!("Falling back to default settings: {}", e);
            Settings::default()
        }
    }
}

/// Returns the path written to. An existing file is left untouched.
pub fn write_default_config(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    let path = resolve_path(path)?;
    if path.exists() {
        log::debug!("Keeping existing settings file {}", path.display());
        return Ok(path);
    }
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    fs_err::write(&path, DEFAULT_CONFIG)?;
    Ok(path)
}

pub const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[cfg(test)]
mod tests {
    use super::*;

    fn from_toml(toml: &str) -> Settings {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_default_config_matches_defaults() {
        assert_eq!(from_toml(DEFAULT_CONFIG), Settings::default());
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let settings = from_toml("thumb_width = 24\nselector = \".slider\"");
        assert_eq!(settings.thumb_width, 24.0);
        assert_eq!(settings.selector.as_str(), ".slider");
        assert!(settings.add_css);
        assert_eq!(settings.disabled_selector.as_str(), DEFAULT_DISABLED_SELECTOR);
        assert!(!settings.clamp_to_bounds);
    }

    #[test]
    fn test_json_settings_deserialization() {
        let settings: Settings =
            serde_json::from_str(r#"{"add_css": false, "clamp_to_bounds": true}"#).unwrap();
        assert!(!settings.add_css);
        assert!(settings.clamp_to_bounds);
        assert_eq!(settings.selector.as_str(), DEFAULT_SELECTOR);
    }

    fn env(vars: &[(&str, &str)]) -> config::Environment {
        let map = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        environment().source(Some(map))
    }

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("rangetouch-{}-{}", name, std::process::id()));
        fs_err::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_load_settings_from_file() {
        let dir = temp_dir("load");
        let path = dir.join("config.toml");
        fs_err::write(&path, "thumb_width = 30\nadd_css = false\n").unwrap();

        let settings = build_settings(&path, env(&[])).unwrap();
        assert_eq!(settings.thumb_width, 30.0);
        assert!(!settings.add_css);

        fs_err::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let path = std::env::temp_dir().join("rangetouch-does-not-exist.toml");
        assert_eq!(build_settings(&path, env(&[])).unwrap(), Settings::default());
    }

    #[test]
    fn test_environment_layer() {
        let path = std::env::temp_dir().join("rangetouch-does-not-exist.toml");
        let settings = build_settings(
            &path,
            env(&[
                ("RANGETOUCH_THUMB_WIDTH", "20"),
                ("RANGETOUCH_DISABLED_SELECTOR", ".off"),
                ("RANGETOUCH_ADD_CSS", "false"),
                ("OTHER_THUMB_WIDTH", "99"),
            ]),
        )
        .unwrap();
        assert_eq!(settings.thumb_width, 20.0);
        assert_eq!(settings.disabled_selector.as_str(), ".off");
        assert!(!settings.add_css);
        assert_eq!(settings.selector.as_str(), DEFAULT_SELECTOR);
    }

    #[test]
    fn test_environment_overrides_file() {
        let dir = temp_dir("override");
        let path = dir.join("config.toml");
        fs_err::write(&path, "thumb_width = 30\nclamp_to_bounds = true\n").unwrap();

        let settings = build_settings(&path, env(&[("RANGETOUCH_THUMB_WIDTH", "12.5")])).unwrap();
        assert_eq!(settings.thumb_width, 12.5);
        assert!(settings.clamp_to_bounds);

        fs_err::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_write_default_config() {
        let dir = temp_dir("write");
        let path = dir.join("nested").join("config.toml");

        assert_eq!(write_default_config(Some(&path)).unwrap(), path);
        assert_eq!(build_settings(&path, env(&[])).unwrap(), Settings::default());

        fs_err::write(&path, "thumb_width = 40\n").unwrap();
        write_default_config(Some(&path)).unwrap();
        assert_eq!(build_settings(&path, env(&[])).unwrap().thumb_width, 40.0);

        fs_err::remove_dir_all(&dir).unwrap();
    }
}
