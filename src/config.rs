use crate::data::Section;
use crate::display::OutputFormat;
use crate::error::{AboutMacError, Result};
use crate::utils::command::DEFAULT_TIMEOUT;
use crate::utils::file::{expand_path, read_file_safe};
use dirs::config_dir;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

const APP_DIR: &str = "about-this-mac";

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub runner: RunnerConfig,
    pub display: DisplayConfig,
    pub colors: ColorConfig,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct RunnerConfig {
    pub timeout_secs: u64,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

impl RunnerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

/// Defaults for the report layout; command line flags override them.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    pub separator: Option<String>,
    pub format: Option<OutputFormat>,
    pub section: Option<Vec<Section>>,
}

/// Named ANSI colours (`cyan`, `bright_white`, ...) or `#rrggbb`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ColorConfig {
    pub title: String,
    pub key: String,
    pub value: String,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            title: "bright_cyan".to_string(),
            key: "cyan".to_string(),
            value: "reset".to_string(),
        }
    }
}

/// `~/.config/about-this-mac/config.toml` or the platform equivalent.
pub fn default_config_path() -> Option<PathBuf> {
    config_dir().map(|p| p.join(APP_DIR).join("config.toml"))
}

/// Load the configuration. An explicit path must exist; the default
/// location is optional and falls back to built-in defaults.
pub fn load_config(explicit: Option<&str>) -> Result<Config> {
    match explicit {
        Some(path) => {
            let path = expand_path(path);
            if !path.exists() {
                return Err(AboutMacError::Config(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            parse_config_file(&path)
        }
        None => match default_config_path() {
            Some(path) if path.exists() => parse_config_file(&path),
            _ => {
                debug!("no config file, using defaults");
                Ok(Config::default())
            }
        },
    }
}

fn parse_config_file(path: &Path) -> Result<Config> {
    debug!(path = %path.display(), "loading config");
    let data = read_file_safe(path)?;
    parse_config(&data)
        .map_err(|err| AboutMacError::Config(format!("{}: {}", path.display(), err)))
}

pub fn parse_config(data: &str) -> Result<Config> {
    Ok(toml::de::from_str(data)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_file_gives_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.runner.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn partial_file_is_merged_with_defaults() {
        let config = parse_config(
            r##"
[runner]
timeout_secs = 5

[display]
format = "markdown"
section = ["hardware", "battery"]

[colors]
key = "#ff8800"
"##,
        )
        .unwrap();
        assert_eq!(config.runner.timeout_secs, 5);
        assert_eq!(config.display.format, Some(OutputFormat::Markdown));
        assert_eq!(config.display.section, Some(vec![Section::Hardware, Section::Battery]));
        assert_eq!(config.colors.key, "#ff8800");
        assert_eq!(config.colors.title, "bright_cyan");
    }

    #[test]
    fn invalid_toml_is_a_config_error() {
        assert!(matches!(parse_config("[runner\n"), Err(AboutMacError::Config(_))));
    }

    #[test]
    fn explicit_path_is_loaded() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[display]\nseparator = \" = \"").unwrap();
        let config = load_config(file.path().to_str()).unwrap();
        assert_eq!(config.display.separator.as_deref(), Some(" = "));
    }

    #[test]
    fn missing_explicit_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(load_config(missing.to_str()).is_err());
    }
}
