//! Loads `Capabilities` and `SessionOptions` overrides from an optional TOML
//! file, following the same "local file first, then platform config dir,
//! then defaults" discovery order as the rest of this stack's configuration
//! loading, with unknown keys reserved rather than rejected.

use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::Deserialize;
use stage_command::Capabilities;
use stage_view::SessionOptions;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CapabilitiesConfig {
    #[serde(default)]
    pub truecolor: bool,
    #[serde(default)]
    pub xterm256: bool,
    #[serde(default)]
    pub unicode: bool,
    #[serde(default = "CapabilitiesConfig::default_width")]
    pub width: u16,
    #[serde(default = "CapabilitiesConfig::default_height")]
    pub height: u16,
    #[serde(default)]
    pub is_tty: bool,
}

impl CapabilitiesConfig {
    const fn default_width() -> u16 {
        80
    }

    const fn default_height() -> u16 {
        24
    }
}

impl Default for CapabilitiesConfig {
    fn default() -> Self {
        Self {
            truecolor: false,
            xterm256: false,
            unicode: false,
            width: Self::default_width(),
            height: Self::default_height(),
            is_tty: false,
        }
    }
}

impl From<CapabilitiesConfig> for Capabilities {
    fn from(config: CapabilitiesConfig) -> Self {
        Capabilities::new(
            config.truecolor,
            config.xterm256,
            config.unicode,
            config.width,
            config.height,
            config.is_tty,
        )
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct SessionOptionsConfig {
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub headless: bool,
    /// Keys this loader doesn't recognize. Reserved rather than rejected, so
    /// a config file ahead of this crate's schema still loads instead of
    /// erroring the whole file out.
    #[serde(default, flatten)]
    pub extra: toml::Table,
}

impl From<SessionOptionsConfig> for SessionOptions {
    fn from(config: SessionOptionsConfig) -> Self {
        let mut options = SessionOptions::new().with_headless(config.headless);
        if let Some(theme) = config.theme {
            options = options.with_theme(theme);
        }
        options.extra = config
            .extra
            .into_iter()
            .map(|(key, value)| (key, value.to_string()))
            .collect();
        options
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct ConfigFile {
    #[serde(default)]
    pub capabilities: CapabilitiesConfig,
    #[serde(default)]
    pub session: SessionOptionsConfig,
}

/// Best-effort config path: a `stage.toml` in the current directory takes
/// precedence over the platform config directory.
pub fn discover() -> PathBuf {
    let local = PathBuf::from("stage.toml");
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("stage").join("stage.toml");
    }
    PathBuf::from("stage.toml")
}

/// Loads `path` (or the discovered default) into a `ConfigFile`. A missing
/// file or a parse error both fall back to defaults rather than failing the
/// caller outright — capability detection is an external collaborator this
/// loader never second-guesses.
pub fn load_from(path: Option<PathBuf>) -> Result<ConfigFile> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        return Ok(ConfigFile::default());
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => Ok(file),
        Err(err) => {
            tracing::warn!(error = %err, path = %path.display(), "failed to parse config file, falling back to defaults");
            Ok(ConfigFile::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_when_file_missing() {
        let file = load_from(Some(PathBuf::from("__nonexistent_stage_config__.toml"))).unwrap();
        assert_eq!(file.capabilities, CapabilitiesConfig::default());
        assert!(file.session.theme.is_none());
    }

    #[test]
    fn parses_capabilities_section() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), "[capabilities]\ntruecolor = true\nwidth = 120\n").unwrap();
        let file = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert!(file.capabilities.truecolor);
        assert_eq!(file.capabilities.width, 120);
        assert_eq!(file.capabilities.height, 24);
    }

    #[test]
    fn unknown_session_keys_are_preserved_in_extra() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), "[session]\ntheme = \"ocean\"\nfuture_flag = true\n").unwrap();
        let file = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(file.session.theme.as_deref(), Some("ocean"));
        assert!(file.session.extra.contains_key("future_flag"));
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), "not valid toml = [").unwrap();
        let file = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(file, ConfigFile::default());
    }

    #[test]
    fn capabilities_config_converts_into_capabilities() {
        let config = CapabilitiesConfig { truecolor: true, xterm256: true, unicode: true, width: 100, height: 40, is_tty: true };
        let capabilities: Capabilities = config.into();
        assert_eq!(capabilities, Capabilities::new(true, true, true, 100, 40, true));
    }

    #[test]
    fn session_options_config_converts_into_session_options() {
        let config = SessionOptionsConfig { theme: Some("ocean".to_string()), headless: true, extra: toml::Table::new() };
        let options: SessionOptions = config.into();
        assert_eq!(options.theme.as_deref(), Some("ocean"));
        assert!(options.headless);
    }
}
