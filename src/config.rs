//! Settings file support
//!
//! Loads settings from ~/.chromarc (or %USERPROFILE%\.chromarc on Windows).
//! `CHROMA_CONFIG` names a different file.
//!
//! Format: simple key=value pairs, one per line
//! Lines starting with # are comments
//!
//! Example:
//! ```text
//! # chroma settings
//! margin = 2
//! width = 100
//! color = true
//! theme = ~/.config/chroma/dark.toml
//! plugin.highlight.indent = 4
//! plugin.emoji.enabled = false
//! ```

use std::env;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::error::{ChromaError, Result};
use crate::plugin::{parse_flag, ConfigStore};
use crate::render::RenderOptions;

const FILE_NAME: &str = ".chromarc";
const PLUGIN_PREFIX: &str = "plugin.";

/// A `<plugin>.<key> = value` override
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginSetting {
    pub plugin: String,
    pub key: String,
    pub value: String,
}

impl PluginSetting {
    /// Parse `name.key=value`, as given on the command line
    pub fn parse(spec: &str) -> Result<Self> {
        let invalid = |reason: &str| ChromaError::InvalidSetting {
            key: spec.to_string(),
            value: reason.to_string(),
        };
        let (name, value) = spec
            .split_once('=')
            .ok_or_else(|| invalid("expected plugin.key=value"))?;
        let (plugin, key) = split_plugin_key(name.trim()).ok_or_else(|| invalid("expected plugin.key"))?;
        Ok(Self {
            plugin: plugin.to_string(),
            key: key.to_string(),
            value: value.trim().to_string(),
        })
    }
}

fn split_plugin_key(name: &str) -> Option<(&str, &str)> {
    let (plugin, key) = name.split_once('.')?;
    if plugin.is_empty() || key.is_empty() {
        return None;
    }
    Some((plugin, key))
}

/// Settings from the settings file and environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Blank lines above and spaces left of the output
    pub margin: usize,
    /// Content width; terminal width when unset
    pub width: Option<usize>,
    /// Whether to emit color escapes
    pub color: bool,
    /// Theme file to load
    pub theme: Option<PathBuf>,
    /// Plugin option overrides, in file order
    pub plugins: Vec<PluginSetting>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            margin: 0,
            width: None,
            color: true,
            theme: None,
            plugins: Vec::new(),
        }
    }
}

impl Settings {
    /// Get the settings file path
    pub fn config_path() -> Option<PathBuf> {
        if let Some(path) = env::var_os("CHROMA_CONFIG") {
            return Some(PathBuf::from(path));
        }

        #[cfg(windows)]
        {
            env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(FILE_NAME))
        }

        #[cfg(not(windows))]
        {
            env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(FILE_NAME))
        }
    }

    /// Load settings from the settings file and the environment
    ///
    /// A missing or unreadable file leaves the defaults in place.
    pub fn load() -> Self {
        let mut settings = match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Settings::default(),
        };
        settings.apply_no_color(env::var_os("NO_COLOR").as_deref());
        settings
    }

    /// Load settings from a specific file
    pub fn load_from(path: &Path) -> Self {
        let mut settings = Settings::default();
        match fs::read_to_string(path) {
            Ok(contents) => {
                debug!("loading settings from {}", path.display());
                settings.apply(&Self::parse(&contents));
            }
            Err(e) => debug!("no settings read from {}: {e}", path.display()),
        }
        settings
    }

    /// Parse settings file contents into key-value pairs, in file order
    fn parse(contents: &str) -> Vec<(String, String)> {
        let mut settings = Vec::new();

        for line in contents.lines() {
            let line = line.trim();

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some((key, value)) = line.split_once('=') {
                let key = key.trim().to_lowercase();
                let value = value.trim().to_string();
                settings.push((key, value));
            } else {
                warn!("ignoring settings line without '=': {line}");
            }
        }

        settings
    }

    /// Apply parsed settings; later lines win
    fn apply(&mut self, settings: &[(String, String)]) {
        for (key, value) in settings {
            match key.as_str() {
                "margin" => match value.parse::<usize>() {
                    Ok(n) => self.margin = n,
                    Err(_) => warn!("ignoring margin '{value}': not a number"),
                },
                "width" => match value.parse::<usize>() {
                    Ok(n) => self.width = Some(n),
                    Err(_) => warn!("ignoring width '{value}': not a number"),
                },
                "color" => match parse_flag(value) {
                    Some(flag) => self.color = flag,
                    None => warn!("ignoring color '{value}': not a boolean"),
                },
                "theme" => self.theme = Some(expand_home(value)),
                _ => match key.strip_prefix(PLUGIN_PREFIX).and_then(split_plugin_key) {
                    Some((plugin, name)) => self.plugins.push(PluginSetting {
                        plugin: plugin.to_string(),
                        key: name.to_string(),
                        value: value.clone(),
                    }),
                    None => warn!("unknown setting '{key}'"),
                },
            }
        }
    }

    /// `NO_COLOR` set to anything non-empty turns color off
    fn apply_no_color(&mut self, value: Option<&OsStr>) {
        if value.is_some_and(|v| !v.is_empty()) {
            self.color = false;
        }
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            margin: self.margin,
            width: self.width,
            color_enabled: self.color,
        }
    }

    /// Write plugin overrides into a plugin config store
    pub fn apply_plugin_settings(&self, config: &mut ConfigStore) {
        for setting in &self.plugins {
            config.set(&setting.plugin, &setting.key, &setting.value);
        }
    }
}

/// Expand a leading `~/` to the home directory
fn expand_home(value: &str) -> PathBuf {
    if let Some(rest) = value.strip_prefix("~/") {
        let home = if cfg!(windows) { "USERPROFILE" } else { "HOME" };
        if let Some(home) = env::var_os(home) {
            return PathBuf::from(home).join(rest);
        }
    }
    PathBuf::from(value)
}
