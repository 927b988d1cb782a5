//! Configuration for the theme tools
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/harbor/config.toml)
//! 3. Built-in defaults (lowest priority)

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

use crate::geometry::MAX_PIXELS;
use crate::theme::{CapabilitySet, ThemeLoader};

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod input;
mod observability;
mod serialization;

#[cfg(test)]
mod tests;

pub use input::{FileInput, InputConfig};
pub use observability::{FileLogging, LogRotation, LoggingConfig};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_THEME: &str = "default";
const DEFAULT_SCREEN: (i32, i32) = (640, 480);

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Theme name, looked up in `theme_dirs` then among bundled themes
    pub theme: String,

    /// Colour scheme from the theme's `#schemes`; `None` picks the first one
    pub color_scheme: Option<String>,

    /// Directories holding one sub-directory per theme
    pub theme_dirs: Vec<PathBuf>,

    /// Extra directories searched for fonts, images and sounds
    pub resource_dirs: Vec<PathBuf>,

    /// Output surface size in pixels (the root rect)
    pub screen_width: i32,
    pub screen_height: i32,

    /// Capability tokens added to the detected ones
    pub capabilities: Vec<String>,

    /// Input normalizer tuning
    pub input: InputConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME.to_string(),
            color_scheme: None,
            theme_dirs: ThemeLoader::user_dir().into_iter().collect(),
            resource_dirs: Vec::new(),
            screen_width: DEFAULT_SCREEN.0,
            screen_height: DEFAULT_SCREEN.1,
            capabilities: Vec::new(),
            input: InputConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure; every key is optional
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub(crate) struct FileConfig {
    pub theme: Option<String>,
    pub color_scheme: Option<String>,
    pub theme_dirs: Option<Vec<String>>,
    pub resource_dirs: Option<Vec<String>>,
    pub screen_width: Option<i32>,
    pub screen_height: Option<i32>,
    pub capabilities: Option<Vec<String>>,

    /// Optional [input] section
    pub input: Option<FileInput>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

/// Parse `WxH` (e.g. `1280x720`)
fn parse_screen(value: &str) -> Result<(i32, i32)> {
    let (w, h) = value
        .split_once(['x', 'X'])
        .with_context(|| format!("screen size '{}' is not WxH", value))?;
    let w: i32 = w.trim().parse().with_context(|| format!("bad width in '{}'", value))?;
    let h: i32 = h.trim().parse().with_context(|| format!("bad height in '{}'", value))?;
    Ok((w, h))
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the config file path: ~/.config/harbor/config.toml
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("harbor").join("config.toml"))
    }

    /// Create config file with defaults if it doesn't exist
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };
        if path.exists() {
            return;
        }
        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return;
            }
        }
        // config is optional; a failed write just means defaults
        let _ = std::fs::write(&path, Self::default().to_toml());
    }

    /// Overwrite the config file with defaults, returning its path
    pub fn reset() -> Result<PathBuf> {
        let path = Self::config_path().context("no home directory")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        std::fs::write(&path, Self::default().to_toml())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }

    /// Load file config if it exists
    ///
    /// A file that exists but does not parse is an error: a broken config
    /// should fail fast, not silently fall back to defaults.
    fn load_file_config() -> Result<FileConfig> {
        let Some(path) = Self::config_path() else {
            return Ok(FileConfig::default());
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => toml::from_str(&contents).with_context(|| {
                format!(
                    "Failed to parse config file {}\n  \
                     Check for missing quotes, invalid booleans (use true/false) or typos in section names.\n  \
                     Run `harbor config --reset` to start over.",
                    path.display()
                )
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(FileConfig::default()),
            Err(e) => Err(e).with_context(|| format!("Cannot read config file {}", path.display())),
        }
    }

    /// Load configuration: env vars -> file -> defaults
    pub fn from_env() -> Result<Self> {
        let file = Self::load_file_config()?;
        Self::from_layers(file, |key| std::env::var(key).ok())
    }

    /// Merge a parsed file with an environment lookup
    pub(crate) fn from_layers(
        file: FileConfig,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let defaults = Self::default();

        // Theme: env > file > default
        let theme = env("HARBOR_THEME").or(file.theme).unwrap_or(defaults.theme);

        // Colour scheme: env > file > none
        let color_scheme = env("HARBOR_SCHEME").or(file.color_scheme);

        let theme_dirs = file
            .theme_dirs
            .map(|dirs| dirs.into_iter().map(PathBuf::from).collect())
            .unwrap_or(defaults.theme_dirs);
        let resource_dirs = file
            .resource_dirs
            .map(|dirs| dirs.into_iter().map(PathBuf::from).collect())
            .unwrap_or(defaults.resource_dirs);

        // Screen: env (WxH) > file > default
        let (screen_width, screen_height) = match env("HARBOR_SCREEN") {
            Some(value) => parse_screen(&value).context("Invalid HARBOR_SCREEN")?,
            None => (
                file.screen_width.unwrap_or(defaults.screen_width),
                file.screen_height.unwrap_or(defaults.screen_height),
            ),
        };
        let valid = 1..=MAX_PIXELS;
        if !valid.contains(&screen_width) || !valid.contains(&screen_height) {
            bail!(
                "screen size must be within 1..={} on each side, got {}x{}",
                MAX_PIXELS,
                screen_width,
                screen_height
            );
        }

        // Capabilities: env (comma separated) > file > none
        let capabilities = env("HARBOR_CAPS")
            .map(|v| split_list(&v))
            .or(file.capabilities)
            .unwrap_or(defaults.capabilities);

        Ok(Self {
            theme,
            color_scheme,
            theme_dirs,
            resource_dirs,
            screen_width,
            screen_height,
            capabilities,
            input: InputConfig::from_file(file.input),
            logging: LoggingConfig::from_file(file.logging),
        })
    }

    /// Detected capabilities plus the configured extras
    pub fn capability_set(&self) -> CapabilitySet {
        let mut caps = CapabilitySet::detect();
        caps.extend(self.capabilities.iter().cloned());
        caps
    }

    pub fn theme_loader(&self) -> ThemeLoader {
        ThemeLoader::new(self.theme_dirs.clone())
    }
}
