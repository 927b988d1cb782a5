//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::Config;
use std::path::PathBuf;

/// TOML array of quoted strings
fn string_array<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let quoted: Vec<String> = items
        .into_iter()
        .map(|s| format!("{:?}", s.as_ref()))
        .collect();
    format!("[{}]", quoted.join(", "))
}

fn path_array(paths: &[PathBuf]) -> String {
    string_array(paths.iter().map(|p| p.to_string_lossy().into_owned()))
}

impl Config {
    /// Render the effective configuration as a commented config file
    pub fn to_toml(&self) -> String {
        let scheme = match &self.color_scheme {
            Some(name) => format!("color_scheme = {:?}", name),
            None => "# color_scheme = \"Night\"".to_string(),
        };

        format!(
            r#"# harbor configuration

# Theme name: a directory under one of theme_dirs, or a bundled theme
theme = {theme:?}

# Colour scheme from the theme's #schemes (first one when unset)
{scheme}

# Where themes live (one sub-directory per theme, each with theme.json)
theme_dirs = {theme_dirs}

# Extra search paths for fonts, images and sounds (after the theme directory)
resource_dirs = {resource_dirs}

# Output surface in pixels (HARBOR_SCREEN=WxH overrides)
screen_width = {width}
screen_height = {height}

# Capability tokens added to the detected ones (HARBOR_CAPS overrides)
capabilities = {capabilities}

# Input normalizer
[input]
dead_zone = {dead_zone}                # of 32767
trigger_threshold = {trigger}
repeat_delay_ms = {repeat_delay}
repeat_interval_ms = {repeat_interval}
repeatable = {repeatable}

# Logging configuration (RUST_LOG env var overrides)
[logging]
level = {log_level:?}
# File logging (in addition to the preview buffer or stderr)
file_enabled = {log_file_enabled}
file_dir = {log_file_dir:?}
file_rotation = "{log_file_rotation}"  # hourly, daily, never
file_prefix = {log_file_prefix:?}
"#,
            theme = self.theme,
            scheme = scheme,
            theme_dirs = path_array(&self.theme_dirs),
            resource_dirs = path_array(&self.resource_dirs),
            width = self.screen_width,
            height = self.screen_height,
            capabilities = string_array(&self.capabilities),
            dead_zone = self.input.dead_zone,
            trigger = self.input.trigger_threshold,
            repeat_delay = self.input.repeat_delay_ms,
            repeat_interval = self.input.repeat_interval_ms,
            repeatable = string_array(self.input.repeatable.iter().map(|b| b.as_str())),
            log_level = self.logging.level,
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = self.logging.file_dir.to_string_lossy(),
            log_file_rotation = self.logging.file_rotation.as_str(),
            log_file_prefix = self.logging.file_prefix,
        )
    }
}
