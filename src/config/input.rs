//! Input normalizer settings: analog thresholds and key repeat

use serde::Deserialize;

use crate::input::{Button, InputSettings};

/// Input configuration
#[derive(Debug, Clone, PartialEq)]
pub struct InputConfig {
    /// Stick deflection (of 32767) below which a direction is not held
    pub dead_zone: i32,
    /// Trigger travel (of 32767) at which L2/R2 count as pressed
    pub trigger_threshold: i32,
    /// Hold time before a repeatable button starts repeating
    pub repeat_delay_ms: u64,
    /// Time between synthetic presses once repeating
    pub repeat_interval_ms: u64,
    /// Buttons that repeat while held
    pub repeatable: Vec<Button>,
}

impl Default for InputConfig {
    fn default() -> Self {
        let settings = InputSettings::default();
        Self {
            dead_zone: settings.dead_zone,
            trigger_threshold: settings.trigger_threshold,
            repeat_delay_ms: settings.repeat_delay_ms,
            repeat_interval_ms: settings.repeat_interval_ms,
            repeatable: settings.repeatable,
        }
    }
}

/// Input settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct FileInput {
    pub dead_zone: Option<i32>,
    pub trigger_threshold: Option<i32>,
    pub repeat_delay_ms: Option<u64>,
    pub repeat_interval_ms: Option<u64>,
    /// Canonical names, e.g. `["UP", "DOWN", "L1"]`
    pub repeatable: Option<Vec<Button>>,
}

impl InputConfig {
    /// Create from file config with defaults
    pub fn from_file(file: Option<FileInput>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            dead_zone: file.dead_zone.unwrap_or(defaults.dead_zone),
            trigger_threshold: file.trigger_threshold.unwrap_or(defaults.trigger_threshold),
            repeat_delay_ms: file.repeat_delay_ms.unwrap_or(defaults.repeat_delay_ms),
            repeat_interval_ms: file
                .repeat_interval_ms
                .unwrap_or(defaults.repeat_interval_ms),
            repeatable: file.repeatable.unwrap_or(defaults.repeatable),
        }
    }

    pub fn settings(&self) -> InputSettings {
        InputSettings {
            dead_zone: self.dead_zone,
            trigger_threshold: self.trigger_threshold,
            repeat_delay_ms: self.repeat_delay_ms,
            repeat_interval_ms: self.repeat_interval_ms,
            repeatable: self.repeatable.clone(),
        }
    }
}
