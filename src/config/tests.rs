//! Configuration tests
//!
//! The round-trip tests double as guards: a field added to `Config` but not
//! to `to_toml()` or `FileConfig` breaks them.

use super::*;
use crate::input::Button;
use std::collections::HashMap;

fn no_env(_: &str) -> Option<String> {
    None
}

fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

fn parse(toml_str: &str) -> FileConfig {
    toml::from_str(toml_str).expect("valid config toml")
}

// ─────────────────────────────────────────────────────────────────────────────
// Round-trip tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_config_roundtrip_default() {
    let config = Config::default();
    let toml_str = config.to_toml();

    let parsed: Result<FileConfig, _> = toml::from_str(&toml_str);
    assert!(
        parsed.is_ok(),
        "Default config should round-trip.\nTOML:\n{}\nError: {:?}",
        toml_str,
        parsed.err()
    );
    let back = Config::from_layers(parsed.unwrap(), no_env).unwrap();
    assert_eq!(back.theme, config.theme);
    assert_eq!(back.color_scheme, None);
    assert_eq!(back.input, config.input);
    assert_eq!(back.logging, config.logging);
}

#[test]
fn test_config_roundtrip_custom() {
    let mut config = Config::default();
    config.theme = "Night Owl".to_string();
    config.color_scheme = Some("Ember".to_string());
    config.resource_dirs = vec![PathBuf::from("/usr/share/harbor")];
    config.capabilities = vec!["desktop".to_string(), "wide".to_string()];
    config.input.repeatable = vec![Button::Up, Button::Down];
    config.logging.file_rotation = LogRotation::Hourly;

    let back = Config::from_layers(parse(&config.to_toml()), no_env).unwrap();
    assert_eq!(back.theme, "Night Owl");
    assert_eq!(back.color_scheme.as_deref(), Some("Ember"));
    assert_eq!(back.resource_dirs, config.resource_dirs);
    assert_eq!(back.capabilities, config.capabilities);
    assert_eq!(back.input.repeatable, vec![Button::Up, Button::Down]);
    assert_eq!(back.logging.file_rotation, LogRotation::Hourly);
}

// ─────────────────────────────────────────────────────────────────────────────
// Precedence
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_defaults_without_file_or_env() {
    let config = Config::from_layers(FileConfig::default(), no_env).unwrap();
    assert_eq!(config.theme, "default");
    assert_eq!((config.screen_width, config.screen_height), (640, 480));
    assert_eq!(config.input.dead_zone, 12_000);
    assert_eq!(config.input.repeat_delay_ms, 400);
    assert!(config.input.repeatable.contains(&Button::L1));
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_env_beats_file() {
    let file = parse(
        r#"
theme = "from-file"
color_scheme = "Night"
screen_width = 800
screen_height = 600
capabilities = ["file-cap"]
"#,
    );
    let env = env_of(&[
        ("HARBOR_THEME", "from-env"),
        ("HARBOR_SCREEN", "1280x720"),
        ("HARBOR_CAPS", "desktop, wide,"),
    ]);
    let config = Config::from_layers(file, env).unwrap();

    assert_eq!(config.theme, "from-env");
    assert_eq!(config.color_scheme.as_deref(), Some("Night"));
    assert_eq!((config.screen_width, config.screen_height), (1280, 720));
    assert_eq!(config.capabilities, vec!["desktop", "wide"]);
}

#[test]
fn test_file_sections() {
    let file = parse(
        r#"
[input]
dead_zone = 9000
repeatable = ["L_UP", "L_DOWN"]

[logging]
level = "debug"
file_enabled = true
file_rotation = "never"
"#,
    );
    let config = Config::from_layers(file, no_env).unwrap();
    assert_eq!(config.input.dead_zone, 9000);
    assert_eq!(config.input.trigger_threshold, 8000);
    assert_eq!(config.input.repeatable, vec![Button::LUp, Button::LDown]);
    assert_eq!(config.input.settings().dead_zone, 9000);
    assert_eq!(config.logging.level, "debug");
    assert!(config.logging.file_enabled);
    assert_eq!(config.logging.file_rotation, LogRotation::Never);
    assert_eq!(config.logging.file_prefix, "harbor");
}

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_bad_screen_env_is_an_error() {
    for bad in ["1280", "axb", "0x480", "2147483647x480"] {
        let env = env_of(&[("HARBOR_SCREEN", bad)]);
        assert!(
            Config::from_layers(FileConfig::default(), env).is_err(),
            "{} should be rejected",
            bad
        );
    }
}

#[test]
fn test_unknown_keys_and_buttons_fail_to_parse() {
    assert!(toml::from_str::<FileConfig>("theme_name = \"x\"").is_err());
    assert!(toml::from_str::<FileConfig>("[input]\nrepeatable = [\"JUMP\"]").is_err());
}

#[test]
fn test_log_rotation_parse() {
    assert_eq!(LogRotation::parse("HOURLY"), LogRotation::Hourly);
    assert_eq!(LogRotation::parse("weekly"), LogRotation::Daily);
}
