// Bundled themes
//
// Themes compiled into the binary. Each lives in its own module as a JSON
// string so it can be written to the user's theme directory on first run and
// edited from there.

mod default;

pub use default::THEME as DEFAULT;

// ─────────────────────────────────────────────────────────────────────────────
// Bundled theme collection
// ─────────────────────────────────────────────────────────────────────────────

/// Bundled theme: name and JSON content
pub struct BundledTheme {
    pub name: &'static str,
    pub content: &'static str,
}

/// All bundled themes
pub const BUNDLED_THEMES: &[BundledTheme] = &[BundledTheme {
    name: "default",
    content: DEFAULT,
}];

/// Look up a bundled theme, ignoring case and treating `_` like a space
pub fn find(name: &str) -> Option<&'static BundledTheme> {
    let wanted = normalize(name);
    BUNDLED_THEMES.iter().find(|t| normalize(t.name) == wanted)
}

pub fn names() -> impl Iterator<Item = &'static str> {
    BUNDLED_THEMES.iter().map(|t| t.name)
}

fn normalize(name: &str) -> String {
    name.trim().replace('_', " ").to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::document::ThemeDocument;

    #[test]
    fn every_bundled_theme_parses() {
        for theme in BUNDLED_THEMES {
            let doc = ThemeDocument::from_json_str(theme.content)
                .unwrap_or_else(|e| panic!("{}: {}", theme.name, e));
            assert!(!doc.screen_names().is_empty(), "{} has no screens", theme.name);
        }
    }

    #[test]
    fn find_is_case_insensitive() {
        assert!(find("Default").is_some());
        assert!(find("DEFAULT").is_some());
        assert!(find("nope").is_none());
    }
}
