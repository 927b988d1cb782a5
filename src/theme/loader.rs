// Theme discovery and loading
//
// A theme is a directory holding `theme.json` plus the fonts and images it
// references:
//
//   ~/.config/harbor/themes/
//     default/theme.json
//     Night_Owl/theme.json
//     Night_Owl/fonts/...
//
// Lookup order for a theme name:
// 1. Each configured theme directory, as-is then with spaces -> underscores
// 2. Themes compiled into the binary
//
// A theme that exists but does not parse is an error, never a silent fallback.

use super::bundled;
use super::document::ThemeDocument;
use super::error::{Result, ThemeError};
use std::path::{Path, PathBuf};

/// File name of a theme inside its directory
pub const THEME_FILE: &str = "theme.json";

/// A parsed theme plus where it came from
#[derive(Debug, Clone)]
pub struct LoadedTheme {
    pub name: String,
    /// Theme directory; `None` for bundled themes
    pub dir: Option<PathBuf>,
    pub document: ThemeDocument,
}

/// Finds themes by name across a list of directories
#[derive(Debug, Clone, Default)]
pub struct ThemeLoader {
    search: Vec<PathBuf>,
}

impl ThemeLoader {
    pub fn new(search: Vec<PathBuf>) -> Self {
        Self { search }
    }

    /// Default user theme directory: ~/.config/harbor/themes
    pub fn user_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".config").join("harbor").join("themes"))
    }

    pub fn search_dirs(&self) -> &[PathBuf] {
        &self.search
    }

    /// Load a theme by name
    pub fn load(&self, name: &str) -> Result<LoadedTheme> {
        let normalized = name.replace(' ', "_");
        for dir in &self.search {
            for candidate in [name, normalized.as_str()] {
                let theme_dir = dir.join(candidate);
                let file = theme_dir.join(THEME_FILE);
                if file.is_file() {
                    tracing::debug!(path = %file.display(), "loading theme");
                    let document = Self::read_document(&file)?;
                    return Ok(LoadedTheme {
                        name: name.to_string(),
                        dir: Some(theme_dir),
                        document,
                    });
                }
            }
        }

        if let Some(theme) = bundled::find(name) {
            tracing::debug!(theme = theme.name, "loading bundled theme");
            return Ok(LoadedTheme {
                name: theme.name.to_string(),
                dir: None,
                document: ThemeDocument::from_json_str(theme.content)?,
            });
        }

        Err(ThemeError::NotFound(name.to_string()))
    }

    /// Load a theme from an explicit `theme.json` path (or its directory)
    pub fn load_path(path: &Path) -> Result<LoadedTheme> {
        let file = if path.is_dir() {
            path.join(THEME_FILE)
        } else {
            path.to_path_buf()
        };
        let document = Self::read_document(&file)?;
        let dir = file.parent().map(Path::to_path_buf);
        let name = dir
            .as_ref()
            .and_then(|d| d.file_name())
            .map(|n| n.to_string_lossy().replace('_', " "))
            .unwrap_or_else(|| file.display().to_string());
        Ok(LoadedTheme {
            name,
            dir,
            document,
        })
    }

    fn read_document(file: &Path) -> Result<ThemeDocument> {
        let text = std::fs::read_to_string(file).map_err(|source| ThemeError::Io {
            path: file.to_path_buf(),
            source,
        })?;
        ThemeDocument::from_json_str(&text)
    }

    /// Names of every theme reachable from the search list, bundled first
    pub fn list_available(&self) -> Vec<String> {
        let mut themes: Vec<String> = bundled::names().map(str::to_string).collect();

        for dir in &self.search {
            let Ok(entries) = std::fs::read_dir(dir) else {
                continue;
            };
            let mut found: Vec<String> = entries
                .flatten()
                .map(|e| e.path())
                .filter(|p| p.join(THEME_FILE).is_file())
                .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().replace('_', " ")))
                .collect();
            found.sort();
            for name in found {
                if !themes.iter().any(|t| t.eq_ignore_ascii_case(&name)) {
                    themes.push(name);
                }
            }
        }

        themes
    }
}

/// Write bundled themes into `dir` on first run so users can copy and edit them
pub fn ensure_themes_extracted(dir: &Path) {
    if std::fs::create_dir_all(dir).is_err() {
        return;
    }

    let marker = dir.join(".extracted_v1");
    if marker.exists() {
        return;
    }

    for theme in bundled::BUNDLED_THEMES {
        let theme_dir = dir.join(theme.name.replace(' ', "_"));
        let file = theme_dir.join(THEME_FILE);
        // never overwrite user edits
        if file.exists() || std::fs::create_dir_all(&theme_dir).is_err() {
            continue;
        }
        if let Err(e) = std::fs::write(&file, theme.content) {
            tracing::warn!(path = %file.display(), error = %e, "could not extract bundled theme");
        }
    }

    let _ = std::fs::write(&marker, "1");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "harbor-loader-{}-{}",
            tag,
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn loads_from_search_dir_with_normalized_name() {
        let root = scratch_dir("normalized");
        let theme_dir = root.join("Night_Owl");
        std::fs::create_dir_all(&theme_dir).unwrap();
        std::fs::write(theme_dir.join(THEME_FILE), r#"{"main": {}}"#).unwrap();

        let loader = ThemeLoader::new(vec![root.clone()]);
        let theme = loader.load("Night Owl").unwrap();
        assert_eq!(theme.dir.as_deref(), Some(theme_dir.as_path()));
        assert_eq!(theme.document.screen_names(), vec!["main"]);

        assert!(loader.list_available().contains(&"Night Owl".to_string()));
        let _ = std::fs::remove_dir_all(root);
    }

    #[test]
    fn broken_theme_is_an_error_not_a_fallback() {
        let root = scratch_dir("broken");
        let theme_dir = root.join("default");
        std::fs::create_dir_all(&theme_dir).unwrap();
        std::fs::write(theme_dir.join(THEME_FILE), "{ nope").unwrap();

        let loader = ThemeLoader::new(vec![root.clone()]);
        assert!(matches!(loader.load("default"), Err(ThemeError::Json(_))));
        let _ = std::fs::remove_dir_all(root);
    }

    #[test]
    fn falls_back_to_bundled_theme() {
        let loader = ThemeLoader::new(Vec::new());
        let theme = loader.load("default").unwrap();
        assert!(theme.dir.is_none());
        assert!(!theme.document.screen_names().is_empty());
    }

    #[test]
    fn unknown_theme_is_not_found() {
        let loader = ThemeLoader::new(Vec::new());
        assert!(matches!(
            loader.load("does-not-exist"),
            Err(ThemeError::NotFound(_))
        ));
    }

    #[test]
    fn extraction_writes_bundled_themes_once() {
        let root = scratch_dir("extract");
        ensure_themes_extracted(&root);
        let file = root.join("default").join(THEME_FILE);
        assert!(file.is_file());

        std::fs::write(&file, "{}").unwrap();
        ensure_themes_extracted(&root);
        assert_eq!(std::fs::read_to_string(&file).unwrap(), "{}");
        let _ = std::fs::remove_dir_all(root);
    }

    #[test]
    fn load_path_accepts_directory() {
        let root = scratch_dir("path");
        let theme_dir = root.join("My_Theme");
        std::fs::create_dir_all(&theme_dir).unwrap();
        std::fs::write(theme_dir.join(THEME_FILE), r##"{"#config": {"name": "x"}}"##).unwrap();

        let theme = ThemeLoader::load_path(&theme_dir).unwrap();
        assert_eq!(theme.name, "My Theme");
        let _ = std::fs::remove_dir_all(root);
    }
}
