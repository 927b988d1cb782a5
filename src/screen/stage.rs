// Stage: one loaded theme composed for one device
//
// Ties the pieces a screen needs together: the composed theme, the rect
// registry composition filled with element areas, and a resource locator
// that searches the theme's own directory before any configured one.

use super::Screen;
use crate::config::Config;
use crate::geometry::{NamedRects, Rect};
use crate::region::{ResourceLocator, TextMeasure};
use crate::theme::{compose, CapabilitySet, ComposedTheme, LoadedTheme, Result};
use std::path::PathBuf;

pub struct Stage {
    pub loaded: LoadedTheme,
    pub theme: ComposedTheme,
    pub rects: NamedRects,
    pub resources: ResourceLocator,
}

impl Stage {
    /// Load and compose the configured theme
    pub fn load(config: &Config) -> Result<Self> {
        let loaded = config.theme_loader().load(&config.theme)?;
        Self::compose(
            loaded,
            &config.capability_set(),
            config.color_scheme.as_deref(),
            Rect::new(0, 0, config.screen_width, config.screen_height),
            &config.resource_dirs,
        )
    }

    pub fn compose(
        loaded: LoadedTheme,
        caps: &CapabilitySet,
        scheme: Option<&str>,
        root: Rect,
        resource_dirs: &[PathBuf],
    ) -> Result<Self> {
        let mut rects = NamedRects::new(root);
        let theme = compose(&loaded.document, caps, scheme, &mut rects)?;

        let search = loaded
            .dir
            .iter()
            .cloned()
            .chain(resource_dirs.iter().cloned())
            .collect();
        let resources = ResourceLocator::new(search).with_aliases(&theme.resources);

        tracing::info!(
            theme = %loaded.name,
            scheme = theme.scheme.as_deref().unwrap_or("-"),
            screens = theme.screens.len(),
            "theme composed"
        );
        Ok(Self {
            loaded,
            theme,
            rects,
            resources,
        })
    }

    /// Build one screen against this stage
    pub fn screen(&self, name: &str, measure: &dyn TextMeasure, now_ms: u64) -> Result<Screen> {
        Screen::build(
            &self.theme,
            name,
            &self.rects,
            &self.resources,
            measure,
            now_ms,
        )
    }

    pub fn screen_names(&self) -> impl Iterator<Item = &str> {
        self.theme.screens.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::MonospaceMeasure;
    use crate::theme::ThemeLoader;

    #[test]
    fn bundled_theme_composes_for_a_desktop() {
        let loaded = ThemeLoader::new(Vec::new()).load("default").unwrap();
        let stage = Stage::compose(
            loaded,
            &CapabilitySet::new(["desktop"]),
            Some("Ember"),
            Rect::new(0, 0, 1280, 720),
            &[PathBuf::from("/nonexistent")],
        )
        .unwrap();

        assert_eq!(stage.theme.scheme.as_deref(), Some("Ember"));
        assert_eq!(stage.rects.root(), Rect::new(0, 0, 1280, 720));
        assert_eq!(stage.resources.search_dirs(), &[PathBuf::from("/nonexistent")]);
        assert!(stage.screen_names().any(|n| n == "main_menu"));

        let screen = stage.screen("main_menu", &MonospaceMeasure, 0).unwrap();
        let menu = screen.region("menu").unwrap();
        // desktop-only item size from the bundled theme
        assert_eq!(menu.config().item_size, 28);
    }
}
