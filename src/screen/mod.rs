// Screen: the regions of one composed screen, in z-order
//
// Building walks the composed screen in document order. Each region
// registers its rect under its own name as it is built, so a region can use
// any earlier region (or any `#elements` area) as its parent. A screen owns
// its copy of the rect registry; nothing leaks into the next screen.
//
// One frame: `update` every region (focused ones consume input), then `draw`
// every region front to back in build order.

mod stage;

pub use stage::Stage;

use crate::geometry::NamedRects;
use crate::input::EventManager;
use crate::region::{
    AudioSink, Pallet, Region, RegionEnv, RegionEvent, Renderer, ResourceLocator, TextMeasure,
};
use crate::theme::{ComposedTheme, Result, ThemeError};

pub struct Screen {
    name: String,
    regions: Vec<Region>,
    rects: NamedRects,
}

impl Screen {
    /// Build every region of `name` from a composed theme
    ///
    /// `base_rects` is the registry composition filled (root plus element
    /// areas); it is cloned, not modified.
    pub fn build(
        theme: &ComposedTheme,
        name: &str,
        base_rects: &NamedRects,
        resources: &ResourceLocator,
        measure: &dyn TextMeasure,
        now_ms: u64,
    ) -> Result<Self> {
        let composed = theme.screen(name)?;
        let pallet = Pallet::from_theme(&theme.pallet)?;
        let mut rects = base_rects.clone();

        let mut regions = Vec::with_capacity(composed.len());
        for (region_name, value) in composed {
            let Some(attrs) = value.as_map() else {
                continue;
            };
            let mut env = RegionEnv {
                rects: &mut rects,
                pallet: &pallet,
                resources,
                measure,
                now_ms,
            };
            regions.push(Region::new(name, region_name, attrs, &mut env)?);
        }

        tracing::debug!(screen = name, regions = regions.len(), "built screen");
        Ok(Self {
            name: name.to_string(),
            regions,
            rects,
        })
    }

    /// Fail unless every named region exists
    pub fn require(self, names: &[&str]) -> Result<Self> {
        for wanted in names {
            if self.region(wanted).is_none() {
                return Err(ThemeError::MissingRegion {
                    screen: self.name.clone(),
                    region: wanted.to_string(),
                });
            }
        }
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn region(&self, name: &str) -> Option<&Region> {
        self.regions.iter().find(|r| r.name() == name)
    }

    pub fn region_mut(&mut self, name: &str) -> Option<&mut Region> {
        self.regions.iter_mut().find(|r| r.name() == name)
    }

    /// Rects registered while building, including element areas
    pub fn rects(&self) -> &NamedRects {
        &self.rects
    }

    /// Start the screen's music, if any region names one that exists
    pub fn activate(&self, audio: &mut dyn AudioSink) {
        if let Some(music) = self.regions.iter().find_map(|r| r.music()) {
            audio.play_music(music);
        }
    }

    pub fn deactivate(&self, audio: &mut dyn AudioSink) {
        audio.stop_music();
    }

    pub fn update(&mut self, input: &EventManager, audio: &mut dyn AudioSink) -> Vec<RegionEvent> {
        let mut events = Vec::new();
        for region in &mut self.regions {
            events.extend(region.update(input, audio));
        }
        events
    }

    pub fn draw(&self, renderer: &mut dyn Renderer) {
        for region in &self.regions {
            region.draw(renderer);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::geometry::Rect;
    use crate::input::{Key, RawEvent, ScriptedSource};
    use crate::region::{Color, MonospaceMeasure, NullAudio, RecordingRenderer};
    use crate::theme::{compose, CapabilitySet, ThemeDocument, ThemeLoader};
    use serde_json::json;
    use std::path::Path;

    fn composed(doc: serde_json::Value) -> (ComposedTheme, NamedRects) {
        let doc = ThemeDocument::parse(&doc.into()).unwrap();
        let mut rects = NamedRects::new(Rect::new(0, 0, 640, 480));
        let theme = compose(&doc, &CapabilitySet::default(), None, &mut rects).unwrap();
        (theme, rects)
    }

    fn build(theme: &ComposedTheme, rects: &NamedRects, name: &str) -> Result<Screen> {
        let resources = ResourceLocator::default().with_aliases(&theme.resources);
        Screen::build(theme, name, rects, &resources, &MonospaceMeasure, 0)
    }

    #[test]
    fn regions_parent_on_earlier_regions() {
        let (theme, rects) = composed(json!({
            "#pallet": {"accent": "#ff0000"},
            "main": {
                "panel": {"area": [10, 10, -10, -10], "fill": "accent"},
                "label": {"parent": "panel", "area": [0, 0, 1.0, 20], "text": "hi"}
            }
        }));
        let screen = build(&theme, &rects, "main").unwrap();

        let names: Vec<&str> = screen.regions().iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["panel", "label"]);
        assert_eq!(
            screen.region("label").unwrap().area(),
            Rect::new(10, 10, 620, 20)
        );
        assert!(screen.rects().contains("panel"));
        // the composition registry is untouched
        assert!(!rects.contains("panel"));

        let mut r = RecordingRenderer::new();
        screen.draw(&mut r);
        assert_eq!(
            r.fills().next(),
            Some((Rect::new(10, 10, 620, 460), Color::rgb(255, 0, 0)))
        );
    }

    #[test]
    fn unknown_screen_and_missing_region_are_named_errors() {
        let (theme, rects) = composed(json!({"main": {"title": {}}}));
        assert!(matches!(
            build(&theme, &rects, "settings"),
            Err(ThemeError::UnknownScreen(name)) if name == "settings"
        ));

        let err = build(&theme, &rects, "main")
            .unwrap()
            .require(&["title", "menu"])
            .err()
            .unwrap();
        assert!(matches!(
            err,
            ThemeError::MissingRegion { screen, region } if screen == "main" && region == "menu"
        ));
    }

    #[test]
    fn attribute_errors_surface_from_build() {
        let (theme, rects) = composed(json!({"main": {"title": {"fill": [0, 0, 999]}}}));
        let err = build(&theme, &rects, "main").err().unwrap();
        assert!(matches!(
            err,
            ThemeError::InvalidAttribute { screen, region, attribute, .. }
                if screen == "main" && region == "title" && attribute == "fill"
        ));
    }

    #[test]
    fn bundled_theme_builds_and_navigates() {
        let loaded = ThemeLoader::new(Vec::new()).load("default").unwrap();
        let mut rects = NamedRects::new(Rect::new(0, 0, 640, 480));
        let theme = compose(
            &loaded.document,
            &CapabilitySet::default(),
            None,
            &mut rects,
        )
        .unwrap();
        assert!(rects.contains("header"));

        let mut screen = build(&theme, &rects, "main_menu")
            .unwrap()
            .require(&["menu", "title"])
            .unwrap();

        let source = ScriptedSource::new();
        let clock = ManualClock::new(0);
        let mut input = EventManager::new(Box::new(source.clone()), Box::new(clock));
        let mut audio = NullAudio;

        source.push([RawEvent::Key {
            key: Key::Down,
            pressed: true,
        }]);
        input.handle_events();
        let events = screen.update(&input, &mut audio);
        assert_eq!(
            events,
            vec![RegionEvent::SelectionChanged {
                region: "menu".into(),
                index: 1
            }]
        );

        for screen_name in theme.screens.keys() {
            build(&theme, &rects, screen_name).unwrap();
        }
    }

    #[test]
    fn activation_plays_music_that_exists() {
        struct Music(Vec<String>);
        impl AudioSink for Music {
            fn play_sound(&mut self, _sound: &Path) {}
            fn play_music(&mut self, music: &Path) {
                self.0.push(music.display().to_string());
            }
            fn stop_music(&mut self) {
                self.0.push("stop".into());
            }
        }

        let track = std::env::temp_dir().join(format!("harbor-music-{}.ogg", std::process::id()));
        std::fs::write(&track, b"x").unwrap();
        let (theme, rects) = composed(json!({
            "main": {
                "bg": {"music": "missing.ogg"},
                "fg": {"music": track.to_string_lossy()}
            }
        }));
        let screen = build(&theme, &rects, "main").unwrap();

        let mut audio = Music(Vec::new());
        screen.activate(&mut audio);
        screen.deactivate(&mut audio);
        assert_eq!(audio.0, vec![track.display().to_string(), "stop".to_string()]);
        let _ = std::fs::remove_file(track);
    }
}
