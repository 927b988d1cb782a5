// Region: one themed rectangle on a screen
//
// Built once per screen activation from a composed attribute map. The typed
// config never changes after that; what changes frame to frame is the
// selection, the bar selection and the auto-scroll offset.
//
// Content kinds, drawn in this order inside the bordered area:
// - text: aligned block of lines, optionally wrapped, optionally scrolled
// - list: paged rows with a highlighted selection; with `autoscroll` the
//   selected row's text scrolls horizontally when it does not fit
// - bar: left and right item groups with their own selection (`selectedx`);
//   a region with both a list and a bar draws the bar in the selected row

use super::audio::AudioSink;
use super::color::{Color, Pallet};
use super::config::{RegionConfig, ScrollAxis};
use super::list::{bar_len, layout_bar, list_select, page_size, page_start};
use super::render::{wrap_text, Renderer, TextMeasure, TextRun};
use super::resources::ResourceLocator;
use super::scroll::{scroll_align, AutoScroll, ScrollTiming};
use crate::geometry::{Anchor, Edge, NamedRects, Rect, ROOT};
use crate::input::{Button, EventManager};
use crate::theme::{Result, ThemeMap};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Everything a region needs while it is being built
pub struct RegionEnv<'a> {
    pub rects: &'a mut NamedRects,
    pub pallet: &'a Pallet,
    pub resources: &'a ResourceLocator,
    pub measure: &'a dyn TextMeasure,
    pub now_ms: u64,
}

/// Something a focused region reports back to its screen
#[derive(Debug, Clone, PartialEq)]
pub enum RegionEvent {
    SelectionChanged {
        region: String,
        index: usize,
    },
    BarSelectionChanged {
        region: String,
        index: usize,
    },
    Activated {
        region: String,
        /// Selected list row, or bar item for bar-only regions
        index: Option<usize>,
        option: Option<Value>,
    },
}

impl std::fmt::Display for RegionEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SelectionChanged { region, index } => write!(f, "{}: selected {}", region, index),
            Self::BarSelectionChanged { region, index } => {
                write!(f, "{}: bar item {}", region, index)
            }
            Self::Activated {
                region,
                index,
                option,
            } => {
                write!(f, "{}: activated", region)?;
                if let Some(index) = index {
                    write!(f, " {}", index)?;
                }
                if let Some(option) = option {
                    write!(f, " ({})", option)?;
                }
                Ok(())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct ListItem {
    text: String,
    option: Option<Value>,
    selectable: bool,
    width: i32,
}

#[derive(Debug, Clone, PartialEq)]
struct TextLine {
    text: String,
    width: i32,
}

#[derive(Debug, Clone)]
pub struct Region {
    name: String,
    config: RegionConfig,
    area: Rect,

    font: Option<PathBuf>,
    image: Option<PathBuf>,
    select_sound: Option<PathBuf>,
    activate_sound: Option<PathBuf>,
    music: Option<PathBuf>,

    line_height: i32,
    text: Option<String>,
    lines: Vec<TextLine>,
    items: Vec<ListItem>,

    scroll: AutoScroll,
    selected: usize,
    selectedx: usize,
    page_size: usize,
}

impl Region {
    pub fn new(screen: &str, name: &str, attrs: &ThemeMap, env: &mut RegionEnv<'_>) -> Result<Self> {
        let config = RegionConfig::from_attrs(screen, name, attrs, env.pallet)?;

        let parent = config.parent.as_deref().unwrap_or(ROOT);
        let area = env.rects.resolve(parent, Some(name), &config.area);

        let find = |asset: &Option<String>| asset.as_deref().and_then(|a| env.resources.find(a));
        let font = find(&config.font);
        let image = find(&config.image);
        let select_sound = find(&config.select_sound);
        let activate_sound = find(&config.activate_sound);
        let music = find(&config.music);

        let line_height = env
            .measure
            .measure("Ag", font.as_deref(), config.font_size)
            .1
            .max(1);
        let scroll = AutoScroll::new(
            config.autoscroll,
            ScrollTiming {
                speed_ms: config.scroll_speed,
                amount: config.scroll_amount,
                start_delay_ms: config.scroll_delay[0],
                end_delay_ms: config.scroll_delay[1],
            },
            env.now_ms,
        );

        let mut region = Self {
            name: name.to_string(),
            area,
            font,
            image,
            select_sound,
            activate_sound,
            music,
            line_height,
            text: config.text.clone(),
            lines: Vec::new(),
            items: Vec::new(),
            scroll,
            selected: 0,
            selectedx: 0,
            page_size: 1,
            config,
        };

        region.layout_text(env.measure, env.now_ms);
        let (list, options) = (region.config.list.clone(), region.config.options.clone());
        let selected = region.config.selected;
        region.set_list(list, options, env.measure, env.now_ms);
        region.select(selected, 1, env.now_ms);
        region.selectedx = region
            .config
            .selectedx
            .min(bar_len(&region.config.bar).saturating_sub(1));

        tracing::debug!(screen, region = name, area = %region.area, "built region");
        Ok(region)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &RegionConfig {
        &self.config
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    /// Area minus the configured borders
    pub fn inner(&self) -> Rect {
        self.area.inset(self.config.border_x, self.config.border_y)
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|l| l.text.as_str())
    }

    pub fn list_len(&self) -> usize {
        self.items.len()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selectedx(&self) -> usize {
        self.selectedx
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// First visible list row
    pub fn page_start(&self) -> usize {
        page_start(self.selected, self.items.len(), self.page_size)
    }

    pub fn scroll(&self) -> &AutoScroll {
        &self.scroll
    }

    pub fn music(&self) -> Option<&Path> {
        self.music.as_deref()
    }

    pub fn has_focus(&self) -> bool {
        self.config.focus
    }

    // ─────────────────────────────────────────────────────────────────────
    // Content
    // ─────────────────────────────────────────────────────────────────────

    /// Replace the text and restart scrolling
    pub fn set_text(&mut self, text: Option<String>, measure: &dyn TextMeasure, now_ms: u64) {
        self.text = text;
        self.layout_text(measure, now_ms);
    }

    /// Replace the list; `options` marks which rows can be selected
    pub fn set_list(
        &mut self,
        list: Vec<String>,
        options: Option<Vec<Value>>,
        measure: &dyn TextMeasure,
        now_ms: u64,
    ) {
        let font = self.font.as_deref();
        let size = self.config.font_size;
        self.items = list
            .into_iter()
            .enumerate()
            .map(|(i, text)| {
                let option = options.as_ref().and_then(|o| o.get(i)).cloned();
                let selectable = match &options {
                    None => true,
                    Some(_) => option.as_ref().is_some_and(|o| !o.is_null()),
                };
                ListItem {
                    width: measure.measure(&text, font, size).0,
                    option: option.filter(|o| !o.is_null()),
                    selectable,
                    text,
                }
            })
            .collect();
        self.page_size = page_size(self.inner().height(), self.config.item_size);
        let current = self.selected;
        self.select(current, 1, now_ms);
    }

    fn layout_text(&mut self, measure: &dyn TextMeasure, now_ms: u64) {
        let font = self.font.as_deref();
        let size = self.config.font_size;
        let inner = self.inner();

        let raw: Vec<String> = match &self.text {
            None => Vec::new(),
            Some(text) if self.config.wrap => wrap_text(measure, text, font, size, inner.width()),
            Some(text) => text.split('\n').map(str::to_string).collect(),
        };
        self.lines = raw
            .into_iter()
            .map(|text| TextLine {
                width: measure.measure(&text, font, size).0,
                text,
            })
            .collect();

        if self.text.is_some() {
            let (content, viewport) = self.text_extent();
            self.scroll.set_extent(content, viewport, now_ms);
            self.scroll.reset(now_ms);
        }
    }

    /// (content, viewport) of the text block along the scroll axis
    fn text_extent(&self) -> (i32, i32) {
        let inner = self.inner();
        match self.config.scroll_axis {
            ScrollAxis::Horizontal => (
                self.lines.iter().map(|l| l.width).max().unwrap_or(0),
                inner.width(),
            ),
            ScrollAxis::Vertical => (
                self.lines.len() as i32 * self.line_height,
                inner.height(),
            ),
        }
    }

    fn selectable(&self) -> Vec<bool> {
        self.items.iter().map(|i| i.selectable).collect()
    }

    /// Move the list selection; returns whether it changed
    fn select(&mut self, index: usize, direction: isize, now_ms: u64) -> bool {
        self.select_from(index as isize, direction, true, now_ms)
    }

    fn select_from(&mut self, index: isize, direction: isize, clamp: bool, now_ms: u64) -> bool {
        let allow_wrap = self.config.allow_wrap && !clamp;
        let Some(next) = list_select(&self.selectable(), index, direction, allow_wrap) else {
            self.selected = 0;
            return false;
        };
        let changed = next != self.selected;
        self.selected = next;
        if self.text.is_none() {
            // the selected row is what scrolls
            let width = self.items[next].width;
            self.scroll.set_extent(width, self.inner().width(), now_ms);
            if changed {
                self.scroll.reset(now_ms);
            }
        }
        changed
    }

    // ─────────────────────────────────────────────────────────────────────
    // Frame
    // ─────────────────────────────────────────────────────────────────────

    /// Consume this frame's input (if focused) and advance animation
    pub fn update(&mut self, input: &EventManager, audio: &mut dyn AudioSink) -> Vec<RegionEvent> {
        let now = input.now_ms();
        let mut events = Vec::new();

        if self.config.focus {
            self.handle_input(input, audio, now, &mut events);
        }

        self.scroll.step(now);
        events
    }

    fn handle_input(
        &mut self,
        input: &EventManager,
        audio: &mut dyn AudioSink,
        now: u64,
        events: &mut Vec<RegionEvent>,
    ) {
        let pressed = |a: Button, b: Button| input.was_pressed(a) || input.was_pressed(b);

        if !self.items.is_empty() {
            let current = self.selected as isize;
            let page = self.page_size as isize;
            let moved = if pressed(Button::Up, Button::LUp) {
                self.select_from(current - 1, -1, false, now)
            } else if pressed(Button::Down, Button::LDown) {
                self.select_from(current + 1, 1, false, now)
            } else if input.was_pressed(Button::L1) {
                self.select_from(current - page, -1, true, now)
            } else if input.was_pressed(Button::R1) {
                self.select_from(current + page, 1, true, now)
            } else {
                false
            };
            if moved {
                self.play(audio, self.select_sound.clone());
                events.push(RegionEvent::SelectionChanged {
                    region: self.name.clone(),
                    index: self.selected,
                });
            }
        }

        let bar = bar_len(&self.config.bar);
        if bar > 0 {
            let step = if pressed(Button::Left, Button::LLeft) {
                -1
            } else if pressed(Button::Right, Button::LRight) {
                1
            } else {
                0
            };
            if step != 0 {
                let all = vec![true; bar];
                let next = list_select(
                    &all,
                    self.selectedx as isize + step,
                    step,
                    self.config.allow_wrap,
                )
                .unwrap_or(0);
                if next != self.selectedx {
                    self.selectedx = next;
                    self.play(audio, self.select_sound.clone());
                    events.push(RegionEvent::BarSelectionChanged {
                        region: self.name.clone(),
                        index: next,
                    });
                }
            }
        }

        if input.was_pressed(Button::A) {
            let (index, option) = if !self.items.is_empty() {
                let item = &self.items[self.selected];
                (Some(self.selected), item.option.clone())
            } else if bar > 0 {
                (Some(self.selectedx), None)
            } else {
                (None, None)
            };
            self.play(audio, self.activate_sound.clone());
            events.push(RegionEvent::Activated {
                region: self.name.clone(),
                index,
                option,
            });
        }
    }

    fn play(&self, audio: &mut dyn AudioSink, sound: Option<PathBuf>) {
        if let Some(sound) = sound {
            audio.play_sound(&sound);
        }
    }

    pub fn draw(&self, renderer: &mut dyn Renderer) {
        let c = &self.config;
        if let Some(fill) = c.fill {
            renderer.fill_rect(self.area, fill, c.roundness);
        }
        if let Some(image) = &self.image {
            renderer.draw_image(image, self.area, c.image_mode, c.image_slice);
        }

        let inner = self.inner();
        renderer.set_clip(Some(inner));
        if !self.lines.is_empty() {
            self.draw_text(renderer, inner);
        }
        if !self.items.is_empty() {
            self.draw_list(renderer, inner);
        } else if !c.bar.is_empty() {
            self.draw_bar(renderer, inner);
        }
        renderer.set_clip(None);

        if let Some(outline) = c.outline {
            renderer.outline_rect(self.area, outline, c.thickness, c.roundness);
        }
    }

    fn run(&self, text: &str, color: Color, dest: Rect) -> TextRun {
        TextRun {
            text: text.to_string(),
            font: self.font.clone(),
            size: self.config.font_size,
            color,
            dest,
        }
    }

    fn draw_text(&self, renderer: &mut dyn Renderer, inner: Rect) {
        let c = &self.config;
        let block_w = self.lines.iter().map(|l| l.width).max().unwrap_or(0);
        let block_h = self.lines.len() as i32 * self.line_height;

        let anchor = if c.autoscroll.is_some() {
            let overflows = match c.scroll_axis {
                ScrollAxis::Horizontal => block_w > inner.width(),
                ScrollAxis::Vertical => block_h > inner.height(),
            };
            scroll_align(c.align, c.scroll_axis, overflows)
        } else {
            c.align
        };

        let (dx, dy) = match c.scroll_axis {
            ScrollAxis::Horizontal => (-self.scroll.pos(), 0),
            ScrollAxis::Vertical => (0, -self.scroll.pos()),
        };
        let block = Rect::new(0, 0, block_w, block_h).with_anchor(anchor, inner.anchor(anchor));

        for (i, line) in self.lines.iter().enumerate() {
            let x = match anchor.horizontal() {
                Edge::Start => block.left(),
                Edge::Middle => block.centerx() - line.width / 2,
                Edge::End => block.right() - line.width,
            };
            let y = block.top() + i as i32 * self.line_height;
            let dest = Rect::new(x, y, line.width, self.line_height).translate(dx, dy);
            renderer.draw_text(&self.run(&line.text, c.font_color, dest));
        }
    }

    fn draw_list(&self, renderer: &mut dyn Renderer, inner: Rect) {
        let c = &self.config;
        let start = self.page_start();
        let end = (start + self.page_size).min(self.items.len());
        let row_anchor = Anchor::from_edges(c.align.horizontal(), Edge::Middle);

        for (row, index) in (start..end).enumerate() {
            let item = &self.items[index];
            let row_rect = Rect::new(
                inner.x(),
                inner.y() + row as i32 * c.item_size,
                inner.width(),
                c.item_size,
            );
            let is_selected = index == self.selected && item.selectable;

            let mut color = c.font_color;
            if is_selected {
                if let Some(fill) = c.select_fill {
                    renderer.fill_rect(row_rect, fill, c.roundness);
                }
                color = c.select_font_color.unwrap_or(c.font_color);
            }

            let overflows = item.width > row_rect.width();
            let scrolling = is_selected && c.autoscroll.is_some() && self.text.is_none();
            let anchor = if scrolling {
                scroll_align(row_anchor, ScrollAxis::Horizontal, overflows)
            } else {
                row_anchor
            };
            let mut dest = Rect::new(0, 0, item.width, self.line_height)
                .with_anchor(anchor, row_rect.anchor(anchor));
            if scrolling {
                dest = dest.translate(-self.scroll.pos(), 0);
            }

            renderer.set_clip(row_rect.intersection(&inner));
            renderer.draw_text(&self.run(&item.text, color, dest));
            renderer.set_clip(Some(inner));

            if is_selected && !c.bar.is_empty() {
                self.draw_bar(renderer, row_rect);
            }
        }
    }

    fn draw_bar(&self, renderer: &mut dyn Renderer, area: Rect) {
        let c = &self.config;
        let font = self.font.as_deref();
        let slots = layout_bar(&c.bar, area, c.bar_spacing, |text| {
            renderer.measure(text, font, c.font_size).0
        });

        for slot in slots {
            let mut color = c.font_color;
            if slot.index == self.selectedx {
                if let Some(fill) = c.select_fill {
                    renderer.fill_rect(slot.rect, fill, c.roundness);
                }
                color = c.select_font_color.unwrap_or(c.font_color);
            }
            let dest = Rect::new(0, 0, slot.rect.width(), self.line_height)
                .with_anchor(Anchor::Center, slot.rect.center());
            renderer.draw_text(&self.run(&slot.text, color, dest));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::input::{Key, RawEvent, ScriptedSource};
    use crate::region::render::{DrawCall, MonospaceMeasure, RecordingRenderer};
    use crate::region::ScrollPhase;
    use crate::theme::{ThemeError, ThemeValue};
    use serde_json::json;

    fn attrs(v: Value) -> ThemeMap {
        match ThemeValue::from(v) {
            ThemeValue::Map(map) => map,
            _ => panic!("expected object"),
        }
    }

    fn build_in(rects: &mut NamedRects, v: Value) -> Result<Region> {
        let pallet = Pallet::default();
        let resources = ResourceLocator::default();
        let measure = MonospaceMeasure;
        let mut env = RegionEnv {
            rects,
            pallet: &pallet,
            resources: &resources,
            measure: &measure,
            now_ms: 0,
        };
        Region::new("main", "menu", &attrs(v), &mut env)
    }

    fn build(v: Value) -> Region {
        let mut rects = NamedRects::new(Rect::new(0, 0, 640, 480));
        build_in(&mut rects, v).unwrap()
    }

    struct Harness {
        input: EventManager,
        source: ScriptedSource,
        clock: ManualClock,
        audio: Sounds,
    }

    #[derive(Default)]
    struct Sounds(Vec<PathBuf>);

    impl AudioSink for Sounds {
        fn play_sound(&mut self, sound: &Path) {
            self.0.push(sound.to_path_buf());
        }
        fn play_music(&mut self, _music: &Path) {}
        fn stop_music(&mut self) {}
    }

    impl Harness {
        fn new() -> Self {
            let source = ScriptedSource::new();
            let clock = ManualClock::new(0);
            let input = EventManager::new(Box::new(source.clone()), Box::new(clock.clone()));
            Self {
                input,
                source,
                clock,
                audio: Sounds::default(),
            }
        }

        /// Tap a key: press this frame, release next frame
        fn tap(&mut self, region: &mut Region, key: Key) -> Vec<RegionEvent> {
            self.source.push([RawEvent::Key { key, pressed: true }]);
            self.input.handle_events();
            let events = region.update(&self.input, &mut self.audio);
            self.source.push([RawEvent::Key {
                key,
                pressed: false,
            }]);
            self.input.handle_events();
            region.update(&self.input, &mut self.audio);
            events
        }

        fn idle(&mut self, region: &mut Region, now: u64) {
            self.clock.set(now);
            self.input.handle_events();
            region.update(&self.input, &mut self.audio);
        }
    }

    #[test]
    fn area_is_resolved_and_registered() {
        let mut rects = NamedRects::new(Rect::new(0, 0, 640, 480));
        let region = build_in(&mut rects, json!({"area": [10, 10, -10, -10]})).unwrap();
        assert_eq!(region.area(), Rect::new(10, 10, 620, 460));
        assert_eq!(rects.get("menu"), Some(Rect::new(10, 10, 620, 460)));
    }

    #[test]
    fn invalid_attribute_fails_at_construction() {
        let mut rects = NamedRects::new(Rect::new(0, 0, 640, 480));
        let err = build_in(&mut rects, json!({"align": "middle"})).unwrap_err();
        assert!(matches!(
            err,
            ThemeError::InvalidAttribute { attribute, .. } if attribute == "align"
        ));
    }

    #[test]
    fn missing_resources_are_not_errors() {
        let region = build(json!({"font": "nope.ttf", "image": "nope.png", "text": "hi"}));
        let mut r = RecordingRenderer::new();
        region.draw(&mut r);
        assert!(!r.calls.iter().any(|c| matches!(c, DrawCall::Image { .. })));
        assert_eq!(r.texts().next().map(|t| t.font.clone()), Some(None));
    }

    #[test]
    fn list_navigation_skips_headers_and_wraps() {
        let mut region = build(json!({
            "list": ["one", "-- header --", "three", "four"],
            "options": ["a", null, "c", "d"],
            "allow-wrap": true,
            "focus": true
        }));
        let mut h = Harness::new();
        assert_eq!(region.selected(), 0);

        let events = h.tap(&mut region, Key::Down);
        assert_eq!(region.selected(), 2);
        assert_eq!(
            events,
            vec![RegionEvent::SelectionChanged {
                region: "menu".into(),
                index: 2
            }]
        );

        h.tap(&mut region, Key::Up);
        assert_eq!(region.selected(), 0);
        h.tap(&mut region, Key::Up);
        assert_eq!(region.selected(), 3);
    }

    #[test]
    fn list_without_wrap_stops_at_the_end() {
        let mut region = build(json!({"list": ["a", "b"], "focus": true}));
        let mut h = Harness::new();
        let events = h.tap(&mut region, Key::Up);
        assert_eq!(region.selected(), 0);
        assert!(events.is_empty());
    }

    #[test]
    fn initial_selection_lands_on_a_selectable_row() {
        let region = build(json!({
            "list": ["h", "a", "b"],
            "options": [null, 1, 2],
            "selected": 0
        }));
        assert_eq!(region.selected(), 1);
    }

    #[test]
    fn unfocused_regions_ignore_input() {
        let mut region = build(json!({"list": ["a", "b"]}));
        let mut h = Harness::new();
        assert!(h.tap(&mut region, Key::Down).is_empty());
        assert_eq!(region.selected(), 0);
    }

    #[test]
    fn activation_reports_the_selected_option() {
        let click = std::env::temp_dir().join(format!("harbor-accept-{}.wav", std::process::id()));
        std::fs::write(&click, b"x").unwrap();

        let mut region = build(json!({
            "list": ["a", "b"],
            "options": [{"id": 1}, {"id": 2}],
            "focus": true,
            "activate-sound": click.to_string_lossy()
        }));
        let mut h = Harness::new();
        h.tap(&mut region, Key::Down);
        let events = h.tap(&mut region, Key::Enter);
        assert_eq!(
            events,
            vec![RegionEvent::Activated {
                region: "menu".into(),
                index: Some(1),
                option: Some(json!({"id": 2})),
            }]
        );
        assert_eq!(h.audio.0, vec![click.clone()]);
        let _ = std::fs::remove_file(click);
    }

    #[test]
    fn pagination_follows_selection() {
        let items: Vec<String> = (0..20).map(|i| format!("item {}", i)).collect();
        let mut region = build(json!({
            "area": [0, 0, 200, 100],
            "item-size": 20,
            "list": items,
            "selected": 10
        }));
        assert_eq!(region.page_size(), 5);
        assert_eq!(region.page_start(), 9);

        let mut r = RecordingRenderer::new();
        region.draw(&mut r);
        let drawn: Vec<String> = r.texts().map(|t| t.text.clone()).collect();
        assert_eq!(drawn, vec!["item 9", "item 10", "item 11", "item 12", "item 13"]);

        region.set_list(vec!["only".into()], None, &MonospaceMeasure, 0);
        assert_eq!(region.selected(), 0);
        assert_eq!(region.page_start(), 0);
    }

    #[test]
    fn bar_selection_moves_left_and_right() {
        let mut region = build(json!({
            "bar": ["Back", null, "Cancel", "OK"],
            "focus": true
        }));
        let mut h = Harness::new();

        let events = h.tap(&mut region, Key::Right);
        assert_eq!(region.selectedx(), 1);
        assert_eq!(
            events,
            vec![RegionEvent::BarSelectionChanged {
                region: "menu".into(),
                index: 1
            }]
        );
        h.tap(&mut region, Key::Right);
        assert!(h.tap(&mut region, Key::Right).is_empty());
        assert_eq!(region.selectedx(), 2);

        let events = h.tap(&mut region, Key::Enter);
        assert!(matches!(
            events.as_slice(),
            [RegionEvent::Activated { index: Some(2), option: None, .. }]
        ));
    }

    #[test]
    fn overflowing_centered_text_scrolls_from_the_left() {
        let mut region = build(json!({
            "area": [0, 0, 100, 40],
            "text": "abcdefghijklmnopqrst",
            "align": "center",
            "autoscroll": "slide",
            "scroll-speed": 10,
            "scroll-amount": 5,
            "scroll-delay": [100, 100]
        }));
        assert_eq!(region.scroll().max(), 100);

        let mut h = Harness::new();
        h.idle(&mut region, 100);
        assert_eq!(region.scroll().phase(), ScrollPhase::Forward);
        h.idle(&mut region, 200);
        assert_eq!(region.scroll().pos(), 50);

        let mut r = RecordingRenderer::new();
        region.draw(&mut r);
        let run = r.texts().next().unwrap();
        assert_eq!(run.dest, Rect::new(-50, 10, 200, 20));
    }

    #[test]
    fn overflowing_centered_text_scrolls_down_from_the_top() {
        let mut region = build(json!({
            "area": [0, 0, 100, 40],
            "text": "ab\ncd\nef\ngh\nij",
            "align": "center",
            "autoscroll": "slide",
            "scroll-axis": "vertical",
            "scroll-speed": 10,
            "scroll-amount": 5,
            "scroll-delay": [100, 100]
        }));
        // five 20px lines in a 40px box
        assert_eq!(region.scroll().max(), 60);

        let mut r = RecordingRenderer::new();
        region.draw(&mut r);
        let first = r.texts().next().unwrap();
        assert_eq!(first.dest, Rect::new(40, 0, 20, 20));

        let mut h = Harness::new();
        h.idle(&mut region, 100);
        h.idle(&mut region, 200);
        assert_eq!(region.scroll().pos(), 50);

        let mut r = RecordingRenderer::new();
        region.draw(&mut r);
        let dests: Vec<Rect> = r.texts().map(|t| t.dest).collect();
        assert_eq!(dests[0], Rect::new(40, -50, 20, 20));
        assert_eq!(dests[4], Rect::new(40, 30, 20, 20));

        h.idle(&mut region, 220);
        assert_eq!(region.scroll().pos(), 60);
        assert_eq!(region.scroll().phase(), ScrollPhase::EndPause);
    }

    #[test]
    fn fitting_centered_text_stays_centered() {
        let region = build(json!({
            "area": [0, 0, 100, 40],
            "text": "abcd",
            "align": "center",
            "autoscroll": "slide"
        }));
        let mut r = RecordingRenderer::new();
        region.draw(&mut r);
        assert_eq!(r.texts().next().unwrap().dest, Rect::new(30, 10, 40, 20));
    }

    #[test]
    fn draw_order_is_fill_content_outline() {
        let region = build(json!({
            "fill": "#000000",
            "outline": "#ffffff",
            "text": "x"
        }));
        let mut r = RecordingRenderer::new();
        region.draw(&mut r);
        assert!(matches!(r.calls.first(), Some(DrawCall::Fill { .. })));
        assert!(matches!(r.calls.last(), Some(DrawCall::Outline { .. })));
        assert!(r.calls.iter().any(|c| matches!(c, DrawCall::Text(_))));
    }

    #[test]
    fn wrapped_text_breaks_into_lines() {
        let region = build(json!({
            "area": [0, 0, 70, 100],
            "text": "one two three",
            "wrap": true
        }));
        assert_eq!(region.lines().collect::<Vec<_>>(), vec!["one two", "three"]);
    }

    #[test]
    fn events_read_well_in_a_status_line() {
        let activated = RegionEvent::Activated {
            region: "menu".into(),
            index: Some(2),
            option: Some(json!("settings")),
        };
        assert_eq!(activated.to_string(), "menu: activated 2 (\"settings\")");
        let moved = RegionEvent::SelectionChanged {
            region: "menu".into(),
            index: 1,
        };
        assert_eq!(moved.to_string(), "menu: selected 1");
    }
}
