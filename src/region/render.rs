// Drawing collaborator
//
// Regions never touch pixels. They describe what goes where in surface
// pixels and a `Renderer` turns that into output: the terminal preview maps
// it onto character cells, a real frontend would rasterize it.

use super::color::Color;
use super::config::ImageMode;
use crate::geometry::Rect;
use std::path::{Path, PathBuf};

/// Text measurement, needed before layout
pub trait TextMeasure {
    /// Rendered (width, height) of one line of text in pixels
    fn measure(&self, text: &str, font: Option<&Path>, size: u32) -> (i32, i32);
}

/// One line of text placed on the surface
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub font: Option<PathBuf>,
    pub size: u32,
    pub color: Color,
    /// Where the line lands, already aligned and scrolled
    pub dest: Rect,
}

pub trait Renderer: TextMeasure {
    fn fill_rect(&mut self, rect: Rect, color: Color, radius: i32);
    fn outline_rect(&mut self, rect: Rect, color: Color, thickness: i32, radius: i32);
    fn draw_image(&mut self, image: &Path, dest: Rect, mode: ImageMode, slice: Option<[i32; 4]>);
    fn draw_text(&mut self, run: &TextRun);
    /// Restrict drawing to `clip`; `None` lifts the restriction
    fn set_clip(&mut self, clip: Option<Rect>);
}

/// Fixed-advance measurement: every glyph is `size / 2` wide, lines are `size` tall
#[derive(Debug, Clone, Copy, Default)]
pub struct MonospaceMeasure;

impl TextMeasure for MonospaceMeasure {
    fn measure(&self, text: &str, _font: Option<&Path>, size: u32) -> (i32, i32) {
        let advance = (size as i32 / 2).max(1);
        let glyphs = unicode_width::UnicodeWidthStr::width(text) as i32;
        (glyphs * advance, size as i32)
    }
}

/// A recorded renderer call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Fill {
        rect: Rect,
        color: Color,
        radius: i32,
    },
    Outline {
        rect: Rect,
        color: Color,
        thickness: i32,
    },
    Image {
        image: PathBuf,
        dest: Rect,
        mode: ImageMode,
    },
    Text(TextRun),
    Clip(Option<Rect>),
}

/// Renderer that only records what it was asked to draw
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub calls: Vec<DrawCall>,
    measure: MonospaceMeasure,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextRun> {
        self.calls.iter().filter_map(|c| match c {
            DrawCall::Text(run) => Some(run),
            _ => None,
        })
    }

    pub fn fills(&self) -> impl Iterator<Item = (Rect, Color)> + '_ {
        self.calls.iter().filter_map(|c| match c {
            DrawCall::Fill { rect, color, .. } => Some((*rect, *color)),
            _ => None,
        })
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl TextMeasure for RecordingRenderer {
    fn measure(&self, text: &str, font: Option<&Path>, size: u32) -> (i32, i32) {
        self.measure.measure(text, font, size)
    }
}

impl Renderer for RecordingRenderer {
    fn fill_rect(&mut self, rect: Rect, color: Color, radius: i32) {
        self.calls.push(DrawCall::Fill {
            rect,
            color,
            radius,
        });
    }

    fn outline_rect(&mut self, rect: Rect, color: Color, thickness: i32, _radius: i32) {
        self.calls.push(DrawCall::Outline {
            rect,
            color,
            thickness,
        });
    }

    fn draw_image(&mut self, image: &Path, dest: Rect, mode: ImageMode, _slice: Option<[i32; 4]>) {
        self.calls.push(DrawCall::Image {
            image: image.to_path_buf(),
            dest,
            mode,
        });
    }

    fn draw_text(&mut self, run: &TextRun) {
        self.calls.push(DrawCall::Text(run.clone()));
    }

    fn set_clip(&mut self, clip: Option<Rect>) {
        self.calls.push(DrawCall::Clip(clip));
    }
}

/// Greedy word wrap to `max_width` pixels; explicit newlines always break
pub fn wrap_text(
    measure: &dyn TextMeasure,
    text: &str,
    font: Option<&Path>,
    size: u32,
    max_width: i32,
) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if line.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", line, word)
            };
            if line.is_empty() || measure.measure(&candidate, font, size).0 <= max_width {
                line = candidate;
            } else {
                lines.push(std::mem::replace(&mut line, word.to_string()));
            }
        }
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monospace_measure_counts_display_width() {
        let m = MonospaceMeasure;
        assert_eq!(m.measure("abcd", None, 20), (40, 20));
        assert_eq!(m.measure("", None, 20), (0, 20));
    }

    #[test]
    fn wrap_breaks_on_words_and_newlines() {
        let m = MonospaceMeasure;
        // 10px per glyph at size 20: 70px fits 7 glyphs
        let lines = wrap_text(&m, "one two three\nfour", None, 20, 70);
        assert_eq!(lines, vec!["one two", "three", "four"]);
    }

    #[test]
    fn overlong_word_gets_its_own_line() {
        let m = MonospaceMeasure;
        let lines = wrap_text(&m, "a supercalifragilistic b", None, 20, 30);
        assert_eq!(lines, vec!["a", "supercalifragilistic", "b"]);
    }

    #[test]
    fn recorder_keeps_call_order() {
        let mut r = RecordingRenderer::new();
        r.fill_rect(Rect::new(0, 0, 1, 1), Color::BLACK, 0);
        r.set_clip(None);
        assert_eq!(r.calls.len(), 2);
        assert_eq!(r.fills().count(), 1);
    }
}
