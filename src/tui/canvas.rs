// Cell canvas - a `Renderer` that paints regions into a ratatui buffer
//
// Regions think in surface pixels. The canvas divides the surface into a
// grid of `cell_w` x `cell_h` pixel cells, one per terminal character, and
// snaps every rect to that grid. Text is measured as one cell per column so
// layout, wrapping and scrolling line up with what lands on screen.

use crate::geometry::Rect;
use crate::region::{Color, ImageMode, Renderer, TextMeasure, TextRun};
use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect as Area};
use ratatui::style::Color as CellColor;
use std::path::Path;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Pixel size of one terminal cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellScale {
    pub cell_w: i32,
    pub cell_h: i32,
}

impl CellScale {
    /// Scale that fits a `width` x `height` surface into `area`
    pub fn fit(width: i32, height: i32, area: Area) -> Self {
        let cols = i32::from(area.width.max(1));
        let rows = i32::from(area.height.max(1));
        Self {
            cell_w: ((width + cols - 1) / cols).max(1),
            cell_h: ((height + rows - 1) / rows).max(1),
        }
    }

    /// Cell span covered by `len` pixels starting at `start`
    ///
    /// Anything with a non-zero size covers at least one cell.
    fn span(start: i32, len: i32, unit: i32) -> (i32, i32) {
        let from = (start + unit / 2).div_euclid(unit);
        let mut to = (start + len + unit / 2).div_euclid(unit);
        if len > 0 && to <= from {
            to = from + 1;
        }
        (from, to)
    }

    /// Columns `[x0, x1)` and rows `[y0, y1)` covered by `rect`
    fn cells(&self, rect: Rect) -> (i32, i32, i32, i32) {
        let (x0, x1) = Self::span(rect.x(), rect.width(), self.cell_w);
        let (y0, y1) = Self::span(rect.y(), rect.height(), self.cell_h);
        (x0, x1, y0, y1)
    }
}

impl TextMeasure for CellScale {
    fn measure(&self, text: &str, _font: Option<&Path>, _size: u32) -> (i32, i32) {
        (text.width() as i32 * self.cell_w, self.cell_h)
    }
}

fn cell_color(color: Color) -> CellColor {
    CellColor::Rgb(color.r, color.g, color.b)
}

/// Mix `over` onto `under` using `over`'s alpha
fn blend(under: CellColor, over: Color) -> CellColor {
    if over.a == u8::MAX {
        return cell_color(over);
    }
    let (r, g, b) = match under {
        CellColor::Rgb(r, g, b) => (r, g, b),
        _ => (0, 0, 0),
    };
    let mix = |a: u8, b: u8| -> u8 {
        let alpha = u16::from(over.a);
        ((u16::from(a) * (255 - alpha) + u16::from(b) * alpha) / 255) as u8
    };
    CellColor::Rgb(mix(r, over.r), mix(g, over.g), mix(b, over.b))
}

pub struct CellCanvas<'a> {
    buf: &'a mut Buffer,
    viewport: Area,
    scale: CellScale,
    clip: Option<Rect>,
}

impl<'a> CellCanvas<'a> {
    pub fn new(buf: &'a mut Buffer, viewport: Area, scale: CellScale) -> Self {
        Self {
            buf,
            viewport,
            scale,
            clip: None,
        }
    }

    /// Cells covered by `rect` after clipping, in viewport-relative coordinates
    fn visible(&self, rect: Rect) -> Option<(i32, i32, i32, i32)> {
        let rect = match self.clip {
            Some(clip) => rect.intersection(&clip)?,
            None => rect,
        };
        let (x0, x1, y0, y1) = self.scale.cells(rect);
        let x0 = x0.max(0);
        let y0 = y0.max(0);
        let x1 = x1.min(i32::from(self.viewport.width));
        let y1 = y1.min(i32::from(self.viewport.height));
        (x0 < x1 && y0 < y1).then_some((x0, x1, y0, y1))
    }

    fn cell_mut(&mut self, col: i32, row: i32) -> Option<&mut ratatui::buffer::Cell> {
        let x = self.viewport.x.checked_add(u16::try_from(col).ok()?)?;
        let y = self.viewport.y.checked_add(u16::try_from(row).ok()?)?;
        self.buf.cell_mut(Position::new(x, y))
    }

    fn each_cell(&mut self, rect: Rect, mut paint: impl FnMut(&mut ratatui::buffer::Cell, i32, i32)) {
        let Some((x0, x1, y0, y1)) = self.visible(rect) else {
            return;
        };
        for row in y0..y1 {
            for col in x0..x1 {
                if let Some(cell) = self.cell_mut(col, row) {
                    paint(cell, col - x0, row - y0);
                }
            }
        }
    }
}

impl TextMeasure for CellCanvas<'_> {
    fn measure(&self, text: &str, font: Option<&Path>, size: u32) -> (i32, i32) {
        self.scale.measure(text, font, size)
    }
}

impl Renderer for CellCanvas<'_> {
    fn fill_rect(&mut self, rect: Rect, color: Color, _radius: i32) {
        if color.a == 0 {
            return;
        }
        self.each_cell(rect, |cell, _, _| {
            let bg = blend(cell.bg, color);
            cell.set_bg(bg);
        });
    }

    fn outline_rect(&mut self, rect: Rect, color: Color, _thickness: i32, radius: i32) {
        if color.a == 0 {
            return;
        }
        let (x0, x1, y0, y1) = self.scale.cells(rect);
        let (w, h) = (x1 - x0, y1 - y0);
        let corners = if radius > 0 {
            ["╭", "╮", "╰", "╯"]
        } else {
            ["┌", "┐", "└", "┘"]
        };
        // offsets passed to `paint` are relative to the clipped origin
        let (cx0, cy0) = match self.visible(rect) {
            Some((cx0, _, cy0, _)) => (cx0 - x0, cy0 - y0),
            None => return,
        };
        let fg = cell_color(color);
        self.each_cell(rect, |cell, dx, dy| {
            let (col, row) = (dx + cx0, dy + cy0);
            let left = col == 0;
            let right = col == w - 1;
            let top = row == 0;
            let bottom = row == h - 1;
            let symbol = match (top, bottom, left, right) {
                (true, _, true, _) => corners[0],
                (true, _, _, true) => corners[1],
                (_, true, true, _) => corners[2],
                (_, true, _, true) => corners[3],
                (true, _, _, _) | (_, true, _, _) => "─",
                (_, _, true, _) | (_, _, _, true) => "│",
                _ => return,
            };
            cell.set_symbol(symbol).set_fg(fg);
        });
    }

    fn draw_image(&mut self, image: &Path, dest: Rect, mode: ImageMode, _slice: Option<[i32; 4]>) {
        // no pixels here: shade the box and label it with the file stem
        let label = image
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let shade = if mode == ImageMode::Ninepatch { "▒" } else { "░" };
        self.each_cell(dest, |cell, _, _| {
            cell.set_symbol(shade);
        });
        let run = TextRun {
            text: label,
            font: None,
            size: 0,
            color: Color::rgb(160, 160, 160),
            dest: Rect::new(dest.x(), dest.y(), dest.width(), self.scale.cell_h),
        };
        self.draw_text(&run);
    }

    fn draw_text(&mut self, run: &TextRun) {
        if run.color.a == 0 || run.text.is_empty() {
            return;
        }
        let (x0, _, _, _) = self.scale.cells(run.dest);
        let row = (run.dest.y() + run.dest.height() / 2).div_euclid(self.scale.cell_h);
        let line = Rect::new(
            run.dest.x(),
            row * self.scale.cell_h,
            run.dest.width(),
            self.scale.cell_h,
        );
        let Some((vx0, vx1, vy0, _)) = self.visible(line) else {
            return;
        };
        let fg = cell_color(run.color);
        let mut col = x0;
        for ch in run.text.chars() {
            let width = ch.width().unwrap_or(0) as i32;
            if width == 0 {
                continue;
            }
            if col >= vx0 && col + width <= vx1 {
                if let Some(cell) = self.cell_mut(col, vy0) {
                    cell.set_char(ch).set_fg(fg);
                }
            }
            col += width;
            if col >= vx1 {
                break;
            }
        }
    }

    fn set_clip(&mut self, clip: Option<Rect>) {
        self.clip = clip;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCALE: CellScale = CellScale {
        cell_w: 10,
        cell_h: 20,
    };

    fn buffer() -> Buffer {
        Buffer::empty(Area::new(0, 0, 8, 4))
    }

    fn symbols(buf: &Buffer, row: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, row)].symbol().to_string())
            .collect()
    }

    #[test]
    fn fit_rounds_cells_up() {
        let scale = CellScale::fit(640, 480, Area::new(0, 0, 80, 25));
        assert_eq!(scale, CellScale { cell_w: 8, cell_h: 20 });
    }

    #[test]
    fn fill_snaps_to_cells() {
        let mut buf = buffer();
        let area = buf.area;
        let mut canvas = CellCanvas::new(&mut buf, area, SCALE);
        canvas.fill_rect(Rect::new(10, 20, 20, 20), Color::rgb(255, 0, 0), 0);

        assert_eq!(buf[(1, 1)].bg, CellColor::Rgb(255, 0, 0));
        assert_eq!(buf[(2, 1)].bg, CellColor::Rgb(255, 0, 0));
        assert_eq!(buf[(0, 1)].bg, CellColor::Reset);
        assert_eq!(buf[(3, 1)].bg, CellColor::Reset);
        assert_eq!(buf[(1, 2)].bg, CellColor::Reset);
    }

    #[test]
    fn half_transparent_fill_blends() {
        let mut buf = buffer();
        let area = buf.area;
        let mut canvas = CellCanvas::new(&mut buf, area, SCALE);
        canvas.fill_rect(Rect::new(0, 0, 10, 20), Color::rgb(200, 200, 200), 0);
        canvas.fill_rect(Rect::new(0, 0, 10, 20), Color::rgba(0, 0, 0, 255 / 2 + 1), 0);
        assert_eq!(buf[(0, 0)].bg, CellColor::Rgb(99, 99, 99));
    }

    #[test]
    fn text_lands_on_the_middle_row() {
        let mut buf = buffer();
        let area = buf.area;
        let mut canvas = CellCanvas::new(&mut buf, area, SCALE);
        canvas.draw_text(&TextRun {
            text: "hi".into(),
            font: None,
            size: 20,
            color: Color::WHITE,
            dest: Rect::new(20, 20, 20, 40),
        });
        assert_eq!(symbols(&buf, 2), "  hi    ");
        assert_eq!(buf[(2, 2)].fg, CellColor::Rgb(255, 255, 255));
    }

    #[test]
    fn clip_cuts_text_and_fills() {
        let mut buf = buffer();
        let area = buf.area;
        let mut canvas = CellCanvas::new(&mut buf, area, SCALE);
        canvas.set_clip(Some(Rect::new(0, 0, 30, 80)));
        canvas.draw_text(&TextRun {
            text: "abcdef".into(),
            font: None,
            size: 20,
            color: Color::WHITE,
            dest: Rect::new(0, 0, 60, 20),
        });
        canvas.fill_rect(Rect::new(0, 20, 80, 20), Color::BLACK, 0);
        canvas.set_clip(None);
        canvas.fill_rect(Rect::new(70, 60, 10, 20), Color::BLACK, 0);

        assert_eq!(symbols(&buf, 0), "abc     ");
        assert_eq!(buf[(2, 1)].bg, CellColor::Rgb(0, 0, 0));
        assert_eq!(buf[(3, 1)].bg, CellColor::Reset);
        assert_eq!(buf[(7, 3)].bg, CellColor::Rgb(0, 0, 0));
    }

    #[test]
    fn outline_draws_a_box() {
        let mut buf = buffer();
        let area = buf.area;
        let mut canvas = CellCanvas::new(&mut buf, area, SCALE);
        canvas.outline_rect(Rect::new(0, 0, 40, 60), Color::WHITE, 1, 0);
        assert_eq!(symbols(&buf, 0), "┌──┐    ");
        assert_eq!(symbols(&buf, 1), "│  │    ");
        assert_eq!(symbols(&buf, 2), "└──┘    ");
    }

    #[test]
    fn measure_is_one_cell_per_column() {
        assert_eq!(SCALE.measure("abc", None, 99), (30, 20));
    }
}
