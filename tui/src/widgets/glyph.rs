//! Stroke Glyph Rasterizer
//!
//! Maps the fixed "正" stroke segments onto a cell rectangle and draws the
//! first N strokes in block cells. The newest stroke can be partially drawn
//! (draw-in): a prefix of its cells, in path direction, proportional to the
//! reveal progress. Strokes are never partially *removed*; undo snaps.
//!
//! One rasterizer serves every size: the same five segments land on a
//! 25×13 area for the active glyph, a 5×3 area for history slots, and any
//! in-between rectangle for the flying glyph mid-interpolation.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};

use zheng_core::glyph::{StrokeSegment, STROKE_COUNT, ZHENG_STROKES};
use zheng_core::GlyphSize;

/// What a stroke cell is drawn with.
const STROKE_CELL: &str = "█";

/// Bounding box of the strokes in their 100×100 path space.
const PATH_MIN_X: f32 = 15.0;
const PATH_MAX_X: f32 = 85.0;
const PATH_MIN_Y: f32 = 20.0;
const PATH_MAX_Y: f32 = 90.0;

/// Cell footprint of a glyph size (terminal cells are ~2:1 tall).
#[must_use]
pub fn cell_extent(size: GlyphSize) -> (u16, u16) {
    match size {
        GlyphSize::Large => (25, 13),
        GlyphSize::Small => (5, 3),
    }
}

/// A `strokes`-of-five tally glyph.
#[derive(Clone, Copy, Debug)]
pub struct StrokeGlyph {
    /// Strokes fully or partially visible, `0..=5`.
    strokes: u32,
    /// Draw-in progress of the newest stroke, `0.0..=1.0`.
    newest_progress: f32,
    fg: Color,
}

impl StrokeGlyph {
    #[must_use]
    pub fn new(strokes: u32, fg: Color) -> Self {
        Self {
            strokes: strokes.min(STROKE_COUNT as u32),
            newest_progress: 1.0,
            fg,
        }
    }

    /// Partially draw in the newest visible stroke.
    #[must_use]
    pub fn with_newest_progress(mut self, progress: f32) -> Self {
        self.newest_progress = progress.clamp(0.0, 1.0);
        self
    }

    /// Rasterize into `area` of `buf`.
    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let style = Style::default().fg(self.fg);

        for (index, stroke) in ZHENG_STROKES.iter().enumerate() {
            if index as u32 >= self.strokes {
                break;
            }
            let fraction = if index as u32 == self.strokes - 1 {
                self.newest_progress
            } else {
                1.0
            };
            draw_stroke(buf, area, stroke, fraction, style);
        }
    }
}

/// Plot the prefix of one stroke's cells, in path direction.
fn draw_stroke(buf: &mut Buffer, area: Rect, stroke: &StrokeSegment, fraction: f32, style: Style) {
    if fraction <= 0.0 {
        return;
    }

    let (start_col, start_row) = project(area, stroke.x1, stroke.y1);
    let (end_col, end_row) = project(area, stroke.x2, stroke.y2);

    // Strokes are axis-aligned; walk whichever axis moves.
    let total = if stroke.is_horizontal() {
        end_col.abs_diff(start_col) + 1
    } else {
        end_row.abs_diff(start_row) + 1
    };
    let shown = ((f32::from(total) * fraction).ceil() as u16).clamp(1, total);

    for step in 0..shown {
        let (x, y) = if stroke.is_horizontal() {
            (start_col + step, start_row)
        } else {
            (start_col, start_row + step)
        };
        if x < area.x + area.width && y < area.y + area.height {
            buf.set_string(x, y, STROKE_CELL, style);
        }
    }
}

/// Map a path-space point onto the area's cell grid.
fn project(area: Rect, x: f32, y: f32) -> (u16, u16) {
    let tx = (x - PATH_MIN_X) / (PATH_MAX_X - PATH_MIN_X);
    let ty = (y - PATH_MIN_Y) / (PATH_MAX_Y - PATH_MIN_Y);
    let col = (tx * f32::from(area.width.saturating_sub(1))).round() as u16;
    let row = (ty * f32::from(area.height.saturating_sub(1))).round() as u16;
    (area.x + col.min(area.width - 1), area.y + row.min(area.height - 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drawn_cells(buf: &Buffer) -> usize {
        buf.content
            .iter()
            .filter(|cell| cell.symbol() == STROKE_CELL)
            .count()
    }

    fn render(strokes: u32, progress: f32, area: Rect) -> Buffer {
        let mut buf = Buffer::empty(area);
        StrokeGlyph::new(strokes, Color::White)
            .with_newest_progress(progress)
            .render(area, &mut buf);
        buf
    }

    #[test]
    fn test_zero_strokes_draws_nothing() {
        let area = Rect::new(0, 0, 25, 13);
        assert_eq!(drawn_cells(&render(0, 1.0, area)), 0);
    }

    #[test]
    fn test_stroke_count_is_monotonic_in_cells() {
        let area = Rect::new(0, 0, 25, 13);
        let mut last = 0;
        for strokes in 1..=5 {
            let cells = drawn_cells(&render(strokes, 1.0, area));
            assert!(cells > last, "stroke {strokes} added no cells");
            last = cells;
        }
    }

    #[test]
    fn test_first_stroke_is_the_top_bar() {
        let area = Rect::new(0, 0, 25, 13);
        let buf = render(1, 1.0, area);
        // Everything drawn sits on one row (a horizontal bar).
        let rows: Vec<u16> = (0..area.height)
            .filter(|&y| (0..area.width).any(|x| buf.content[buf.index_of(x, y)].symbol() == STROKE_CELL))
            .collect();
        assert_eq!(rows, vec![0]);
        assert_eq!(drawn_cells(&buf), 25);
    }

    #[test]
    fn test_reveal_draws_a_prefix() {
        let area = Rect::new(0, 0, 25, 13);
        let partial = drawn_cells(&render(1, 0.4, area));
        let full = drawn_cells(&render(1, 1.0, area));
        assert!(partial > 0 && partial < full);

        // The prefix grows from the stroke's start (left edge for the bar).
        let buf = render(1, 0.4, area);
        assert_eq!(buf.content[buf.index_of(0, 0)].symbol(), STROKE_CELL);
        assert_ne!(buf.content[buf.index_of(24, 0)].symbol(), STROKE_CELL);
    }

    #[test]
    fn test_reveal_monotonic_in_progress() {
        let area = Rect::new(0, 0, 25, 13);
        let mut last = 0;
        for step in 1..=10 {
            let cells = drawn_cells(&render(3, step as f32 / 10.0, area));
            assert!(cells >= last);
            last = cells;
        }
    }

    #[test]
    fn test_small_glyph_is_recognizable() {
        let area = Rect::new(0, 0, 5, 3);
        let buf = render(5, 1.0, area);
        // Top and bottom bars span the width.
        for x in 0..5 {
            assert_eq!(buf.content[buf.index_of(x, 0)].symbol(), STROKE_CELL);
            assert_eq!(buf.content[buf.index_of(x, 2)].symbol(), STROKE_CELL);
        }
        // The middle vertical reaches the center row.
        assert_eq!(buf.content[buf.index_of(2, 1)].symbol(), STROKE_CELL);
    }

    #[test]
    fn test_degenerate_areas_do_not_panic() {
        for (w, h) in [(0, 0), (1, 1), (2, 1), (25, 0)] {
            let area = Rect::new(0, 0, w, h);
            let mut buf = Buffer::empty(area);
            StrokeGlyph::new(5, Color::White).render(area, &mut buf);
        }
    }

    #[test]
    fn test_strokes_beyond_five_are_clamped() {
        let area = Rect::new(0, 0, 25, 13);
        assert_eq!(
            drawn_cells(&render(9, 1.0, area)),
            drawn_cells(&render(5, 1.0, area))
        );
    }
}
