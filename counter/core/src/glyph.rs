//! The "正" Stroke Model
//!
//! The five stroke segments of the tally character, in stroke order, with
//! fixed coordinates in a 100×100 logical space. Surfaces rasterize these
//! however their medium allows; the coordinates themselves are not
//! configurable, so the in-progress glyph and the history glyphs always
//! share one shape.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::easing::EasingFunction;
use crate::timer::Countdown;

/// Strokes in the full character.
pub const STROKE_COUNT: usize = 5;

/// How long a newly visible stroke takes to draw in along its path.
pub const STROKE_REVEAL_DURATION: Duration = Duration::from_millis(250);

/// One straight stroke segment in the 100×100 logical space.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StrokeSegment {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl StrokeSegment {
    const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Horizontal strokes run left to right, verticals top to bottom.
    #[must_use]
    pub fn is_horizontal(&self) -> bool {
        (self.y1 - self.y2).abs() < f32::EPSILON
    }

    /// Path length in logical units.
    #[must_use]
    pub fn length(&self) -> f32 {
        let dx = self.x2 - self.x1;
        let dy = self.y2 - self.y1;
        (dx * dx + dy * dy).sqrt()
    }

    /// Point at fraction `t` along the path (0.0 = start, 1.0 = end).
    #[must_use]
    pub fn point_at(&self, t: f32) -> (f32, f32) {
        let t = t.clamp(0.0, 1.0);
        (
            self.x1 + (self.x2 - self.x1) * t,
            self.y1 + (self.y2 - self.y1) * t,
        )
    }
}

/// The five strokes of "正", in writing order:
/// top horizontal, middle vertical, right-middle horizontal, left vertical,
/// bottom horizontal.
pub const ZHENG_STROKES: [StrokeSegment; STROKE_COUNT] = [
    StrokeSegment::new(15.0, 20.0, 85.0, 20.0),
    StrokeSegment::new(50.0, 20.0, 50.0, 90.0),
    StrokeSegment::new(50.0, 55.0, 85.0, 55.0),
    StrokeSegment::new(28.0, 55.0, 28.0, 90.0),
    StrokeSegment::new(15.0, 90.0, 85.0, 90.0),
];

/// Size variants. Scale and stroke thickness differ; shape does not.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GlyphSize {
    /// The active glyph, ~256×256 logical units.
    Large,
    /// History entries, ~32×32 logical units.
    Small,
}

impl GlyphSize {
    /// Logical edge length of the square the glyph is drawn in.
    #[must_use]
    pub fn logical_extent(self) -> f32 {
        match self {
            GlyphSize::Large => 256.0,
            GlyphSize::Small => 32.0,
        }
    }

    /// Stroke thickness in 100×100 path space.
    #[must_use]
    pub fn stroke_width(self) -> f32 {
        match self {
            GlyphSize::Large => 6.0,
            GlyphSize::Small => 8.0,
        }
    }
}

/// Draw-in progress of the newest visible stroke.
///
/// Strokes only ever draw in; removal (Undo) is instant by design, so the
/// reveal is simply dropped when the stroke count goes down.
#[derive(Clone, Debug, Default)]
pub struct StrokeReveal {
    countdown: Countdown,
}

impl StrokeReveal {
    /// No reveal in progress; everything shows fully drawn.
    #[must_use]
    pub fn idle() -> Self {
        Self::default()
    }

    /// Start drawing in a stroke that just became visible. Replaces any
    /// reveal still in progress (rapid taps snap the previous stroke to
    /// fully drawn).
    pub fn begin(&mut self) {
        self.countdown.start(STROKE_REVEAL_DURATION);
    }

    /// Drop the reveal without finishing it (the stroke went away).
    pub fn cancel(&mut self) {
        self.countdown.cancel();
    }

    /// Advance by one frame delta.
    pub fn update(&mut self, delta: Duration) {
        self.countdown.update(delta);
    }

    /// Eased fraction of the newest stroke's path to draw, in `[0.0, 1.0]`.
    /// Reads 1.0 when no reveal is in progress.
    #[must_use]
    pub fn progress(&self) -> f32 {
        EasingFunction::EaseOut.apply(self.countdown.progress())
    }

    /// Whether a draw-in is still running.
    #[must_use]
    pub fn in_progress(&self) -> bool {
        self.countdown.is_running()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stroke_order_matches_the_character() {
        // 1st, 3rd and 5th strokes are horizontal; 2nd and 4th vertical.
        assert!(ZHENG_STROKES[0].is_horizontal());
        assert!(!ZHENG_STROKES[1].is_horizontal());
        assert!(ZHENG_STROKES[2].is_horizontal());
        assert!(!ZHENG_STROKES[3].is_horizontal());
        assert!(ZHENG_STROKES[4].is_horizontal());
    }

    #[test]
    fn test_strokes_span_the_body() {
        // Top and bottom bars share their x extent.
        assert_eq!(ZHENG_STROKES[0].x1, ZHENG_STROKES[4].x1);
        assert_eq!(ZHENG_STROKES[0].x2, ZHENG_STROKES[4].x2);
        // The middle vertical hangs from the top bar down to the baseline.
        assert_eq!(ZHENG_STROKES[1].y1, ZHENG_STROKES[0].y1);
        assert_eq!(ZHENG_STROKES[1].y2, ZHENG_STROKES[4].y1);
    }

    #[test]
    fn test_point_at_walks_the_path() {
        let stroke = ZHENG_STROKES[0];
        assert_eq!(stroke.point_at(0.0), (15.0, 20.0));
        assert_eq!(stroke.point_at(1.0), (85.0, 20.0));
        assert_eq!(stroke.point_at(0.5), (50.0, 20.0));
    }

    #[test]
    fn test_sizes_differ_only_in_scale() {
        assert!(GlyphSize::Large.logical_extent() > GlyphSize::Small.logical_extent());
        // The small variant compensates with a thicker stroke.
        assert!(GlyphSize::Small.stroke_width() > GlyphSize::Large.stroke_width());
    }

    #[test]
    fn test_reveal_runs_to_completion() {
        let mut reveal = StrokeReveal::idle();
        assert!((reveal.progress() - 1.0).abs() < f32::EPSILON);

        reveal.begin();
        assert!(reveal.in_progress());
        assert!(reveal.progress() < 0.01);

        reveal.update(Duration::from_millis(125));
        let halfway = reveal.progress();
        assert!(halfway > 0.0 && halfway < 1.0);

        reveal.update(Duration::from_millis(200));
        assert!(!reveal.in_progress());
        assert!((reveal.progress() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_reveal_cancel_snaps_to_drawn() {
        let mut reveal = StrokeReveal::idle();
        reveal.begin();
        reveal.cancel();
        assert!(!reveal.in_progress());
        assert!((reveal.progress() - 1.0).abs() < f32::EPSILON);
    }
}
