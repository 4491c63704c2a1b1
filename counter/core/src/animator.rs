//! Completion Animator
//!
//! When a fifth stroke lands, the freshly completed character flies from the
//! active glyph down into its slot in the history strip. This module owns
//! that transition: it captures start/target geometry through an injected
//! [`Measure`] capability, holds two render frames so the start geometry is
//! committed before interpolation begins, then interpolates the rectangle
//! over 700 ms with a cubic ease-in/ease-out.
//!
//! # Design
//!
//! The animator never talks to a renderer. Surfaces hand it measured
//! rectangles and frame deltas; it hands back the rectangle to draw the
//! flying glyph in and which history slot to keep invisible meanwhile.
//! That keeps the whole protocol testable with a fixed-rectangle measurer
//! and synthetic deltas.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::easing::EasingFunction;
use crate::timer::Countdown;

/// Flight time from the active glyph to the history slot.
pub const FLIGHT_DURATION: Duration = Duration::from_millis(700);

/// Render frames to hold at the start rectangle before interpolating.
pub const FLIGHT_HOLD_FRAMES: u8 = 2;

/// A screen-space rectangle in the surface's own units (cells, pixels).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    #[must_use]
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Linear interpolation of position and size.
    #[must_use]
    pub fn lerp(from: Rect, to: Rect, t: f32) -> Rect {
        let t = t.clamp(0.0, 1.0);
        Rect {
            x: from.x + (to.x - from.x) * t,
            y: from.y + (to.y - from.y) * t,
            width: from.width + (to.width - from.width) * t,
            height: from.height + (to.height - from.height) * t,
        }
    }
}

/// The measurable on-screen elements.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GlyphSlot {
    /// The large in-progress glyph.
    ActiveGlyph,
    /// A history-strip slot, zero-indexed oldest first. Measuring the last
    /// slot implies the strip has been scrolled to reveal it.
    HistorySlot(u32),
}

/// Geometry capability injected by the surface.
///
/// `None` means the element is not on screen (for instance a zero-sized
/// terminal); the animator then skips the flight and the slot shows
/// immediately.
pub trait Measure {
    fn measure(&self, slot: GlyphSlot) -> Option<Rect>;
}

/// What an update step observed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlightEvent {
    /// The flight reached the history slot; the real slot is visible again.
    Landed,
}

#[derive(Clone, Debug)]
struct FlightJob {
    start: Rect,
    target: Rect,
    /// History slot the flight lands in, suppressed while live.
    slot: u32,
    /// Frames still to hold before interpolation starts.
    hold_frames: u8,
    countdown: Countdown,
}

/// Drives the fly-to-history transition. At most one job lives at a time.
#[derive(Clone, Debug, Default)]
pub struct CompletionAnimator {
    job: Option<FlightJob>,
}

impl CompletionAnimator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a flight for the character that just completed.
    ///
    /// `completed_characters` is the count *after* the completing tap; the
    /// flight lands in that character's (newest) history slot. Geometry is
    /// captured now: the active glyph first, then the newest slot. Returns
    /// `false` (and stays idle) when either element cannot be measured.
    ///
    /// A job already in flight is replaced; its slot becomes visible.
    pub fn begin(&mut self, measure: &dyn Measure, completed_characters: u32) -> bool {
        if completed_characters == 0 {
            return false;
        }
        let slot = completed_characters - 1;

        let start = measure.measure(GlyphSlot::ActiveGlyph);
        let target = measure.measure(GlyphSlot::HistorySlot(slot));
        let (Some(start), Some(target)) = (start, target) else {
            self.job = None;
            return false;
        };

        let mut countdown = Countdown::idle();
        countdown.start(FLIGHT_DURATION);
        tracing::debug!(slot, "completion flight started");

        self.job = Some(FlightJob {
            start,
            target,
            slot,
            hold_frames: FLIGHT_HOLD_FRAMES,
            countdown,
        });
        true
    }

    /// Advance by one render frame.
    ///
    /// The first [`FLIGHT_HOLD_FRAMES`] calls only consume the hold (the
    /// renderer is committing the start geometry); after that the 700 ms
    /// clock runs.
    pub fn update(&mut self, delta: Duration) -> Option<FlightEvent> {
        let job = self.job.as_mut()?;

        if job.hold_frames > 0 {
            job.hold_frames -= 1;
            return None;
        }

        if job.countdown.update(delta) {
            tracing::debug!(slot = job.slot, "completion flight landed");
            self.job = None;
            return Some(FlightEvent::Landed);
        }
        None
    }

    /// Discard the flight immediately (Undo dropped the count below the
    /// completing boundary, or the history it targeted was reset). The
    /// suppressed slot becomes visible again; no event fires.
    pub fn cancel(&mut self) {
        if let Some(job) = self.job.take() {
            tracing::debug!(slot = job.slot, "completion flight cancelled");
        }
    }

    /// Whether a flight is live.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.job.is_some()
    }

    /// The history slot to keep invisible (layout space reserved) while the
    /// flying glyph is the only visible copy.
    #[must_use]
    pub fn suppressed_slot(&self) -> Option<u32> {
        self.job.as_ref().map(|job| job.slot)
    }

    /// Where to draw the flying glyph this frame. During the hold this is
    /// the start rectangle.
    #[must_use]
    pub fn current_rect(&self) -> Option<Rect> {
        let job = self.job.as_ref()?;
        let t = EasingFunction::EaseInOutCubic.apply(job.countdown.progress());
        Some(Rect::lerp(job.start, job.target, t))
    }
}
