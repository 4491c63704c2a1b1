//! Zheng Core - Headless Counter Logic for zheng-tally
//!
//! This crate provides the complete interactive behavior of the five-stroke
//! tally counter ("正": one stroke per tap, five strokes per completed
//! character), completely independent of any UI framework. It can drive a
//! TUI, a native GUI, or run headless for testing.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                     UI Surfaces                       │
//! │            (ratatui, headless test driver)            │
//! │                                                       │
//! │        CounterEvent (down)      Effect (up)           │
//! └───────────────────────┼───────────────────────────────┘
//!                         │
//! ┌───────────────────────┼───────────────────────────────┐
//! │                  ZHENG CORE                           │
//! │  ┌──────────┐  ┌──────────┐  ┌─────────┐  ┌────────┐  │
//! │  │ Counter  │  │Completion│  │  Glyph  │  │Haptics │  │
//! │  │  State   │  │ Animator │  │ Strokes │  │Contract│  │
//! │  └──────────┘  └──────────┘  └─────────┘  └────────┘  │
//! └───────────────────────────────────────────────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`CounterState`]: the state machine (count, reset arming, theme, help)
//! - [`CounterEvent`] / [`Effect`]: events in, observable effects out
//! - [`CompletionAnimator`]: the fly-to-history transition for a completed
//!   character, fed by an injected [`Measure`] capability
//! - [`Haptics`]: fire-and-forget vibration contract
//!
//! All timing flows through [`timer::Countdown`] values advanced by
//! `update(delta)` from the surface's frame loop, so every timed behavior
//! (the 3000 ms reset-confirmation window, the 700 ms flight, the 250 ms
//! stroke draw-in) is deterministic under test.

pub mod animator;
pub mod counter;
pub mod easing;
pub mod glyph;
pub mod haptics;
pub mod report;
pub mod theme;
pub mod timer;

pub use animator::{CompletionAnimator, FlightEvent, GlyphSlot, Measure, Rect};
pub use counter::{CounterEvent, CounterState, Effect};
pub use glyph::{GlyphSize, StrokeReveal, StrokeSegment, ZHENG_STROKES};
pub use haptics::{HapticStrength, Haptics, NullHaptics};
pub use report::{ProblemReport, RenderFault};
pub use theme::Theme;
