//! Zheng TUI - Terminal surface for zheng-tally
//!
//! A full-screen terminal rendition of the five-stroke tally counter.
//! Every tap draws one stroke of "正"; five strokes complete a character
//! that flies down into the history strip.
//!
//! # Architecture
//!
//! - **Compositor**: z-ordered layers; the flying glyph and the help modal
//!   are just layers stacked over the tap surface
//! - **Widgets**: the stroke-glyph rasterizer (large active glyph, small
//!   history glyphs, partial draw-in)
//! - **App**: the event loop, bridging terminal events to `zheng-core`
//!   events and core effects back to haptics/animation/rendering

pub mod app;
pub mod compositor;
pub mod haptics;
pub mod layout;
pub mod theme;
pub mod widgets;

pub use app::App;
