//! Widgets
//!
//! The stroke-glyph rasterizer shared by the active glyph, the history
//! strip, and the flying glyph.

pub mod glyph;

pub use glyph::StrokeGlyph;
