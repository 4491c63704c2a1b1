//! Theme and Colors
//!
//! Two palettes mirroring the paper-and-ink look of the tally screen:
//! warm white with near-black ink, and deep stone with pale ink. Strokes
//! use the strong ink color; chrome (controls, hints, history) sits a few
//! shades toward the background so the character stays the focus.

use ratatui::style::Color;
use zheng_core::Theme;

/// Everything the surface paints with.
#[derive(Clone, Copy, Debug)]
pub struct Palette {
    /// Screen background.
    pub bg: Color,
    /// Stroke ink for the active glyph and the count readout.
    pub ink: Color,
    /// History glyphs (the original renders these at 60% opacity).
    pub ink_faint: Color,
    /// Control glyphs and labels.
    pub control: Color,
    /// The "TAP SCREEN" hint at zero.
    pub hint: Color,
    /// Armed reset control.
    pub danger: Color,
    /// Modal panel background.
    pub panel_bg: Color,
}

/// White paper, graphite ink.
pub const LIGHT: Palette = Palette {
    bg: Color::Rgb(255, 255, 255),
    ink: Color::Rgb(28, 25, 23),
    ink_faint: Color::Rgb(120, 113, 108),
    control: Color::Rgb(168, 162, 158),
    hint: Color::Rgb(214, 211, 209),
    danger: Color::Rgb(220, 38, 38),
    panel_bg: Color::Rgb(245, 245, 244),
};

/// Deep stone, pale ink.
pub const DARK: Palette = Palette {
    bg: Color::Rgb(12, 10, 9),
    ink: Color::Rgb(245, 245, 244),
    ink_faint: Color::Rgb(120, 113, 108),
    control: Color::Rgb(87, 83, 78),
    hint: Color::Rgb(41, 37, 36),
    danger: Color::Rgb(248, 113, 113),
    panel_bg: Color::Rgb(28, 25, 23),
};

/// The palette for a theme.
#[must_use]
pub fn palette(theme: Theme) -> &'static Palette {
    match theme {
        Theme::Light => &LIGHT,
        Theme::Dark => &DARK,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palettes_swap_with_theme() {
        assert!(!std::ptr::eq(palette(Theme::Light), palette(Theme::Dark)));
        assert_eq!(palette(Theme::Dark).bg, DARK.bg);
    }
}
