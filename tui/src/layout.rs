//! Screen Layout
//!
//! Splits the terminal into the tally screen's fixed regions and answers
//! the two geometry questions the rest of the app asks: "where is this
//! element?" (the [`Measure`] capability the completion animator reads) and
//! "what did this click hit?" (event containment for the controls).

use ratatui::layout::Rect;

use zheng_core::{GlyphSize, GlyphSlot, Measure, Rect as CoreRect};

use crate::widgets::glyph::cell_extent;

/// Top bar: theme toggle + count readout.
pub const TOP_BAR_HEIGHT: u16 = 2;
/// Bottom control bar: help, reset, undo.
pub const CONTROL_BAR_HEIGHT: u16 = 2;
/// History strip height (two slot rows plus the seam between them).
pub const HISTORY_HEIGHT: u16 = 7;

/// Horizontal padding inside the history strip.
const HISTORY_MARGIN: u16 = 2;
/// Small-glyph slot pitch (5×3 glyph plus a one-cell gap).
const SLOT_PITCH_X: u16 = 6;
const SLOT_PITCH_Y: u16 = 4;

/// What a click landed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitZone {
    /// The full-surface tap target (everything not claimed below).
    Surface,
    ThemeToggle,
    HelpButton,
    ResetButton,
    UndoButton,
}

/// Computed region geometry for one terminal size.
#[derive(Clone, Debug)]
pub struct ScreenLayout {
    pub area: Rect,
    pub top_bar: Rect,
    /// The active (large) glyph.
    pub glyph: Rect,
    /// The "TAP SCREEN" hint row under the glyph.
    pub hint: Rect,
    pub history: Rect,
    pub controls: Rect,
    /// Vertical history scroll, in cells, chosen so the newest slot shows.
    scroll: u16,
    /// Completed characters the scroll was computed for.
    history_len: u32,
}

impl ScreenLayout {
    #[must_use]
    pub fn new(area: Rect) -> Self {
        let mut layout = Self {
            area,
            top_bar: Rect::default(),
            glyph: Rect::default(),
            hint: Rect::default(),
            history: Rect::default(),
            controls: Rect::default(),
            scroll: 0,
            history_len: 0,
        };
        layout.resize(area);
        layout
    }

    /// Recompute all regions for a new terminal size.
    pub fn resize(&mut self, area: Rect) {
        self.area = area;

        self.top_bar = Rect::new(area.x, area.y, area.width, TOP_BAR_HEIGHT.min(area.height));

        let controls_y = area.y + area.height.saturating_sub(CONTROL_BAR_HEIGHT);
        self.controls = Rect::new(
            area.x,
            controls_y,
            area.width,
            area.height.min(CONTROL_BAR_HEIGHT),
        );

        let history_y = controls_y.saturating_sub(HISTORY_HEIGHT).max(area.y);
        self.history = Rect::new(
            area.x,
            history_y,
            area.width,
            controls_y.saturating_sub(history_y),
        );

        // The glyph floats centered in whatever is left in the middle.
        let middle_top = area.y + self.top_bar.height;
        let middle_height = history_y.saturating_sub(middle_top);
        let (glyph_w, glyph_h) = cell_extent(GlyphSize::Large);
        let glyph_w = glyph_w.min(area.width);
        let glyph_h = glyph_h.min(middle_height);
        self.glyph = Rect::new(
            area.x + (area.width - glyph_w) / 2,
            middle_top + middle_height.saturating_sub(glyph_h) / 2,
            glyph_w,
            glyph_h,
        );

        self.hint = Rect::new(
            area.x,
            (self.glyph.y + self.glyph.height + 1).min(history_y.saturating_sub(1)),
            area.width,
            1,
        );

        self.set_history_len(self.history_len);
    }

    /// Record the history size and keep the strip scrolled so the newest
    /// slot is in view.
    pub fn set_history_len(&mut self, completed_characters: u32) {
        self.history_len = completed_characters;

        let rows = self.rows_for(completed_characters);
        let content_height = rows * SLOT_PITCH_Y;
        self.scroll = content_height.saturating_sub(self.history.height);
    }

    /// Slots per history row at the current width.
    #[must_use]
    pub fn slots_per_row(&self) -> u16 {
        let usable = self.history.width.saturating_sub(2 * HISTORY_MARGIN);
        (usable / SLOT_PITCH_X).max(1)
    }

    fn rows_for(&self, slots: u32) -> u16 {
        let per_row = u32::from(self.slots_per_row());
        slots.div_ceil(per_row) as u16
    }

    /// Screen rectangle of history slot `index` (zero-based, oldest first),
    /// or `None` if it is scrolled out of the strip.
    #[must_use]
    pub fn history_slot(&self, index: u32) -> Option<Rect> {
        let per_row = u32::from(self.slots_per_row());
        let (small_w, small_h) = cell_extent(GlyphSize::Small);

        let col = (index % per_row) as u16;
        let row = (index / per_row) as u16;

        let x = self.history.x + HISTORY_MARGIN + col * SLOT_PITCH_X;
        let y_in_content = row * SLOT_PITCH_Y;
        let y_on_screen = i32::from(self.history.y) + i32::from(y_in_content) - i32::from(self.scroll);

        if y_on_screen < i32::from(self.history.y)
            || y_on_screen + i32::from(small_h) > i32::from(self.history.y + self.history.height)
        {
            return None;
        }
        Some(Rect::new(x, y_on_screen as u16, small_w, small_h))
    }

    /// Control hit rectangles, left to right: help, reset, undo.
    #[must_use]
    pub fn help_button(&self) -> Rect {
        Rect::new(self.controls.x + 2, self.controls.y, 8, 1)
    }

    #[must_use]
    pub fn reset_button(&self) -> Rect {
        let w = 9;
        Rect::new(
            self.controls.x + (self.controls.width.saturating_sub(w)) / 2,
            self.controls.y,
            w,
            1,
        )
    }

    #[must_use]
    pub fn undo_button(&self) -> Rect {
        let w = 8;
        Rect::new(
            self.controls.x + self.controls.width.saturating_sub(w + 2),
            self.controls.y,
            w,
            1,
        )
    }

    /// Theme toggle in the top bar.
    #[must_use]
    pub fn theme_button(&self) -> Rect {
        Rect::new(self.top_bar.x + 2, self.top_bar.y, 4, 1)
    }

    /// Route a click. Controls claim their rectangles; everything else is
    /// the tap surface, so a control press never doubles as a tap.
    #[must_use]
    pub fn hit(&self, x: u16, y: u16) -> HitZone {
        if contains(self.theme_button(), x, y) {
            HitZone::ThemeToggle
        } else if contains(self.help_button(), x, y) {
            HitZone::HelpButton
        } else if contains(self.reset_button(), x, y) {
            HitZone::ResetButton
        } else if contains(self.undo_button(), x, y) {
            HitZone::UndoButton
        } else {
            HitZone::Surface
        }
    }
}

impl Measure for ScreenLayout {
    fn measure(&self, slot: GlyphSlot) -> Option<CoreRect> {
        match slot {
            GlyphSlot::ActiveGlyph => {
                if self.glyph.width == 0 || self.glyph.height == 0 {
                    None
                } else {
                    Some(to_core(self.glyph))
                }
            }
            GlyphSlot::HistorySlot(index) => self.history_slot(index).map(to_core),
        }
    }
}

fn to_core(rect: Rect) -> CoreRect {
    CoreRect::new(
        f32::from(rect.x),
        f32::from(rect.y),
        f32::from(rect.width),
        f32::from(rect.height),
    )
}

/// Back to whole cells for drawing the flight layer.
#[must_use]
pub fn to_cells(rect: CoreRect) -> Rect {
    Rect {
        x: rect.x.round().max(0.0) as u16,
        y: rect.y.round().max(0.0) as u16,
        width: rect.width.round().max(1.0) as u16,
        height: rect.height.round().max(1.0) as u16,
    }
}

fn contains(rect: Rect, x: u16, y: u16) -> bool {
    x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}
