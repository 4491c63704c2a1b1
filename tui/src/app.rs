//! Main Application
//!
//! The App owns the screen session: it converts terminal events into
//! `zheng-core` counter events, feeds the returned effects to haptics and
//! the completion animator, and renders everything through the layered
//! compositor.
//!
//! # Layer stack
//!
//! ```text
//! z=60  help modal        (visibility-toggled)
//! z=50  flight            (the completed glyph in transit, re-bounded per frame)
//! z=30  controls          (help / reset / undo)
//! z=10  top bar, history  (chrome)
//! z=0   surface           (background, active glyph, hint)
//! ```
//!
//! Every frame: advance the core deadlines and animations by the frame
//! delta, then redraw all layers and composite. All state mutation happens
//! synchronously in here; there is exactly one logical thread of control.

use std::time::{Duration, Instant};

use crossterm::event::{
    Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use futures::StreamExt;
use ratatui::backend::Backend;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::Terminal;

use zheng_core::{
    CompletionAnimator, CounterEvent, CounterState, Effect, FlightEvent, Haptics, StrokeReveal,
    Theme,
};

use crate::compositor::{Compositor, LayerId};
use crate::haptics::TerminalHaptics;
use crate::layout::{to_cells, HitZone, ScreenLayout};
use crate::theme::{palette, Palette};
use crate::widgets::StrokeGlyph;

/// Frame pacing (~30 fps is plenty for stroke and flight animation).
const FRAME_DURATION: Duration = Duration::from_millis(33);

/// Theme toggle icon per current theme (tap to switch away from it).
fn theme_icon(theme: Theme) -> &'static str {
    match theme {
        Theme::Light => "[●]",
        Theme::Dark => "[○]",
    }
}

/// Layer IDs for the five planes.
struct AppLayers {
    surface: LayerId,
    top_bar: LayerId,
    history: LayerId,
    controls: LayerId,
    flight: LayerId,
    help: LayerId,
}

/// The tally screen session.
pub struct App {
    running: bool,
    state: CounterState,
    reveal: StrokeReveal,
    animator: CompletionAnimator,
    haptics: TerminalHaptics,
    compositor: Compositor,
    layers: AppLayers,
    layout: ScreenLayout,
    last_frame: Instant,
}

impl App {
    /// Build the session for a terminal of the given size.
    #[must_use]
    pub fn new(width: u16, height: u16, theme: Theme, haptics: TerminalHaptics) -> Self {
        let area = Rect::new(0, 0, width, height);
        let layout = ScreenLayout::new(area);
        let mut compositor = Compositor::new(area);

        let layers = AppLayers {
            surface: compositor.create_layer(area, 0),
            top_bar: compositor.create_layer(layout.top_bar, 10),
            history: compositor.create_layer(layout.history, 10),
            controls: compositor.create_layer(layout.controls, 30),
            flight: compositor.create_layer(Rect::default(), 50),
            help: compositor.create_layer(help_bounds(area), 60),
        };

        let mut app = Self {
            running: true,
            state: CounterState::new(theme),
            reveal: StrokeReveal::idle(),
            animator: CompletionAnimator::new(),
            haptics,
            compositor,
            layers,
            layout,
            last_frame: Instant::now(),
        };
        app.compositor.set_visible(app.layers.flight, false);
        app.compositor.set_visible(app.layers.help, false);
        app
    }

    /// Counter state, for the loop and for tests.
    #[must_use]
    pub fn state(&self) -> &CounterState {
        &self.state
    }

    /// Whether a completed glyph is currently in transit.
    #[must_use]
    pub fn flight_active(&self) -> bool {
        self.animator.is_active()
    }

    /// Main event loop.
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()> {
        let mut event_stream = EventStream::new();

        // Initial frame so the surface shows before the first event.
        self.draw(terminal)?;

        while self.running {
            let frame_start = Instant::now();

            tokio::select! {
                biased;

                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        match event {
                            // Only Press events (not Release or Repeat).
                            Event::Key(key) if key.kind == KeyEventKind::Press => {
                                self.handle_key(key);
                            }
                            Event::Mouse(mouse) => self.handle_mouse(mouse),
                            Event::Resize(width, height) => self.handle_resize(width, height),
                            _ => {}
                        }
                    }
                }

                _ = tokio::time::sleep(FRAME_DURATION) => {}
            }

            let now = Instant::now();
            self.tick(now - self.last_frame);
            self.last_frame = now;

            self.draw(terminal)?;

            // Frame rate limiting.
            let elapsed = frame_start.elapsed();
            if elapsed < FRAME_DURATION {
                tokio::time::sleep(FRAME_DURATION - elapsed).await;
            }
        }

        tracing::info!(count = self.state.count(), "session ended");
        Ok(())
    }

    /// Keyboard input. Counting stays on the keyboard too: space or enter
    /// taps, the rest mirror the on-screen controls.
    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.running = false,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.running = false;
            }

            KeyCode::Char(' ') | KeyCode::Enter => self.dispatch(CounterEvent::TapSurface),
            KeyCode::Char('u') | KeyCode::Backspace => self.dispatch(CounterEvent::Undo),
            KeyCode::Char('r') => self.dispatch(CounterEvent::ResetTap),
            KeyCode::Char('t') => self.dispatch(CounterEvent::ToggleTheme),
            KeyCode::Char('h') | KeyCode::Char('?') => self.dispatch(CounterEvent::ToggleHelp),

            _ => {}
        }
    }

    /// Mouse input. Control zones consume the press; everything else is the
    /// full-surface tap target.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }

        let mut zone = self.layout.hit(mouse.column, mouse.row);
        // The undo control is hidden at zero; its zone is plain surface.
        if zone == HitZone::UndoButton && self.state.count() == 0 {
            zone = HitZone::Surface;
        }

        let event = match zone {
            HitZone::Surface => CounterEvent::TapSurface,
            HitZone::ThemeToggle => CounterEvent::ToggleTheme,
            HitZone::HelpButton => CounterEvent::ToggleHelp,
            HitZone::ResetButton => CounterEvent::ResetTap,
            HitZone::UndoButton => CounterEvent::Undo,
        };
        self.dispatch(event);
    }

    /// Terminal resize. Geometry captured for an in-flight glyph is stale
    /// after a resize, so the flight is discarded and the slot shows.
    pub fn handle_resize(&mut self, width: u16, height: u16) {
        let area = Rect::new(0, 0, width, height);
        self.compositor.resize(area);
        self.layout.resize(area);
        self.animator.cancel();

        self.compositor.set_bounds(self.layers.surface, area);
        self.compositor
            .set_bounds(self.layers.top_bar, self.layout.top_bar);
        self.compositor
            .set_bounds(self.layers.history, self.layout.history);
        self.compositor
            .set_bounds(self.layers.controls, self.layout.controls);
        self.compositor
            .set_bounds(self.layers.help, help_bounds(area));
    }

    /// Apply a user event and act on its effects.
    pub fn dispatch(&mut self, event: CounterEvent) {
        let effects = self.state.apply(event);

        // Undo snaps any draw-in; strokes never animate removal.
        if event == CounterEvent::Undo {
            self.reveal.cancel();
        }

        self.process_effects(effects);
    }

    /// Advance all deadlines and animations by one frame delta.
    pub fn tick(&mut self, delta: Duration) {
        let effects = self.state.update(delta);
        self.process_effects(effects);

        self.reveal.update(delta);
        if self.animator.update(delta) == Some(FlightEvent::Landed) {
            tracing::debug!("history slot revealed");
        }

        self.layout.set_history_len(self.state.completed_characters());
    }

    fn process_effects(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Haptic(strength) => self.haptics.trigger(strength),
                Effect::StrokeAdded => self.reveal.begin(),
                Effect::CharacterCompleted => self.start_flight(),
                Effect::CompletionRevoked => self.animator.cancel(),
                Effect::CountReset => {
                    self.reveal.cancel();
                    self.layout.set_history_len(0);
                }
                Effect::ResetArmed => tracing::debug!("reset armed"),
                Effect::ResetCancelled => tracing::debug!("reset disarmed"),
                Effect::HelpClosed => {}
            }
        }
    }

    /// Capture geometry and launch the fly-to-history transition.
    ///
    /// The active glyph is measured first (its rectangle is independent of
    /// the strip), then the strip is scrolled to reveal the newest slot and
    /// that slot is measured as the target.
    fn start_flight(&mut self) {
        let completed = self.state.completed_characters();
        self.layout.set_history_len(completed);
        if !self.animator.begin(&self.layout, completed) {
            // Unmeasurable geometry (degenerate terminal): no flight, the
            // slot just appears.
            tracing::debug!(completed, "completion without flight");
        }
    }

    /// Render all layers and composite into the terminal frame.
    pub fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()> {
        let colors = *palette(self.state.theme());

        self.render_surface(&colors);
        self.render_top_bar(&colors);
        self.render_history(&colors);
        self.render_controls(&colors);
        self.render_help(&colors);
        self.render_flight(&colors);

        terminal.draw(|frame| {
            let output = self.compositor.composite();
            let area = frame.area();
            let buf = frame.buffer_mut();

            for y in 0..area.height.min(output.area.height) {
                for x in 0..area.width.min(output.area.width) {
                    let idx = output.index_of(x, y);
                    if idx < output.content.len() {
                        buf[(x, y)] = output.content[idx].clone();
                    }
                }
            }
        })?;

        Ok(())
    }

    /// Background, active glyph, and the tap hint.
    fn render_surface(&mut self, colors: &Palette) {
        let glyph_area = self.layout.glyph;
        let hint_area = self.layout.hint;
        let strokes = self.state.display_strokes();
        let progress = self.reveal.progress();
        let show_hint = self.state.count() == 0;

        if let Some(buf) = self.compositor.buffer_mut(self.layers.surface) {
            fill(buf, Style::default().bg(colors.bg));

            StrokeGlyph::new(strokes, colors.ink)
                .with_newest_progress(progress)
                .render(glyph_area, buf);

            if show_hint && hint_area.width >= 21 {
                let hint = "T A P   S C R E E N";
                let x = hint_area.x + (hint_area.width - hint.len() as u16) / 2;
                buf.set_string(x, hint_area.y, hint, Style::default().fg(colors.hint));
            }
        }
    }

    /// Theme toggle on the left, count readout on the right.
    fn render_top_bar(&mut self, colors: &Palette) {
        let theme = self.state.theme();
        let count = self.state.count();
        let button = self.layout.theme_button();
        let bar = self.layout.top_bar;

        if let Some(buf) = self.compositor.buffer_mut(self.layers.top_bar) {
            buf.reset();
            if bar.height == 0 {
                return;
            }

            buf.set_string(
                button.x - bar.x,
                button.y - bar.y,
                theme_icon(theme),
                Style::default().fg(colors.control),
            );

            let readout = count.to_string();
            let x = bar.width.saturating_sub(readout.len() as u16 + 2);
            buf.set_string(
                x,
                0,
                &readout,
                Style::default().fg(colors.ink).add_modifier(Modifier::BOLD),
            );
        }
    }

    /// One small glyph per completed character, oldest first. The slot a
    /// flight is heading for keeps its space but stays invisible.
    fn render_history(&mut self, colors: &Palette) {
        let completed = self.state.completed_characters();
        let suppressed = self.animator.suppressed_slot();
        let strip = self.layout.history;

        let slots: Vec<(u32, Rect)> = (0..completed)
            .filter(|index| Some(*index) != suppressed)
            .filter_map(|index| self.layout.history_slot(index).map(|rect| (index, rect)))
            .collect();

        if let Some(buf) = self.compositor.buffer_mut(self.layers.history) {
            buf.reset();
            for (_, rect) in slots {
                let local = Rect::new(rect.x - strip.x, rect.y - strip.y, rect.width, rect.height);
                StrokeGlyph::new(5, colors.ink_faint).render(local, buf);
            }
        }
    }

    /// Help, reset (armed style while confirming), undo (hidden at zero).
    fn render_controls(&mut self, colors: &Palette) {
        let reset_pending = self.state.reset_pending();
        let show_undo = self.state.count() > 0;
        let bar = self.layout.controls;
        let help = local(self.layout.help_button(), bar);
        let reset = local(self.layout.reset_button(), bar);
        let undo = local(self.layout.undo_button(), bar);

        if let Some(buf) = self.compositor.buffer_mut(self.layers.controls) {
            buf.reset();
            if bar.height == 0 {
                return;
            }
            fill(buf, Style::default().bg(colors.bg));

            let control = Style::default().fg(colors.control).bg(colors.bg);
            buf.set_string(help.x, help.y, " ? help ", control);

            if reset_pending {
                buf.set_string(
                    reset.x,
                    reset.y,
                    " confirm ",
                    Style::default()
                        .fg(colors.danger)
                        .bg(colors.bg)
                        .add_modifier(Modifier::BOLD),
                );
            } else {
                buf.set_string(reset.x, reset.y, "  reset  ", control);
            }

            if show_undo {
                buf.set_string(undo.x, undo.y, "  undo  ", control);
            }
        }
    }

    /// The modal help panel.
    fn render_help(&mut self, colors: &Palette) {
        let visible = self.state.help_visible();
        self.compositor.set_visible(self.layers.help, visible);
        if !visible {
            return;
        }

        if let Some(buf) = self.compositor.buffer_mut(self.layers.help) {
            buf.reset();
            let area = buf.area;
            if area.width < 4 || area.height < 4 {
                return;
            }

            fill(buf, Style::default().bg(colors.panel_bg));
            draw_border(buf, area, Style::default().fg(colors.control).bg(colors.panel_bg));

            let ink = Style::default().fg(colors.ink).bg(colors.panel_bg);
            let lines = [
                "正  one stroke per tap",
                "",
                "tap / space   count one stroke",
                "u             undo last stroke",
                "r r           reset (tap twice)",
                "t             light / dark",
                "?             close this panel",
                "q             quit",
            ];
            for (row, line) in lines.iter().enumerate() {
                let y = area.y + 2 + row as u16;
                if y >= area.y + area.height.saturating_sub(1) {
                    break;
                }
                buf.set_string(area.x + 3, y, line, ink);
            }
        }
    }

    /// The completed glyph in transit, re-bounded to the interpolated
    /// rectangle each frame.
    fn render_flight(&mut self, colors: &Palette) {
        match self.animator.current_rect() {
            Some(rect) => {
                let bounds = to_cells(rect);
                self.compositor.set_bounds(self.layers.flight, bounds);
                self.compositor.set_visible(self.layers.flight, true);
                if let Some(buf) = self.compositor.buffer_mut(self.layers.flight) {
                    buf.reset();
                    let area = buf.area;
                    StrokeGlyph::new(5, colors.ink).render(area, buf);
                }
            }
            None => self.compositor.set_visible(self.layers.flight, false),
        }
    }
}

/// Centered modal bounds for the help panel.
fn help_bounds(area: Rect) -> Rect {
    let width = 38.min(area.width.saturating_sub(2)).max(1);
    let height = 12.min(area.height.saturating_sub(2)).max(1);
    Rect::new(
        area.x + (area.width.saturating_sub(width)) / 2,
        area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    )
}

/// Paint every cell of a layer buffer with a style (opaque background).
fn fill(buf: &mut ratatui::buffer::Buffer, style: Style) {
    let area = buf.area;
    let blank = " ".repeat(area.width as usize);
    for y in area.y..area.y + area.height {
        buf.set_string(area.x, y, &blank, style);
    }
}

/// Single-line box border.
fn draw_border(buf: &mut ratatui::buffer::Buffer, area: Rect, style: Style) {
    let right = area.x + area.width - 1;
    let bottom = area.y + area.height - 1;

    for x in area.x + 1..right {
        buf.set_string(x, area.y, "─", style);
        buf.set_string(x, bottom, "─", style);
    }
    for y in area.y + 1..bottom {
        buf.set_string(area.x, y, "│", style);
        buf.set_string(right, y, "│", style);
    }
    buf.set_string(area.x, area.y, "╭", style);
    buf.set_string(right, area.y, "╮", style);
    buf.set_string(area.x, bottom, "╰", style);
    buf.set_string(right, bottom, "╯", style);
}

/// Translate an absolute rectangle into a layer's origin-based space.
fn local(rect: Rect, layer_bounds: Rect) -> Rect {
    Rect::new(
        rect.x.saturating_sub(layer_bounds.x),
        rect.y.saturating_sub(layer_bounds.y),
        rect.width,
        rect.height,
    )
}

