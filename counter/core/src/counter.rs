//! Counter State Machine
//!
//! The complete interactive state of the tally screen: the count, the timed
//! reset-confirmation arming, the theme flag, and the help panel flag.
//!
//! # Design Philosophy
//!
//! Surfaces are "dumb" renderers that forward user actions as
//! [`CounterEvent`]s. They don't interpret what actions mean; the state
//! machine decides, mutates synchronously, and hands back the observable
//! [`Effect`]s (haptic requests, completion signals) for the surface to act
//! on. All timing goes through [`Countdown`] deadlines advanced by
//! [`CounterState::update`] from the frame loop, never detached callbacks.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::haptics::HapticStrength;
use crate::theme::Theme;
use crate::timer::Countdown;

/// Strokes in one completed "正" character.
pub const STROKES_PER_CHARACTER: u32 = 5;

/// How long a first reset tap stays armed waiting for the confirming tap.
pub const RESET_CONFIRM_WINDOW: Duration = Duration::from_millis(3000);

/// User actions forwarded by a surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CounterEvent {
    /// A tap anywhere on the main surface.
    TapSurface,
    /// The undo control.
    Undo,
    /// The reset control (first tap arms, second tap within the window
    /// performs the reset).
    ResetTap,
    /// The theme toggle control.
    ToggleTheme,
    /// The help toggle control.
    ToggleHelp,
}

/// Observable consequences of applying an event (or of time passing).
///
/// Effects are ordered as they occurred; a single event may produce several
/// (a completing tap yields `StrokeAdded`, `CharacterCompleted`, and a heavy
/// `Haptic`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    /// The surface should emit tactile feedback.
    Haptic(HapticStrength),
    /// A new stroke became visible on the active glyph (drives draw-in).
    StrokeAdded,
    /// The count crossed a multiple-of-5 boundary upward via increment.
    /// Drives the fly-to-history animation. Never emitted for Reset or Undo.
    CharacterCompleted,
    /// Undo dropped the count back below a completed boundary; any in-flight
    /// completion animation must be discarded.
    CompletionRevoked,
    /// The reset confirmation was armed.
    ResetArmed,
    /// The reset confirmation cleared without a reset (tap elsewhere, undo,
    /// or the 3000 ms window expiring).
    ResetCancelled,
    /// The confirming second tap zeroed the count.
    CountReset,
    /// A surface tap closed the help panel instead of counting.
    HelpClosed,
}

/// The tally screen's state. See the crate docs for the event/effect flow.
#[derive(Clone, Debug)]
pub struct CounterState {
    /// Total taps since the last reset. Never negative by construction.
    count: u32,
    /// Armed reset confirmation; running iff a first reset tap is pending.
    reset_confirm: Countdown,
    /// Current color scheme.
    theme: Theme,
    /// Whether the help panel is open.
    help_visible: bool,
}

impl CounterState {
    /// Fresh session state, theme seeded from the ambient preference.
    #[must_use]
    pub fn new(theme: Theme) -> Self {
        Self {
            count: 0,
            reset_confirm: Countdown::idle(),
            theme,
            help_visible: false,
        }
    }

    /// Total taps since the last reset.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Completed "正" characters.
    #[must_use]
    pub fn completed_characters(&self) -> u32 {
        self.count / STROKES_PER_CHARACTER
    }

    /// Strokes of the character in progress, `0..=4`.
    #[must_use]
    pub fn current_strokes(&self) -> u32 {
        self.count % STROKES_PER_CHARACTER
    }

    /// Strokes the active glyph shows. A just-completed character stays
    /// fully drawn (five strokes) until the next tap starts a new one.
    #[must_use]
    pub fn display_strokes(&self) -> u32 {
        if self.count > 0 && self.current_strokes() == 0 {
            STROKES_PER_CHARACTER
        } else {
            self.current_strokes()
        }
    }

    /// Whether a first reset tap is armed and waiting for confirmation.
    #[must_use]
    pub fn reset_pending(&self) -> bool {
        self.reset_confirm.is_running()
    }

    /// Current color scheme.
    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Whether the help panel is open.
    #[must_use]
    pub fn help_visible(&self) -> bool {
        self.help_visible
    }

    /// Apply a user event, returning the effects in occurrence order.
    pub fn apply(&mut self, event: CounterEvent) -> Vec<Effect> {
        match event {
            CounterEvent::TapSurface => self.tap_surface(),
            CounterEvent::Undo => self.undo(),
            CounterEvent::ResetTap => self.reset_tap(),
            CounterEvent::ToggleTheme => {
                self.theme = self.theme.toggled();
                vec![Effect::Haptic(HapticStrength::Light)]
            }
            CounterEvent::ToggleHelp => {
                self.help_visible = !self.help_visible;
                vec![Effect::Haptic(HapticStrength::Light)]
            }
        }
    }

    /// Advance pending deadlines by one frame delta.
    pub fn update(&mut self, delta: Duration) -> Vec<Effect> {
        if self.reset_confirm.update(delta) {
            tracing::debug!("reset confirmation expired");
            vec![Effect::ResetCancelled]
        } else {
            Vec::new()
        }
    }

    fn tap_surface(&mut self) -> Vec<Effect> {
        // An open help panel swallows the tap.
        if self.help_visible {
            self.help_visible = false;
            return vec![Effect::HelpClosed];
        }

        // An armed reset is disarmed by tapping anywhere else.
        if self.reset_confirm.is_running() {
            self.reset_confirm.cancel();
            return vec![Effect::ResetCancelled];
        }

        self.count += 1;
        if self.current_strokes() == 0 {
            tracing::info!(count = self.count, "character completed");
            vec![
                Effect::StrokeAdded,
                Effect::CharacterCompleted,
                Effect::Haptic(HapticStrength::Heavy),
            ]
        } else {
            vec![Effect::StrokeAdded, Effect::Haptic(HapticStrength::Light)]
        }
    }

    fn undo(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();

        if self.reset_confirm.is_running() {
            self.reset_confirm.cancel();
            effects.push(Effect::ResetCancelled);
        }

        if self.count == 0 {
            // No-op at zero: no count change, no haptic.
            return effects;
        }

        // Undoing from a fully drawn boundary uncompletes that character.
        if self.current_strokes() == 0 {
            effects.push(Effect::CompletionRevoked);
        }

        self.count -= 1;
        effects.push(Effect::Haptic(HapticStrength::Light));
        effects
    }

    fn reset_tap(&mut self) -> Vec<Effect> {
        if self.reset_confirm.is_running() {
            // Confirming tap: perform the reset.
            self.reset_confirm.cancel();
            let had_progress = self.count > 0;
            self.count = 0;
            tracing::info!("count reset");
            let mut effects = vec![Effect::CountReset, Effect::Haptic(HapticStrength::Heavy)];
            if had_progress {
                // Whatever was mid-flight lands nowhere after a reset.
                effects.insert(0, Effect::CompletionRevoked);
            }
            effects
        } else {
            // First tap: arm and start the expiry window.
            self.reset_confirm.start(RESET_CONFIRM_WINDOW);
            vec![Effect::ResetArmed, Effect::Haptic(HapticStrength::Medium)]
        }
    }
}

impl Default for CounterState {
    fn default() -> Self {
        Self::new(Theme::Light)
    }
}
