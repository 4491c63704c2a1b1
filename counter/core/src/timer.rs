//! Cancellable Countdown Timers
//!
//! Frame-rate independent deadlines advanced by `update(delta)` from the
//! surface's frame loop. There are no detached timer callbacks anywhere in
//! the system: a [`Countdown`] fires synchronously inside the loop, which
//! makes the cancel-and-replace and cancel-on-undo invariants direct to
//! enforce and to test with synthetic deltas.

use std::time::Duration;

/// A single cancellable deadline.
///
/// At most one deadline is live per `Countdown`; [`Countdown::start`]
/// replaces any previous one, so a stale expiry can never fire late.
#[derive(Clone, Debug, Default)]
pub struct Countdown {
    /// Time remaining until the deadline fires, `None` when idle.
    remaining: Option<Duration>,
    /// Duration the current run was started with.
    total: Duration,
}

impl Countdown {
    /// Create an idle countdown.
    #[must_use]
    pub fn idle() -> Self {
        Self::default()
    }

    /// Arm the countdown, cancelling and replacing any previous deadline.
    pub fn start(&mut self, duration: Duration) {
        self.remaining = Some(duration);
        self.total = duration;
    }

    /// Cancel the pending deadline, if any. The deadline will not fire.
    pub fn cancel(&mut self) {
        self.remaining = None;
    }

    /// Whether a deadline is pending.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.remaining.is_some()
    }

    /// Advance by `delta`.
    ///
    /// Returns `true` exactly once, on the update that crosses the deadline.
    /// After firing the countdown is idle again.
    pub fn update(&mut self, delta: Duration) -> bool {
        match self.remaining {
            Some(remaining) => {
                if delta >= remaining {
                    self.remaining = None;
                    true
                } else {
                    self.remaining = Some(remaining - delta);
                    false
                }
            }
            None => false,
        }
    }

    /// Fraction of the current run already elapsed, in `[0.0, 1.0]`.
    ///
    /// Reads 1.0 when idle (a finished run is fully elapsed).
    #[must_use]
    pub fn progress(&self) -> f32 {
        match self.remaining {
            Some(remaining) if !self.total.is_zero() => {
                1.0 - (remaining.as_secs_f32() / self.total.as_secs_f32())
            }
            Some(_) => 1.0,
            None => 1.0,
        }
    }
}
