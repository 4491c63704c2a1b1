//! Haptic Feedback Contract
//!
//! Surfaces plug a device-specific implementation behind the [`Haptics`]
//! trait; the state machine only ever names a [`HapticStrength`]. Devices
//! without a vibration-like capability use [`NullHaptics`]; absence is not
//! an error.

use serde::{Deserialize, Serialize};

/// Discrete feedback intensity requested by the state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HapticStrength {
    /// Single short pulse (ordinary stroke, undo, toggles).
    Light,
    /// Single medium pulse (reset armed).
    Medium,
    /// Pulse-pause-pulse pattern (character completed, reset performed).
    Heavy,
}

impl HapticStrength {
    /// Pulse pattern in milliseconds, alternating pulse/pause, starting
    /// with a pulse.
    #[must_use]
    pub fn pattern(self) -> &'static [u64] {
        match self {
            HapticStrength::Light => &[15],
            HapticStrength::Medium => &[40],
            HapticStrength::Heavy => &[30, 50, 30],
        }
    }
}

/// A device capability that can emit tactile (or stand-in) feedback.
///
/// Implementations must be fire-and-forget: `trigger` never blocks the
/// caller and never reports failure.
pub trait Haptics {
    /// Emit feedback at the given strength.
    fn trigger(&self, strength: HapticStrength);
}

/// The silent implementation for hosts without any feedback capability.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullHaptics;

impl Haptics for NullHaptics {
    fn trigger(&self, _strength: HapticStrength) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patterns_start_and_end_with_a_pulse() {
        for strength in [
            HapticStrength::Light,
            HapticStrength::Medium,
            HapticStrength::Heavy,
        ] {
            let pattern = strength.pattern();
            assert!(pattern.len() % 2 == 1, "{strength:?} ends on a pause");
        }
    }

    #[test]
    fn test_heavy_is_a_double_pulse() {
        assert_eq!(HapticStrength::Heavy.pattern(), &[30, 50, 30]);
    }

    #[test]
    fn test_null_haptics_is_silent() {
        NullHaptics.trigger(HapticStrength::Heavy);
    }
}
