//! Terminal Haptics
//!
//! Terminals don't vibrate; the bell is the closest stand-in. Each pulse in
//! the pattern becomes one BEL, with the pattern's pauses spaced by a
//! spawned sleep so the caller never blocks. Failed writes and missing
//! runtimes are swallowed; feedback is best-effort by contract.

use std::io::{self, Write};

use tokio::time::{sleep, Duration};

use zheng_core::{HapticStrength, Haptics};

/// Environment switch to silence the bell entirely.
pub const NO_BELL_ENV: &str = "ZHENG_NO_BELL";

const BELL: &[u8] = b"\x07";

/// Bell-backed haptics for the terminal surface.
#[derive(Clone, Copy, Debug)]
pub struct TerminalHaptics {
    enabled: bool,
}

impl TerminalHaptics {
    /// Honor `ZHENG_NO_BELL` (any value disables).
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            enabled: std::env::var_os(NO_BELL_ENV).is_none(),
        }
    }

    #[must_use]
    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    fn ring() {
        let mut stdout = io::stdout();
        let _ = stdout.write_all(BELL);
        let _ = stdout.flush();
    }
}

impl Haptics for TerminalHaptics {
    fn trigger(&self, strength: HapticStrength) {
        if !self.enabled {
            return;
        }

        let pattern = strength.pattern();

        // Single-pulse patterns need no pacing at all.
        if pattern.len() == 1 {
            Self::ring();
            return;
        }

        // Multi-pulse patterns pace their pulses off the caller's thread.
        // Outside a runtime (plain unit tests) feedback is silently skipped.
        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            let pattern = pattern.to_vec();
            handle.spawn(async move {
                for (index, &ms) in pattern.iter().enumerate() {
                    if index % 2 == 0 {
                        Self::ring();
                    } else {
                        sleep(Duration::from_millis(ms)).await;
                    }
                }
            });
        }
    }
}
