//! Theme State
//!
//! Light/dark selection. The ambient host preference is sampled exactly once
//! at startup; after that the explicit toggle is the only driver.

use serde::{Deserialize, Serialize};

/// The two color schemes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Theme {
    /// Light background, dark ink.
    #[default]
    Light,
    /// Dark background, light ink.
    Dark,
}

impl Theme {
    /// Seed from the host's ambient color-scheme preference.
    #[must_use]
    pub fn from_ambient(prefers_dark: bool) -> Self {
        if prefers_dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    /// The other theme.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Whether this is the dark scheme.
    #[must_use]
    pub fn is_dark(self) -> bool {
        matches!(self, Theme::Dark)
    }
}
