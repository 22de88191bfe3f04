//! Popup state management with time-based expiration.
//!
//! Each popup variant holds its start time for expiration checking.

use std::time::Instant;

use crate::timing::POPUP_DURATION;

/// Active popup with its start time.
#[derive(Clone, Copy, Debug)]
pub enum Popup {
    /// "FPS ON/OFF".
    Fps(Instant),
    /// "MOTION: KEYS/SWEEP".
    Motion(Instant),
    /// "GLITCH: ON/OFF".
    Glitch(Instant),
}

impl Popup {
    #[inline]
    pub const fn start_time(&self) -> Instant {
        match self {
            Self::Fps(t) | Self::Motion(t) | Self::Glitch(t) => *t,
        }
    }

    #[inline]
    pub fn is_expired(&self) -> bool { self.start_time().elapsed() >= POPUP_DURATION }

    /// Discriminant for `RenderState` tracking.
    #[inline]
    pub const fn kind(&self) -> u8 {
        match self {
            Self::Fps(_) => 0,
            Self::Motion(_) => 1,
            Self::Glitch(_) => 2,
        }
    }
}
