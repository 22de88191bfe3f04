//! Timing constants for the simulator.
//!
//! `std::time::Duration` is not available to the `no_std` common crate, so
//! these live here.

use std::time::Duration;

/// Target frame time (~50 FPS). The main loop sleeps if frame completes early.
pub const FRAME_TIME: Duration = Duration::from_millis(20);

/// Duration that popups remain visible on screen.
pub const POPUP_DURATION: Duration = Duration::from_secs(2);

/// Interval over which the FPS counter averages.
pub const FPS_WINDOW: Duration = Duration::from_secs(1);
