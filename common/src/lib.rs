//! Common types and constants for the bubble level.
//!
//! This crate contains platform-agnostic code shared between the desktop
//! simulator and any hardware front end:
//!
//! - [`orientation`]: Two-axis readings and raw event normalization
//! - [`permission`]: Sensor capability and permission state machine
//! - [`source`]: Orientation source, platform trait and subscription handle
//! - [`tilt`]: Tilt-to-gauge mapping (linear bar and bullseye)
//! - [`thresholds`]: Sensitivity, clamp and on-target constants
//! - [`config`]: Layout and display configuration constants
//! - [`colors`]: RGB565 color constants for the display
//! - [`styles`]: Pre-computed text styles
//! - [`pages`]: Page navigation enum
//! - [`render`]: Render state tracking and popup kinds
//! - [`animations`]: Bubble color transitions
//! - [`profiling`]: Debug log buffer (no time dependencies)
//! - [`widgets`]: Gauge, header, gate screen and popup drawing
//!
//! # no_std Compatibility
//!
//! This crate is `no_std` compatible and can be used on embedded targets.
//! Tests run with `std` enabled so the standard harness is available.

#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

pub mod animations;
pub mod colors;
pub mod config;
pub mod orientation;
pub mod pages;
pub mod permission;
pub mod profiling;
pub mod render;
pub mod source;
pub mod styles;
pub mod thresholds;
pub mod tilt;
pub mod widgets;

// Re-export commonly used items
pub use orientation::{OrientationReading, RawOrientationEvent};
pub use pages::Page;
pub use permission::{AccessOutcome, Capability, DenialReason, PermissionState};
pub use source::{OrientationPlatform, OrientationSource, SubscribeError, Subscription};
pub use tilt::{BarGauge, BarOffset, BullseyeGauge, BullseyeOffset, GaugeFrame, TiltError, TiltMapper};
