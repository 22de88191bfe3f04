//! Centralized tilt threshold configuration.
//!
//! All thresholds are compile-time constants with validation assertions.
//! The tilt mapper, the gauge widgets and the simulator all read from here so
//! the on-target classification and clamp limits stay consistent.
//!
//! # Compile-Time Validation
//!
//! Each group includes `const` assertions that verify ordering at compile
//! time. A bar limit wider than the half track, or a zero sensitivity, fails
//! the build instead of producing a bubble that leaves its track.

// =============================================================================
// Sensitivity
// =============================================================================

/// Tilt (degrees) that drives a gauge to full deflection.
/// Both the bar gauges and the bullseye use the same ceiling.
pub const SENSITIVITY_DEG: f32 = 90.0;

const _: () = assert!(SENSITIVITY_DEG > 0.0);

// =============================================================================
// Linear Bar Gauge
// =============================================================================

/// Notional half length of a bar track in percent (center to edge).
/// A tilt equal to `SENSITIVITY_DEG` maps to this offset before clamping.
pub const BAR_HALF_TRACK: f32 = 50.0;

/// Maximum bubble offset from the track center in percent.
/// Kept below `BAR_HALF_TRACK` so the bubble never touches the track end.
pub const BAR_LIMIT: f32 = 45.0;

const _: () = assert!(BAR_LIMIT > 0.0);
const _: () = assert!(BAR_LIMIT < BAR_HALF_TRACK);

// =============================================================================
// Bullseye Gauge
// =============================================================================

/// Maximum bubble distance from the bullseye center, in percent of the
/// gauge diameter. Keeps the bubble inside the circular border.
pub const BULLSEYE_MAX_RADIUS: f32 = 44.0;

const _: () = assert!(BULLSEYE_MAX_RADIUS > 0.0);
const _: () = assert!(BULLSEYE_MAX_RADIUS < 50.0);

// =============================================================================
// On-Target Classification
// =============================================================================

/// Tilt magnitude (degrees) below which an axis counts as level.
/// Strict: exactly 1.0 degree is off target.
pub const LEVEL_THRESHOLD_DEG: f32 = 1.0;

const _: () = assert!(LEVEL_THRESHOLD_DEG > 0.0);
const _: () = assert!(LEVEL_THRESHOLD_DEG < SENSITIVITY_DEG);

/// Check if a single axis is level.
#[inline]
pub fn is_level(angle: f32) -> bool { libm::fabsf(angle) < LEVEL_THRESHOLD_DEG }

/// Check if both bullseye axes are level.
#[inline]
pub fn is_level_2d(
    x: f32,
    y: f32,
) -> bool {
    is_level(x) && is_level(y)
}

// =============================================================================
// Unit Tests
// =============================================================================
