//! Two-axis orientation readings.
//!
//! Platforms report device orientation as three optional angles. `None` is the
//! platform's "unknown" sentinel (sensor warming up, axis unsupported). The
//! level only consumes `beta` and `gamma`, and never lets the sentinel through:
//! [`RawOrientationEvent::normalize`] substitutes `0.0` for a missing axis.

/// Orientation event as delivered by the platform.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RawOrientationEvent {
    /// Rotation around the z axis (compass heading). Unused by the level.
    pub alpha: Option<f32>,
    /// Front-to-back tilt, -180 to 180 degrees.
    pub beta: Option<f32>,
    /// Left-to-right tilt, -90 to 90 degrees.
    pub gamma: Option<f32>,
}

impl RawOrientationEvent {
    /// Event with both tilt axes present.
    pub const fn new(
        beta: f32,
        gamma: f32,
    ) -> Self {
        Self {
            alpha: None,
            beta: Some(beta),
            gamma: Some(gamma),
        }
    }

    /// True if either tilt axis carries the unknown sentinel.
    #[inline]
    pub const fn is_malformed(&self) -> bool { self.beta.is_none() || self.gamma.is_none() }

    /// Convert to a published reading, zeroing any unknown axis.
    ///
    /// No smoothing or clamping happens here; out-of-range angles pass
    /// through untouched.
    #[inline]
    pub fn normalize(&self) -> OrientationReading {
        OrientationReading {
            beta: self.beta.unwrap_or(0.0),
            gamma: self.gamma.unwrap_or(0.0),
        }
    }
}

/// Latest published tilt. Both fields are always defined.
///
/// On a phone held in portrait, `gamma` drives the X axis and `beta` the Y axis.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OrientationReading {
    /// Front-to-back tilt in degrees.
    pub beta: f32,
    /// Left-to-right tilt in degrees.
    pub gamma: f32,
}

impl OrientationReading {
    /// Flat on a table. Also what an inert source reports.
    pub const LEVEL: Self = Self { beta: 0.0, gamma: 0.0 };

    pub const fn new(
        beta: f32,
        gamma: f32,
    ) -> Self {
        Self { beta, gamma }
    }
}

// =============================================================================
// Tests
// =============================================================================
