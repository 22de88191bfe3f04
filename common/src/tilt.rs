//! Tilt-to-gauge mapping.
//!
//! Converts tilt angles into bubble offsets for the two gauge kinds:
//!
//! - **Bar gauge** (one axis): `offset = clamp(v / M * 50, -45, 45)`, a percent
//!   offset from the track center. Saturates instead of extrapolating so the
//!   bubble never reaches the track edge.
//! - **Bullseye** (two axes): both angles are normalized by `M`, and if the
//!   resulting vector is longer than 1 it is rescaled onto the unit circle.
//!   The clamp is radial, not per axis, so the bubble traces the circular
//!   border instead of escaping into the corners of a square. The unit vector
//!   is then scaled by `R`, the maximum radius in percent of the diameter.
//!
//! ```text
//!   (90, 0)  -> norm (1, 0),  d = 1   -> (R, 0)
//!   (90, 90) -> norm (1, 1),  d = √2  -> (R/√2, R/√2) ≈ (31.1, 31.1)
//! ```
//!
//! Every mapping is a pure function of its inputs. `M` and `R` are validated
//! once in [`TiltMapper::new`], so no call can divide by zero or produce NaN
//! offsets.

use crate::orientation::OrientationReading;
use crate::thresholds::{BAR_HALF_TRACK, BAR_LIMIT, BULLSEYE_MAX_RADIUS, SENSITIVITY_DEG, is_level, is_level_2d};

/// Mapper configuration rejected at construction.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum TiltError {
    #[error("sensitivity must be a finite angle above zero, got {0}")]
    InvalidSensitivity(f32),
    #[error("bullseye radius must be finite and above zero, got {0}")]
    InvalidRadius(f32),
}

/// Bubble position on a linear gauge.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BarOffset {
    /// Offset from the track center in percent of the track length, within ±`BAR_LIMIT`.
    pub percent: f32,
}

impl BarOffset {
    /// Position along the bubble's travel, in [-1, 1].
    #[inline]
    pub fn fraction(self) -> f32 { self.percent / BAR_LIMIT }
}

/// Bubble position inside the bullseye.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BullseyeOffset {
    /// Horizontal offset from center in percent of the gauge diameter.
    pub x: f32,
    /// Vertical offset from center in percent of the gauge diameter.
    pub y: f32,
}

impl BullseyeOffset {
    /// Distance from the center in percent of the diameter.
    #[inline]
    pub fn magnitude(self) -> f32 { libm::hypotf(self.x, self.y) }
}

/// Mapped state of one bar gauge.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BarGauge {
    /// Raw angle shown in the readout.
    pub angle: f32,
    pub offset: BarOffset,
    pub on_target: bool,
}

/// Mapped state of the bullseye gauge.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BullseyeGauge {
    /// Raw X angle (gamma) shown in the readout.
    pub x_angle: f32,
    /// Raw Y angle (beta) shown in the readout.
    pub y_angle: f32,
    pub offset: BullseyeOffset,
    pub on_target: bool,
}

/// Everything the presentation layer needs for one reading.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GaugeFrame {
    /// Left/right bar, driven by gamma.
    pub horizontal: BarGauge,
    /// Front/back bar, driven by beta.
    pub vertical: BarGauge,
    /// Bullseye, driven by (gamma, beta).
    pub bullseye: BullseyeGauge,
}

/// Validated sensitivity ceiling and bullseye radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TiltMapper {
    sensitivity: f32,
    max_radius: f32,
}

impl TiltMapper {
    /// Mapper with the compile-time defaults (90 degrees, radius 44).
    pub const DEFAULT: Self = Self {
        sensitivity: SENSITIVITY_DEG,
        max_radius: BULLSEYE_MAX_RADIUS,
    };

    /// Build a mapper, rejecting a zero, negative or non-finite configuration.
    pub fn new(
        sensitivity: f32,
        max_radius: f32,
    ) -> Result<Self, TiltError> {
        if !sensitivity.is_finite() || sensitivity <= 0.0 {
            return Err(TiltError::InvalidSensitivity(sensitivity));
        }
        if !max_radius.is_finite() || max_radius <= 0.0 {
            return Err(TiltError::InvalidRadius(max_radius));
        }
        Ok(Self {
            sensitivity,
            max_radius,
        })
    }

    #[inline]
    pub const fn sensitivity(&self) -> f32 { self.sensitivity }

    #[inline]
    pub const fn max_radius(&self) -> f32 { self.max_radius }

    /// Bar gauge offset for one axis.
    pub fn bar_offset(
        &self,
        angle: f32,
    ) -> BarOffset {
        let raw = angle / self.sensitivity * BAR_HALF_TRACK;
        BarOffset {
            percent: raw.clamp(-BAR_LIMIT, BAR_LIMIT),
        }
    }

    /// Bullseye offset for an (x, y) angle pair, radially clamped to `R`.
    pub fn bullseye_offset(
        &self,
        x: f32,
        y: f32,
    ) -> BullseyeOffset {
        let mut norm_x = x / self.sensitivity;
        let mut norm_y = y / self.sensitivity;

        let distance = libm::sqrtf(norm_x * norm_x + norm_y * norm_y);
        if distance > 1.0 {
            norm_x /= distance;
            norm_y /= distance;
        }

        BullseyeOffset {
            x: norm_x * self.max_radius,
            y: norm_y * self.max_radius,
        }
    }

    pub fn bar(
        &self,
        angle: f32,
    ) -> BarGauge {
        BarGauge {
            angle,
            offset: self.bar_offset(angle),
            on_target: is_level(angle),
        }
    }

    pub fn bullseye(
        &self,
        x: f32,
        y: f32,
    ) -> BullseyeGauge {
        BullseyeGauge {
            x_angle: x,
            y_angle: y,
            offset: self.bullseye_offset(x, y),
            on_target: is_level_2d(x, y),
        }
    }

    /// Map a reading onto all three gauges.
    ///
    /// Gamma drives the X axis (horizontal bar, bullseye x); beta drives the
    /// Y axis (vertical bar, bullseye y).
    pub fn map(
        &self,
        reading: OrientationReading,
    ) -> GaugeFrame {
        GaugeFrame {
            horizontal: self.bar(reading.gamma),
            vertical: self.bar(reading.beta),
            bullseye: self.bullseye(reading.gamma, reading.beta),
        }
    }
}

impl Default for TiltMapper {
    fn default() -> Self { Self::DEFAULT }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn close(
        a: f32,
        b: f32,
    ) -> bool {
        (a - b).abs() < EPS
    }

    // -------------------------------------------------------------------------
    // Configuration
    // -------------------------------------------------------------------------

    #[test]
    fn test_new_rejects_zero_sensitivity() {
        assert_eq!(TiltMapper::new(0.0, 44.0), Err(TiltError::InvalidSensitivity(0.0)));
    }

    #[test]
    fn test_new_rejects_negative_and_nan_sensitivity() {
        assert!(TiltMapper::new(-10.0, 44.0).is_err());
        assert!(TiltMapper::new(f32::NAN, 44.0).is_err());
        assert!(TiltMapper::new(f32::INFINITY, 44.0).is_err());
    }

    #[test]
    fn test_new_rejects_bad_radius() {
        assert_eq!(TiltMapper::new(90.0, 0.0), Err(TiltError::InvalidRadius(0.0)));
        assert!(TiltMapper::new(90.0, f32::NAN).is_err());
    }

    #[test]
    fn test_default_matches_thresholds() {
        let mapper = TiltMapper::default();
        assert_eq!(mapper.sensitivity(), 90.0);
        assert_eq!(mapper.max_radius(), 44.0);
        assert_eq!(TiltMapper::new(90.0, 44.0), Ok(mapper));
    }

    // -------------------------------------------------------------------------
    // Bar gauge
    // -------------------------------------------------------------------------

    #[test]
    fn test_bar_level_is_centered() {
        let gauge = TiltMapper::DEFAULT.bar(0.0);
        assert_eq!(gauge.offset.percent, 0.0);
        assert!(gauge.on_target);
    }

    #[test]
    fn test_bar_half_tilt() {
        // 45 / 90 * 50 = 25
        assert!(close(TiltMapper::DEFAULT.bar_offset(45.0).percent, 25.0));
        assert!(close(TiltMapper::DEFAULT.bar_offset(-45.0).percent, -25.0));
    }

    #[test]
    fn test_bar_saturates_beyond_sensitivity() {
        let mapper = TiltMapper::DEFAULT;
        assert_eq!(mapper.bar_offset(200.0).percent, 45.0);
        assert_eq!(mapper.bar_offset(-200.0).percent, -45.0);
        assert_eq!(mapper.bar_offset(180.0).percent, 45.0);
        assert_eq!(mapper.bar_offset(-180.0).percent, -45.0);
        assert_eq!(mapper.bar_offset(90.5).percent, 45.0);
    }

    #[test]
    fn test_bar_bounded_and_monotonic_in_range() {
        let mapper = TiltMapper::DEFAULT;
        let mut prev = f32::MIN;
        let mut angle = -90.0f32;
        while angle <= 90.0 {
            let offset = mapper.bar_offset(angle).percent;
            assert!((-45.0..=45.0).contains(&offset), "offset {offset} out of range at {angle}");
            assert!(offset >= prev, "offset decreased at {angle}");
            prev = offset;
            angle += 0.25;
        }
    }

    #[test]
    fn test_bar_fraction_spans_travel() {
        let mapper = TiltMapper::DEFAULT;
        assert!(close(mapper.bar_offset(200.0).fraction(), 1.0));
        assert!(close(mapper.bar_offset(-200.0).fraction(), -1.0));
        assert_eq!(mapper.bar_offset(0.0).fraction(), 0.0);
    }

    #[test]
    fn test_bar_on_target_threshold() {
        let mapper = TiltMapper::DEFAULT;
        assert!(mapper.bar(0.9).on_target);
        assert!(mapper.bar(-0.9).on_target);
        assert!(!mapper.bar(1.0).on_target);
        assert!(!mapper.bar(-3.5).on_target);
    }

    #[test]
    fn test_bar_custom_sensitivity() {
        let mapper = TiltMapper::new(30.0, 44.0).unwrap();
        // 15 / 30 * 50 = 25
        assert!(close(mapper.bar_offset(15.0).percent, 25.0));
        assert_eq!(mapper.bar_offset(30.0).percent, 45.0);
    }

    // -------------------------------------------------------------------------
    // Bullseye gauge
    // -------------------------------------------------------------------------

    #[test]
    fn test_bullseye_level_is_centered() {
        let gauge = TiltMapper::DEFAULT.bullseye(0.0, 0.0);
        assert_eq!(gauge.offset, BullseyeOffset { x: 0.0, y: 0.0 });
        assert!(gauge.on_target);
    }

    #[test]
    fn test_bullseye_on_unit_circle_not_rescaled() {
        let offset = TiltMapper::DEFAULT.bullseye_offset(90.0, 0.0);
        assert!(close(offset.x, 44.0));
        assert!(close(offset.y, 0.0));
    }

    #[test]
    fn test_bullseye_diagonal_is_clamped_radially() {
        let offset = TiltMapper::DEFAULT.bullseye_offset(90.0, 90.0);
        let expected = 44.0 / core::f32::consts::SQRT_2;
        assert!(close(offset.x, expected), "x = {}", offset.x);
        assert!(close(offset.y, expected), "y = {}", offset.y);
        assert!((offset.x - 31.1).abs() < 0.05);
        // A per-axis clamp would have produced (44, 44).
        assert!(offset.x < 44.0);
    }

    #[test]
    fn test_bullseye_inside_circle_is_linear() {
        let offset = TiltMapper::DEFAULT.bullseye_offset(45.0, -18.0);
        assert!(close(offset.x, 22.0));
        assert!(close(offset.y, -8.8));
    }

    #[test]
    fn test_bullseye_never_exceeds_radius() {
        let mapper = TiltMapper::DEFAULT;
        let mut x = -360.0f32;
        while x <= 360.0 {
            let mut y = -360.0f32;
            while y <= 360.0 {
                let offset = mapper.bullseye_offset(x, y);
                assert!(
                    offset.magnitude() <= 44.0 + EPS,
                    "({x}, {y}) escaped the ring: {}",
                    offset.magnitude()
                );
                y += 7.5;
            }
            x += 7.5;
        }
    }

    #[test]
    fn test_bullseye_clamp_preserves_direction() {
        let offset = TiltMapper::DEFAULT.bullseye_offset(-300.0, 100.0);
        assert!(close(offset.magnitude(), 44.0));
        assert!(close(offset.x / offset.y, -3.0));
    }

    #[test]
    fn test_bullseye_on_target_needs_both_axes() {
        let mapper = TiltMapper::DEFAULT;
        assert!(mapper.bullseye(0.5, 0.5).on_target);
        assert!(!mapper.bullseye(0.5, 1.2).on_target);
        assert!(!mapper.bullseye(-1.0, 0.0).on_target);
    }

    // -------------------------------------------------------------------------
    // Full frame
    // -------------------------------------------------------------------------

    #[test]
    fn test_map_level_reading() {
        let frame = TiltMapper::DEFAULT.map(OrientationReading::LEVEL);
        assert_eq!(frame.horizontal.offset.percent, 0.0);
        assert_eq!(frame.vertical.offset.percent, 0.0);
        assert_eq!(frame.bullseye.offset, BullseyeOffset::default());
        assert!(frame.horizontal.on_target);
        assert!(frame.vertical.on_target);
        assert!(frame.bullseye.on_target);
    }

    #[test]
    fn test_map_axis_assignment() {
        // beta = 45 (front/back), gamma = -90 (left/right)
        let frame = TiltMapper::DEFAULT.map(OrientationReading::new(45.0, -90.0));
        assert!(close(frame.horizontal.offset.percent, -45.0));
        assert!(close(frame.vertical.offset.percent, 25.0));
        assert!(frame.bullseye.offset.x < 0.0);
        assert!(frame.bullseye.offset.y > 0.0);
        assert_eq!(frame.horizontal.angle, -90.0);
        assert_eq!(frame.vertical.angle, 45.0);
    }

    #[test]
    fn test_map_is_pure() {
        let mapper = TiltMapper::DEFAULT;
        let reading = OrientationReading::new(-12.3, 77.7);
        assert_eq!(mapper.map(reading), mapper.map(reading));
    }
}
