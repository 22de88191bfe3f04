//! Bubble color fades.
//!
//! When a gauge crosses the on-target threshold its bubble fades between
//! yellow and green over a few frames instead of switching instantly. Each
//! frame moves every RGB565 channel a fixed fraction of the way to the
//! target (8-bit fixed point), with at least one step so a fade always lands.
//!
//! Only the color is animated. Bubble positions are drawn from the raw
//! reading on every frame with no smoothing.

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

use crate::colors::{BUBBLE, BUBBLE_LEVEL};

// =============================================================================
// Gauge Indices
// =============================================================================

/// Number of gauges with a bubble.
pub const GAUGE_COUNT: usize = 3;

pub mod gauge_idx {
    pub const HORIZONTAL: usize = 0;
    pub const VERTICAL: usize = 1;
    pub const BULLSEYE: usize = 2;
}

// =============================================================================
// Fade Constants
// =============================================================================

/// Fraction of the remaining distance covered per frame. At 0.35 a full
/// yellow/green swap takes about 6 frames (~120ms at 50 FPS).
const COLOR_LERP_SPEED: f32 = 0.35;

/// `COLOR_LERP_SPEED` in 8-bit fixed point.
#[cfg(test)]
const COLOR_LERP_T_FIXED: i32 = 89;

/// Channel distance at which a fade snaps to its target.
const COLOR_SNAP_THRESHOLD: i32 = 2;

/// Bubble color for an on/off-target gauge.
#[inline]
pub const fn bubble_color(on_target: bool) -> Rgb565 { if on_target { BUBBLE_LEVEL } else { BUBBLE } }

// =============================================================================
// Fade State
// =============================================================================

#[derive(Clone, Copy)]
struct Fade {
    current: Rgb565,
    target: Rgb565,
}

impl Fade {
    const fn settled(color: Rgb565) -> Self {
        Self {
            current: color,
            target: color,
        }
    }

    /// Advance one frame. Returns `true` if the color moved.
    fn step(&mut self) -> bool {
        if self.current == self.target {
            return false;
        }
        let next = lerp_rgb565(self.current, self.target, COLOR_LERP_SPEED);
        self.current = if colors_close_enough(next, self.target) { self.target } else { next };
        true
    }
}

/// Per-gauge bubble color fades, indexed by [`gauge_idx`].
pub struct BubbleFade {
    fades: [Fade; GAUGE_COUNT],
}

impl BubbleFade {
    /// All bubbles start green: an inert source reads level.
    pub const fn new() -> Self {
        Self {
            fades: [Fade::settled(BUBBLE_LEVEL); GAUGE_COUNT],
        }
    }

    /// Retarget a gauge. Returns `true` if the target changed.
    pub fn set_target(
        &mut self,
        gauge: usize,
        target: Rgb565,
    ) -> bool {
        let fade = &mut self.fades[gauge];
        let changed = fade.target != target;
        fade.target = target;
        changed
    }

    /// Point a gauge at the green or yellow bubble color.
    #[inline]
    pub fn set_on_target(
        &mut self,
        gauge: usize,
        on_target: bool,
    ) -> bool {
        self.set_target(gauge, bubble_color(on_target))
    }

    #[inline]
    pub const fn get_current(
        &self,
        gauge: usize,
    ) -> Rgb565 {
        self.fades[gauge].current
    }

    #[inline]
    pub fn is_fading(
        &self,
        gauge: usize,
    ) -> bool {
        self.fades[gauge].current != self.fades[gauge].target
    }

    /// Current colors of all gauges, in `gauge_idx` order.
    pub fn current(&self) -> [Rgb565; GAUGE_COUNT] { self.fades.map(|fade| fade.current) }

    /// Advance every fade by one frame. Bit `i` of the result is set if
    /// gauge `i` changed color.
    pub fn update(&mut self) -> u8 {
        self.fades
            .iter_mut()
            .enumerate()
            .filter_map(|(i, fade)| fade.step().then_some(1 << i))
            .fold(0, |mask, bit| mask | bit)
    }
}

impl Default for BubbleFade {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Channel Math
// =============================================================================

/// RGB565 channels widened for signed arithmetic.
#[derive(Clone, Copy)]
struct Channels([i32; 3]);

impl Channels {
    const MAX: [i32; 3] = [31, 63, 31];

    fn of(color: Rgb565) -> Self { Self([i32::from(color.r()), i32::from(color.g()), i32::from(color.b())]) }

    fn to_color(self) -> Rgb565 {
        let [r, g, b] = self.0;
        Rgb565::new(r as u8, g as u8, b as u8)
    }

    /// Sum of absolute channel differences.
    fn distance(
        self,
        other: Self,
    ) -> i32 {
        self.0.iter().zip(other.0).map(|(a, b)| (a - b).abs()).sum()
    }
}

/// Move `from` toward `to` by fraction `t`. A non-zero channel delta always
/// moves at least one step so a fade cannot stall short of the snap threshold.
fn lerp_rgb565(
    from: Rgb565,
    to: Rgb565,
    t: f32,
) -> Rgb565 {
    let t_fixed = (t * 256.0) as i32;
    let (from, to) = (Channels::of(from), Channels::of(to));

    let mut out = from;
    for (ch, value) in out.0.iter_mut().enumerate() {
        let delta = to.0[ch] - *value;
        let step = match (delta * t_fixed) >> 8 {
            _ if delta == 0 || t_fixed == 0 => 0,
            0 => delta.signum(),
            step => step,
        };
        *value = (*value + step).clamp(0, Channels::MAX[ch]);
    }
    out.to_color()
}

fn colors_close_enough(
    a: Rgb565,
    b: Rgb565,
) -> bool {
    Channels::of(a).distance(Channels::of(b)) <= COLOR_SNAP_THRESHOLD
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::{BLACK, RED, WHITE};

    // -------------------------------------------------------------------------
    // Color Interpolation Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_lerp_rgb565_same_color() {
        assert_eq!(lerp_rgb565(RED, RED, 0.5), RED);
    }

    #[test]
    fn test_lerp_rgb565_t_zero() {
        assert_eq!(lerp_rgb565(BLACK, WHITE, 0.0), BLACK, "At t=0, should return 'from' color");
    }

    #[test]
    fn test_lerp_rgb565_t_one() {
        assert_eq!(lerp_rgb565(BLACK, WHITE, 1.0), WHITE, "At t=1, should return 'to' color");
    }

    #[test]
    fn test_lerp_rgb565_midpoint() {
        let mid = lerp_rgb565(BLACK, WHITE, 0.5);
        assert_eq!((mid.r(), mid.g(), mid.b()), (15, 31, 15), "Half of 31/63/31, truncated");
    }

    #[test]
    fn test_lerp_rgb565_minimum_step() {
        let from = Rgb565::new(10, 10, 10);
        let next = lerp_rgb565(from, Rgb565::new(11, 10, 9), 0.35);
        assert_eq!((next.r(), next.g(), next.b()), (11, 10, 9), "Small deltas still move one step");
    }

    #[test]
    fn test_color_lerp_t_fixed_matches_speed() {
        let runtime_t_fixed = (COLOR_LERP_SPEED * 256.0) as i32;
        assert_eq!(runtime_t_fixed, COLOR_LERP_T_FIXED);
    }

    #[test]
    fn test_colors_close_enough() {
        assert!(colors_close_enough(RED, RED));
        assert!(!colors_close_enough(BLACK, WHITE));
        assert!(!colors_close_enough(Rgb565::new(15, 32, 15), Rgb565::new(16, 33, 16)));
        assert!(colors_close_enough(Rgb565::new(15, 32, 15), Rgb565::new(15, 33, 15)));
    }

    // -------------------------------------------------------------------------
    // BubbleFade Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_bubble_color() {
        assert_eq!(bubble_color(true), BUBBLE_LEVEL);
        assert_eq!(bubble_color(false), BUBBLE);
    }

    #[test]
    fn test_fade_starts_level() {
        let fade = BubbleFade::new();
        for i in 0..GAUGE_COUNT {
            assert_eq!(fade.get_current(i), BUBBLE_LEVEL, "Gauge {i} should start green");
        }
    }

    #[test]
    fn test_set_on_target_only_starts_on_change() {
        let mut fade = BubbleFade::new();
        assert!(!fade.set_on_target(gauge_idx::HORIZONTAL, true), "Already green");
        assert!(fade.set_on_target(gauge_idx::HORIZONTAL, false));
        assert!(!fade.set_on_target(gauge_idx::HORIZONTAL, false));
    }

    #[test]
    fn test_fade_converges_to_off_target() {
        let mut fade = BubbleFade::new();
        fade.set_on_target(gauge_idx::BULLSEYE, false);

        let mut iterations = 0;
        while fade.get_current(gauge_idx::BULLSEYE) != BUBBLE && iterations < 100 {
            fade.update();
            iterations += 1;
        }

        assert_eq!(fade.get_current(gauge_idx::BULLSEYE), BUBBLE);
        assert!(iterations < 20, "Fade should be quick, took {iterations}");
        assert!(!fade.is_fading(gauge_idx::BULLSEYE));
    }

    #[test]
    fn test_fade_converges_black_to_white() {
        let mut fade = BubbleFade::new();
        fade.fades[0] = Fade::settled(BLACK);
        fade.set_target(0, WHITE);

        let mut iterations = 0;
        while fade.get_current(0) != WHITE && iterations < 150 {
            fade.update();
            iterations += 1;
        }
        assert_eq!(fade.get_current(0), WHITE, "Transition should converge to target exactly");
    }

    #[test]
    fn test_fade_no_change_when_settled() {
        let mut fade = BubbleFade::new();
        assert_eq!(fade.update(), 0, "Settled fades report no change");
        fade.set_on_target(gauge_idx::VERTICAL, false);
        assert!(fade.is_fading(gauge_idx::VERTICAL));
        fade.set_on_target(gauge_idx::VERTICAL, true);
        assert!(!fade.is_fading(gauge_idx::VERTICAL), "Retargeting back cancels the fade");
        assert_eq!(fade.update(), 0);
    }

    #[test]
    fn test_fade_returns_changed_bitmask() {
        let mut fade = BubbleFade::new();
        fade.set_on_target(gauge_idx::HORIZONTAL, false);
        fade.set_on_target(gauge_idx::BULLSEYE, false);

        let changed = fade.update();

        assert!(changed & 0b001 != 0, "Horizontal should be marked as changed");
        assert!(changed & 0b100 != 0, "Bullseye should be marked as changed");
        assert!(changed & 0b010 == 0, "Vertical should not be marked as changed");
    }
}
