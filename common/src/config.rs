//! Display and layout configuration constants.
//!
//! # Pre-computed Layout Constants
//!
//! Gauge rectangles and text anchors are computed at compile time as `const`,
//! so the per-frame drawing code never recalculates positions.
//!
//! ```text
//!  0 ┌──────────────── header (NIVEL PRO, FPS) ───────────────┐
//! 26 ├────────────────────────────────────────────────────────┤
//!    │               X AXIS                                    │
//!    │  (════════════════ horizontal bar ══════════════════)   │
//!    │                      -1.2°                              │
//!    │  Y AXIS            ╭──────────╮                         │
//!    │  ║    ║           │  bullseye  │                        │
//!    │  ║bar ║           │     ┼      │                        │
//!    │  ║    ║            ╰──────────╯                         │
//!    │  0.4°              X 1.2° Y 0.4°                        │
//! 240└────────────────────────────────────────────────────────┘
//! ```

use embedded_graphics::geometry::{Point, Size};
use embedded_graphics::primitives::Rectangle;

// =============================================================================
// Display Configuration
// =============================================================================

/// Display width in pixels (320x240 landscape panel).
pub const SCREEN_WIDTH: u32 = 320;

/// Display height in pixels.
pub const SCREEN_HEIGHT: u32 = 240;

/// Header bar height in pixels.
pub const HEADER_HEIGHT: u32 = 26;

/// Screen center X coordinate. Used for centering popups and text.
pub const CENTER_X: i32 = (SCREEN_WIDTH / 2) as i32;

/// Screen center Y coordinate. Used for centering popups and text.
pub const CENTER_Y: i32 = (SCREEN_HEIGHT / 2) as i32;

// =============================================================================
// Horizontal Bar (gamma)
// =============================================================================

/// Track of the left/right bar gauge.
pub const H_BAR_RECT: Rectangle = Rectangle::new(Point::new(16, 44), Size::new(288, 22));

/// Baseline of the "X AXIS" label above the track.
pub const H_BAR_LABEL_POS: Point = Point::new(CENTER_X, 39);

/// Baseline of the numeric readout below the track.
pub const H_BAR_READOUT_POS: Point = Point::new(CENTER_X, 80);

// =============================================================================
// Vertical Bar (beta)
// =============================================================================

/// Track of the front/back bar gauge.
pub const V_BAR_RECT: Rectangle = Rectangle::new(Point::new(20, 100), Size::new(22, 118));

/// Baseline of the "Y AXIS" label above the track.
pub const V_BAR_LABEL_POS: Point = Point::new(31, 94);

/// Baseline of the numeric readout below the track.
pub const V_BAR_READOUT_POS: Point = Point::new(31, 232);

// =============================================================================
// Bullseye (gamma, beta)
// =============================================================================

/// Center of the bullseye gauge.
pub const BULLSEYE_CENTER: Point = Point::new(196, 158);

/// Outer ring diameter in pixels. Offsets in percent are relative to this.
pub const BULLSEYE_DIAMETER: u32 = 120;

/// Baseline of the "X .. Y .." readout under the ring.
pub const BULLSEYE_READOUT_POS: Point = Point::new(196, 234);

// =============================================================================
// Bubble Sizes
// =============================================================================

/// Bubble on the horizontal bar (wider than tall).
pub const H_BUBBLE_SIZE: Size = Size::new(20, 16);

/// Bubble on the vertical bar (taller than wide).
pub const V_BUBBLE_SIZE: Size = Size::new(16, 20);

/// Bullseye bubble diameter.
pub const BULLSEYE_BUBBLE_DIAMETER: u32 = 14;

// Layout sanity: gauges stay below the header and inside the screen.
const _: () = assert!(H_BAR_RECT.top_left.y > HEADER_HEIGHT as i32);
const _: () = assert!(V_BAR_RECT.top_left.y + V_BAR_RECT.size.height as i32 <= SCREEN_HEIGHT as i32);
const _: () = assert!(BULLSEYE_CENTER.y - (BULLSEYE_DIAMETER / 2) as i32 > H_BAR_READOUT_POS.y);
const _: () = assert!(BULLSEYE_CENTER.x + ((BULLSEYE_DIAMETER / 2) as i32) < SCREEN_WIDTH as i32);
