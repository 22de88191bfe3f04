//! Color constants for the bubble level.
//!
//! Standard colors come from the `RgbColor` trait constants; the slate tones
//! for tracks and rings are custom RGB565 values.
//!
//! ## Rgb565 Color Format
//!
//! Rgb565 uses 16 bits per pixel: 5 bits red, 6 bits green, 5 bits blue.
//! - Red: 0-31 (5 bits)
//! - Green: 0-63 (6 bits)
//! - Blue: 0-31 (5 bits)

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

// =============================================================================
// Standard Colors (from RgbColor trait - guaranteed optimal values)
// =============================================================================

/// Pure black (0, 0, 0). Page background.
pub const BLACK: Rgb565 = Rgb565::BLACK;

/// Pure white (31, 63, 31). Titles and readouts.
pub const WHITE: Rgb565 = Rgb565::WHITE;

/// Pure red (31, 0, 0). Access denied message.
pub const RED: Rgb565 = Rgb565::RED;

/// Pure green (0, 63, 0). Debug headings.
pub const GREEN: Rgb565 = Rgb565::GREEN;

/// Pure yellow (31, 63, 0). Debug highlights.
pub const YELLOW: Rgb565 = Rgb565::YELLOW;

// =============================================================================
// Custom Colors (application-specific)
// =============================================================================

/// Orange for the debug log text.
/// RGB565: (31, 32, 0) - slightly darker than yellow.
pub const ORANGE: Rgb565 = Rgb565::new(31, 32, 0);

/// Dark gray for center markers and dividers.
/// RGB565: (8, 16, 8) - roughly 25% brightness.
pub const GRAY: Rgb565 = Rgb565::new(8, 16, 8);

/// Near-black slate for gauge tracks and the bullseye face.
pub const TRACK_BG: Rgb565 = Rgb565::new(3, 6, 5);

/// Slate accent for track borders, rings and crosshairs.
pub const ACCENT: Rgb565 = Rgb565::new(9, 20, 14);

/// Dimmed label text (roughly 50% white).
pub const LABEL_DIM: Rgb565 = Rgb565::new(16, 32, 16);

/// Warm yellow of an off-target bubble.
pub const BUBBLE: Rgb565 = Rgb565::new(31, 52, 4);

/// Green of an on-target bubble.
pub const BUBBLE_LEVEL: Rgb565 = Rgb565::new(4, 52, 10);

/// Header and start prompt blue.
pub const BRAND_BLUE: Rgb565 = Rgb565::new(4, 24, 29);

/// Slightly lighter panel behind the gate screen text.
pub const PANEL_BG: Rgb565 = Rgb565::new(4, 9, 7);
