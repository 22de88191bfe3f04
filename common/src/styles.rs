//! Pre-computed static text styles to avoid per-frame object construction.
//!
//! `MonoTextStyle` and `TextStyle` are `const`-constructible in
//! embedded-graphics 0.8, so every fixed style lives here and is referenced
//! directly by the widgets.
//!
//! # Dynamic Color Styles
//!
//! Styles whose color changes at runtime (debug page highlights) are built with
//! `MonoTextStyle::new(LABEL_FONT, color)`; only the color varies.
//!
//! Readouts use the ISO 8859-1 font variants because they contain the degree
//! sign.

use embedded_graphics::{
    mono_font::{
        MonoFont, MonoTextStyle,
        ascii::{FONT_6X10, FONT_10X20},
        iso_8859_1::FONT_6X10 as FONT_6X10_LATIN1,
    },
    pixelcolor::Rgb565,
    text::{Alignment, TextStyle, TextStyleBuilder},
};
use profont::PROFONT_18_POINT;

use crate::colors::{LABEL_DIM, RED, WHITE};

// =============================================================================
// Text Alignment Styles (const - zero runtime cost)
// =============================================================================

/// Centered text alignment. Used for labels, readouts, and popup text.
pub const CENTERED: TextStyle = TextStyleBuilder::new().alignment(Alignment::Center).build();

/// Left-aligned text. Used for console output and the debug page.
pub const LEFT_ALIGNED: TextStyle = TextStyleBuilder::new().alignment(Alignment::Left).build();

/// Right-aligned text. Used for FPS counter in header.
pub const RIGHT_ALIGNED: TextStyle = TextStyleBuilder::new().alignment(Alignment::Right).build();

// =============================================================================
// Font References (for dynamic color styles)
// =============================================================================

/// Small label font (6x10 pixels). Exposed for creating dynamic-color styles.
pub const LABEL_FONT: &MonoFont = &FONT_6X10;

// =============================================================================
// Pre-computed Text Styles (const - zero runtime cost)
// =============================================================================

/// Small white text.
pub const LABEL_STYLE_WHITE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&FONT_6X10, WHITE);

/// Small dimmed text for gauge labels.
pub const LABEL_STYLE_DIM: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&FONT_6X10, LABEL_DIM);

/// Small red text for the access denied message.
pub const LABEL_STYLE_RED: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&FONT_6X10, RED);

/// Numeric readouts (with degree sign).
pub const READOUT_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&FONT_6X10_LATIN1, LABEL_DIM);

/// Medium white text for header and popup titles (10x20 pixels).
pub const TITLE_STYLE_WHITE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&FONT_10X20, WHITE);

/// Large white title on the gate screen (`ProFont` 18pt).
pub const GATE_TITLE_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&PROFONT_18_POINT, WHITE);
