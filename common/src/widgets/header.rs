//! Header bar rendering.
//!
//! Fixed positions and the fill style are `const`, so a header redraw is one
//! rectangle and at most two text runs. The FPS string is built in a
//! `heapless::String` with `core::fmt::Write`.

use core::fmt::Write;

use embedded_graphics::{
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle},
    text::Text,
};
use heapless::String;

use crate::{
    colors::BRAND_BLUE,
    config::{HEADER_HEIGHT, SCREEN_WIDTH},
    styles::{CENTERED, LABEL_STYLE_WHITE, RIGHT_ALIGNED, TITLE_STYLE_WHITE},
};

/// Application title shown in the header.
pub const APP_TITLE: &str = "NIVEL PRO";

/// Position of the title text (centered horizontally).
const HEADER_TITLE_POS: Point = Point::new((SCREEN_WIDTH / 2) as i32, 19);

/// Position of FPS counter (right-aligned, 5px from edge).
const HEADER_FPS_POS: Point = Point::new((SCREEN_WIDTH - 5) as i32, 17);

const HEADER_RECT: Rectangle = Rectangle::new(Point::new(0, 0), Size::new(SCREEN_WIDTH, HEADER_HEIGHT));

const HEADER_FILL_STYLE: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_fill(BRAND_BLUE);

/// Draw the header bar with title and optional FPS counter.
pub fn draw_header<D>(
    display: &mut D,
    show_fps: bool,
    fps: f32,
) where
    D: DrawTarget<Color = Rgb565>,
{
    HEADER_RECT.into_styled(HEADER_FILL_STYLE).draw(display).ok();

    Text::with_text_style(APP_TITLE, HEADER_TITLE_POS, TITLE_STYLE_WHITE, CENTERED)
        .draw(display)
        .ok();

    if show_fps {
        let mut fps_str: String<16> = String::new();
        let _ = write!(fps_str, "{fps:.0} FPS");
        Text::with_text_style(&fps_str, HEADER_FPS_POS, LABEL_STYLE_WHITE, RIGHT_ALIGNED)
            .draw(display)
            .ok();
    }
}
