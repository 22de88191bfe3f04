//! Non-modal popup overlays for status messages.
//!
//! Every popup is the same small red panel with one centered line; only the
//! text differs.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::Text;

use crate::colors::{RED, WHITE};
use crate::config::{CENTER_X, CENTER_Y, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::styles::{CENTERED, TITLE_STYLE_WHITE};
use crate::widgets::primitives::draw_panel;

const POPUP_WIDTH: u32 = 200;
const POPUP_HEIGHT: u32 = 50;

const POPUP_RECT: Rectangle = Rectangle::new(
    Point::new((SCREEN_WIDTH - POPUP_WIDTH) as i32 / 2, (SCREEN_HEIGHT - POPUP_HEIGHT) as i32 / 2),
    Size::new(POPUP_WIDTH, POPUP_HEIGHT),
);

const POPUP_TEXT_POS: Point = Point::new(CENTER_X, CENTER_Y + 5);

/// Longest text that fits the popup with the 10px title font.
pub const POPUP_MAX_CHARS: usize = (POPUP_WIDTH / 10) as usize - 1;

fn draw_popup<D>(
    display: &mut D,
    text: &str,
) where
    D: DrawTarget<Color = Rgb565>,
{
    draw_panel(display, POPUP_RECT, WHITE, RED);
    Text::with_text_style(text, POPUP_TEXT_POS, TITLE_STYLE_WHITE, CENTERED)
        .draw(display)
        .ok();
}

pub const fn fps_popup_text(fps_enabled: bool) -> &'static str { if fps_enabled { "FPS ON" } else { "FPS OFF" } }

pub const fn motion_popup_text(sweep: bool) -> &'static str { if sweep { "MOTION: SWEEP" } else { "MOTION: KEYS" } }

pub const fn glitch_popup_text(enabled: bool) -> &'static str { if enabled { "GLITCH: ON" } else { "GLITCH: OFF" } }

pub fn draw_fps_toggle_popup<D>(
    display: &mut D,
    fps_enabled: bool,
) where
    D: DrawTarget<Color = Rgb565>,
{
    draw_popup(display, fps_popup_text(fps_enabled));
}

pub fn draw_motion_popup<D>(
    display: &mut D,
    sweep: bool,
) where
    D: DrawTarget<Color = Rgb565>,
{
    draw_popup(display, motion_popup_text(sweep));
}

/// Malformed event injection on/off.
pub fn draw_glitch_popup<D>(
    display: &mut D,
    enabled: bool,
) where
    D: DrawTarget<Color = Rgb565>,
{
    draw_popup(display, glitch_popup_text(enabled));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_popup_texts_fit() {
        for flag in [true, false] {
            for text in [fps_popup_text(flag), motion_popup_text(flag), glitch_popup_text(flag)] {
                assert!(text.len() <= POPUP_MAX_CHARS, "{text} overflows the popup");
            }
        }
    }
}
