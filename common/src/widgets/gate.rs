//! Sensor access gate shown while permission is pending or denied.
//!
//! The gate replaces the level page until access is granted. A denial leaves
//! a persistent message on the panel; pressing A again retries.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle, RoundedRectangle};
use embedded_graphics::text::Text;

use crate::colors::{ACCENT, BRAND_BLUE, PANEL_BG};
use crate::config::{CENTER_X, HEADER_HEIGHT, SCREEN_WIDTH};
use crate::permission::DenialReason;
use crate::styles::{CENTERED, GATE_TITLE_STYLE, LABEL_STYLE_DIM, LABEL_STYLE_RED, LABEL_STYLE_WHITE};
use crate::widgets::primitives::draw_panel;

/// What the gate panel says under the start button.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GateStatus {
    /// Waiting for the user to press start.
    Idle,
    /// A permission prompt is in flight.
    Waiting,
    /// The last request was denied.
    Denied(DenialReason),
}

impl GateStatus {
    /// Status line text, `None` when idle.
    pub const fn message(self) -> Option<&'static str> {
        match self {
            Self::Idle => None,
            Self::Waiting => Some("WAITING FOR PERMISSION..."),
            Self::Denied(_) => Some("ACCESS DENIED"),
        }
    }

    /// Second line explaining a denial.
    pub const fn detail(self) -> Option<&'static str> {
        match self {
            Self::Denied(DenialReason::UserDeclined) => Some("Prompt declined. Press A to retry."),
            Self::Denied(DenialReason::PromptFailed) => Some("Sensor prompt failed. Press A to retry."),
            Self::Idle | Self::Waiting => None,
        }
    }
}

const PANEL: Rectangle = Rectangle::new(Point::new(30, HEADER_HEIGHT as i32 + 18), Size::new(SCREEN_WIDTH - 60, 176));

const TITLE_POS: Point = Point::new(CENTER_X, PANEL.top_left.y + 30);
const BODY1_POS: Point = Point::new(CENTER_X, PANEL.top_left.y + 56);
const BODY2_POS: Point = Point::new(CENTER_X, PANEL.top_left.y + 70);

const BUTTON: Rectangle = Rectangle::new(Point::new(PANEL.top_left.x + 24, PANEL.top_left.y + 88), Size::new(PANEL.size.width - 48, 32));
const BUTTON_TEXT_POS: Point = Point::new(CENTER_X, BUTTON.top_left.y + 20);

const STATUS_POS: Point = Point::new(CENTER_X, BUTTON.top_left.y + 52);
const DETAIL_POS: Point = Point::new(CENTER_X, BUTTON.top_left.y + 66);

// Status lines must fit inside the panel
const _: () = assert!(DETAIL_POS.y < PANEL.top_left.y + PANEL.size.height as i32);

/// Draw the full gate panel. Call after clearing the body area.
pub fn draw_gate_screen<D>(
    display: &mut D,
    status: GateStatus,
) where
    D: DrawTarget<Color = Rgb565>,
{
    draw_panel(display, PANEL, ACCENT, PANEL_BG);

    Text::with_text_style("Nivel Pro", TITLE_POS, GATE_TITLE_STYLE, CENTERED)
        .draw(display)
        .ok();
    Text::with_text_style("The level needs access to", BODY1_POS, LABEL_STYLE_DIM, CENTERED)
        .draw(display)
        .ok();
    Text::with_text_style("the motion sensors.", BODY2_POS, LABEL_STYLE_DIM, CENTERED)
        .draw(display)
        .ok();

    RoundedRectangle::with_equal_corners(BUTTON, Size::new(6, 6))
        .into_styled(PrimitiveStyle::with_fill(BRAND_BLUE))
        .draw(display)
        .ok();
    Text::with_text_style("A: START LEVEL", BUTTON_TEXT_POS, LABEL_STYLE_WHITE, CENTERED)
        .draw(display)
        .ok();

    draw_gate_status(display, status);
}

/// Redraw only the status lines under the button.
pub fn draw_gate_status<D>(
    display: &mut D,
    status: GateStatus,
) where
    D: DrawTarget<Color = Rgb565>,
{
    Rectangle::new(Point::new(PANEL.top_left.x, STATUS_POS.y - 10), Size::new(PANEL.size.width, 28))
        .into_styled(PrimitiveStyle::with_fill(PANEL_BG))
        .draw(display)
        .ok();

    if let Some(message) = status.message() {
        let style = if matches!(status, GateStatus::Denied(_)) {
            LABEL_STYLE_RED
        } else {
            LABEL_STYLE_WHITE
        };
        Text::with_text_style(message, STATUS_POS, style, CENTERED).draw(display).ok();
    }
    if let Some(detail) = status.detail() {
        Text::with_text_style(detail, DETAIL_POS, LABEL_STYLE_DIM, CENTERED)
            .draw(display)
            .ok();
    }
}
