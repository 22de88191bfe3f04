//! Two-axis circular bubble gauge.
//!
//! Offsets are percent of the ring diameter, so the radial clamp at 44 keeps
//! the bubble inside the 50% ring edge with room for its own radius.

use core::fmt::Write;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, Line, PrimitiveStyle, PrimitiveStyleBuilder, Rectangle, StrokeAlignment};
use embedded_graphics::text::Text;
use heapless::String;

use crate::colors::{ACCENT, BLACK, BUBBLE_LEVEL, GRAY, TRACK_BG};
use crate::config::BULLSEYE_BUBBLE_DIAMETER;
use crate::styles::{CENTERED, READOUT_STYLE};
use crate::tilt::{BullseyeGauge, BullseyeOffset};
use crate::widgets::primitives::angle_text;

const RING_STYLE: PrimitiveStyle<Rgb565> = PrimitiveStyleBuilder::new()
    .fill_color(TRACK_BG)
    .stroke_color(ACCENT)
    .stroke_width(3)
    .stroke_alignment(StrokeAlignment::Inside)
    .build();

const MIDDLE_RING_STYLE: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_stroke(ACCENT, 1);
const CROSSHAIR_STYLE: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_stroke(GRAY, 1);

/// Center target diameter as a fraction of the ring (3/16).
#[inline]
const fn target_diameter(ring: u32) -> u32 { ring * 3 / 16 }

/// Center point of the bubble for `offset` in a ring of `diameter` pixels.
pub fn bullseye_bubble_center(
    center: Point,
    diameter: u32,
    offset: BullseyeOffset,
) -> Point {
    let d = diameter as f32;
    center + Point::new(libm::roundf(offset.x / 100.0 * d) as i32, libm::roundf(offset.y / 100.0 * d) as i32)
}

/// Draw rings, crosshairs, center target and bubble.
///
/// The center target turns green while the gauge is on target.
pub fn draw_bullseye<D>(
    display: &mut D,
    center: Point,
    diameter: u32,
    gauge: &BullseyeGauge,
    bubble_color: Rgb565,
) where
    D: DrawTarget<Color = Rgb565>,
{
    Circle::with_center(center, diameter).into_styled(RING_STYLE).draw(display).ok();

    // 45 degree ring
    Circle::with_center(center, diameter / 2)
        .into_styled(MIDDLE_RING_STYLE)
        .draw(display)
        .ok();

    let reach = (diameter / 2) as i32 - 4;
    Line::new(center - Point::new(reach, 0), center + Point::new(reach, 0))
        .into_styled(CROSSHAIR_STYLE)
        .draw(display)
        .ok();
    Line::new(center - Point::new(0, reach), center + Point::new(0, reach))
        .into_styled(CROSSHAIR_STYLE)
        .draw(display)
        .ok();

    let target_color = if gauge.on_target { BUBBLE_LEVEL } else { ACCENT };
    Circle::with_center(center, target_diameter(diameter))
        .into_styled(PrimitiveStyle::with_stroke(target_color, 2))
        .draw(display)
        .ok();

    Circle::with_center(bullseye_bubble_center(center, diameter, gauge.offset), BULLSEYE_BUBBLE_DIAMETER)
        .into_styled(PrimitiveStyle::with_fill(bubble_color))
        .draw(display)
        .ok();
}

/// Draw the "X 1.2°  Y -0.4°" readout centered on `pos`.
pub fn draw_bullseye_readout<D>(
    display: &mut D,
    pos: Point,
    gauge: &BullseyeGauge,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let mut text: String<40> = String::new();
    let _ = write!(text, "X {}  Y {}", angle_text(gauge.x_angle), angle_text(gauge.y_angle));

    Rectangle::with_center(pos - Point::new(0, 3), Size::new(120, 12))
        .into_styled(PrimitiveStyle::with_fill(BLACK))
        .draw(display)
        .ok();
    Text::with_text_style(&text, pos, READOUT_STYLE, CENTERED).draw(display).ok();
}
