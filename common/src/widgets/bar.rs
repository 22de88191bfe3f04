//! Linear bubble gauge (one axis).
//!
//! The track is a rounded pill with a center marker and a shaded band covering
//! the middle half (the 45° zone). The bubble center sits at `50 + percent`
//! percent of the track length, so the clamped ±45 offset keeps it 5% short
//! of either end.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Ellipse, Line, PrimitiveStyle, PrimitiveStyleBuilder, Rectangle, RoundedRectangle};
use embedded_graphics::text::Text;

use crate::colors::{ACCENT, BLACK, GRAY, PANEL_BG, TRACK_BG};
use crate::config::{H_BUBBLE_SIZE, V_BUBBLE_SIZE};
use crate::styles::{CENTERED, READOUT_STYLE};
use crate::thresholds::BAR_HALF_TRACK;
use crate::tilt::{BarGauge, BarOffset};
use crate::widgets::primitives::angle_text;

/// Direction the bubble travels along the track.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BarOrientation {
    /// Left to right, positive offsets move right.
    Horizontal,
    /// Top to bottom, positive offsets move down.
    Vertical,
}

const TRACK_STYLE: PrimitiveStyle<Rgb565> = PrimitiveStyleBuilder::new()
    .fill_color(TRACK_BG)
    .stroke_color(ACCENT)
    .stroke_width(2)
    .build();

const BAND_STYLE: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_fill(PANEL_BG);
const MARKER_STYLE: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_stroke(GRAY, 1);

/// Pixel position along `length` pixels for a percent offset from center.
#[inline]
fn along(
    start: i32,
    length: u32,
    offset: BarOffset,
) -> i32 {
    start + libm::roundf((BAR_HALF_TRACK + offset.percent) / 100.0 * length as f32) as i32
}

/// Center point of the bubble for `offset` on `track`.
pub fn bar_bubble_center(
    track: &Rectangle,
    orientation: BarOrientation,
    offset: BarOffset,
) -> Point {
    let center = track.center();
    match orientation {
        BarOrientation::Horizontal => Point::new(along(track.top_left.x, track.size.width, offset), center.y),
        BarOrientation::Vertical => Point::new(center.x, along(track.top_left.y, track.size.height, offset)),
    }
}

/// Draw the gauge track, markers and bubble.
///
/// The whole track is repainted so the previous bubble disappears.
pub fn draw_bar_gauge<D>(
    display: &mut D,
    track: Rectangle,
    orientation: BarOrientation,
    gauge: &BarGauge,
    bubble_color: Rgb565,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let short_side = track.size.width.min(track.size.height);
    RoundedRectangle::with_equal_corners(track, Size::new(short_side / 2, short_side / 2))
        .into_styled(TRACK_STYLE)
        .draw(display)
        .ok();

    // Middle half of the track, inset past the border
    let center = track.center();
    let band = match orientation {
        BarOrientation::Horizontal => {
            Rectangle::with_center(center, Size::new(track.size.width / 2, track.size.height.saturating_sub(4)))
        }
        BarOrientation::Vertical => {
            Rectangle::with_center(center, Size::new(track.size.width.saturating_sub(4), track.size.height / 2))
        }
    };
    band.into_styled(BAND_STYLE).draw(display).ok();

    let marker = match orientation {
        BarOrientation::Horizontal => Line::new(
            Point::new(center.x, track.top_left.y + 2),
            Point::new(center.x, track.top_left.y + track.size.height as i32 - 3),
        ),
        BarOrientation::Vertical => Line::new(
            Point::new(track.top_left.x + 2, center.y),
            Point::new(track.top_left.x + track.size.width as i32 - 3, center.y),
        ),
    };
    marker.into_styled(MARKER_STYLE).draw(display).ok();

    let bubble_size = match orientation {
        BarOrientation::Horizontal => H_BUBBLE_SIZE,
        BarOrientation::Vertical => V_BUBBLE_SIZE,
    };
    let bubble_center = bar_bubble_center(&track, orientation, gauge.offset);
    Ellipse::with_center(bubble_center, bubble_size)
        .into_styled(PrimitiveStyle::with_fill(bubble_color))
        .draw(display)
        .ok();
}

/// Draw the numeric readout centered on `pos`, clearing the previous value.
pub fn draw_bar_readout<D>(
    display: &mut D,
    pos: Point,
    angle: f32,
) where
    D: DrawTarget<Color = Rgb565>,
{
    // Widest readout is "-180.0°" (7 chars at 6px)
    Rectangle::with_center(pos - Point::new(0, 3), Size::new(48, 12))
        .into_styled(PrimitiveStyle::with_fill(BLACK))
        .draw(display)
        .ok();
    Text::with_text_style(&angle_text(angle), pos, READOUT_STYLE, CENTERED)
        .draw(display)
        .ok();
}
