//! Low-level drawing primitives shared across widgets.

use core::fmt::Write;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};
use heapless::String;

/// Border width around panels and popups.
const PANEL_BORDER: u32 = 3;

/// Format an angle the way every readout shows it: one decimal and a degree sign.
pub fn angle_text(angle: f32) -> String<16> {
    let mut s: String<16> = String::new();
    // Normalize -0.0 so a level device never reads "-0.0°"
    let shown = if libm::fabsf(angle) < 0.05 { 0.0 } else { angle };
    let _ = write!(s, "{shown:.1}\u{b0}");
    s
}

/// Draw a filled panel with a solid border around it.
///
/// `inner` is the fill area; the border grows outward by `PANEL_BORDER` pixels.
pub fn draw_panel<D>(
    display: &mut D,
    inner: Rectangle,
    border: Rgb565,
    fill: Rgb565,
) where
    D: DrawTarget<Color = Rgb565>,
{
    inner
        .offset(PANEL_BORDER as i32)
        .into_styled(PrimitiveStyle::with_fill(border))
        .draw(display)
        .ok();
    inner.into_styled(PrimitiveStyle::with_fill(fill)).draw(display).ok();
}

/// Draw a sparkline of recent samples inside `area`.
///
/// `range` is the (min, max) of the samples. A flat series draws along the
/// vertical middle. Nothing is drawn for fewer than two samples.
pub fn draw_sparkline<D, I>(
    display: &mut D,
    area: Rectangle,
    samples: I,
    range: (f32, f32),
    color: Rgb565,
) where
    D: DrawTarget<Color = Rgb565>,
    I: ExactSizeIterator<Item = f32>,
{
    let count = samples.len();
    if count < 2 || area.size.width < 5 || area.size.height < 5 {
        return;
    }

    let graph_width = area.size.width as i32 - 4;
    let graph_height = area.size.height as i32 - 4;
    let graph_x = area.top_left.x + 2;
    let graph_y = area.top_left.y + 2;
    let max_x = graph_x + graph_width - 1;
    let max_y = graph_y + graph_height - 1;

    let (data_min, data_max) = range;
    let data_range = data_max - data_min;
    let y_scale = if data_range > 0.1 {
        (graph_height - 1) as f32 / data_range
    } else {
        0.0
    };
    let x_step = (graph_width - 1) as f32 / (count - 1) as f32;
    let style = PrimitiveStyle::with_stroke(color, 1);

    let mut prev: Option<Point> = None;
    for (i, value) in samples.enumerate() {
        let screen_x = (graph_x + (i as f32 * x_step) as i32).min(max_x);
        let screen_y = if y_scale > 0.0 {
            (graph_y + graph_height - 1 - ((value - data_min) * y_scale) as i32).clamp(graph_y, max_y)
        } else {
            graph_y + (graph_height - 1) / 2
        };
        let point = Point::new(screen_x, screen_y);

        if let Some(prev) = prev {
            Line::new(prev, point).into_styled(style).draw(display).ok();
        }
        prev = Some(point);
    }
}

#[cfg(test)]
mod tests {
    use embedded_graphics::mock_display::MockDisplay;

    use super::*;
    use crate::colors::{BLACK, GREEN, WHITE};

    #[test]
    fn test_angle_text() {
        assert_eq!(angle_text(12.34).as_str(), "12.3\u{b0}");
        assert_eq!(angle_text(-3.0).as_str(), "-3.0\u{b0}");
        assert_eq!(angle_text(-0.01).as_str(), "0.0\u{b0}", "No negative zero on a level device");
    }

    #[test]
    fn test_draw_panel_border_and_fill() {
        let mut display: MockDisplay<Rgb565> = MockDisplay::new();
        display.set_allow_overdraw(true);
        draw_panel(&mut display, Rectangle::new(Point::new(10, 10), Size::new(8, 6)), WHITE, BLACK);

        assert_eq!(display.get_pixel(Point::new(7, 7)), Some(WHITE), "Border corner");
        assert_eq!(display.get_pixel(Point::new(10, 10)), Some(BLACK), "Fill corner");
        assert_eq!(display.get_pixel(Point::new(6, 6)), None, "Nothing outside border");
    }

    #[test]
    fn test_sparkline_needs_two_samples() {
        let mut display: MockDisplay<Rgb565> = MockDisplay::new();
        let area = Rectangle::new(Point::zero(), Size::new(20, 20));
        draw_sparkline(&mut display, area, [1.0].into_iter(), (1.0, 1.0), GREEN);
        assert_eq!(display.affected_area().size, Size::zero());
    }

    #[test]
    fn test_sparkline_stays_inside_area() {
        let mut display: MockDisplay<Rgb565> = MockDisplay::new();
        display.set_allow_overdraw(true);
        let area = Rectangle::new(Point::new(2, 2), Size::new(30, 20));
        draw_sparkline(&mut display, area, [-10.0, 5.0, 40.0, 0.0].into_iter(), (-10.0, 40.0), GREEN);

        let drawn = display.affected_area();
        assert!(drawn.size.width > 0);
        assert!(area.contains(drawn.top_left));
        assert!(drawn.bottom_right().is_some_and(|p| area.contains(p)));
    }
}
