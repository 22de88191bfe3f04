//! Level page composition: both bars, the bullseye and their readouts.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::text::Text;

use crate::animations::{GAUGE_COUNT, gauge_idx};
use crate::config::{
    BULLSEYE_CENTER,
    BULLSEYE_DIAMETER,
    BULLSEYE_READOUT_POS,
    H_BAR_LABEL_POS,
    H_BAR_READOUT_POS,
    H_BAR_RECT,
    V_BAR_LABEL_POS,
    V_BAR_READOUT_POS,
    V_BAR_RECT,
};
use crate::styles::{CENTERED, LABEL_STYLE_DIM};
use crate::tilt::GaugeFrame;
use crate::widgets::bar::{BarOrientation, draw_bar_gauge, draw_bar_readout};
use crate::widgets::bullseye::{draw_bullseye, draw_bullseye_readout};

/// Static gauge labels. Drawn once and again after any clear.
pub fn draw_level_labels<D>(display: &mut D)
where
    D: DrawTarget<Color = Rgb565>,
{
    Text::with_text_style("X AXIS", H_BAR_LABEL_POS, LABEL_STYLE_DIM, CENTERED)
        .draw(display)
        .ok();
    Text::with_text_style("Y AXIS", V_BAR_LABEL_POS, LABEL_STYLE_DIM, CENTERED)
        .draw(display)
        .ok();
}

/// Draw all three gauges and readouts for one frame.
///
/// `colors` are the current bubble colors in `gauge_idx` order.
pub fn draw_level_gauges<D>(
    display: &mut D,
    frame: &GaugeFrame,
    colors: [Rgb565; GAUGE_COUNT],
) where
    D: DrawTarget<Color = Rgb565>,
{
    draw_bar_gauge(
        display,
        H_BAR_RECT,
        BarOrientation::Horizontal,
        &frame.horizontal,
        colors[gauge_idx::HORIZONTAL],
    );
    draw_bar_readout(display, H_BAR_READOUT_POS, frame.horizontal.angle);

    draw_bar_gauge(
        display,
        V_BAR_RECT,
        BarOrientation::Vertical,
        &frame.vertical,
        colors[gauge_idx::VERTICAL],
    );
    draw_bar_readout(display, V_BAR_READOUT_POS, frame.vertical.angle);

    draw_bullseye(
        display,
        BULLSEYE_CENTER,
        BULLSEYE_DIAMETER,
        &frame.bullseye,
        colors[gauge_idx::BULLSEYE],
    );
    draw_bullseye_readout(display, BULLSEYE_READOUT_POS, &frame.bullseye);
}
