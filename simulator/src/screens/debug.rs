//! Debug page: frame timing, render counters, sensor state, tilt history
//! and the on-screen log.

use core::fmt::Write;

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};
use embedded_graphics::text::Text;
use heapless::String;
use level_common::colors::{ACCENT, BLACK, BUBBLE, GRAY, GREEN, ORANGE, RED, WHITE, YELLOW};
use level_common::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use level_common::permission::PermissionState;
use level_common::profiling::{DebugLog, TiltHistory};
use level_common::source::SourceStats;
use level_common::styles::LABEL_FONT;
use level_common::widgets::draw_sparkline;
use level_common::{OrientationReading, TiltMapper};

use crate::profiling::ProfilingMetrics;

const HEADER_Y: i32 = 12;
const HEADER_DIVIDER_Y: i32 = 18;
const SECTION_HEADER_Y: i32 = 28;
const STATS_Y: i32 = 40;
const GRAPH_Y: i32 = 122;
const GRAPH_HEIGHT: u32 = 14;
const LOG_DIVIDER_Y: i32 = 140;
const LOG_Y: i32 = 152;
const LOG_LINE_HEIGHT: i32 = 12;
const COL1_X: i32 = 4;
const COL2_X: i32 = 110;
const COL3_X: i32 = 215;
const STAT_LINE_HEIGHT: i32 = 13;

const PAGE_BG: Rgb565 = BLACK;
const HEADER_COLOR: Rgb565 = GREEN;
const SECTION_COLOR: Rgb565 = GRAY;
const VALUE_COLOR: Rgb565 = WHITE;
const HIGHLIGHT_COLOR: Rgb565 = YELLOW;
const LOG_PROMPT_COLOR: Rgb565 = GREEN;
const LOG_TEXT_COLOR: Rgb565 = ORANGE;
const DIVIDER_COLOR: Rgb565 = GRAY;
const LOG_BG: Rgb565 = Rgb565::new(1, 2, 1);

/// Sensor side of the debug page.
pub struct SensorSnapshot<'a> {
    pub permission: PermissionState,
    pub stats: SourceStats,
    pub reading: OrientationReading,
    pub mapper: &'a TiltMapper,
    pub beta_history: &'a TiltHistory,
    pub gamma_history: &'a TiltHistory,
}

pub fn draw_debug_page<D: DrawTarget<Color = Rgb565>>(
    display: &mut D,
    metrics: &ProfilingMetrics,
    sensor: &SensorSnapshot<'_>,
    log: &DebugLog,
    fps: f32,
) {
    display.clear(PAGE_BG).ok();
    draw_header(display, metrics, fps);
    draw_horizontal_line(display, HEADER_DIVIDER_Y);
    draw_section_headers(display);
    draw_timing_column(display, metrics);
    draw_render_column(display, metrics);
    draw_sensor_column(display, sensor);
    draw_history(display, sensor);
    draw_horizontal_line(display, LOG_DIVIDER_Y);
    draw_log_terminal(display, log);
}

fn draw_header<D: DrawTarget<Color = Rgb565>>(
    display: &mut D,
    metrics: &ProfilingMetrics,
    fps: f32,
) {
    Text::new("DEBUG VIEW", Point::new(COL1_X, HEADER_Y), MonoTextStyle::new(LABEL_FONT, HEADER_COLOR))
        .draw(display)
        .ok();

    let mut uptime: String<24> = String::new();
    let _ = write!(uptime, "UP {}", metrics.uptime_string());
    let mut rate: String<12> = String::new();
    let _ = write!(rate, "{fps:.0} FPS");

    let info_style = MonoTextStyle::new(LABEL_FONT, VALUE_COLOR);
    for (text, x) in [(uptime.as_str(), 160), (rate.as_str(), 280)] {
        Text::new(text, Point::new(x, HEADER_Y), info_style).draw(display).ok();
    }
}

fn draw_section_headers<D: DrawTarget<Color = Rgb565>>(display: &mut D) {
    let style = MonoTextStyle::new(LABEL_FONT, SECTION_COLOR);
    for (title, x) in [("TIMING", COL1_X), ("RENDER", COL2_X), ("SENSOR", COL3_X)] {
        Text::new(title, Point::new(x, SECTION_HEADER_Y), style).draw(display).ok();
    }
}

/// Draw a column of pre-formatted lines; `highlight_from` lines onward use the
/// highlight color.
fn draw_column<D: DrawTarget<Color = Rgb565>>(
    display: &mut D,
    x: i32,
    lines: &[String<20>],
    highlight_from: usize,
) {
    let value_style = MonoTextStyle::new(LABEL_FONT, VALUE_COLOR);
    let highlight_style = MonoTextStyle::new(LABEL_FONT, HIGHLIGHT_COLOR);

    for (i, line) in lines.iter().enumerate() {
        let style = if i >= highlight_from { highlight_style } else { value_style };
        let y = STATS_Y + i as i32 * STAT_LINE_HEIGHT;
        Text::new(line, Point::new(x, y), style).draw(display).ok();
    }
}

fn line(args: core::fmt::Arguments<'_>) -> String<20> {
    let mut s: String<20> = String::new();
    let _ = s.write_fmt(args);
    s
}

fn draw_timing_column<D: DrawTarget<Color = Rgb565>>(
    display: &mut D,
    metrics: &ProfilingMetrics,
) {
    let lines = [
        line(format_args!("Frame: {:.1}ms", metrics.frame_time_us as f32 / 1000.0)),
        line(format_args!("Render:{:.1}ms", metrics.render_time_us as f32 / 1000.0)),
        line(format_args!("Sleep: {:.1}ms", metrics.sleep_time_us as f32 / 1000.0)),
        line(format_args!("Min:   {:.1}ms", metrics.frame_time_min_ms())),
        line(format_args!("Max:   {:.1}ms", metrics.frame_time_max_us as f32 / 1000.0)),
        line(format_args!("Avg:   {:.1}ms", metrics.frame_time_avg_us() as f32 / 1000.0)),
    ];
    draw_column(display, COL1_X, &lines, 3);
}

fn draw_render_column<D: DrawTarget<Color = Rgb565>>(
    display: &mut D,
    metrics: &ProfilingMetrics,
) {
    let lines = [
        line(format_args!("Frames:{}", metrics.total_frames)),
        line(format_args!("Hdrs:  {}", metrics.header_redraws)),
        line(format_args!("Gauges:{}", metrics.gauge_draws)),
        line(format_args!("Skips: {}", metrics.gauge_skips)),
        line(format_args!("Trans: {}", metrics.color_transitions)),
    ];
    draw_column(display, COL2_X, &lines, usize::MAX);
}

fn draw_sensor_column<D: DrawTarget<Color = Rgb565>>(
    display: &mut D,
    sensor: &SensorSnapshot<'_>,
) {
    let lines = [
        line(format_args!("{}", sensor.permission.label())),
        line(format_args!("Events:{}", sensor.stats.events)),
        line(format_args!("Bad:   {}", sensor.stats.malformed)),
        line(format_args!("Subs:  {}", sensor.stats.subscriptions)),
        line(format_args!("B:{:.1} G:{:.1}", sensor.reading.beta, sensor.reading.gamma)),
        line(format_args!("M:{:.0} R:{:.0}", sensor.mapper.sensitivity(), sensor.mapper.max_radius())),
    ];
    draw_column(display, COL3_X, &lines, 4);

    // Repaired events stand out
    if sensor.stats.malformed > 0 {
        Rectangle::new(Point::new(COL3_X - 4, STATS_Y + 2 * STAT_LINE_HEIGHT - 6), Size::new(2, 4))
            .into_styled(PrimitiveStyle::with_fill(RED))
            .draw(display)
            .ok();
    }
}

fn draw_history<D: DrawTarget<Color = Rgb565>>(
    display: &mut D,
    sensor: &SensorSnapshot<'_>,
) {
    let label_style = MonoTextStyle::new(LABEL_FONT, SECTION_COLOR);
    let half = SCREEN_WIDTH / 2;

    for (i, (label, history, color)) in [
        ("BETA", sensor.beta_history, BUBBLE),
        ("GAMMA", sensor.gamma_history, GREEN),
    ]
    .into_iter()
    .enumerate()
    {
        let x = i as i32 * half as i32;
        Text::new(label, Point::new(x + COL1_X, GRAPH_Y - 2), label_style)
            .draw(display)
            .ok();
        let area = Rectangle::new(Point::new(x + 2, GRAPH_Y), Size::new(half - 4, GRAPH_HEIGHT));
        area.into_styled(PrimitiveStyle::with_stroke(ACCENT, 1)).draw(display).ok();
        if let Some(range) = history.range() {
            draw_sparkline(display, area, history.iter(), range, color);
        }
    }
}

fn draw_log_terminal<D: DrawTarget<Color = Rgb565>>(
    display: &mut D,
    log: &DebugLog,
) {
    let prompt = MonoTextStyle::new(LABEL_FONT, LOG_PROMPT_COLOR);
    let text = MonoTextStyle::new(LABEL_FONT, LOG_TEXT_COLOR);

    Rectangle::new(Point::new(0, LOG_DIVIDER_Y + 2), Size::new(SCREEN_WIDTH, SCREEN_HEIGHT - LOG_DIVIDER_Y as u32 - 2))
        .into_styled(PrimitiveStyle::with_fill(LOG_BG))
        .draw(display)
        .ok();

    let line_y = |i: usize| LOG_Y + i as i32 * LOG_LINE_HEIGHT;
    for (i, line) in log.iter().enumerate() {
        Text::new(">", Point::new(COL1_X, line_y(i)), prompt).draw(display).ok();
        Text::new(line, Point::new(COL1_X + 10, line_y(i)), text).draw(display).ok();
    }
    Text::new("> _", Point::new(COL1_X, line_y(log.len())), prompt)
        .draw(display)
        .ok();
}

fn draw_horizontal_line<D: DrawTarget<Color = Rgb565>>(
    display: &mut D,
    y: i32,
) {
    const DIVIDER: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_stroke(DIVIDER_COLOR, 1);
    Line::new(Point::new(2, y), Point::new(SCREEN_WIDTH as i32 - 2, y))
        .into_styled(DIVIDER)
        .draw(display)
        .ok();
}

#[cfg(test)]
mod tests {
    use core::convert::Infallible;

    use super::*;

    /// Full-screen framebuffer.
    struct Frame(Vec<Rgb565>);

    impl Frame {
        fn new() -> Self { Self(vec![BLACK; (SCREEN_WIDTH * SCREEN_HEIGHT) as usize]) }

        fn at(
            &self,
            p: Point,
        ) -> Rgb565 {
            self.0[(p.y as u32 * SCREEN_WIDTH + p.x as u32) as usize]
        }
    }

    impl OriginDimensions for Frame {
        fn size(&self) -> Size { Size::new(SCREEN_WIDTH, SCREEN_HEIGHT) }
    }

    impl DrawTarget for Frame {
        type Color = Rgb565;
        type Error = Infallible;

        fn draw_iter<I>(
            &mut self,
            pixels: I,
        ) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            for Pixel(p, color) in pixels {
                if (0..SCREEN_WIDTH as i32).contains(&p.x) && (0..SCREEN_HEIGHT as i32).contains(&p.y) {
                    self.0[(p.y as u32 * SCREEN_WIDTH + p.x as u32) as usize] = color;
                }
            }
            Ok(())
        }
    }

    #[test]
    fn test_debug_page_draws_log_and_history() {
        let mut display = Frame::new();
        let mapper = TiltMapper::DEFAULT;
        let mut beta = TiltHistory::new();
        let mut gamma = TiltHistory::new();
        for i in 0..10 {
            beta.push(i as f32);
            gamma.push(-(i as f32));
        }
        let mut log = DebugLog::new();
        log.push("Access granted");

        let snapshot = SensorSnapshot {
            permission: PermissionState::Granted,
            stats: SourceStats::default(),
            reading: OrientationReading::new(3.0, -4.0),
            mapper: &mapper,
            beta_history: &beta,
            gamma_history: &gamma,
        };
        draw_debug_page(&mut display, &ProfilingMetrics::new(), &snapshot, &log, 50.0);

        assert_eq!(
            display.at(Point::new(SCREEN_WIDTH as i32 - 1, SCREEN_HEIGHT as i32 - 1)),
            LOG_BG,
            "Log terminal background fills the bottom of the page"
        );
        let graph_pixels = (GRAPH_Y + 1..GRAPH_Y + GRAPH_HEIGHT as i32 - 1)
            .flat_map(|y| (3..SCREEN_WIDTH as i32 / 2 - 3).map(move |x| Point::new(x, y)))
            .filter(|&p| display.at(p) == BUBBLE)
            .count();
        assert!(graph_pixels > 0, "Beta sparkline should be drawn");
    }
}
