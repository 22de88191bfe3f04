//! Boot console: prints the startup probe results line by line.

use core::fmt::Write;
use std::thread;
use std::time::{Duration, Instant};

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle};
use embedded_graphics::text::Text;
use embedded_graphics_simulator::{SimulatorDisplay, SimulatorEvent, Window};
use heapless::String;
use level_common::colors::{BLACK, BRAND_BLUE, GREEN, LABEL_DIM};
use level_common::styles::{CENTERED, LEFT_ALIGNED};
use level_common::widgets::APP_TITLE;
use profont::PROFONT_24_POINT;

const TITLE_POS: Point = Point::new(160, 30);
const LINE_START: Point = Point::new(10, 40);
const LINE_END: Point = Point::new(310, 40);
const CONSOLE_X: i32 = 10;
const CONSOLE_START_Y: i32 = 56;
const CONSOLE_LINE_HEIGHT: i32 = 14;
const MAX_CONSOLE_LINES: usize = 12;

const TITLE_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&PROFONT_24_POINT, BRAND_BLUE);
const CONSOLE_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&FONT_6X10, LABEL_DIM);
const CURRENT_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&FONT_6X10, GREEN);
const DIVIDER_STYLE: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_stroke(BRAND_BLUE, 1);

/// One console line and how long it stays the current line.
pub type BootLine = (String<48>, u64);

/// Play the boot console. Returns `false` if the window was closed.
pub fn run_boot_screen(
    display: &mut SimulatorDisplay<Rgb565>,
    window: &mut Window,
    lines: &[BootLine],
) -> bool {
    let spinner_chars = ['|', '/', '-', '\\'];
    let mut spinner_idx = 0;
    let mut spinner_frame = 0u32;

    for (shown, (_, duration_ms)) in lines.iter().enumerate() {
        let visible = &lines[(shown + 1).saturating_sub(MAX_CONSOLE_LINES)..=shown];
        let msg_start = Instant::now();
        let msg_duration = Duration::from_millis(*duration_ms);

        while msg_start.elapsed() < msg_duration {
            if window.events().any(|ev| matches!(ev, SimulatorEvent::Quit)) {
                return false;
            }

            display.clear(BLACK).ok();

            spinner_frame = spinner_frame.wrapping_add(1);
            if spinner_frame.is_multiple_of(8) {
                spinner_idx = (spinner_idx + 1) % spinner_chars.len();
            }

            let mut title: String<24> = String::new();
            let _ = write!(title, "{} {APP_TITLE}", spinner_chars[spinner_idx]);
            Text::with_text_style(&title, TITLE_POS, TITLE_STYLE, CENTERED)
                .draw(display)
                .ok();

            Line::new(LINE_START, LINE_END)
                .into_styled(DIVIDER_STYLE)
                .draw(display)
                .ok();

            for (i, (line, _)) in visible.iter().enumerate() {
                let y_pos = CONSOLE_START_Y + (i as i32 * CONSOLE_LINE_HEIGHT);
                let is_current = i == visible.len() - 1;
                let (prefix, style) = if is_current {
                    ("> ", CURRENT_STYLE)
                } else {
                    ("  ", CONSOLE_STYLE)
                };
                let mut full_line: String<64> = String::new();
                let _ = write!(full_line, "{prefix}{line}");
                Text::with_text_style(&full_line, Point::new(CONSOLE_X, y_pos), style, LEFT_ALIGNED)
                    .draw(display)
                    .ok();
            }

            window.update(display);
            thread::sleep(Duration::from_millis(16));
        }
    }

    true
}
