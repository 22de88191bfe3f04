//! Nivel Pro bubble level simulator for desktop platforms.
//!
//! Runs the level on an `embedded-graphics-simulator` window with a
//! simulated motion sensor. The session has two phases: the access gate
//! (while the sensor permission is pending or denied) and the live level,
//! which owns the sensor subscription until the user quits or revokes access.
//!
//! Keys: A start, B revoke, X FPS, Y page, I/J/K/L tilt, O level out,
//! M motion source, G malformed event injection.

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

mod cli;
mod platform;
mod popup;
mod profiling;
mod screens;
mod state;
mod timing;

use std::cell::Cell;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::sdl2::Keycode;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};
use heapless::String;
use level_common::animations::{BubbleFade, gauge_idx};
use level_common::colors::BLACK;
use level_common::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use level_common::profiling::{DebugLog, TiltHistory};
use level_common::render::RenderState;
use level_common::source::SourceStats;
use level_common::widgets::{
    draw_fps_toggle_popup,
    draw_gate_screen,
    draw_gate_status,
    draw_glitch_popup,
    draw_header,
    draw_level_gauges,
    draw_level_labels,
    draw_motion_popup,
};
use level_common::{
    AccessOutcome,
    OrientationReading,
    OrientationSource,
    Page,
    PermissionState,
    Subscription,
    TiltMapper,
};
use tracing::{debug, info, warn};

use crate::cli::{Cli, MotionMode};
use crate::platform::{Nudge, SimulatedPlatform};
use crate::popup::Popup;
use crate::profiling::ProfilingMetrics;
use crate::screens::{BootLine, SensorSnapshot, draw_debug_page, run_boot_screen};
use crate::state::AccessGate;
use crate::timing::{FPS_WINDOW, FRAME_TIME};

/// Log a repaired event on the first one and then every this many.
const MALFORMED_LOG_EVERY: u32 = 25;

// =============================================================================
// Input
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Input {
    Quit,
    Start,
    Revoke,
    ToggleFps,
    TogglePage,
    ToggleMotion,
    ToggleGlitch,
    Nudge(Nudge),
    LevelOut,
}

impl Input {
    fn from_keycode(
        keycode: Keycode,
        repeat: bool,
    ) -> Option<Self> {
        // Holding a tilt key keeps tilting; everything else fires once
        let input = match keycode {
            Keycode::I => Self::Nudge(Nudge::Forward),
            Keycode::K => Self::Nudge(Nudge::Back),
            Keycode::J => Self::Nudge(Nudge::Left),
            Keycode::L => Self::Nudge(Nudge::Right),
            _ if repeat => return None,
            Keycode::A => Self::Start,
            Keycode::B => Self::Revoke,
            Keycode::X => Self::ToggleFps,
            Keycode::Y => Self::TogglePage,
            Keycode::M => Self::ToggleMotion,
            Keycode::G => Self::ToggleGlitch,
            Keycode::O => Self::LevelOut,
            _ => return None,
        };
        Some(input)
    }
}

/// How a phase loop ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Flow {
    Quit,
    /// Gate opened, start listening.
    Opened,
    /// User revoked access while listening.
    Revoked,
}

// =============================================================================
// UI State
// =============================================================================

/// Everything that survives phase changes: window, page, popups, profiling.
struct Ui {
    display: SimulatorDisplay<Rgb565>,
    window: Window,
    mapper: TiltMapper,

    page: Page,
    page_just_switched: bool,
    active_popup: Option<Popup>,
    show_fps: bool,

    last_fps_calc: Instant,
    fps_frame_count: u32,
    current_fps: f32,

    render_state: RenderState,
    fade: BubbleFade,
    metrics: ProfilingMetrics,
    log: DebugLog,
    beta_history: TiltHistory,
    gamma_history: TiltHistory,
}

impl Ui {
    fn new(
        window: Window,
        mapper: TiltMapper,
    ) -> Self {
        Self {
            display: SimulatorDisplay::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT)),
            window,
            mapper,
            page: Page::default(),
            page_just_switched: false,
            active_popup: None,
            show_fps: true,
            last_fps_calc: Instant::now(),
            fps_frame_count: 0,
            current_fps: 0.0,
            render_state: RenderState::new(),
            fade: BubbleFade::new(),
            metrics: ProfilingMetrics::new(),
            log: DebugLog::new(),
            beta_history: TiltHistory::new(),
            gamma_history: TiltHistory::new(),
        }
    }

    /// Drain window events into inputs.
    fn poll_inputs(&mut self) -> Vec<Input> {
        self.window
            .events()
            .filter_map(|ev| match ev {
                SimulatorEvent::Quit => Some(Input::Quit),
                SimulatorEvent::KeyDown { keycode, repeat, .. } => Input::from_keycode(keycode, repeat),
                _ => None,
            })
            .collect()
    }

    /// Handle the inputs that mean the same thing in every phase.
    fn handle_common(
        &mut self,
        input: Input,
        platform: &mut SimulatedPlatform,
    ) {
        match input {
            Input::ToggleFps if self.page == Page::Level => {
                self.show_fps = !self.show_fps;
                self.active_popup = Some(Popup::Fps(Instant::now()));
                self.log.push(if self.show_fps { "FPS: ON" } else { "FPS: OFF" });
            }
            Input::TogglePage => {
                self.page = self.page.toggle();
                self.page_just_switched = true;
                self.active_popup = None;
                self.log.push(self.page.label());
            }
            Input::ToggleMotion => {
                let motion = platform.toggle_motion();
                self.active_popup = Some(Popup::Motion(Instant::now()));
                self.log.push(match motion {
                    MotionMode::Keys => "Motion: keys",
                    MotionMode::Sweep => "Motion: sweep",
                });
            }
            Input::ToggleGlitch => {
                let on = platform.toggle_glitch();
                self.active_popup = Some(Popup::Glitch(Instant::now()));
                self.log.push(if on { "Glitch injection: ON" } else { "Glitch injection: OFF" });
            }
            Input::Nudge(nudge) => platform.nudge(nudge),
            Input::LevelOut => {
                platform.level_out();
                self.log.push("Device leveled out");
            }
            _ => {}
        }
    }

    /// A new phase starts on a blank screen.
    fn enter_phase(&mut self) {
        self.display.clear(BLACK).ok();
        self.render_state.mark_display_cleared();
    }

    /// Popup expiry, FPS and display clearing shared by both phases.
    fn begin_frame(&mut self) {
        if let Some(ref popup) = self.active_popup
            && popup.is_expired()
        {
            self.active_popup = None;
        }

        self.render_state.update_popup(self.active_popup.as_ref().map(Popup::kind));

        if self.render_state.needs_clear() || self.page_just_switched {
            self.display.clear(BLACK).ok();
            if self.page_just_switched {
                self.render_state.mark_display_cleared();
            }
        }

        self.fps_frame_count += 1;
        if self.last_fps_calc.elapsed() >= FPS_WINDOW {
            self.current_fps = self.fps_frame_count as f32 / self.last_fps_calc.elapsed().as_secs_f32();
            self.fps_frame_count = 0;
            self.last_fps_calc = Instant::now();
        }
    }

    fn draw_header_if_dirty(&mut self) {
        if self.render_state.check_header_dirty(self.show_fps, self.current_fps) {
            draw_header(&mut self.display, self.show_fps, self.current_fps);
            self.metrics.inc_header_redraws();
        }
    }

    fn draw_popup(&mut self, platform: &SimulatedPlatform) {
        match self.active_popup {
            Some(Popup::Fps(_)) => draw_fps_toggle_popup(&mut self.display, self.show_fps),
            Some(Popup::Motion(_)) => draw_motion_popup(&mut self.display, platform.motion() == MotionMode::Sweep),
            Some(Popup::Glitch(_)) => draw_glitch_popup(&mut self.display, platform.glitch()),
            None => {}
        }
    }

    fn draw_debug(
        &mut self,
        permission: PermissionState,
        stats: SourceStats,
        reading: OrientationReading,
    ) {
        let snapshot = SensorSnapshot {
            permission,
            stats,
            reading,
            mapper: &self.mapper,
            beta_history: &self.beta_history,
            gamma_history: &self.gamma_history,
        };
        draw_debug_page(&mut self.display, &self.metrics, &snapshot, &self.log, self.current_fps);
    }

    /// Present the frame and sleep out the rest of the frame budget.
    fn end_frame(
        &mut self,
        frame_start: Instant,
    ) {
        let render_time = frame_start.elapsed();
        self.render_state.end_frame();
        self.page_just_switched = false;

        self.window.update(&self.display);

        let pre_sleep = frame_start.elapsed();
        if let Some(remaining) = FRAME_TIME.checked_sub(pre_sleep) {
            thread::sleep(remaining);
        }
        let sleep_time = frame_start.elapsed().saturating_sub(pre_sleep);

        self.metrics.record_frame(frame_start.elapsed(), render_time, sleep_time);
    }
}

// =============================================================================
// Phases
// =============================================================================

/// Show the access gate until the user grants access or quits.
fn run_gate(
    ui: &mut Ui,
    source: &mut OrientationSource<SimulatedPlatform>,
    gate: &mut AccessGate,
) -> Flow {
    ui.enter_phase();

    loop {
        let frame_start = Instant::now();

        for input in ui.poll_inputs() {
            match input {
                Input::Quit => return Flow::Quit,
                Input::Start if ui.page == Page::Level => {
                    if !gate.begin() {
                        continue;
                    }
                    draw_gate_status(&mut ui.display, gate.status());
                    ui.window.update(&ui.display);
                    ui.log.push("Requesting sensor access...");

                    let outcome = pollster::block_on(source.request_access());
                    match outcome {
                        AccessOutcome::Granted => {
                            info!(attempts = gate.attempts(), "sensor access granted");
                            ui.log.push("Access granted");
                        }
                        AccessOutcome::Denied(reason) => {
                            warn!(?reason, attempts = gate.attempts(), "sensor access denied");
                            ui.log.push_fmt(format_args!("Access denied ({reason:?})"));
                        }
                    }
                    if gate.finish(outcome) {
                        return Flow::Opened;
                    }
                    draw_gate_status(&mut ui.display, gate.status());
                }
                Input::Revoke => debug!("nothing to revoke behind the gate"),
                other => ui.handle_common(other, source.platform_mut()),
            }
        }

        // Keep simulated time moving so the sweep does not jump on open
        source.platform_mut().tick();

        ui.begin_frame();

        match ui.page {
            Page::Level => {
                ui.draw_header_if_dirty();
                if ui.render_state.need_chrome() {
                    draw_gate_screen(&mut ui.display, gate.status());
                    ui.render_state.mark_chrome_drawn();
                }
                ui.draw_popup(source.platform());
            }
            Page::Debug => {
                let (permission, stats, reading) = (source.permission(), source.stats(), source.reading());
                ui.draw_debug(permission, stats, reading);
            }
        }

        ui.end_frame(frame_start);
    }
}

/// Run the live level on an active subscription.
fn run_level<F>(
    ui: &mut Ui,
    subscription: &mut Subscription<'_, SimulatedPlatform, F>,
    latest: &Cell<OrientationReading>,
) -> Flow
where
    F: FnMut(OrientationReading),
{
    ui.enter_phase();
    let mut malformed_seen = subscription.stats().malformed;

    loop {
        let frame_start = Instant::now();

        for input in ui.poll_inputs() {
            match input {
                Input::Quit => return Flow::Quit,
                Input::Revoke => return Flow::Revoked,
                Input::Start => debug!("already listening"),
                other => ui.handle_common(other, subscription.platform_mut()),
            }
        }

        subscription.platform_mut().tick();
        subscription.poll();

        let stats = subscription.stats();
        if stats.malformed > malformed_seen {
            debug!(total = stats.malformed, "repaired malformed orientation events");
            if malformed_seen == 0 || stats.malformed / MALFORMED_LOG_EVERY > malformed_seen / MALFORMED_LOG_EVERY {
                ui.log.push_fmt(format_args!("Malformed events repaired: {}", stats.malformed));
            }
            malformed_seen = stats.malformed;
        }

        let reading = latest.get();
        ui.beta_history.push(reading.beta);
        ui.gamma_history.push(reading.gamma);

        let frame = ui.mapper.map(reading);
        ui.fade.set_on_target(gauge_idx::HORIZONTAL, frame.horizontal.on_target);
        ui.fade.set_on_target(gauge_idx::VERTICAL, frame.vertical.on_target);
        ui.fade.set_on_target(gauge_idx::BULLSEYE, frame.bullseye.on_target);
        let changed = ui.fade.update();
        ui.metrics.color_transitions += changed.count_ones();

        ui.begin_frame();

        match ui.page {
            Page::Level => {
                ui.draw_header_if_dirty();

                if ui.render_state.need_chrome() {
                    draw_level_labels(&mut ui.display);
                    ui.render_state.mark_chrome_drawn();
                }

                let dirty = ui.render_state.check_gauges_dirty(&frame, ui.fade.current());
                if dirty {
                    draw_level_gauges(&mut ui.display, &frame, ui.fade.current());
                }
                ui.metrics.record_gauges(dirty);

                ui.draw_popup(subscription.platform_mut());
            }
            Page::Debug => {
                ui.draw_debug(subscription.permission(), stats, reading);
            }
        }

        ui.end_frame(frame_start);
    }
}

// =============================================================================
// Entry Point
// =============================================================================

fn boot_line(
    duration_ms: u64,
    args: core::fmt::Arguments<'_>,
) -> BootLine {
    let mut line: String<48> = String::new();
    let _ = core::fmt::Write::write_fmt(&mut line, args);
    (line, duration_ms)
}

fn boot_lines(
    cli: &Cli,
    permission: PermissionState,
) -> Vec<BootLine> {
    vec![
        boot_line(500, format_args!("Probing orientation API...")),
        boot_line(400, format_args!("Platform: {:?}", cli.platform)),
        boot_line(400, format_args!("Permission: {}", permission.label())),
        boot_line(300, format_args!("Sensitivity: {:.0} deg", cli.sensitivity)),
        boot_line(300, format_args!("Bullseye radius: {:.0}%", cli.max_radius)),
        boot_line(400, format_args!("Motion source: {:?}", cli.motion)),
        boot_line(500, format_args!("Ready.")),
    ]
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    let mapper = cli.mapper().context("invalid tilt configuration")?;
    info!(sensitivity = mapper.sensitivity(), max_radius = mapper.max_radius(), "tilt mapper ready");

    let platform = SimulatedPlatform::new(cli.platform.into(), cli.prompt, cli.motion)
        .with_prompt_delay(Duration::from_millis(cli.prompt_delay_ms));
    let mut source = OrientationSource::new(platform);
    let permission = source.probe_capability();
    info!(platform = ?cli.platform, ?permission, "orientation capability probed");

    let output_settings = OutputSettingsBuilder::new().scale(cli.scale).build();
    let window = Window::new("Nivel Pro Simulator", &output_settings);
    let mut ui = Ui::new(window, mapper);

    ui.display.clear(BLACK).ok();
    ui.window.update(&ui.display);

    if !cli.no_boot && !run_boot_screen(&mut ui.display, &mut ui.window, &boot_lines(&cli, permission)) {
        return Ok(());
    }

    ui.log.push("System started");
    ui.log.push_fmt(format_args!("Permission: {}", permission.label()));

    let latest = Cell::new(OrientationReading::LEVEL);
    let mut gate = AccessGate::new();

    loop {
        if AccessGate::required(source.permission()) {
            match run_gate(&mut ui, &mut source, &mut gate) {
                Flow::Quit => return Ok(()),
                Flow::Opened | Flow::Revoked => continue,
            }
        }

        let flow = {
            let mut subscription = source
                .subscribe(|reading| latest.set(reading))
                .context("failed to attach orientation listener")?;
            info!("orientation listener attached");
            ui.log.push("Listener attached");

            let flow = run_level(&mut ui, &mut subscription, &latest);
            subscription.unsubscribe();
            flow
        };

        info!("orientation listener detached");
        ui.log.push("Listener detached");

        match flow {
            Flow::Quit => return Ok(()),
            Flow::Revoked => {
                let state = source.revoke();
                gate.reset();
                latest.set(OrientationReading::LEVEL);
                ui.beta_history.clear();
                ui.gamma_history.clear();
                info!(?state, "sensor access revoked");
                ui.log.push_fmt(format_args!("Revoked, permission {}", state.label()));
            }
            Flow::Opened => {}
        }
    }
}
