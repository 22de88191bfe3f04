//! Profiling metrics with time-based measurements.
//!
//! Frame timing statistics and render counters for the debug page. The
//! `DebugLog` and `TiltHistory` buffers are in the common crate since they
//! don't need time.

use core::fmt::Write;
use std::time::{Duration, Instant};

use heapless::String;

/// Frame timing and render statistics for profiling.
pub struct ProfilingMetrics {
    // Frame timing (microseconds)
    pub frame_time_us: u32,
    pub render_time_us: u32,
    pub sleep_time_us: u32,

    // Statistics
    pub frame_time_min_us: u32,
    pub frame_time_max_us: u32,
    frame_time_avg_us: f32,

    // Counters
    pub total_frames: u64,
    pub header_redraws: u32,
    pub gauge_draws: u32,
    pub gauge_skips: u32,
    pub color_transitions: u32,

    start_time: Instant,
}

impl ProfilingMetrics {
    const EMA_ALPHA: f32 = 0.1;

    pub fn new() -> Self {
        Self {
            frame_time_us: 0,
            render_time_us: 0,
            sleep_time_us: 0,
            frame_time_min_us: u32::MAX,
            frame_time_max_us: 0,
            frame_time_avg_us: 0.0,
            total_frames: 0,
            header_redraws: 0,
            gauge_draws: 0,
            gauge_skips: 0,
            color_transitions: 0,
            start_time: Instant::now(),
        }
    }

    /// Record frame timing for this frame.
    pub fn record_frame(
        &mut self,
        total_time: Duration,
        render_time: Duration,
        sleep_time: Duration,
    ) {
        let total_us = total_time.as_micros() as u32;

        self.frame_time_us = total_us;
        self.render_time_us = render_time.as_micros() as u32;
        self.sleep_time_us = sleep_time.as_micros() as u32;
        self.frame_time_min_us = self.frame_time_min_us.min(total_us);
        self.frame_time_max_us = self.frame_time_max_us.max(total_us);

        self.frame_time_avg_us = if self.total_frames == 0 {
            total_us as f32
        } else {
            Self::EMA_ALPHA.mul_add(total_us as f32, (1.0 - Self::EMA_ALPHA) * self.frame_time_avg_us)
        };

        self.total_frames += 1;
    }

    /// Exponential moving average of the frame time in microseconds.
    #[inline]
    pub const fn frame_time_avg_us(&self) -> u32 { self.frame_time_avg_us as u32 }

    /// Smallest frame time in milliseconds, 0 before the first frame.
    pub fn frame_time_min_ms(&self) -> f32 {
        if self.frame_time_min_us == u32::MAX {
            0.0
        } else {
            self.frame_time_min_us as f32 / 1000.0
        }
    }

    /// Format uptime as HH:MM:SS.
    pub fn uptime_string(&self) -> String<12> { format_hms(self.start_time.elapsed()) }

    #[inline]
    pub fn inc_header_redraws(&mut self) { self.header_redraws += 1; }

    /// Count one frame's gauge work: drawn or skipped as clean.
    #[inline]
    pub fn record_gauges(
        &mut self,
        drawn: bool,
    ) {
        if drawn {
            self.gauge_draws += 1;
        } else {
            self.gauge_skips += 1;
        }
    }
}

impl Default for ProfilingMetrics {
    fn default() -> Self { Self::new() }
}

fn format_hms(elapsed: Duration) -> String<12> {
    let secs = elapsed.as_secs();
    let mut s = String::new();
    let _ = write!(s, "{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60);
    s
}
