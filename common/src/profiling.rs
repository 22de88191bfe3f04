//! Debug log buffer and the tilt history shown on the debug page.
//!
//! Both are fixed-size and allocation free. Time-dependent frame metrics live
//! in the front end crates since they need a platform clock.
//!
//! # Usage
//!
//! ```ignore
//! let mut log = DebugLog::new();
//! log.push("Sensor attached");
//! log.push_fmt(format_args!("Malformed events: {}", 3));
//!
//! for line in log.iter() {
//!     println!("{}", line);
//! }
//! ```

use core::fmt::{self, Write};

use heapless::{Deque, String};

// =============================================================================
// Debug Log Configuration
// =============================================================================

/// Maximum number of log lines to keep in the ring buffer.
pub const LOG_BUFFER_SIZE: usize = 6;

/// Maximum characters per log line (fits the 320px debug page at 6px/char).
pub const LOG_LINE_LENGTH: usize = 48;

/// Number of samples kept per axis for the debug sparklines.
pub const HISTORY_SIZE: usize = 64;

// =============================================================================
// Debug Log Ring Buffer
// =============================================================================

/// Ring buffer for debug log messages.
///
/// Stores the last `LOG_BUFFER_SIZE` messages. Old messages are dropped when
/// the buffer is full; long messages are truncated, never rejected.
pub struct DebugLog {
    buffer: Deque<String<LOG_LINE_LENGTH>, LOG_BUFFER_SIZE>,
}

impl DebugLog {
    /// Create a new empty debug log.
    pub const fn new() -> Self { Self { buffer: Deque::new() } }

    /// Push a log message. If buffer is full, oldest message is dropped.
    pub fn push(
        &mut self,
        msg: &str,
    ) {
        let mut line: String<LOG_LINE_LENGTH> = String::new();
        Truncating(&mut line).write_str(msg).ok();
        self.push_line(line);
    }

    /// Push a formatted message without going through an intermediate buffer.
    pub fn push_fmt(
        &mut self,
        args: fmt::Arguments<'_>,
    ) {
        let mut line: String<LOG_LINE_LENGTH> = String::new();
        Truncating(&mut line).write_fmt(args).ok();
        self.push_line(line);
    }

    fn push_line(
        &mut self,
        line: String<LOG_LINE_LENGTH>,
    ) {
        if self.buffer.is_full() {
            self.buffer.pop_front();
        }
        self.buffer.push_back(line).ok();
    }

    /// Iterate over log messages (oldest first).
    pub fn iter(&self) -> impl Iterator<Item = &str> { self.buffer.iter().map(|line| line.as_str()) }

    /// Get number of log entries.
    #[inline]
    pub fn len(&self) -> usize { self.buffer.len() }

    /// Check if log is empty.
    #[inline]
    pub fn is_empty(&self) -> bool { self.buffer.is_empty() }
}

impl Default for DebugLog {
    fn default() -> Self { Self::new() }
}

/// Writer that drops whatever does not fit instead of failing.
struct Truncating<'a, const N: usize>(&'a mut String<N>);

impl<const N: usize> Write for Truncating<'_, N> {
    fn write_str(
        &mut self,
        s: &str,
    ) -> fmt::Result {
        for c in s.chars() {
            if self.0.push(c).is_err() {
                break;
            }
        }
        Ok(())
    }
}

// =============================================================================
// Tilt History
// =============================================================================

/// Circular buffer of recent readings for one axis.
///
/// Samples are raw degrees. `min`/`max` are recomputed on every push so the
/// sparkline can scale itself.
pub struct TiltHistory {
    samples: [f32; HISTORY_SIZE],
    next: usize,
    count: usize,
    min: f32,
    max: f32,
}

impl TiltHistory {
    pub const fn new() -> Self {
        Self {
            samples: [0.0; HISTORY_SIZE],
            next: 0,
            count: 0,
            min: f32::MAX,
            max: f32::MIN,
        }
    }

    /// Record a sample, overwriting the oldest once full.
    pub fn push(
        &mut self,
        value: f32,
    ) {
        self.samples[self.next] = value;
        self.next = (self.next + 1) % HISTORY_SIZE;
        if self.count < HISTORY_SIZE {
            self.count += 1;
        }

        let mut min = f32::MAX;
        let mut max = f32::MIN;
        for &v in &self.samples[..self.count] {
            min = min.min(v);
            max = max.max(v);
        }
        self.min = min;
        self.max = max;
    }

    #[inline]
    pub const fn len(&self) -> usize { self.count }

    #[inline]
    pub const fn is_empty(&self) -> bool { self.count == 0 }

    /// Smallest and largest recorded sample, `None` while empty.
    pub const fn range(&self) -> Option<(f32, f32)> {
        if self.count == 0 { None } else { Some((self.min, self.max)) }
    }

    /// Iterate over samples, oldest first.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = f32> + '_ {
        let start = if self.count < HISTORY_SIZE { 0 } else { self.next };
        (0..self.count).map(move |i| self.samples[(start + i) % HISTORY_SIZE])
    }

    pub fn clear(&mut self) { *self = Self::new(); }
}

impl Default for TiltHistory {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_log_push() {
        let mut log = DebugLog::new();
        assert!(log.is_empty());

        log.push("Sensor attached");
        assert_eq!(log.len(), 1);

        log.push("Sensor detached");
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_debug_log_ring_buffer() {
        let mut log = DebugLog::new();

        for i in 0..LOG_BUFFER_SIZE {
            log.push_fmt(format_args!("{i}"));
        }
        assert_eq!(log.len(), LOG_BUFFER_SIZE);

        log.push("New");
        assert_eq!(log.len(), LOG_BUFFER_SIZE);

        assert_eq!(log.iter().next(), Some("1"), "Oldest entry should be dropped");
        assert_eq!(log.iter().last(), Some("New"));
    }

    #[test]
    fn test_debug_log_truncation() {
        let mut log = DebugLog::new();
        let long_msg = "This is a very long message that exceeds the maximum line length limit";
        log.push(long_msg);

        let stored = log.iter().next().unwrap();
        assert_eq!(stored.len(), LOG_LINE_LENGTH);
        assert!(long_msg.starts_with(stored));
    }

    #[test]
    fn test_debug_log_push_fmt_truncates() {
        let mut log = DebugLog::new();
        log.push_fmt(format_args!("{:>60}", "x"));
        assert_eq!(log.iter().next().map(str::len), Some(LOG_LINE_LENGTH));
    }

    #[test]
    fn test_tilt_history_empty() {
        let history = TiltHistory::new();
        assert!(history.is_empty());
        assert_eq!(history.range(), None);
        assert_eq!(history.iter().count(), 0);
    }

    #[test]
    fn test_tilt_history_range() {
        let mut history = TiltHistory::new();
        history.push(3.0);
        history.push(-7.5);
        history.push(1.0);
        assert_eq!(history.range(), Some((-7.5, 3.0)));
        assert_eq!(history.iter().collect::<Vec<_>>(), vec![3.0, -7.5, 1.0]);
    }

    #[test]
    fn test_tilt_history_wraps_oldest_first() {
        let mut history = TiltHistory::new();
        for i in 0..HISTORY_SIZE + 2 {
            history.push(i as f32);
        }
        assert_eq!(history.len(), HISTORY_SIZE);
        assert_eq!(history.iter().next(), Some(2.0));
        assert_eq!(history.iter().last(), Some((HISTORY_SIZE + 1) as f32));
        assert_eq!(history.range(), Some((2.0, (HISTORY_SIZE + 1) as f32)));
    }

    #[test]
    fn test_tilt_history_clear() {
        let mut history = TiltHistory::new();
        history.push(5.0);
        history.clear();
        assert!(history.is_empty());
    }
}
