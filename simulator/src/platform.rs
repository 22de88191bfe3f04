//! Simulated device orientation API.
//!
//! Stands in for a phone's motion sensor: the tilt follows the keyboard or an
//! automatic sweep, and a permission prompt answers as configured on the
//! command line. Events are only produced while a listener is attached.

use std::collections::VecDeque;
use std::future::{self, Future};
use std::thread;
use std::time::Duration;

use level_common::permission::PermissionResponse;
use level_common::source::OrientationPlatform;
use level_common::{Capability, RawOrientationEvent};
use tracing::{debug, info, warn};

use crate::cli::{MotionMode, PromptAnswer};

/// Degrees added per I/J/K/L press.
pub const TILT_STEP_DEG: f32 = 1.5;

/// Every Nth event is malformed while glitch injection is on.
const GLITCH_EVERY: u32 = 5;

/// Time the simulated user takes to answer the prompt.
const PROMPT_DELAY: Duration = Duration::from_millis(600);

/// Sweep phase advance per tick.
const SWEEP_DT: f32 = 0.05;

/// Upper bound on undelivered events; older ones are dropped.
const QUEUE_LIMIT: usize = 32;

/// Failure raised by the simulated prompt.
#[derive(Debug, thiserror::Error)]
#[error("permission prompt failed: {0}")]
pub struct PromptError(&'static str);

/// Arrow-key style tilt nudges.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Nudge {
    Forward,
    Back,
    Left,
    Right,
}

pub struct SimulatedPlatform {
    capability: Capability,
    answer: PromptAnswer,
    prompt_delay: Duration,
    motion: MotionMode,
    glitch: bool,
    attached: bool,
    /// Manual tilt used in `MotionMode::Keys`.
    beta: f32,
    gamma: f32,
    /// Sweep phase.
    t: f32,
    emitted: u32,
    queue: VecDeque<RawOrientationEvent>,
}

impl SimulatedPlatform {
    pub fn new(
        capability: Capability,
        answer: PromptAnswer,
        motion: MotionMode,
    ) -> Self {
        Self {
            capability,
            answer,
            prompt_delay: PROMPT_DELAY,
            motion,
            glitch: false,
            attached: false,
            beta: 0.0,
            gamma: 0.0,
            t: 0.0,
            emitted: 0,
            queue: VecDeque::with_capacity(QUEUE_LIMIT),
        }
    }

    /// Override how long the prompt takes to answer.
    #[must_use]
    pub const fn with_prompt_delay(
        mut self,
        delay: Duration,
    ) -> Self {
        self.prompt_delay = delay;
        self
    }

    #[inline]
    pub const fn motion(&self) -> MotionMode { self.motion }

    pub fn toggle_motion(&mut self) -> MotionMode {
        self.motion = self.motion.toggle();
        info!(motion = ?self.motion, "motion source changed");
        self.motion
    }

    #[inline]
    pub const fn glitch(&self) -> bool { self.glitch }

    pub fn toggle_glitch(&mut self) -> bool {
        self.glitch = !self.glitch;
        info!(glitch = self.glitch, "malformed event injection toggled");
        self.glitch
    }

    /// Nudge the manual tilt. Ignored while sweeping.
    pub fn nudge(
        &mut self,
        nudge: Nudge,
    ) {
        if self.motion != MotionMode::Keys {
            return;
        }
        match nudge {
            Nudge::Forward => self.beta -= TILT_STEP_DEG,
            Nudge::Back => self.beta += TILT_STEP_DEG,
            Nudge::Left => self.gamma -= TILT_STEP_DEG,
            Nudge::Right => self.gamma += TILT_STEP_DEG,
        }
        self.beta = self.beta.clamp(-180.0, 180.0);
        self.gamma = self.gamma.clamp(-90.0, 90.0);
    }

    /// Put the simulated device flat on the table.
    pub const fn level_out(&mut self) {
        self.beta = 0.0;
        self.gamma = 0.0;
    }

    /// Advance simulated time by one frame and emit one event if listening.
    pub fn tick(&mut self) {
        self.t += SWEEP_DT;
        if !self.attached || self.capability == Capability::Absent {
            return;
        }

        let (beta, gamma) = match self.motion {
            MotionMode::Keys => (self.beta, self.gamma),
            MotionMode::Sweep => (
                fake_signal(self.t + 1.3, -40.0, 40.0, 0.45),
                fake_signal(self.t, -60.0, 60.0, 0.7),
            ),
        };

        self.emitted = self.emitted.wrapping_add(1);
        let mut event = RawOrientationEvent {
            alpha: Some(0.0),
            beta: Some(beta),
            gamma: Some(gamma),
        };
        if self.glitch && self.emitted.is_multiple_of(GLITCH_EVERY) {
            // Alternate which axis goes missing
            if (self.emitted / GLITCH_EVERY).is_multiple_of(2) {
                event.beta = None;
            } else {
                event.gamma = None;
            }
            debug!(?event, "injecting malformed event");
        }

        if self.queue.len() >= QUEUE_LIMIT {
            self.queue.pop_front();
        }
        self.queue.push_back(event);
    }
}

impl OrientationPlatform for SimulatedPlatform {
    type Error = PromptError;

    fn capability(&self) -> Capability { self.capability }

    fn request_permission(&mut self) -> impl Future<Output = Result<PermissionResponse, PromptError>> {
        info!(answer = ?self.answer, "showing permission prompt");
        thread::sleep(self.prompt_delay);
        let result = match self.answer {
            PromptAnswer::Allow => Ok(PermissionResponse::Granted),
            PromptAnswer::Deny => Ok(PermissionResponse::Denied),
            PromptAnswer::Fail => Err(PromptError("sensor service unavailable")),
        };
        future::ready(result)
    }

    fn attach(&mut self) {
        if self.capability == Capability::Absent {
            warn!("no orientation API, listener stays silent");
        }
        self.attached = true;
        debug!("orientation listener attached");
    }

    fn detach(&mut self) {
        self.attached = false;
        self.queue.clear();
        debug!("orientation listener detached");
    }

    fn poll_event(&mut self) -> Option<RawOrientationEvent> { self.queue.pop_front() }
}

/// Smooth oscillation between `min` and `max`.
fn fake_signal(
    t: f32,
    min: f32,
    max: f32,
    freq: f32,
) -> f32 {
    let normalized = (t * freq).sin().mul_add(0.5, 0.5);
    min + normalized * (max - min)
}
