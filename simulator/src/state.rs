//! Access gate flow: what the gate panel shows between permission requests.

use level_common::widgets::GateStatus;
use level_common::{AccessOutcome, PermissionState};

/// Tracks the gate panel across permission requests.
///
/// A denial sticks until the next request starts, so the message stays on
/// screen while the user decides whether to retry.
pub struct AccessGate {
    status: GateStatus,
    attempts: u32,
}

impl AccessGate {
    pub const fn new() -> Self {
        Self {
            status: GateStatus::Idle,
            attempts: 0,
        }
    }

    /// Whether the level has to stay behind the gate in this state.
    #[inline]
    pub const fn required(permission: PermissionState) -> bool { permission.needs_gate() }

    #[inline]
    pub const fn status(&self) -> GateStatus { self.status }

    #[inline]
    pub const fn attempts(&self) -> u32 { self.attempts }

    /// A request was started. Returns `false` if one is already in flight.
    pub fn begin(&mut self) -> bool {
        if self.status == GateStatus::Waiting {
            return false;
        }
        self.status = GateStatus::Waiting;
        self.attempts += 1;
        true
    }

    /// Record the outcome. Returns `true` when the gate can open.
    pub fn finish(
        &mut self,
        outcome: AccessOutcome,
    ) -> bool {
        match outcome {
            AccessOutcome::Granted => {
                self.status = GateStatus::Idle;
                true
            }
            AccessOutcome::Denied(reason) => {
                self.status = GateStatus::Denied(reason);
                false
            }
        }
    }

    /// Access was revoked; show a fresh prompt.
    pub fn reset(&mut self) { self.status = GateStatus::Idle; }
}

impl Default for AccessGate {
    fn default() -> Self { Self::new() }
}
