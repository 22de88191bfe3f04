//! Sensor capability and permission state.
//!
//! Some platforms deliver orientation events to anyone who listens; others
//! (mobile Safari since iOS 13) require an explicit, user-triggered permission
//! request first. The state starts `Unknown`, is fixed by probing the platform
//! once at startup, and only moves to `Granted`/`Denied` through an explicit
//! request.
//!
//! ```text
//!   Unknown ──probe──► NotRequired            (passive or absent sensor API)
//!      │
//!      └────probe──► Pending ──request──► Granted
//!                       ▲          │
//!                       │          └──────► Denied ──request (retry)──► ...
//! ```

/// What the platform offers when probed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Capability {
    /// No orientation API at all. Degrades to an inert, zeroed reading.
    Absent,
    /// Events are delivered without asking the user.
    Passive,
    /// An explicit asynchronous permission request must succeed first.
    PermissionGated,
}

/// Per-session permission state. Never persisted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PermissionState {
    /// Platform not probed yet.
    #[default]
    Unknown,
    /// Platform delivers events without consent (or has no sensor API).
    NotRequired,
    /// Consent is required and has not been given yet.
    Pending,
    /// User granted sensor access.
    Granted,
    /// User declined sensor access (or the prompt failed).
    Denied,
}

impl PermissionState {
    /// State implied by a probed capability.
    ///
    /// A missing sensor API is treated exactly like a passive one.
    pub const fn from_capability(capability: Capability) -> Self {
        match capability {
            Capability::Absent | Capability::Passive => Self::NotRequired,
            Capability::PermissionGated => Self::Pending,
        }
    }

    /// Whether a subscription may be started in this state.
    #[inline]
    pub const fn allows_events(self) -> bool { matches!(self, Self::NotRequired | Self::Granted) }

    /// Whether the UI must show the gating screen instead of gauges.
    #[inline]
    pub const fn needs_gate(self) -> bool { matches!(self, Self::Pending | Self::Denied) }

    /// Short label for debug output.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Unknown => "UNKNOWN",
            Self::NotRequired => "NOT REQUIRED",
            Self::Pending => "PENDING",
            Self::Granted => "GRANTED",
            Self::Denied => "DENIED",
        }
    }
}

/// Answer of the platform permission prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PermissionResponse {
    Granted,
    Denied,
}

/// Why access was denied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DenialReason {
    /// The user declined (or dismissed) the prompt.
    UserDeclined,
    /// The platform prompt itself failed.
    PromptFailed,
}

/// Result of an access request. Denial is an outcome, not an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessOutcome {
    Granted,
    Denied(DenialReason),
}

impl AccessOutcome {
    #[inline]
    pub const fn is_granted(self) -> bool { matches!(self, Self::Granted) }
}
