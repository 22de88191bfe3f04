//! Orientation source: permission handshake and event subscription.
//!
//! [`OrientationSource`] wraps an [`OrientationPlatform`] and turns its raw
//! events into always-defined [`OrientationReading`]s. Listening is an explicit
//! scoped resource: [`OrientationSource::subscribe`] attaches the platform
//! listener and returns a [`Subscription`] guard. The guard delivers events to
//! the callback, and detaching happens in [`Subscription::unsubscribe`] (safe to
//! call repeatedly) or on drop, whichever comes first.
//!
//! Only one subscription can exist at a time because the guard borrows the
//! source mutably.
//!
//! # Usage
//!
//! ```ignore
//! let mut source = OrientationSource::new(platform);
//! source.probe_capability();
//! if pollster::block_on(source.request_access()).is_granted() {
//!     let latest = Cell::new(OrientationReading::LEVEL);
//!     let mut sub = source.subscribe(|r| latest.set(r))?;
//!     loop {
//!         sub.poll();
//!         render(mapper.map(latest.get()));
//!     }
//! }
//! ```

use core::future::Future;

use crate::orientation::{OrientationReading, RawOrientationEvent};
use crate::permission::{AccessOutcome, Capability, DenialReason, PermissionResponse, PermissionState};

/// Device orientation API as seen by the level.
///
/// Implementations deliver raw events only between [`attach`](Self::attach)
/// and [`detach`](Self::detach).
pub trait OrientationPlatform {
    /// Failure of the platform permission prompt.
    type Error: core::fmt::Debug;

    /// Report what the platform supports. Must not have side effects.
    fn capability(&self) -> Capability;

    /// Show the platform permission prompt and wait for the answer.
    ///
    /// May stay pending for as long as the user leaves the prompt open.
    fn request_permission(&mut self) -> impl Future<Output = Result<PermissionResponse, Self::Error>>;

    /// Start delivering orientation events.
    fn attach(&mut self);

    /// Stop delivering orientation events.
    fn detach(&mut self);

    /// Next pending raw event, if any.
    fn poll_event(&mut self) -> Option<RawOrientationEvent>;
}

/// Error returned when subscribing without sensor access.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SubscribeError {
    #[error("sensor access not available (permission {state:?})")]
    AccessNotGranted { state: PermissionState },
}

/// Event counters for the debug page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SourceStats {
    /// Readings published to subscribers.
    pub events: u32,
    /// Events that carried an unknown axis and were zeroed.
    pub malformed: u32,
    /// Subscriptions started this session.
    pub subscriptions: u32,
}

/// Owner of the platform subscription lifecycle and permission state.
pub struct OrientationSource<P> {
    platform: P,
    permission: PermissionState,
    latest: OrientationReading,
    attached: bool,
    stats: SourceStats,
}

impl<P: OrientationPlatform> OrientationSource<P> {
    /// Wrap a platform. Permission starts `Unknown` until probed.
    pub const fn new(platform: P) -> Self {
        Self {
            platform,
            permission: PermissionState::Unknown,
            latest: OrientationReading::LEVEL,
            attached: false,
            stats: SourceStats {
                events: 0,
                malformed: 0,
                subscriptions: 0,
            },
        }
    }

    /// Determine whether the platform needs an explicit permission request.
    ///
    /// Returns `NotRequired` for passive or absent sensor APIs and `Pending`
    /// for permission-gated ones. The result is only stored while the state is
    /// still `Unknown`, so probing again never discards an answered request.
    pub fn probe_capability(&mut self) -> PermissionState {
        let probed = PermissionState::from_capability(self.platform.capability());
        if self.permission == PermissionState::Unknown {
            self.permission = probed;
        }
        probed
    }

    /// Ask for sensor access.
    ///
    /// Resolves `Granted` immediately when no permission is required. Otherwise
    /// runs the platform prompt; a declined or failed prompt resolves `Denied`
    /// and leaves the source ready for another explicit attempt.
    pub async fn request_access(&mut self) -> AccessOutcome {
        if self.permission == PermissionState::Unknown {
            self.probe_capability();
        }

        match self.permission {
            PermissionState::NotRequired | PermissionState::Granted => AccessOutcome::Granted,
            PermissionState::Unknown | PermissionState::Pending | PermissionState::Denied => {
                let outcome = match self.platform.request_permission().await {
                    Ok(PermissionResponse::Granted) => AccessOutcome::Granted,
                    Ok(PermissionResponse::Denied) => AccessOutcome::Denied(DenialReason::UserDeclined),
                    Err(_) => AccessOutcome::Denied(DenialReason::PromptFailed),
                };
                self.permission = if outcome.is_granted() {
                    PermissionState::Granted
                } else {
                    PermissionState::Denied
                };
                outcome
            }
        }
    }

    /// Withdraw a previously granted permission.
    ///
    /// Returns the source to `Pending` so the gating screen is shown again.
    /// Has no effect on platforms that never required permission.
    pub fn revoke(&mut self) -> PermissionState {
        if self.permission == PermissionState::Granted {
            self.permission = PermissionState::Pending;
        }
        self.permission
    }

    /// Start listening. Fails unless the state is `Granted` or `NotRequired`.
    pub fn subscribe<F>(
        &mut self,
        on_reading: F,
    ) -> Result<Subscription<'_, P, F>, SubscribeError>
    where
        F: FnMut(OrientationReading),
    {
        if !self.permission.allows_events() {
            return Err(SubscribeError::AccessNotGranted { state: self.permission });
        }

        self.platform.attach();
        self.attached = true;
        self.stats.subscriptions = self.stats.subscriptions.saturating_add(1);

        Ok(Subscription {
            source: self,
            on_reading,
            active: true,
        })
    }

    #[inline]
    pub const fn permission(&self) -> PermissionState { self.permission }

    /// Latest published reading. Zeroed until the first event arrives.
    #[inline]
    pub const fn reading(&self) -> OrientationReading { self.latest }

    /// Whether the platform listener is currently attached.
    #[inline]
    pub const fn is_attached(&self) -> bool { self.attached }

    #[inline]
    pub const fn stats(&self) -> SourceStats { self.stats }

    #[inline]
    pub const fn platform(&self) -> &P { &self.platform }

    #[inline]
    pub const fn platform_mut(&mut self) -> &mut P { &mut self.platform }

    fn publish(
        &mut self,
        raw: RawOrientationEvent,
    ) -> OrientationReading {
        if raw.is_malformed() {
            self.stats.malformed = self.stats.malformed.saturating_add(1);
        }
        let reading = raw.normalize();
        self.latest = reading;
        self.stats.events = self.stats.events.saturating_add(1);
        reading
    }

    fn detach(&mut self) {
        if self.attached {
            self.platform.detach();
            self.attached = false;
        }
    }
}

/// Active listener on an [`OrientationSource`].
///
/// Dropping the guard detaches the platform listener.
pub struct Subscription<'a, P: OrientationPlatform, F> {
    source: &'a mut OrientationSource<P>,
    on_reading: F,
    active: bool,
}

impl<P, F> Subscription<'_, P, F>
where
    P: OrientationPlatform,
    F: FnMut(OrientationReading),
{
    /// Publish one raw event. Returns `false` after unsubscribing.
    pub fn deliver(
        &mut self,
        raw: RawOrientationEvent,
    ) -> bool {
        if !self.active {
            return false;
        }
        let reading = self.source.publish(raw);
        (self.on_reading)(reading);
        true
    }

    /// Drain every event the platform has queued. Returns how many were published.
    pub fn poll(&mut self) -> usize {
        if !self.active {
            return 0;
        }
        let mut delivered = 0;
        while let Some(raw) = self.source.platform.poll_event() {
            self.deliver(raw);
            delivered += 1;
        }
        delivered
    }
}

impl<P: OrientationPlatform, F> Subscription<'_, P, F> {
    /// Detach the platform listener. Safe to call any number of times.
    pub fn unsubscribe(&mut self) {
        if self.active {
            self.source.detach();
            self.active = false;
        }
    }

    #[inline]
    pub const fn is_active(&self) -> bool { self.active }

    #[inline]
    pub fn reading(&self) -> OrientationReading { self.source.latest }

    #[inline]
    pub fn stats(&self) -> SourceStats { self.source.stats }

    #[inline]
    pub fn permission(&self) -> PermissionState { self.source.permission }

    #[inline]
    pub fn platform_mut(&mut self) -> &mut P { &mut self.source.platform }
}

impl<P: OrientationPlatform, F> Drop for Subscription<'_, P, F> {
    fn drop(&mut self) { self.unsubscribe(); }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::collections::VecDeque;
    use std::vec::Vec;

    use super::*;

    #[derive(Debug)]
    struct PromptBroken;

    struct FakePlatform {
        capability: Capability,
        answers: VecDeque<Result<PermissionResponse, PromptBroken>>,
        queued: VecDeque<RawOrientationEvent>,
        attached: bool,
        attach_calls: u32,
        detach_calls: u32,
        prompts: u32,
    }

    impl FakePlatform {
        fn new(capability: Capability) -> Self {
            Self {
                capability,
                answers: VecDeque::new(),
                queued: VecDeque::new(),
                attached: false,
                attach_calls: 0,
                detach_calls: 0,
                prompts: 0,
            }
        }

        fn answering(
            mut self,
            answer: Result<PermissionResponse, PromptBroken>,
        ) -> Self {
            self.answers.push_back(answer);
            self
        }

        fn push(
            &mut self,
            raw: RawOrientationEvent,
        ) {
            self.queued.push_back(raw);
        }
    }

    impl OrientationPlatform for FakePlatform {
        type Error = PromptBroken;

        fn capability(&self) -> Capability { self.capability }

        async fn request_permission(&mut self) -> Result<PermissionResponse, PromptBroken> {
            self.prompts += 1;
            self.answers.pop_front().unwrap_or(Ok(PermissionResponse::Denied))
        }

        fn attach(&mut self) {
            self.attached = true;
            self.attach_calls += 1;
        }

        fn detach(&mut self) {
            self.attached = false;
            self.detach_calls += 1;
        }

        fn poll_event(&mut self) -> Option<RawOrientationEvent> {
            if self.attached { self.queued.pop_front() } else { None }
        }
    }

    // -------------------------------------------------------------------------
    // Capability probing
    // -------------------------------------------------------------------------

    #[test]
    fn test_probe_passive_platform() {
        let mut source = OrientationSource::new(FakePlatform::new(Capability::Passive));
        assert_eq!(source.permission(), PermissionState::Unknown);
        assert_eq!(source.probe_capability(), PermissionState::NotRequired);
        assert_eq!(source.permission(), PermissionState::NotRequired);
        assert!(!source.is_attached(), "probing must not attach a listener");
    }

    #[test]
    fn test_probe_gated_platform() {
        let mut source = OrientationSource::new(FakePlatform::new(Capability::PermissionGated));
        assert_eq!(source.probe_capability(), PermissionState::Pending);
        assert_eq!(source.platform().prompts, 0, "probing must not prompt");
    }

    #[test]
    fn test_probe_absent_platform_degrades_to_not_required() {
        let mut source = OrientationSource::new(FakePlatform::new(Capability::Absent));
        assert_eq!(source.probe_capability(), PermissionState::NotRequired);
        assert_eq!(source.reading(), OrientationReading::LEVEL);
    }

    #[test]
    fn test_reprobe_keeps_answered_state() {
        let platform = FakePlatform::new(Capability::PermissionGated).answering(Ok(PermissionResponse::Granted));
        let mut source = OrientationSource::new(platform);
        source.probe_capability();
        pollster::block_on(source.request_access());
        source.probe_capability();
        assert_eq!(source.permission(), PermissionState::Granted);
    }

    // -------------------------------------------------------------------------
    // Access requests
    // -------------------------------------------------------------------------

    #[test]
    fn test_request_access_not_required_is_noop() {
        let mut source = OrientationSource::new(FakePlatform::new(Capability::Passive));
        source.probe_capability();
        let outcome = pollster::block_on(source.request_access());
        assert_eq!(outcome, AccessOutcome::Granted);
        assert_eq!(source.platform().prompts, 0);
        assert_eq!(source.permission(), PermissionState::NotRequired);
    }

    #[test]
    fn test_request_access_granted() {
        let platform = FakePlatform::new(Capability::PermissionGated).answering(Ok(PermissionResponse::Granted));
        let mut source = OrientationSource::new(platform);
        source.probe_capability();
        assert_eq!(pollster::block_on(source.request_access()), AccessOutcome::Granted);
        assert_eq!(source.permission(), PermissionState::Granted);
    }

    #[test]
    fn test_request_access_denied_then_retry() {
        let platform = FakePlatform::new(Capability::PermissionGated)
            .answering(Ok(PermissionResponse::Denied))
            .answering(Ok(PermissionResponse::Granted));
        let mut source = OrientationSource::new(platform);
        source.probe_capability();

        let first = pollster::block_on(source.request_access());
        assert_eq!(first, AccessOutcome::Denied(DenialReason::UserDeclined));
        assert_eq!(source.permission(), PermissionState::Denied);
        assert_eq!(source.platform().prompts, 1, "no automatic retry");

        let second = pollster::block_on(source.request_access());
        assert_eq!(second, AccessOutcome::Granted);
        assert_eq!(source.permission(), PermissionState::Granted);
    }

    #[test]
    fn test_request_access_prompt_failure_is_denied() {
        let platform = FakePlatform::new(Capability::PermissionGated).answering(Err(PromptBroken));
        let mut source = OrientationSource::new(platform);
        source.probe_capability();
        let outcome = pollster::block_on(source.request_access());
        assert_eq!(outcome, AccessOutcome::Denied(DenialReason::PromptFailed));
        assert_eq!(source.permission(), PermissionState::Denied);
    }

    #[test]
    fn test_request_access_probes_when_unknown() {
        let mut source = OrientationSource::new(FakePlatform::new(Capability::Passive));
        assert!(pollster::block_on(source.request_access()).is_granted());
        assert_eq!(source.permission(), PermissionState::NotRequired);
    }

    #[test]
    fn test_revoke_returns_to_pending() {
        let platform = FakePlatform::new(Capability::PermissionGated).answering(Ok(PermissionResponse::Granted));
        let mut source = OrientationSource::new(platform);
        source.probe_capability();
        pollster::block_on(source.request_access());
        assert_eq!(source.revoke(), PermissionState::Pending);
        assert!(source.subscribe(|_| {}).is_err());
    }

    #[test]
    fn test_revoke_without_permission_requirement_is_noop() {
        let mut source = OrientationSource::new(FakePlatform::new(Capability::Passive));
        source.probe_capability();
        assert_eq!(source.revoke(), PermissionState::NotRequired);
    }

    // -------------------------------------------------------------------------
    // Subscriptions
    // -------------------------------------------------------------------------

    #[test]
    fn test_subscribe_refused_before_access() {
        let mut source = OrientationSource::new(FakePlatform::new(Capability::PermissionGated));
        source.probe_capability();
        let err = source.subscribe(|_| {}).err();
        assert_eq!(
            err,
            Some(SubscribeError::AccessNotGranted {
                state: PermissionState::Pending
            })
        );
        assert_eq!(source.platform().attach_calls, 0);
    }

    #[test]
    fn test_subscribe_refused_when_unknown() {
        let mut source = OrientationSource::new(FakePlatform::new(Capability::Passive));
        assert!(source.subscribe(|_| {}).is_err(), "must probe before listening");
    }

    #[test]
    fn test_every_event_is_published_once() {
        let mut platform = FakePlatform::new(Capability::Passive);
        platform.push(RawOrientationEvent::new(1.0, 2.0));
        platform.push(RawOrientationEvent::new(3.0, 4.0));
        platform.push(RawOrientationEvent::new(5.0, 6.0));

        let mut source = OrientationSource::new(platform);
        source.probe_capability();

        let mut seen = Vec::new();
        {
            let mut sub = source.subscribe(|r| seen.push(r)).unwrap();
            assert_eq!(sub.poll(), 3);
            assert_eq!(sub.poll(), 0);
        }

        assert_eq!(
            seen,
            [
                OrientationReading::new(1.0, 2.0),
                OrientationReading::new(3.0, 4.0),
                OrientationReading::new(5.0, 6.0),
            ]
        );
        assert_eq!(source.reading(), OrientationReading::new(5.0, 6.0), "last value wins");
        assert_eq!(source.stats().events, 3);
    }

    #[test]
    fn test_null_axis_published_as_zero() {
        let mut platform = FakePlatform::new(Capability::Passive);
        platform.push(RawOrientationEvent {
            alpha: None,
            beta: None,
            gamma: Some(12.0),
        });

        let mut source = OrientationSource::new(platform);
        source.probe_capability();

        let latest = Cell::new(OrientationReading::new(99.0, 99.0));
        {
            let mut sub = source.subscribe(|r| latest.set(r)).unwrap();
            sub.poll();
            assert_eq!(sub.stats().malformed, 1);
        }
        assert_eq!(latest.get(), OrientationReading::new(0.0, 12.0));
    }

    #[test]
    fn test_unsubscribe_is_idempotent() {
        let mut source = OrientationSource::new(FakePlatform::new(Capability::Passive));
        source.probe_capability();
        {
            let mut sub = source.subscribe(|_| {}).unwrap();
            assert!(sub.is_active());
            sub.unsubscribe();
            sub.unsubscribe();
            assert!(!sub.is_active());
            assert!(!sub.deliver(RawOrientationEvent::new(1.0, 1.0)));
        }
        // Drop after explicit unsubscribe must not detach a second time.
        assert_eq!(source.platform().attach_calls, 1);
        assert_eq!(source.platform().detach_calls, 1);
        assert!(!source.is_attached());
        assert_eq!(source.stats().events, 0);
    }

    #[test]
    fn test_drop_detaches_listener() {
        let mut source = OrientationSource::new(FakePlatform::new(Capability::Passive));
        source.probe_capability();
        {
            let _sub = source.subscribe(|_| {}).unwrap();
        }
        assert_eq!(source.platform().detach_calls, 1);
        assert!(!source.platform().attached);
    }

    #[test]
    fn test_resubscribe_after_teardown() {
        let mut source = OrientationSource::new(FakePlatform::new(Capability::Passive));
        source.probe_capability();
        drop(source.subscribe(|_| {}).unwrap());
        source.platform_mut().push(RawOrientationEvent::new(2.0, 2.0));
        {
            let mut sub = source.subscribe(|_| {}).unwrap();
            assert_eq!(sub.poll(), 1);
        }
        assert_eq!(source.stats().subscriptions, 2);
        assert_eq!(source.platform().detach_calls, 2);
    }

    #[test]
    fn test_events_queued_while_detached_are_not_delivered() {
        let mut platform = FakePlatform::new(Capability::Passive);
        platform.push(RawOrientationEvent::new(8.0, 8.0));
        let mut source = OrientationSource::new(platform);
        source.probe_capability();

        let mut sub = source.subscribe(|_| {}).unwrap();
        sub.unsubscribe();
        assert_eq!(sub.poll(), 0);
    }
}
