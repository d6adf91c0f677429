use std::time::Duration;

use crate::host::{ObserverId, ObserverKind, ScrollHost, TimerId};

/// Ledger of host observers and timers owned by one component session.
///
/// Everything acquired through a `Leases` is returned by [`Leases::release`]. Timer events
/// are honoured only while their id is still held, so callbacks outliving a session are
/// ignored.
#[derive(Debug, Default)]
pub struct Leases {
    observers: Vec<(ObserverKind, ObserverId)>,
    timers: Vec<TimerId>,
}

impl Leases {
    /// Empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to `kind` unless already subscribed.
    pub fn observe<H: ScrollHost + ?Sized>(
        &mut self,
        host: &mut H,
        kind: ObserverKind,
    ) -> ObserverId {
        if let Some((_, id)) = self.observers.iter().find(|(k, _)| *k == kind) {
            return *id;
        }
        let id = host.observe(kind);
        self.observers.push((kind, id));
        id
    }

    /// Drop a single subscription.
    pub fn unobserve<H: ScrollHost + ?Sized>(&mut self, host: &mut H, kind: ObserverKind) {
        self.observers.retain(|(k, id)| {
            if *k == kind {
                host.unobserve(*id);
                false
            } else {
                true
            }
        });
    }

    /// Whether a subscription for `kind` is held.
    pub fn is_observing(&self, kind: ObserverKind) -> bool {
        self.observers.iter().any(|(k, _)| *k == kind)
    }

    /// Schedule a timer owned by this ledger.
    pub fn set_timer<H: ScrollHost + ?Sized>(
        &mut self,
        host: &mut H,
        delay: Duration,
    ) -> TimerId {
        let id = host.set_timer(delay);
        self.timers.push(id);
        id
    }

    /// Cancel a held timer; unknown ids are ignored.
    pub fn clear_timer<H: ScrollHost + ?Sized>(&mut self, host: &mut H, id: TimerId) {
        if self.forget_timer(id) {
            host.clear_timer(id);
        }
    }

    /// Consume a fired timer. Returns `false` for timers this ledger does not hold.
    pub fn take_fired(&mut self, id: TimerId) -> bool {
        self.forget_timer(id)
    }

    /// Return every observer and timer to the host.
    pub fn release<H: ScrollHost + ?Sized>(&mut self, host: &mut H) {
        for (_, id) in self.observers.drain(..) {
            host.unobserve(id);
        }
        for id in self.timers.drain(..) {
            host.clear_timer(id);
        }
    }

    /// Whether nothing is held.
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty() && self.timers.is_empty()
    }

    fn forget_timer(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| *t != id);
        self.timers.len() != before
    }
}

impl Drop for Leases {
    fn drop(&mut self) {
        if !self.is_empty() {
            tracing::warn!(
                observers = self.observers.len(),
                timers = self.timers.len(),
                "leases dropped without release"
            );
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/lease.rs"]
mod tests;
