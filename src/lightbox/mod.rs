//! Modal viewer for a single media item.
//!
//! Opening locks native scrolling so the synchronized offset cannot move underneath the
//! overlay. The lock and the keyboard subscription are held only while the lightbox is
//! not fully closed.

use std::time::Duration;

use crate::{
    animation::ease::Ease,
    config::LightboxConfig,
    foundation::core::ItemId,
    host::{HostEvent, Key, ObserverKind, ScrollHost, lease::Leases},
};

/// Scale of the content at the start of the open animation.
const CONTENT_START_SCALE: f64 = 0.95;

/// Lifecycle of the lightbox.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LightboxPhase {
    /// Not shown.
    Closed,
    /// Fading in since host time `since`.
    Opening {
        /// Host time the animation began.
        since: Duration,
    },
    /// Fully shown.
    Open,
    /// Fading out since host time `since`.
    Closing {
        /// Host time the animation began.
        since: Duration,
    },
}

/// What the host should render for the lightbox.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct LightboxView {
    /// Backdrop opacity.
    pub overlay_opacity: f64,
    /// Media opacity.
    pub content_opacity: f64,
    /// Media scale.
    pub content_scale: f64,
}

/// Modal viewer state machine.
#[derive(Debug)]
pub struct Lightbox {
    config: LightboxConfig,
    phase: LightboxPhase,
    item: Option<ItemId>,
    leases: Leases,
    locked: bool,
}

impl Lightbox {
    /// Closed lightbox.
    pub fn new(config: LightboxConfig) -> Self {
        Self {
            config,
            phase: LightboxPhase::Closed,
            item: None,
            leases: Leases::new(),
            locked: false,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> LightboxPhase {
        self.phase
    }

    /// Item being shown, until closing completes.
    pub fn item(&self) -> Option<&ItemId> {
        self.item.as_ref()
    }

    /// Whether the lightbox is on screen in any phase.
    pub fn is_visible(&self) -> bool {
        self.phase != LightboxPhase::Closed
    }

    /// Show `item`. Opening over an already open lightbox swaps the item.
    pub fn open<H: ScrollHost>(&mut self, host: &mut H, item: ItemId) {
        tracing::debug!(%item, "lightbox open");
        self.item = Some(item);
        match self.phase {
            LightboxPhase::Opening { .. } | LightboxPhase::Open => {}
            LightboxPhase::Closed | LightboxPhase::Closing { .. } => {
                if !self.locked {
                    host.set_scroll_locked(true);
                    self.locked = true;
                }
                self.leases.observe(host, ObserverKind::Keyboard);
                self.phase = LightboxPhase::Opening { since: host.now() };
            }
        }
    }

    /// Start closing.
    pub fn close<H: ScrollHost>(&mut self, host: &mut H) {
        if matches!(
            self.phase,
            LightboxPhase::Opening { .. } | LightboxPhase::Open
        ) {
            self.phase = LightboxPhase::Closing { since: host.now() };
        }
    }

    /// React to keyboard, backdrop and frame events. Returns whether the event was consumed.
    pub fn handle<H: ScrollHost>(&mut self, host: &mut H, event: &HostEvent) -> bool {
        match event {
            HostEvent::Key(Key::Escape) | HostEvent::BackdropClick if self.is_visible() => {
                self.close(host);
                true
            }
            HostEvent::Frame => {
                self.step(host);
                false
            }
            _ => false,
        }
    }

    /// Render state at host time `now`.
    pub fn view(&self, now: Duration) -> LightboxView {
        match self.phase {
            LightboxPhase::Closed => LightboxView {
                overlay_opacity: 0.0,
                content_opacity: 0.0,
                content_scale: CONTENT_START_SCALE,
            },
            LightboxPhase::Open => LightboxView {
                overlay_opacity: 1.0,
                content_opacity: 1.0,
                content_scale: 1.0,
            },
            LightboxPhase::Opening { since } => {
                let t = Ease::OutQuad.apply(fraction(now, since, self.config.open_ms));
                shown(t)
            }
            LightboxPhase::Closing { since } => {
                let t = Ease::InQuad.apply(fraction(now, since, self.config.close_ms));
                shown(1.0 - t)
            }
        }
    }

    /// Close immediately and return every host resource.
    pub fn shutdown<H: ScrollHost>(&mut self, host: &mut H) {
        self.release(host);
        self.phase = LightboxPhase::Closed;
        self.item = None;
    }

    fn step<H: ScrollHost>(&mut self, host: &mut H) {
        let now = host.now();
        match self.phase {
            LightboxPhase::Opening { since }
                if fraction(now, since, self.config.open_ms) >= 1.0 =>
            {
                self.phase = LightboxPhase::Open;
            }
            LightboxPhase::Closing { since }
                if fraction(now, since, self.config.close_ms) >= 1.0 =>
            {
                tracing::debug!("lightbox closed");
                self.shutdown(host);
            }
            _ => {}
        }
    }

    fn release<H: ScrollHost>(&mut self, host: &mut H) {
        self.leases.release(host);
        if self.locked {
            host.set_scroll_locked(false);
            self.locked = false;
        }
    }
}

fn fraction(now: Duration, since: Duration, total_ms: u64) -> f64 {
    if total_ms == 0 {
        return 1.0;
    }
    let elapsed = now.saturating_sub(since).as_nanos() as f64;
    (elapsed / (total_ms as f64 * 1_000_000.0)).clamp(0.0, 1.0)
}

fn shown(t: f64) -> LightboxView {
    LightboxView {
        overlay_opacity: t,
        content_opacity: t,
        content_scale: CONTENT_START_SCALE + (1.0 - CONTENT_START_SCALE) * t,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/lightbox/mod.rs"]
mod tests;
