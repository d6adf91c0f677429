use std::time::Duration;

use crate::{
    animation::{ease::Ease, tween::ScrollTween},
    config::GalleryConfig,
    foundation::core::{Extent, Progress, RegionId},
    host::{ScrollBehavior, ScrollHost},
    sections::registry::Region,
    sync::clock::ProgressClock,
};

/// Navigation tuning.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NavigationSettings {
    /// Space kept before the target region's leading edge.
    pub leading_margin: f64,
    /// Smooth scroll length.
    pub duration: Duration,
    /// Smooth scroll easing.
    pub ease: Ease,
    /// Drift from the last written position that counts as a manual scroll.
    pub override_tolerance: f64,
}

impl NavigationSettings {
    /// Settings taken from a gallery config.
    pub fn from_config(cfg: &GalleryConfig) -> Self {
        Self {
            leading_margin: cfg.leading_margin,
            duration: cfg.navigation.duration(),
            ease: cfg.navigation.ease,
            override_tolerance: cfg.navigation.override_tolerance,
        }
    }
}

impl Default for NavigationSettings {
    fn default() -> Self {
        Self::from_config(&GalleryConfig::default())
    }
}

#[derive(Clone, Debug)]
struct Flight {
    target: RegionId,
    tween: ScrollTween,
    last_written: f64,
}

/// Drives smooth programmatic scrolls and remembers the active region.
///
/// The controller never owns scroll state of its own: it writes native positions and
/// lets the synchronizer derive progress from them.
#[derive(Debug)]
pub struct NavigationController {
    settings: NavigationSettings,
    flight: Option<Flight>,
    active: Option<RegionId>,
}

impl NavigationController {
    /// Idle controller.
    pub fn new(settings: NavigationSettings) -> Self {
        Self {
            settings,
            flight: None,
            active: None,
        }
    }

    /// Native scroll position that brings `extent` into view, minus the leading margin.
    pub fn target_for(&self, extent: Extent, clock: &ProgressClock) -> f64 {
        let range = clock.range();
        if range.is_degenerate() {
            return range.range_start;
        }
        let x = (extent.offset - self.settings.leading_margin).max(0.0);
        clock.native_position(Progress::new(x / range.total_scrollable_distance))
    }

    /// Start a smooth scroll towards `extent` in pinned mode.
    pub fn go_to_pinned<H: ScrollHost>(
        &mut self,
        host: &mut H,
        target: RegionId,
        extent: Extent,
        clock: &ProgressClock,
    ) {
        let to = self.target_for(extent, clock);
        let from = host.scroll_y();
        let tween = ScrollTween::new(
            from,
            to,
            host.now(),
            self.settings.duration,
            self.settings.ease,
        );
        tracing::debug!(from, to, "navigation scroll started");
        self.flight = Some(Flight {
            target,
            tween,
            last_written: from,
        });
    }

    /// Region the running scroll is heading for.
    pub fn target(&self) -> Option<&RegionId> {
        self.flight.as_ref().map(|f| &f.target)
    }

    /// Re-aim the running scroll after the layout changed. The remaining time is kept, so
    /// the scroll still ends when it was going to.
    pub fn retarget<H: ScrollHost>(&mut self, host: &H, extent: Extent, clock: &ProgressClock) {
        let to = self.target_for(extent, clock);
        let Some(flight) = self.flight.as_mut() else {
            return;
        };
        if flight.tween.to == to {
            return;
        }
        let now = host.now();
        let elapsed = now.saturating_sub(flight.tween.start);
        let remaining = flight.tween.duration.saturating_sub(elapsed);
        tracing::debug!(from = flight.tween.to, to, "navigation target moved");
        flight.tween.retarget(now, to, remaining);
    }

    /// Scroll straight to a document position in flowing mode.
    pub fn go_to_flowing<H: ScrollHost>(&mut self, host: &mut H, top: f64) {
        self.flight = None;
        host.scroll_to(top.max(0.0), ScrollBehavior::Smooth);
    }

    /// Advance a running scroll by one frame. Returns whether it is still running.
    pub fn tick<H: ScrollHost>(&mut self, host: &mut H) -> bool {
        self.check_drift(host.scroll_y());
        let Some(flight) = self.flight.as_mut() else {
            return false;
        };
        let now = host.now();
        let y = flight.tween.sample(now);
        host.scroll_to(y, ScrollBehavior::Instant);
        flight.last_written = y;
        if flight.tween.is_done(now) {
            tracing::debug!(y, "navigation scroll finished");
            self.flight = None;
            return false;
        }
        true
    }

    /// Cancel the running scroll if the native position moved away from the last write.
    pub fn check_drift(&mut self, native_y: f64) {
        let Some(expected) = self.flight.as_ref().map(|f| f.last_written) else {
            return;
        };
        if (native_y - expected).abs() > self.settings.override_tolerance {
            tracing::debug!(
                native_y,
                expected,
                "manual scroll overrode navigation"
            );
            self.flight = None;
        }
    }

    /// Direct user input always wins over a programmatic scroll.
    pub fn on_user_input(&mut self) {
        if self.flight.take().is_some() {
            tracing::debug!("user input cancelled navigation");
        }
    }

    /// Drop any running scroll.
    pub fn cancel(&mut self) {
        self.flight = None;
    }

    /// Whether a smooth scroll is running.
    pub fn is_navigating(&self) -> bool {
        self.flight.is_some()
    }

    /// Record the region under the probe. Returns the new id when it changed.
    pub fn update_active(&mut self, region: Option<&Region>) -> Option<Option<RegionId>> {
        let next = region.map(|r| &r.id);
        if self.active.as_ref() == next {
            return None;
        }
        self.active = next.cloned();
        Some(self.active.clone())
    }

    /// Region currently under the probe.
    pub fn active_region(&self) -> Option<&RegionId> {
        self.active.as_ref()
    }
}

impl Default for NavigationController {
    fn default() -> Self {
        Self::new(NavigationSettings::default())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/navigation/controller.rs"]
mod tests;
