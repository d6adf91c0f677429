use std::time::Duration;

use crate::{
    config::GalleryConfig,
    foundation::core::{Progress, Size},
    host::{HostEvent, ObserverKind, ScrollHost, TimerId, lease::Leases},
    sync::clock::{ProgressClock, ScrollRange},
};

/// Timing knobs of the synchronizer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SyncSettings {
    /// Fallback re-measurement after attach.
    pub settle_delay: Duration,
    /// Re-measurement delay after all media finished loading.
    pub media_settle_delay: Duration,
    /// Exponential smoothing time constant for the applied offset.
    pub scrub_lag: Option<Duration>,
}

impl SyncSettings {
    /// Settings taken from a gallery config.
    pub fn from_config(cfg: &GalleryConfig) -> Self {
        Self {
            settle_delay: cfg.settle_delay(),
            media_settle_delay: cfg.media_settle_delay(),
            scrub_lag: cfg.scrub_lag(),
        }
    }
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self::from_config(&GalleryConfig::default())
    }
}

/// State shared with every progress subscriber.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct SyncSnapshot {
    /// Current mapping domain.
    pub range: ScrollRange,
    /// Exact progress derived from the native position.
    pub progress: Progress,
    /// Horizontal offset currently applied to the content root.
    pub offset_x: f64,
    /// Viewport at the time of the sample.
    pub viewport: Size,
}

/// Notification produced by [`ScrollSynchronizer`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SyncEvent {
    /// First sample after attach; consumers waiting on the synchronizer may proceed.
    Attached(SyncSnapshot),
    /// Dimensions changed and the range was recomputed.
    Remeasured(SyncSnapshot),
    /// New sample with unchanged dimensions.
    Progress(SyncSnapshot),
}

impl SyncEvent {
    /// Snapshot carried by the event.
    pub fn snapshot(&self) -> &SyncSnapshot {
        match self {
            Self::Attached(s) | Self::Remeasured(s) | Self::Progress(s) => s,
        }
    }

    /// Whether layout-derived data must be re-measured.
    pub fn changes_layout(&self) -> bool {
        !matches!(self, Self::Progress(_))
    }
}

#[derive(Debug)]
struct Session {
    clock: ProgressClock,
    viewport: Size,
    progress: Progress,
    target_offset: f64,
    applied_offset: f64,
    written_offset: Option<f64>,
    pinned: bool,
    last_frame: Option<Duration>,
    settle_timer: Option<TimerId>,
    media_timer: Option<TimerId>,
}

impl Session {
    fn snapshot(&self) -> SyncSnapshot {
        SyncSnapshot {
            range: *self.clock.range(),
            progress: self.progress,
            offset_x: self.applied_offset,
            viewport: self.viewport,
        }
    }
}

/// Pins the wrapper and maps native vertical scroll onto a horizontal content offset.
#[derive(Debug)]
pub struct ScrollSynchronizer {
    settings: SyncSettings,
    session: Option<Session>,
    leases: Leases,
}

impl ScrollSynchronizer {
    /// Detached synchronizer.
    pub fn new(settings: SyncSettings) -> Self {
        Self {
            settings,
            session: None,
            leases: Leases::new(),
        }
    }

    /// Whether a session is live.
    pub fn is_attached(&self) -> bool {
        self.session.is_some()
    }

    /// Latest sample, if attached.
    pub fn snapshot(&self) -> Option<SyncSnapshot> {
        self.session.as_ref().map(Session::snapshot)
    }

    /// Clock of the live session.
    pub fn clock(&self) -> Option<ProgressClock> {
        self.session.as_ref().map(|s| s.clock)
    }

    /// Begin synchronizing. Returns `None` when already attached or when the host has not
    /// mounted the wrapper yet; the caller retries on the next lifecycle event.
    pub fn attach<H: ScrollHost>(&mut self, host: &mut H) -> Option<SyncEvent> {
        if self.session.is_some() {
            return None;
        }
        let Some(range) = measure_range(host) else {
            tracing::debug!("track not mounted, attach deferred");
            return None;
        };

        self.leases.observe(host, ObserverKind::Scroll);
        self.leases.observe(host, ObserverKind::Resize);
        if self.settings.scrub_lag.is_some() {
            self.leases.observe(host, ObserverKind::AnimationFrame);
        }
        let settle_timer = self.leases.set_timer(host, self.settings.settle_delay);

        self.session = Some(Session {
            clock: ProgressClock::new(range),
            viewport: host.viewport(),
            progress: Progress::START,
            target_offset: 0.0,
            applied_offset: 0.0,
            written_offset: None,
            pinned: false,
            last_frame: None,
            settle_timer: Some(settle_timer),
            media_timer: None,
        });
        self.apply_pin(host);
        let snapshot = self.sample(host, true)?;
        tracing::debug!(
            range_start = range.range_start,
            distance = range.total_scrollable_distance,
            "scroll synchronizer attached"
        );
        Some(SyncEvent::Attached(snapshot))
    }

    /// Release every observer and timer and remove pin and transform.
    pub fn detach<H: ScrollHost>(&mut self, host: &mut H) {
        self.leases.release(host);
        if let Some(session) = self.session.take() {
            if session.pinned {
                host.set_pin(None);
            }
            if session.written_offset.is_some() {
                host.set_track_offset(0.0);
            }
            tracing::debug!("scroll synchronizer detached");
        }
    }

    /// React to a host event. Returns a notification for subscribers when progress or
    /// layout was recomputed.
    pub fn handle<H: ScrollHost>(&mut self, host: &mut H, event: &HostEvent) -> Option<SyncEvent> {
        self.session.as_ref()?;
        match event {
            HostEvent::Scroll if self.leases.is_observing(ObserverKind::Scroll) => {
                self.sample(host, false).map(SyncEvent::Progress)
            }
            HostEvent::Resize | HostEvent::Mounted => self.remeasure(host),
            HostEvent::MediaLoaded(_) | HostEvent::MediaFailed(_) => self.remeasure(host),
            HostEvent::Timer(id) => {
                if !self.leases.take_fired(*id) {
                    return None;
                }
                if let Some(session) = self.session.as_mut() {
                    if session.settle_timer == Some(*id) {
                        session.settle_timer = None;
                    }
                    if session.media_timer == Some(*id) {
                        session.media_timer = None;
                    }
                }
                tracing::trace!(?id, "deferred re-measurement");
                self.remeasure(host)
            }
            HostEvent::AllMediaLoaded => {
                let pending = self.session.as_ref().and_then(|s| s.media_timer);
                if pending.is_none() {
                    let id = self.leases.set_timer(host, self.settings.media_settle_delay);
                    if let Some(session) = self.session.as_mut() {
                        session.media_timer = Some(id);
                    }
                }
                None
            }
            HostEvent::Frame => self.step_scrub(host),
            _ => None,
        }
    }

    fn remeasure<H: ScrollHost>(&mut self, host: &mut H) -> Option<SyncEvent> {
        let range = measure_range(host)?;
        let viewport = host.viewport();
        let session = self.session.as_mut()?;
        if *session.clock.range() == range && session.viewport == viewport {
            return self.sample(host, false).map(SyncEvent::Progress);
        }
        tracing::debug!(
            distance = range.total_scrollable_distance,
            content_width = range.content_width,
            viewport_width = range.viewport_width,
            "scroll range re-measured"
        );
        session.clock = ProgressClock::new(range);
        session.viewport = viewport;
        self.apply_pin(host);
        self.sample(host, true).map(SyncEvent::Remeasured)
    }

    fn apply_pin<H: ScrollHost>(&mut self, host: &mut H) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let range = session.clock.range();
        if range.is_degenerate() {
            if session.pinned {
                host.set_pin(None);
                session.pinned = false;
            }
        } else {
            host.set_pin(Some(range.native_scroll_span()));
            session.pinned = true;
        }
    }

    /// Derive progress from the native position and write the offset. `snap` bypasses
    /// scrub smoothing (first sample, layout changes).
    fn sample<H: ScrollHost>(&mut self, host: &mut H, snap: bool) -> Option<SyncSnapshot> {
        let smoothing = self.settings.scrub_lag.is_some();
        let session = self.session.as_mut()?;
        session.progress = session.clock.progress(host.scroll_y());
        session.target_offset = session.clock.offset_for(session.progress);
        if snap || !smoothing {
            session.applied_offset = session.target_offset;
        }
        write_offset(session, host);
        tracing::trace!(
            progress = session.progress.get(),
            offset = session.applied_offset,
            "scroll sample"
        );
        Some(session.snapshot())
    }

    fn step_scrub<H: ScrollHost>(&mut self, host: &mut H) -> Option<SyncEvent> {
        let lag = self.settings.scrub_lag?;
        let session = self.session.as_mut()?;
        let now = host.now();
        let last = session.last_frame.replace(now)?;
        let gap = session.target_offset - session.applied_offset;
        if gap == 0.0 {
            return None;
        }
        let dt = now.saturating_sub(last).as_secs_f64();
        let alpha = 1.0 - (-dt / lag.as_secs_f64()).exp();
        session.applied_offset += gap * alpha;
        if (session.target_offset - session.applied_offset).abs() < 0.5 {
            session.applied_offset = session.target_offset;
        }
        write_offset(session, host);
        Some(SyncEvent::Progress(session.snapshot()))
    }
}

impl Default for ScrollSynchronizer {
    fn default() -> Self {
        Self::new(SyncSettings::default())
    }
}

fn measure_range<H: ScrollHost>(host: &H) -> Option<ScrollRange> {
    let top = host.track_top()?;
    let width = host.track_width()?;
    Some(ScrollRange::measure(top, width, host.viewport().width))
}

fn write_offset<H: ScrollHost>(session: &mut Session, host: &mut H) {
    if session.clock.range().is_degenerate() {
        // Identity mode: clear a transform left over from a wider layout, otherwise never write.
        session.applied_offset = 0.0;
        session.target_offset = 0.0;
        if session.written_offset.take().is_some_and(|x| x != 0.0) {
            host.set_track_offset(0.0);
        }
        return;
    }
    if session.written_offset != Some(session.applied_offset) {
        host.set_track_offset(session.applied_offset);
        session.written_offset = Some(session.applied_offset);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sync/synchronizer.rs"]
mod tests;
