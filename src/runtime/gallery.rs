use std::fmt;

use crate::{
    animation::ease::Ease,
    catalog::model::{Catalog, MediaItem, MediaKind, Phase, PhaseLayout},
    config::GalleryConfig,
    foundation::core::{Axis, Extent, ItemId, RegionId},
    foundation::error::{GalleryError, GalleryResult},
    host::{HostEvent, NodeStyle, ObserverKind, ScrollHost, lease::Leases},
    lightbox::{Lightbox, LightboxView},
    media::tracker::{MediaState, MediaTracker},
    navigation::controller::{NavigationController, NavigationSettings},
    reveal::controller::{RevealController, RevealSpec, RevealState},
    sections::registry::{Region, SectionRegistry},
    sync::mode::Mode,
    sync::synchronizer::{ScrollSynchronizer, SyncEvent, SyncSettings, SyncSnapshot},
};

/// Notification delivered to gallery subscribers.
#[derive(Clone, Debug, PartialEq)]
pub enum GalleryNotice {
    /// New synchronizer sample (pinned mode only).
    Progress(SyncSnapshot),
    /// The region under the probe changed; `None` in intro and outro areas.
    ActiveRegionChanged(Option<RegionId>),
    /// The presentation mode changed.
    ModeChanged(Mode),
}

/// Handle returned by [`Gallery::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Element of the host markup a catalog entry is resolved to by [`Gallery::mount_catalog`].
#[derive(Clone, Copy, Debug)]
pub enum CatalogSlot<'a> {
    /// The section element of a phase.
    Section(&'a Phase),
    /// The grid container of a bento phase.
    Grid(&'a Phase),
    /// The element showing one item.
    Item(&'a Phase, &'a MediaItem),
}

type Listener = Box<dyn FnMut(&GalleryNotice)>;

/// Root of a mounted gallery view.
///
/// Components receive synchronizer snapshots explicitly; none of them looks up shared
/// state on its own. All host resources are held in scoped ledgers and returned by
/// [`Gallery::shutdown`], which also runs on drop.
pub struct Gallery<H: ScrollHost> {
    host: H,
    config: GalleryConfig,
    mode: Option<Mode>,
    sync: ScrollSynchronizer,
    sections: SectionRegistry<H::Node>,
    reveal: RevealController<H::Node>,
    navigation: NavigationController,
    media: MediaTracker<H::Node>,
    lightbox: Lightbox,
    root: Leases,
    flowing: Leases,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
}

impl<H: ScrollHost> Gallery<H> {
    /// Wire a gallery over `host`. Nothing is observed until [`Gallery::start`].
    pub fn new(host: H, config: GalleryConfig) -> GalleryResult<Self> {
        config.validate()?;
        Ok(Self {
            sync: ScrollSynchronizer::new(SyncSettings::from_config(&config)),
            sections: SectionRegistry::new(config.active_anchor),
            reveal: RevealController::new(),
            navigation: NavigationController::new(NavigationSettings::from_config(&config)),
            media: MediaTracker::new(config.media),
            lightbox: Lightbox::new(config.lightbox),
            host,
            config,
            mode: None,
            root: Leases::new(),
            flowing: Leases::new(),
            listeners: Vec::new(),
            next_listener: 1,
        })
    }

    /// Borrow the host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutably borrow the host.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Active configuration.
    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }

    /// Replace the section list. Safe to call again after layout changes.
    pub fn mount_sections<I>(&mut self, regions: I)
    where
        I: IntoIterator<Item = (RegionId, H::Node)>,
    {
        self.sections.register_all(&self.host, regions);
        self.resample();
    }

    /// Register a scroll-linked reveal for `node`.
    pub fn register_reveal(&mut self, item: ItemId, node: H::Node, spec: RevealSpec) {
        self.reveal.register(&mut self.host, item, node, spec);
    }

    /// Track lazy loading (and playback, for videos) of `node`.
    pub fn register_media(&mut self, item: ItemId, node: H::Node, kind: MediaKind) {
        self.media.register(&mut self.host, item, node, kind);
    }

    /// Register sections, reveals and media for a whole catalog. `resolve` maps catalog
    /// entries to host elements; entries it cannot resolve are skipped.
    pub fn mount_catalog<F>(&mut self, catalog: &Catalog, mut resolve: F)
    where
        F: FnMut(CatalogSlot<'_>) -> Option<H::Node>,
    {
        let mut regions = Vec::with_capacity(catalog.phases.len());
        for phase in &catalog.phases {
            if let Some(node) = resolve(CatalogSlot::Section(phase)) {
                regions.push((phase.id.clone(), node));
            }
            let spec = phase.reveal_spec(&self.config.reveal);
            if phase.layout == PhaseLayout::Bento {
                if let Some(grid) = resolve(CatalogSlot::Grid(phase)) {
                    let key = ItemId::new(format!("{}#grid", phase.id));
                    self.register_reveal(key, grid, spec);
                }
            }
            for item in &phase.items {
                let Some(node) = resolve(CatalogSlot::Item(phase, item)) else {
                    tracing::debug!(item = %item.id, "catalog item has no element");
                    continue;
                };
                let item_spec = match phase.layout {
                    PhaseLayout::Strip => spec,
                    PhaseLayout::Bento => tile_spec(),
                };
                self.register_reveal(item.id.clone(), node.clone(), item_spec);
                self.register_media(item.id.clone(), node, item.kind);
            }
        }
        tracing::debug!(
            phases = catalog.phases.len(),
            regions = regions.len(),
            "catalog mounted"
        );
        self.mount_sections(regions);
    }

    /// Observe the viewport and enter the mode it calls for. No-op when already started.
    pub fn start(&mut self) {
        if self.mode.is_some() {
            return;
        }
        self.root.observe(&mut self.host, ObserverKind::Resize);
        self.root.observe(&mut self.host, ObserverKind::AnimationFrame);
        let mode = self.mode_for_viewport();
        tracing::debug!(?mode, "gallery started");
        self.enter_mode(mode);
    }

    /// Route one host event.
    pub fn handle(&mut self, event: HostEvent) {
        let Some(mode) = self.mode else {
            return;
        };
        if self.lightbox.handle(&mut self.host, &event) {
            return;
        }
        match &event {
            HostEvent::Resize => {
                let next = self.mode_for_viewport();
                if next != mode {
                    self.switch_mode(mode, next);
                    return;
                }
            }
            HostEvent::UserInput => self.navigation.on_user_input(),
            HostEvent::Scroll => self.navigation.check_drift(self.host.scroll_y()),
            HostEvent::Frame => {
                self.navigation.tick(&mut self.host);
                self.reveal.tick(&mut self.host);
            }
            HostEvent::MediaLoaded(item) => {
                self.media.on_loaded(item);
            }
            HostEvent::MediaFailed(item) => {
                if self.media.on_failed(item) {
                    self.reveal.mark_failed(&mut self.host, item);
                }
            }
            _ => {}
        }
        match mode {
            Mode::Pinned => self.route_pinned(&event),
            Mode::Flowing => self.route_flowing(&event),
        }
    }

    /// Navigate to region `id`. Stale ids and unmounted state are dropped silently;
    /// returns whether navigation started.
    #[tracing::instrument(skip(self, id), fields(region = %id))]
    pub fn go_to(&mut self, id: &RegionId) -> bool {
        match self.try_go_to(id) {
            Ok(()) => true,
            Err(e) if e.is_recoverable() => {
                tracing::debug!(error = %e, "navigation dropped");
                false
            }
            Err(e) => {
                tracing::warn!(error = %e, "navigation failed");
                false
            }
        }
    }

    /// Region under the probe.
    pub fn active_region(&self) -> Option<&RegionId> {
        self.navigation.active_region()
    }

    /// Whether a programmatic scroll is running.
    pub fn is_navigating(&self) -> bool {
        self.navigation.is_navigating()
    }

    /// Latest synchronizer sample; `None` unless pinned and attached.
    pub fn snapshot(&self) -> Option<SyncSnapshot> {
        self.sync.snapshot()
    }

    /// Current mode; `None` before [`Gallery::start`] and after [`Gallery::shutdown`].
    pub fn mode(&self) -> Option<Mode> {
        self.mode
    }

    /// Measured regions along the current axis.
    pub fn regions(&self) -> &[Region] {
        self.sections.regions()
    }

    /// Reveal state of `item`.
    pub fn reveal_state(&self, item: &ItemId) -> Option<RevealState> {
        self.reveal.state_of(item)
    }

    /// Load state of `item`.
    pub fn media_state(&self, item: &ItemId) -> Option<MediaState> {
        self.media.state_of(item)
    }

    /// Show `item` in the lightbox.
    pub fn open_lightbox(&mut self, item: ItemId) {
        self.navigation.cancel();
        self.lightbox.open(&mut self.host, item);
    }

    /// Start closing the lightbox.
    pub fn close_lightbox(&mut self) {
        self.lightbox.close(&mut self.host);
    }

    /// Lightbox state.
    pub fn lightbox(&self) -> &Lightbox {
        &self.lightbox
    }

    /// Lightbox render state at the current host time.
    pub fn lightbox_view(&self) -> LightboxView {
        self.lightbox.view(self.host.now())
    }

    /// Receive every future notice.
    pub fn subscribe(&mut self, listener: impl FnMut(&GalleryNotice) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Stop notifying `id`. Returns whether it was subscribed.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(l, _)| *l != id);
        self.listeners.len() != before
    }

    /// Tear down the current mode and return every host resource. Idempotent.
    pub fn shutdown(&mut self) {
        let Some(mode) = self.mode.take() else {
            return;
        };
        self.leave_mode(mode);
        self.lightbox.shutdown(&mut self.host);
        self.media.pause_all(&mut self.host);
        self.root.release(&mut self.host);
        tracing::debug!("gallery shut down");
    }

    fn try_go_to(&mut self, id: &RegionId) -> GalleryResult<()> {
        let mode = self
            .mode
            .ok_or_else(|| GalleryError::not_mounted("gallery not started"))?;
        let extent = self.sections.extent_of(id)?;
        match mode {
            Mode::Pinned => {
                let clock = self
                    .sync
                    .clock()
                    .ok_or_else(|| GalleryError::not_mounted("scroll synchronizer detached"))?;
                self.navigation
                    .go_to_pinned(&mut self.host, id.clone(), extent, &clock);
            }
            Mode::Flowing => self.navigation.go_to_flowing(&mut self.host, extent.offset),
        }
        Ok(())
    }

    fn mode_for_viewport(&self) -> Mode {
        Mode::for_viewport(self.host.viewport().width, self.config.compact_breakpoint)
    }

    fn switch_mode(&mut self, from: Mode, to: Mode) {
        tracing::debug!(?from, ?to, "mode switch");
        self.leave_mode(from);
        self.enter_mode(to);
    }

    fn enter_mode(&mut self, mode: Mode) {
        self.mode = Some(mode);
        match mode {
            Mode::Pinned => {
                self.sections.set_axis(&self.host, Axis::Horizontal);
                self.reveal.set_enabled(&mut self.host, true);
                self.media.set_eager(&mut self.host, false);
                if let Some(event) = self.sync.attach(&mut self.host) {
                    self.on_sync(event, true);
                }
            }
            Mode::Flowing => {
                self.flowing.observe(&mut self.host, ObserverKind::Scroll);
                self.sections.set_axis(&self.host, Axis::Vertical);
                self.reveal.set_enabled(&mut self.host, false);
                self.media.set_eager(&mut self.host, true);
                self.sample_flowing();
            }
        }
        self.notify(&GalleryNotice::ModeChanged(mode));
    }

    fn leave_mode(&mut self, mode: Mode) {
        self.navigation.cancel();
        match mode {
            Mode::Pinned => {
                self.sync.detach(&mut self.host);
                self.reveal.on_detached();
            }
            Mode::Flowing => self.flowing.release(&mut self.host),
        }
    }

    fn route_pinned(&mut self, event: &HostEvent) {
        if !self.sync.is_attached() {
            // Mount order is not guaranteed; the next lifecycle event retries.
            if matches!(event, HostEvent::Mounted | HostEvent::Resize) {
                if let Some(ready) = self.sync.attach(&mut self.host) {
                    self.on_sync(ready, true);
                }
            }
            return;
        }
        let layout = !matches!(event, HostEvent::Scroll | HostEvent::Frame);
        if let Some(sample) = self.sync.handle(&mut self.host, event) {
            self.on_sync(sample, layout);
        }
        if self.media.take_settled() {
            tracing::debug!("all tracked media settled");
            if let Some(sample) = self.sync.handle(&mut self.host, &HostEvent::AllMediaLoaded) {
                self.on_sync(sample, true);
            }
        }
    }

    fn route_flowing(&mut self, event: &HostEvent) {
        match event {
            HostEvent::Scroll => self.sample_flowing(),
            HostEvent::Resize
            | HostEvent::Mounted
            | HostEvent::MediaLoaded(_)
            | HostEvent::MediaFailed(_) => {
                self.sections.refresh(&self.host);
                self.sample_flowing();
            }
            _ => {}
        }
    }

    fn on_sync(&mut self, event: SyncEvent, layout: bool) {
        let snapshot = *event.snapshot();
        if layout || event.changes_layout() {
            self.sections.refresh(&self.host);
            self.reveal.remeasure(&self.host);
            self.retarget_navigation();
        }
        self.sections.set_geometry(&snapshot);
        match event {
            SyncEvent::Attached(_) => self.reveal.on_ready(&mut self.host, &snapshot),
            SyncEvent::Remeasured(_) | SyncEvent::Progress(_) => {
                self.reveal.evaluate(&mut self.host, &snapshot)
            }
        }
        let window = Extent::new(-snapshot.offset_x, snapshot.viewport.width);
        self.media
            .evaluate(&mut self.host, window, Axis::Horizontal);
        let change = self
            .navigation
            .update_active(self.sections.region_at(snapshot.progress));
        if let Some(active) = change {
            self.notify(&GalleryNotice::ActiveRegionChanged(active));
        }
        self.notify(&GalleryNotice::Progress(snapshot));
    }

    fn retarget_navigation(&mut self) {
        let Some(target) = self.navigation.target().cloned() else {
            return;
        };
        match (self.sections.extent_of(&target), self.sync.clock()) {
            (Ok(extent), Some(clock)) => self.navigation.retarget(&self.host, extent, &clock),
            _ => {
                tracing::debug!(region = %target, "navigation target vanished");
                self.navigation.cancel();
            }
        }
    }

    fn sample_flowing(&mut self) {
        let y = self.host.scroll_y();
        let height = self.host.viewport().height;
        self.media
            .evaluate(&mut self.host, Extent::new(y, height), Axis::Vertical);
        let probe = self.sections.vertical_probe(y, height);
        let change = self
            .navigation
            .update_active(self.sections.region_at_point(probe));
        if let Some(active) = change {
            self.notify(&GalleryNotice::ActiveRegionChanged(active));
        }
    }

    /// Re-derive everything from the current layout after registrations changed.
    fn resample(&mut self) {
        match self.mode {
            Some(Mode::Pinned) => {
                if let Some(snapshot) = self.sync.snapshot() {
                    self.on_sync(SyncEvent::Progress(snapshot), true);
                }
            }
            Some(Mode::Flowing) => self.sample_flowing(),
            None => {}
        }
    }

    fn notify(&mut self, notice: &GalleryNotice) {
        for (_, listener) in &mut self.listeners {
            listener(notice);
        }
    }
}

/// Bento tiles show as soon as they enter the viewport; the grid carries the animation.
fn tile_spec() -> RevealSpec {
    RevealSpec {
        threshold: 1.0,
        duration_ms: 0,
        ease: Ease::Linear,
        hidden: NodeStyle {
            opacity: 0.0,
            ..NodeStyle::IDENTITY
        },
    }
}

impl<H: ScrollHost> Drop for Gallery<H> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl<H: ScrollHost + fmt::Debug> fmt::Debug for Gallery<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gallery")
            .field("host", &self.host)
            .field("mode", &self.mode)
            .field("sync", &self.sync)
            .field("sections", &self.sections)
            .field("navigation", &self.navigation)
            .field("lightbox", &self.lightbox)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/gallery.rs"]
mod tests;
