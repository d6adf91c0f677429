//! Headless [`ScrollHost`] with an in-memory layout.
//!
//! `SimHost` records every write the engine makes and queues the events a browser would
//! fire in response, which makes whole-gallery behaviour testable without a renderer.
//! Events whose source is not observed are dropped, the same way a host without a
//! listener would never deliver them.

use std::collections::{BTreeMap, VecDeque};
use std::time::Duration;

use crate::{
    foundation::core::{Axis, Extent, ItemId, Size},
    host::{HostEvent, NodeStyle, ObserverId, ObserverKind, ScrollBehavior, ScrollHost, TimerId},
    runtime::gallery::Gallery,
};

/// Element handle used by [`SimHost`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SimNode(pub u32);

#[derive(Clone, Copy, Debug, Default)]
struct SimLayout {
    horizontal: Option<Extent>,
    vertical: Option<Extent>,
}

/// In-memory host.
#[derive(Debug)]
pub struct SimHost {
    now: Duration,
    viewport: Size,
    scroll_y: f64,
    track_top: Option<f64>,
    track_width: Option<f64>,
    layout: BTreeMap<SimNode, SimLayout>,
    observers: BTreeMap<ObserverId, ObserverKind>,
    timers: BTreeMap<TimerId, Duration>,
    next_handle: u64,
    pending: VecDeque<HostEvent>,
    /// Last horizontal offset written to the content root.
    pub track_offset: Option<f64>,
    /// Number of `set_track_offset` calls.
    pub track_offset_writes: usize,
    /// Current pin span; `None` when unpinned.
    pub pin: Option<f64>,
    /// Last style written per element.
    pub styles: BTreeMap<SimNode, NodeStyle>,
    /// Whether native scrolling is locked.
    pub scroll_locked: bool,
    /// Elements whose media load was requested, in request order.
    pub loads: Vec<SimNode>,
    /// Playback state per video element.
    pub playing: BTreeMap<SimNode, bool>,
    /// Every programmatic scroll write.
    pub scroll_writes: Vec<(f64, ScrollBehavior)>,
}

impl SimHost {
    /// Host with the given viewport and nothing mounted.
    pub fn new(viewport: Size) -> Self {
        Self {
            now: Duration::ZERO,
            viewport,
            scroll_y: 0.0,
            track_top: None,
            track_width: None,
            layout: BTreeMap::new(),
            observers: BTreeMap::new(),
            timers: BTreeMap::new(),
            next_handle: 1,
            pending: VecDeque::new(),
            track_offset: None,
            track_offset_writes: 0,
            pin: None,
            styles: BTreeMap::new(),
            scroll_locked: false,
            loads: Vec::new(),
            playing: BTreeMap::new(),
            scroll_writes: Vec::new(),
        }
    }

    /// Mount the pinned wrapper at document offset `top` with content width `width`.
    pub fn mount_track(&mut self, top: f64, width: f64) {
        self.track_top = Some(top);
        self.track_width = Some(width);
        self.pending.push_back(HostEvent::Mounted);
    }

    /// Change the content width without other events (late layout).
    pub fn set_track_width(&mut self, width: f64) {
        self.track_width = Some(width);
    }

    /// Lay out `node` along `axis`.
    pub fn place(&mut self, node: SimNode, axis: Axis, extent: Extent) {
        let entry = self.layout.entry(node).or_default();
        match axis {
            Axis::Horizontal => entry.horizontal = Some(extent),
            Axis::Vertical => entry.vertical = Some(extent),
        }
    }

    /// Resize the viewport and queue a resize event.
    pub fn resize(&mut self, viewport: Size) {
        self.viewport = viewport;
        self.pending.push_back(HostEvent::Resize);
    }

    /// Simulate the user scrolling to `y` (wheel input followed by the scroll event).
    pub fn user_scroll(&mut self, y: f64) {
        self.pending.push_back(HostEvent::UserInput);
        self.set_native_scroll(y);
    }

    /// Simulate scrollbar dragging: the position changes without an input event.
    pub fn drag_scrollbar(&mut self, y: f64) {
        self.set_native_scroll(y);
    }

    /// Queue an arbitrary host event.
    pub fn push_event(&mut self, event: HostEvent) {
        self.pending.push_back(event);
    }

    /// Queue a media completion event.
    pub fn finish_media(&mut self, item: impl Into<ItemId>, ok: bool) {
        let item = item.into();
        self.pending.push_back(if ok {
            HostEvent::MediaLoaded(item)
        } else {
            HostEvent::MediaFailed(item)
        });
    }

    /// Advance the clock: due timers fire, then one animation frame is queued.
    pub fn advance(&mut self, dt: Duration) {
        self.now += dt;
        let now = self.now;
        let due: Vec<TimerId> = self
            .timers
            .iter()
            .filter(|(_, at)| **at <= now)
            .map(|(id, _)| *id)
            .collect();
        for id in due {
            self.timers.remove(&id);
            self.pending.push_back(HostEvent::Timer(id));
        }
        self.pending.push_back(HostEvent::Frame);
    }

    /// Drain queued events that have a live listener.
    pub fn take_events(&mut self) -> Vec<HostEvent> {
        let mut out = Vec::with_capacity(self.pending.len());
        while let Some(event) = self.pending.pop_front() {
            let needed = match &event {
                HostEvent::Scroll => Some(ObserverKind::Scroll),
                HostEvent::Resize => Some(ObserverKind::Resize),
                HostEvent::Frame => Some(ObserverKind::AnimationFrame),
                HostEvent::Key(_) => Some(ObserverKind::Keyboard),
                _ => None,
            };
            if needed.is_none_or(|kind| self.observer_count(kind) > 0) {
                out.push(event);
            }
        }
        out
    }

    /// Live subscriptions of `kind`.
    pub fn observer_count(&self, kind: ObserverKind) -> usize {
        self.observers.values().filter(|k| **k == kind).count()
    }

    /// Live subscriptions of any kind.
    pub fn live_observers(&self) -> usize {
        self.observers.len()
    }

    /// Pending timers.
    pub fn live_timers(&self) -> usize {
        self.timers.len()
    }

    /// Last style written to `node`.
    pub fn style_of(&self, node: SimNode) -> Option<NodeStyle> {
        self.styles.get(&node).copied()
    }

    fn set_native_scroll(&mut self, y: f64) {
        let y = y.max(0.0);
        if y != self.scroll_y {
            self.scroll_y = y;
            self.pending.push_back(HostEvent::Scroll);
        }
    }

    fn next_handle(&mut self) -> u64 {
        let id = self.next_handle;
        self.next_handle += 1;
        id
    }
}

impl ScrollHost for SimHost {
    type Node = SimNode;

    fn now(&self) -> Duration {
        self.now
    }

    fn viewport(&self) -> Size {
        self.viewport
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn track_top(&self) -> Option<f64> {
        self.track_top
    }

    fn track_width(&self) -> Option<f64> {
        self.track_width
    }

    fn measure(&self, node: &SimNode, axis: Axis) -> Option<Extent> {
        let layout = self.layout.get(node)?;
        match axis {
            Axis::Horizontal => layout.horizontal,
            Axis::Vertical => layout.vertical,
        }
    }

    fn scroll_to(&mut self, y: f64, behavior: ScrollBehavior) {
        self.scroll_writes.push((y, behavior));
        self.set_native_scroll(y);
    }

    fn set_track_offset(&mut self, x: f64) {
        self.track_offset = Some(x);
        self.track_offset_writes += 1;
    }

    fn set_pin(&mut self, span: Option<f64>) {
        self.pin = span;
    }

    fn set_style(&mut self, node: &SimNode, style: NodeStyle) {
        self.styles.insert(*node, style);
    }

    fn set_scroll_locked(&mut self, locked: bool) {
        self.scroll_locked = locked;
    }

    fn load_media(&mut self, node: &SimNode) {
        self.loads.push(*node);
    }

    fn set_playing(&mut self, node: &SimNode, playing: bool) {
        self.playing.insert(*node, playing);
    }

    fn observe(&mut self, kind: ObserverKind) -> ObserverId {
        let id = ObserverId(self.next_handle());
        self.observers.insert(id, kind);
        id
    }

    fn unobserve(&mut self, id: ObserverId) {
        self.observers.remove(&id);
    }

    fn set_timer(&mut self, delay: Duration) -> TimerId {
        let id = TimerId(self.next_handle());
        self.timers.insert(id, self.now + delay);
        id
    }

    fn clear_timer(&mut self, id: TimerId) {
        self.timers.remove(&id);
    }
}

impl Gallery<SimHost> {
    /// Deliver queued host events until the queue is empty.
    pub fn pump(&mut self) {
        // Writes can queue further events; the bound stops a feedback loop from hanging a test.
        for _ in 0..1024 {
            let events = self.host_mut().take_events();
            if events.is_empty() {
                return;
            }
            for event in events {
                self.handle(event);
            }
        }
        tracing::warn!("sim event queue did not drain");
    }

    /// Run `frames` animation frames of `step` each, pumping after every frame.
    pub fn run_frames(&mut self, frames: u32, step: Duration) {
        for _ in 0..frames {
            self.host_mut().advance(step);
            self.pump();
        }
    }
}
