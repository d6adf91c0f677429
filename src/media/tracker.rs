use crate::{
    catalog::model::MediaKind,
    config::MediaConfig,
    foundation::core::{Axis, Extent, ItemId},
    host::ScrollHost,
};

/// Load state of one media element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaState {
    /// Not requested yet.
    Deferred,
    /// Load requested, waiting for the host.
    Requested,
    /// Decoded.
    Loaded,
    /// Failed to load or decode.
    Failed,
}

impl MediaState {
    fn is_pending(self) -> bool {
        matches!(self, Self::Deferred | Self::Requested)
    }
}

#[derive(Debug)]
struct Slot<N> {
    item: ItemId,
    node: N,
    kind: MediaKind,
    state: MediaState,
    playing: bool,
}

/// Requests media as it approaches the viewport and plays videos while visible.
#[derive(Debug)]
pub struct MediaTracker<N> {
    config: MediaConfig,
    slots: Vec<Slot<N>>,
    eager: bool,
    settled_reported: bool,
}

impl<N: Clone + std::fmt::Debug> MediaTracker<N> {
    /// Empty tracker.
    pub fn new(config: MediaConfig) -> Self {
        Self {
            config,
            slots: Vec::new(),
            eager: false,
            settled_reported: false,
        }
    }

    /// Track `item`; requested right away when loading is eager.
    pub fn register<H: ScrollHost<Node = N>>(
        &mut self,
        host: &mut H,
        item: ItemId,
        node: N,
        kind: MediaKind,
    ) {
        self.slots.retain(|s| s.item != item);
        let mut slot = Slot {
            item,
            node,
            kind,
            state: MediaState::Deferred,
            playing: false,
        };
        if self.eager {
            request(host, &mut slot);
        }
        self.slots.push(slot);
        self.settled_reported = false;
    }

    /// Eager loading requests everything at once (flowing layout).
    pub fn set_eager<H: ScrollHost<Node = N>>(&mut self, host: &mut H, eager: bool) {
        self.eager = eager;
        if eager {
            for slot in &mut self.slots {
                request(host, slot);
            }
        }
    }

    /// Request media near `window` and toggle video playback. Extents are measured along
    /// `axis`, in the same coordinates as `window`.
    pub fn evaluate<H: ScrollHost<Node = N>>(&mut self, host: &mut H, window: Extent, axis: Axis) {
        for slot in &mut self.slots {
            let Some(extent) = host.measure(&slot.node, axis) else {
                continue;
            };
            let margin = match slot.kind {
                MediaKind::Image => self.config.image_margin,
                MediaKind::Video => self.config.video_margin,
            };
            let near = extent.intersects(window.offset - margin, window.end() + margin);
            if near {
                request(host, slot);
            }
            if slot.kind == MediaKind::Video {
                let play = near && slot.state != MediaState::Failed;
                if play != slot.playing {
                    host.set_playing(&slot.node, play);
                    slot.playing = play;
                }
            }
        }
    }

    /// Host reported a decoded item. Returns `false` for unknown items.
    pub fn on_loaded(&mut self, item: &ItemId) -> bool {
        self.finish(item, MediaState::Loaded)
    }

    /// Host reported a failed item. Returns `false` for unknown items.
    pub fn on_failed(&mut self, item: &ItemId) -> bool {
        tracing::debug!(%item, "media failed to load");
        self.finish(item, MediaState::Failed)
    }

    /// No item is deferred or in flight.
    pub fn all_settled(&self) -> bool {
        self.slots.iter().all(|s| !s.state.is_pending())
    }

    /// `true` exactly once each time the tracker becomes settled.
    pub fn take_settled(&mut self) -> bool {
        if self.settled_reported || self.slots.is_empty() || !self.all_settled() {
            return false;
        }
        self.settled_reported = true;
        true
    }

    /// Pause every playing video.
    pub fn pause_all<H: ScrollHost<Node = N>>(&mut self, host: &mut H) {
        for slot in self.slots.iter_mut().filter(|s| s.playing) {
            host.set_playing(&slot.node, false);
            slot.playing = false;
        }
    }

    /// Load state of `item`.
    pub fn state_of(&self, item: &ItemId) -> Option<MediaState> {
        self.slots.iter().find(|s| &s.item == item).map(|s| s.state)
    }

    /// Whether `item` is currently playing.
    pub fn is_playing(&self, item: &ItemId) -> bool {
        self.slots.iter().any(|s| &s.item == item && s.playing)
    }

    fn finish(&mut self, item: &ItemId, state: MediaState) -> bool {
        let Some(slot) = self.slots.iter_mut().find(|s| &s.item == item) else {
            return false;
        };
        slot.state = state;
        true
    }
}

fn request<H: ScrollHost>(host: &mut H, slot: &mut Slot<H::Node>) {
    if slot.state == MediaState::Deferred {
        host.load_media(&slot.node);
        slot.state = MediaState::Requested;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/media/tracker.rs"]
mod tests;
