//! The seam between the scroll engine and a rendering surface.
//!
//! The engine never touches a concrete UI framework. It measures, writes and subscribes
//! through [`ScrollHost`], and it receives input as [`HostEvent`] values that the host
//! forwards to [`crate::Gallery::handle`].

pub mod lease;
pub mod sim;

use std::fmt;
use std::time::Duration;

use crate::foundation::core::{Axis, Extent, ItemId, Size};

/// Capabilities the engine needs from the rendering host.
pub trait ScrollHost {
    /// Opaque handle to a measurable element.
    type Node: Clone + fmt::Debug;

    /// Monotonic host clock.
    fn now(&self) -> Duration;

    /// Current viewport size.
    fn viewport(&self) -> Size;

    /// Current native (vertical) scroll position.
    fn scroll_y(&self) -> f64;

    /// Document offset of the pinned wrapper; `None` until it is mounted.
    fn track_top(&self) -> Option<f64>;

    /// Scroll width of the synchronized content root; `None` until it is mounted.
    fn track_width(&self) -> Option<f64>;

    /// Extent of `node` along `axis`: horizontal extents are relative to the content root,
    /// vertical extents to the document. `None` when the node is not laid out.
    fn measure(&self, node: &Self::Node, axis: Axis) -> Option<Extent>;

    /// Move the native scroll position.
    fn scroll_to(&mut self, y: f64, behavior: ScrollBehavior);

    /// Translate the content root horizontally.
    fn set_track_offset(&mut self, x: f64);

    /// Pin the wrapper and reserve `span` units of native scroll, or release the pin.
    fn set_pin(&mut self, span: Option<f64>);

    /// Apply a visual style to an element.
    fn set_style(&mut self, node: &Self::Node, style: NodeStyle);

    /// Lock or unlock native scrolling.
    fn set_scroll_locked(&mut self, locked: bool);

    /// Begin fetching and decoding an element's media source.
    fn load_media(&mut self, node: &Self::Node);

    /// Play or pause a video element.
    fn set_playing(&mut self, node: &Self::Node, playing: bool);

    /// Start delivering events of `kind`.
    fn observe(&mut self, kind: ObserverKind) -> ObserverId;

    /// Stop delivering events for `id`.
    fn unobserve(&mut self, id: ObserverId);

    /// Schedule a one-shot [`HostEvent::Timer`].
    fn set_timer(&mut self, delay: Duration) -> TimerId;

    /// Cancel a pending timer.
    fn clear_timer(&mut self, id: TimerId);
}

/// How a native scroll write is performed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollBehavior {
    /// Jump immediately.
    Instant,
    /// Let the host animate the scroll.
    Smooth,
}

/// Event sources the engine can subscribe to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ObserverKind {
    /// Native scroll position changes.
    Scroll,
    /// Viewport resizes.
    Resize,
    /// Animation-frame ticks.
    AnimationFrame,
    /// Keyboard input.
    Keyboard,
}

/// Handle for a live subscription.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(pub u64);

/// Handle for a pending timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// Keys the engine reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    /// Escape key.
    Escape,
    /// Anything else.
    Other,
}

/// Input delivered by the host.
#[derive(Clone, Debug, PartialEq)]
pub enum HostEvent {
    /// Wrapper or content root became available.
    Mounted,
    /// Native scroll position changed.
    Scroll,
    /// Viewport resized.
    Resize,
    /// Animation frame.
    Frame,
    /// A timer fired.
    Timer(TimerId),
    /// An item's media finished decoding.
    MediaLoaded(ItemId),
    /// An item's media failed to load or decode.
    MediaFailed(ItemId),
    /// The host finished loading every resource on the page.
    AllMediaLoaded,
    /// Wheel, touch or keyboard scrolling by the user.
    UserInput,
    /// Key press.
    Key(Key),
    /// Click on the lightbox backdrop.
    BackdropClick,
}

/// Visual state applied to a revealable element.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NodeStyle {
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Uniform scale.
    pub scale: f64,
    /// Vertical translation.
    pub translate_y: f64,
}

impl NodeStyle {
    /// Fully visible, untransformed.
    pub const IDENTITY: Self = Self {
        opacity: 1.0,
        scale: 1.0,
        translate_y: 0.0,
    };

    /// Per-field interpolation from `self` to `to`; `t` is already eased.
    pub fn mix(self, to: Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let lerp = |a: f64, b: f64| a + (b - a) * t;
        Self {
            opacity: lerp(self.opacity, to.opacity),
            scale: lerp(self.scale, to.scale),
            translate_y: lerp(self.translate_y, to.translate_y),
        }
    }
}

impl Default for NodeStyle {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/mod.rs"]
mod tests;
