//! Recap is the scroll engine of a horizontal photo gallery.
//!
//! On wide viewports the gallery pins its wrapper and turns native vertical scrolling into
//! a horizontal content offset, one unit for one unit. Narrow viewports fall back to a
//! plain vertical flow. Navigation, reveal animations, lazy media and the active-region
//! highlight all synchronize against the same progress value.
//!
//! # Architecture overview
//!
//! 1. **Host**: a rendering surface implements [`ScrollHost`] and forwards [`HostEvent`]s.
//! 2. **Synchronize**: [`ScrollSynchronizer`] measures a [`ScrollRange`], derives
//!    [`Progress`] and writes the offset.
//! 3. **Consume**: [`SectionRegistry`], [`RevealController`], [`NavigationController`] and
//!    [`MediaTracker`] receive each [`SyncSnapshot`] explicitly.
//! 4. **Root**: [`Gallery`] owns everything, switches between [`Mode::Pinned`] and
//!    [`Mode::Flowing`], and tears down on drop.
//!
//! The crate also ships the offline renumbering step of the asset pipeline
//! ([`renumber_folder`]) and a `recap` CLI.
//!
//! # Getting started
//!
//! - For end-user usage, see the repository README.
//! - [`sim::SimHost`] is a headless host for tests and experiments.
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(missing_docs_in_private_items)]

mod animation;
mod catalog;
mod config;
mod foundation;
mod host;
mod lightbox;
mod media;
mod navigation;
mod pipeline;
mod reveal;
mod runtime;
mod sections;
mod sync;

pub use host::sim;

pub use animation::ease::Ease;
pub use animation::tween::ScrollTween;
pub use catalog::model::{AspectHint, Catalog, MediaItem, MediaKind, Phase, PhaseLayout};
pub use config::{GalleryConfig, LightboxConfig, MediaConfig, NavigationConfig, RevealConfig};
pub use foundation::core::{Axis, Extent, ItemId, Progress, RegionId, Size};
pub use foundation::error::{GalleryError, GalleryResult};
pub use host::lease::Leases;
pub use host::{
    HostEvent, Key, NodeStyle, ObserverId, ObserverKind, ScrollBehavior, ScrollHost, TimerId,
};
pub use lightbox::{Lightbox, LightboxPhase, LightboxView};
pub use media::tracker::{MediaState, MediaTracker};
pub use navigation::controller::{NavigationController, NavigationSettings};
pub use pipeline::renumber::{
    FileFailure, FolderReport, RenumberOptions, renumber_folder, renumber_tree,
};
pub use reveal::controller::{RevealController, RevealSpec, RevealState};
pub use runtime::gallery::{CatalogSlot, Gallery, GalleryNotice, ListenerId};
pub use sections::registry::{Region, SectionRegistry};
pub use sync::clock::{ProgressClock, ScrollRange};
pub use sync::mode::Mode;
pub use sync::synchronizer::{ScrollSynchronizer, SyncEvent, SyncSettings, SyncSnapshot};
