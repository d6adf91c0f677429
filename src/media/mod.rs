//! Lazy media loading and viewport-driven video playback.

pub mod tracker;
