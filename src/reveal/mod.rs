//! Scroll-linked entrance animations for cards and grid tiles.

pub mod controller;
