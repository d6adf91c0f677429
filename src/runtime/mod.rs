//! The mounted gallery: component wiring, event routing and the mode machine.

pub mod gallery;
