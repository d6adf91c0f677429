//! Programmatic navigation to regions and active-region tracking.

pub mod controller;
