//! Gallery content as delivered by the region source.

pub mod model;
