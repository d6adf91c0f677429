use crate::{
    foundation::core::{Axis, Extent, Progress, RegionId},
    foundation::error::{GalleryError, GalleryResult},
    host::ScrollHost,
    sync::synchronizer::SyncSnapshot,
};

/// Measured gap between neighbours above which a layout warning is logged.
const GAP_TOLERANCE: f64 = 1.0;

/// One laid-out content section.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Region {
    /// Region identifier.
    pub id: RegionId,
    /// Extent along the registry's current axis.
    pub extent: Extent,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Geometry {
    total_scrollable_distance: f64,
    viewport_width: f64,
}

/// Maps region ids to their extents inside the synchronized container.
///
/// Extents are the host's measurements from the latest [`SectionRegistry::refresh`];
/// nothing is cached across layout changes.
#[derive(Debug)]
pub struct SectionRegistry<N> {
    entries: Vec<(RegionId, N)>,
    regions: Vec<Region>,
    axis: Axis,
    anchor: f64,
    geometry: Geometry,
}

impl<N: Clone + std::fmt::Debug> SectionRegistry<N> {
    /// Empty registry probing at `anchor` (fraction of the viewport).
    pub fn new(anchor: f64) -> Self {
        Self {
            entries: Vec::new(),
            regions: Vec::new(),
            axis: Axis::Horizontal,
            anchor: anchor.clamp(0.0, 1.0),
            geometry: Geometry::default(),
        }
    }

    /// Replace the registered regions and measure them.
    pub fn register_all<H, I>(&mut self, host: &H, regions: I)
    where
        H: ScrollHost<Node = N>,
        I: IntoIterator<Item = (RegionId, N)>,
    {
        self.entries = regions.into_iter().collect();
        self.refresh(host);
    }

    /// Measure along `axis` from now on.
    pub fn set_axis<H: ScrollHost<Node = N>>(&mut self, host: &H, axis: Axis) {
        self.axis = axis;
        self.refresh(host);
    }

    /// Adopt the range and viewport of a synchronizer sample.
    pub fn set_geometry(&mut self, snapshot: &SyncSnapshot) {
        self.geometry = Geometry {
            total_scrollable_distance: snapshot.range.total_scrollable_distance,
            viewport_width: snapshot.viewport.width,
        };
    }

    /// Re-measure every registered node. Idempotent for an unchanged layout.
    pub fn refresh<H: ScrollHost<Node = N>>(&mut self, host: &H) {
        let mut regions: Vec<Region> = Vec::with_capacity(self.entries.len());
        for (id, node) in &self.entries {
            let Some(measured) = host.measure(node, self.axis) else {
                tracing::debug!(region = %id, "region not laid out, skipped");
                continue;
            };
            if let Some(prev) = regions.last() {
                let expected = prev.extent.end();
                if self.axis == Axis::Horizontal
                    && (measured.offset - expected).abs() > GAP_TOLERANCE
                {
                    tracing::debug!(
                        region = %id,
                        measured = measured.offset,
                        expected,
                        "region is not flush with its predecessor"
                    );
                }
            }
            regions.push(Region {
                id: id.clone(),
                extent: measured,
            });
        }
        self.regions = regions;
    }

    /// Measured regions in layout order.
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Extent of `id`, or [`GalleryError::NotFound`] for ids not currently registered.
    pub fn extent_of(&self, id: &RegionId) -> GalleryResult<Extent> {
        self.regions
            .iter()
            .find(|r| &r.id == id)
            .map(|r| r.extent)
            .ok_or_else(|| GalleryError::not_found(format!("region '{id}'")))
    }

    /// Region under the viewport probe for horizontal `progress`.
    pub fn region_at(&self, progress: Progress) -> Option<&Region> {
        let x = progress.get() * self.geometry.total_scrollable_distance;
        self.region_at_point(x + self.geometry.viewport_width * self.anchor)
    }

    /// Region whose extent contains `point`; `None` before the first or after the last.
    pub fn region_at_point(&self, point: f64) -> Option<&Region> {
        if !point.is_finite() {
            return None;
        }
        let idx = self.regions.partition_point(|r| r.extent.end() <= point);
        self.regions.get(idx).filter(|r| r.extent.contains(point))
    }

    /// Probe position for a vertical scroll position (flowing layout).
    pub fn vertical_probe(&self, scroll_y: f64, viewport_height: f64) -> f64 {
        scroll_y + viewport_height * self.anchor
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sections/registry.rs"]
mod tests;
