use crate::foundation::core::{Progress, finite_or_zero};

/// Mapping domain of one synchronization session.
///
/// One unit of native vertical scroll moves the content one unit horizontally, so the
/// native span equals the horizontal distance and the mapping inverts exactly.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ScrollRange {
    /// Native scroll position at which the wrapper pins (progress 0).
    pub range_start: f64,
    /// Measured scroll width of the content root.
    pub content_width: f64,
    /// Measured viewport width.
    pub viewport_width: f64,
    /// `max(0, content_width - viewport_width)`.
    pub total_scrollable_distance: f64,
}

impl ScrollRange {
    /// Derive a range from raw host measurements.
    pub fn measure(range_start: f64, content_width: f64, viewport_width: f64) -> Self {
        let content_width = finite_or_zero(content_width).max(0.0);
        let viewport_width = finite_or_zero(viewport_width).max(0.0);
        Self {
            range_start: finite_or_zero(range_start),
            content_width,
            viewport_width,
            total_scrollable_distance: (content_width - viewport_width).max(0.0),
        }
    }

    /// Native distance consumed by the pin; equal to the horizontal distance.
    pub fn native_scroll_span(&self) -> f64 {
        self.total_scrollable_distance
    }

    /// Content fits the viewport: synchronization is the identity.
    pub fn is_degenerate(&self) -> bool {
        self.total_scrollable_distance <= 0.0
    }
}

/// Converts between native scroll positions, progress and horizontal offsets.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProgressClock {
    range: ScrollRange,
}

impl ProgressClock {
    /// Clock over `range`.
    pub fn new(range: ScrollRange) -> Self {
        Self { range }
    }

    /// Range this clock maps.
    pub fn range(&self) -> &ScrollRange {
        &self.range
    }

    /// Progress for a native scroll position; always 0 over a degenerate range.
    pub fn progress(&self, native_y: f64) -> Progress {
        let span = self.range.native_scroll_span();
        if span <= 0.0 {
            return Progress::START;
        }
        Progress::new((finite_or_zero(native_y) - self.range.range_start) / span)
    }

    /// Native scroll position producing `progress`.
    pub fn native_position(&self, progress: Progress) -> f64 {
        self.range.range_start + progress.get() * self.range.native_scroll_span()
    }

    /// Horizontal content offset for `progress`.
    pub fn offset_for(&self, progress: Progress) -> f64 {
        if self.range.is_degenerate() {
            return 0.0;
        }
        -progress.get() * self.range.total_scrollable_distance
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sync/clock.rs"]
mod tests;
