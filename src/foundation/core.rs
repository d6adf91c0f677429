use std::fmt;

pub use kurbo::Size;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Clone,
            Debug,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            serde::Serialize,
            serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Wrap an identifier.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the identifier text.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

string_id!(
    /// Stable identifier of a region (phase), unique within a gallery.
    RegionId
);
string_id!(
    /// Stable identifier of a media item, unique within a gallery.
    ItemId
);

/// Interval `[offset, offset + width)` along one axis.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Extent {
    /// Distance from the origin of the measuring container.
    pub offset: f64,
    /// Length along the axis.
    pub width: f64,
}

impl Extent {
    /// Build an extent, clamping non-finite input to zero and negative widths to zero.
    pub fn new(offset: f64, width: f64) -> Self {
        Self {
            offset: finite_or_zero(offset),
            width: finite_or_zero(width).max(0.0),
        }
    }

    /// Exclusive end of the interval.
    pub fn end(self) -> f64 {
        self.offset + self.width
    }

    /// Half-open containment test.
    pub fn contains(self, point: f64) -> bool {
        self.offset <= point && point < self.end()
    }

    /// Whether the interval overlaps `[start, end)`.
    pub fn intersects(self, start: f64, end: f64) -> bool {
        self.offset < end && start < self.end()
    }
}

/// Layout axis a measurement is taken along.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Inside the synchronized content root, left to right.
    Horizontal,
    /// Inside the document, top to bottom.
    Vertical,
}

/// Normalized position in `[0, 1]` within the synchronized range.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, serde::Serialize)]
pub struct Progress(f64);

impl Progress {
    /// Start of the range.
    pub const START: Self = Self(0.0);
    /// End of the range.
    pub const END: Self = Self(1.0);

    /// Clamp into `[0, 1]`; NaN becomes 0.
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self::START;
        }
        Self(value.clamp(0.0, 1.0))
    }

    /// Raw value.
    pub fn get(self) -> f64 {
        self.0
    }
}

/// Map NaN and infinities to 0; host measurements are untrusted.
pub(crate) fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
