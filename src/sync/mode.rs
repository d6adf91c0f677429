/// Presentation mode of the gallery.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Mode {
    /// Wide viewport: the wrapper pins and vertical scroll drives a horizontal offset.
    Pinned,
    /// Narrow viewport: content flows vertically with no synchronization.
    Flowing,
}

impl Mode {
    /// Mode for a viewport `width` given the compact `breakpoint`.
    pub fn for_viewport(width: f64, breakpoint: f64) -> Self {
        if width < breakpoint {
            Self::Flowing
        } else {
            Self::Pinned
        }
    }
}
