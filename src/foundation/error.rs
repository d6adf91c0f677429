/// Result alias used across the crate.
pub type GalleryResult<T> = Result<T, GalleryError>;

#[derive(thiserror::Error, Debug)]
/// Error type for gallery configuration, lookups and offline tooling.
pub enum GalleryError {
    /// Configuration or catalog data violates an invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// A region id is not (or no longer) registered.
    #[error("not found: {0}")]
    NotFound(String),

    /// Host references needed for an operation are absent.
    #[error("not mounted: {0}")]
    NotMounted(String),

    /// JSON input could not be decoded.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Any other failure (filesystem IO and friends).
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GalleryError {
    /// Build a [`GalleryError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`GalleryError::NotFound`].
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Build a [`GalleryError::NotMounted`].
    pub fn not_mounted(msg: impl Into<String>) -> Self {
        Self::NotMounted(msg.into())
    }

    /// Build a [`GalleryError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Whether the error describes a stale or transient condition that callers drop silently.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::NotMounted(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
