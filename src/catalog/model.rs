use std::collections::BTreeSet;
use std::path::Path;

use anyhow::Context as _;

use crate::{
    config::RevealConfig,
    foundation::core::{ItemId, RegionId},
    foundation::error::{GalleryError, GalleryResult},
    reveal::controller::RevealSpec,
};

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// Ordered list of phases shown by one gallery.
///
/// The catalog is opaque input to the scroll engine. Validation checks identifiers and
/// shape only, never whether media files exist or decode.
pub struct Catalog {
    /// Phases in presentation order.
    pub phases: Vec<Phase>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One curated set of media, laid out as a single region.
pub struct Phase {
    /// Region id, unique within the catalog.
    pub id: RegionId,
    /// Display title.
    pub name: String,
    /// Label used by the navigation bar.
    pub short_name: String,
    /// How the items are arranged.
    #[serde(default)]
    pub layout: PhaseLayout,
    /// Media in presentation order.
    pub items: Vec<MediaItem>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Arrangement of a phase's items.
pub enum PhaseLayout {
    /// Horizontal strip of individual cards.
    #[default]
    Strip,
    /// Bento grid revealed as one unit.
    Bento,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A single photo or video.
pub struct MediaItem {
    /// Item id, unique across the catalog.
    pub id: ItemId,
    /// Media path or URL.
    pub source: String,
    /// Still image or video.
    #[serde(default)]
    pub kind: MediaKind,
    /// Card shape in strip layouts.
    #[serde(default)]
    pub aspect: Option<AspectHint>,
    /// Named cell in bento layouts.
    #[serde(default)]
    pub grid_slot: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Media type of an item.
pub enum MediaKind {
    /// Still image.
    #[default]
    Image,
    /// Looping muted video.
    Video,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Card shape of a strip item.
pub enum AspectHint {
    /// Taller than wide.
    Portrait,
    /// Wider than tall.
    #[default]
    Landscape,
    /// Equal sides.
    Square,
}

impl MediaItem {
    /// Aspect hint with the landscape default applied.
    pub fn aspect(&self) -> AspectHint {
        self.aspect.unwrap_or_default()
    }
}

impl Phase {
    /// Reveal preset for this phase's revealable elements.
    pub fn reveal_spec(&self, cfg: &RevealConfig) -> RevealSpec {
        match self.layout {
            PhaseLayout::Strip => cfg.card,
            PhaseLayout::Bento => cfg.grid,
        }
    }
}

impl Catalog {
    /// Parse and validate a JSON document.
    pub fn from_json_str(s: &str) -> GalleryResult<Self> {
        let catalog: Self =
            serde_json::from_str(s).map_err(|e| GalleryError::serde(e.to_string()))?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Read, parse and validate a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> GalleryResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read catalog '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Check identifier uniqueness and required fields.
    pub fn validate(&self) -> GalleryResult<()> {
        let mut phase_ids = BTreeSet::new();
        let mut item_ids = BTreeSet::new();
        for phase in &self.phases {
            if phase.id.as_str().trim().is_empty() {
                return Err(GalleryError::validation("phase id must be non-empty"));
            }
            if !phase_ids.insert(phase.id.as_str()) {
                return Err(GalleryError::validation(format!(
                    "duplicate phase id '{}'",
                    phase.id
                )));
            }
            for item in &phase.items {
                if item.id.as_str().trim().is_empty() {
                    return Err(GalleryError::validation(format!(
                        "phase '{}' has an item with an empty id",
                        phase.id
                    )));
                }
                if !item_ids.insert(item.id.as_str()) {
                    return Err(GalleryError::validation(format!(
                        "duplicate item id '{}'",
                        item.id
                    )));
                }
                if item.source.trim().is_empty() {
                    return Err(GalleryError::validation(format!(
                        "item '{}' source must be non-empty",
                        item.id
                    )));
                }
            }
        }
        Ok(())
    }

    /// Look up a phase by id.
    pub fn phase(&self, id: &RegionId) -> Option<&Phase> {
        self.phases.iter().find(|p| &p.id == id)
    }

    /// Every item in presentation order.
    pub fn items(&self) -> impl Iterator<Item = (&Phase, &MediaItem)> {
        self.phases
            .iter()
            .flat_map(|p| p.items.iter().map(move |i| (p, i)))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/model.rs"]
mod tests;
