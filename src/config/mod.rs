//! Runtime tuning for the gallery.
//!
//! Every constant the scroll engine depends on is a named field here, loaded from JSON.
//! Missing fields fall back to [`GalleryConfig::default`].

use std::path::Path;
use std::time::Duration;

use anyhow::Context as _;

use crate::{
    animation::ease::Ease,
    foundation::error::{GalleryError, GalleryResult},
    host::NodeStyle,
    reveal::controller::RevealSpec,
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Top-level gallery configuration.
pub struct GalleryConfig {
    /// Viewport width below which the gallery uses `Flowing` mode.
    pub compact_breakpoint: f64,
    /// Margin kept before a region's leading edge when navigating to it.
    pub leading_margin: f64,
    /// Fraction of the viewport used as the active-region probe (0.5 = centre).
    pub active_anchor: f64,
    /// Fallback re-measurement delay after attach, in milliseconds.
    pub settle_delay_ms: u64,
    /// Delay between "all media loaded" and the re-measurement it triggers.
    pub media_settle_delay_ms: u64,
    /// Optional smoothing of the applied offset towards the scrubbed target.
    pub scrub_lag_ms: Option<u64>,
    /// Programmatic navigation.
    pub navigation: NavigationConfig,
    /// Reveal presets.
    pub reveal: RevealConfig,
    /// Lazy media loading.
    pub media: MediaConfig,
    /// Lightbox timings.
    pub lightbox: LightboxConfig,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            compact_breakpoint: 768.0,
            leading_margin: 50.0,
            active_anchor: 0.5,
            settle_delay_ms: 500,
            media_settle_delay_ms: 100,
            scrub_lag_ms: None,
            navigation: NavigationConfig::default(),
            reveal: RevealConfig::default(),
            media: MediaConfig::default(),
            lightbox: LightboxConfig::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Smooth-scroll navigation settings.
pub struct NavigationConfig {
    /// Scroll duration in milliseconds.
    pub duration_ms: u64,
    /// Scroll easing.
    pub ease: Ease,
    /// Drift from the last programmatic write treated as a manual override.
    pub override_tolerance: f64,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            duration_ms: 1200,
            ease: Ease::InOutQuad,
            override_tolerance: 1.0,
        }
    }
}

impl NavigationConfig {
    /// Scroll duration.
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Reveal presets for strip cards and bento grids.
pub struct RevealConfig {
    /// Individual photo cards.
    pub card: RevealSpec,
    /// Whole bento grids.
    pub grid: RevealSpec,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            card: RevealSpec {
                threshold: 0.85,
                duration_ms: 800,
                ease: Ease::OutCubic,
                hidden: NodeStyle {
                    opacity: 0.0,
                    scale: 0.9,
                    translate_y: 30.0,
                },
            },
            grid: RevealSpec {
                threshold: 0.80,
                duration_ms: 600,
                ease: Ease::OutQuad,
                hidden: NodeStyle {
                    opacity: 0.0,
                    scale: 1.0,
                    translate_y: 30.0,
                },
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Look-ahead margins for lazy media.
pub struct MediaConfig {
    /// Images start loading this far outside the viewport.
    pub image_margin: f64,
    /// Videos load and play this far outside the viewport.
    pub video_margin: f64,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            image_margin: 300.0,
            video_margin: 100.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Lightbox fade timings.
pub struct LightboxConfig {
    /// Open animation in milliseconds.
    pub open_ms: u64,
    /// Close animation in milliseconds.
    pub close_ms: u64,
}

impl Default for LightboxConfig {
    fn default() -> Self {
        Self {
            open_ms: 300,
            close_ms: 200,
        }
    }
}

impl GalleryConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(s: &str) -> GalleryResult<Self> {
        let cfg: Self = serde_json::from_str(s).map_err(|e| GalleryError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> GalleryResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Check ranges of every tunable.
    pub fn validate(&self) -> GalleryResult<()> {
        if !self.compact_breakpoint.is_finite() || self.compact_breakpoint <= 0.0 {
            return Err(GalleryError::validation(
                "compact_breakpoint must be finite and > 0",
            ));
        }
        non_negative(self.leading_margin, "leading_margin")?;
        unit_interval(self.active_anchor, "active_anchor")?;
        non_negative(
            self.navigation.override_tolerance,
            "navigation.override_tolerance",
        )?;
        unit_interval(self.reveal.card.threshold, "reveal.card.threshold")?;
        unit_interval(self.reveal.grid.threshold, "reveal.grid.threshold")?;
        non_negative(self.media.image_margin, "media.image_margin")?;
        non_negative(self.media.video_margin, "media.video_margin")?;
        Ok(())
    }

    /// Fallback settle delay.
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    /// Delay after media completion.
    pub fn media_settle_delay(&self) -> Duration {
        Duration::from_millis(self.media_settle_delay_ms)
    }

    /// Scrub smoothing time constant, if enabled.
    pub fn scrub_lag(&self) -> Option<Duration> {
        self.scrub_lag_ms
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
    }
}

fn non_negative(v: f64, field: &str) -> GalleryResult<()> {
    if !v.is_finite() || v < 0.0 {
        return Err(GalleryError::validation(format!(
            "{field} must be finite and >= 0"
        )));
    }
    Ok(())
}

fn unit_interval(v: f64, field: &str) -> GalleryResult<()> {
    if !(0.0..=1.0).contains(&v) {
        return Err(GalleryError::validation(format!(
            "{field} must be in [0, 1]"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/config/mod.rs"]
mod tests;
