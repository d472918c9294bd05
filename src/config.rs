//! Runtime configuration.
//!
//! Every field has a default so an empty TOML document is a valid config. A
//! typical file looks like:
//!
//! ```toml
//! [interaction]
//! rotation_dead_zone_deg = 1.5
//!
//! [storage]
//! save_file_name = "garden.json"
//!
//! [[prefabs]]
//! key = "Tree_A"
//! name = "Oak"
//! category = "plants"
//! ```

use std::path::Path;

use anyhow::Context as _;
use serde::Deserialize;

use crate::data_structures::prefab::{Catalog, PrefabTemplate};

/// Thresholds used by the touch and surface logic.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct InteractionConfig {
    /// Two surface centers closer than this are treated as the same surface.
    pub duplicate_surface_distance: f32,
    /// Frame-to-frame twist angles at or below this are ignored.
    pub rotation_dead_zone_deg: f32,
    /// Initial pinch distances below this never produce a scale factor.
    pub min_pinch_distance: f32,
    /// Multiplier applied to frame time when fading surface visuals.
    pub surface_fade_speed: f32,
    /// Scale factor used to highlight the selected measurement marker.
    pub marker_highlight_scale: f32,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            duplicate_surface_distance: 0.05,
            rotation_dead_zone_deg: 1.0,
            min_pinch_distance: 1e-3,
            surface_fade_speed: 1.0,
            marker_highlight_scale: 1.3,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    pub save_file_name: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            save_file_name: "terraScapeSaveData.json".to_string(),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub interaction: InteractionConfig,
    pub storage: StorageConfig,
    pub prefabs: Vec<PrefabTemplate>,
}

impl Config {
    pub fn from_toml_str(text: &str) -> anyhow::Result<Self> {
        let config = toml::from_str(text)?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config '{}'", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("parsing config '{}'", path.display()))
    }

    /// Group the configured prefabs by category, keeping file order.
    pub fn catalog(&self) -> Catalog {
        Catalog::from_templates(self.prefabs.iter().cloned())
    }
}
