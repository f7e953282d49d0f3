//! Scene configuration with TOML preset support.
//!
//! Everything tweakable about a tiered scene (population size, tier
//! thresholds, picking, camera, lighting, viewport) lives here. Options
//! serialize to/from TOML so scenes can be described by preset files.

mod camera;
mod display;
mod lighting;
mod picking;
mod population;
mod tiers;

use std::path::Path;

pub use camera::CameraOptions;
pub use display::DisplayOptions;
pub use lighting::LightingOptions;
pub use picking::{PickMode, PickingOptions};
pub use population::PopulationOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use tiers::{FarTierMode, TierOptions};

use crate::error::{LodError, Result};
use crate::population::TierThresholds;
use crate::util::color::Rgb;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[tiers]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Generated population.
    pub population: PopulationOptions,
    /// Tier thresholds and representation.
    pub tiers: TierOptions,
    /// Picking and highlight behavior.
    pub picking: PickingOptions,
    /// Camera projection and controls.
    pub camera: CameraOptions,
    /// Hemisphere light and impostor sizing.
    pub lighting: LightingOptions,
    /// Viewport and frame pacing.
    #[schemars(skip)]
    pub display: DisplayOptions,
}

/// The five values that fully determine how a population is partitioned
/// and highlighted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneConfig {
    /// Population size.
    pub count: usize,
    /// Generation sphere radius.
    pub radius: f32,
    /// Near tier upper bound (exclusive).
    pub near_distance: f32,
    /// Mid tier upper bound (exclusive).
    pub mid_distance: f32,
    /// Color written over a selected element.
    pub highlight_color: Rgb,
}

impl SceneConfig {
    /// Validated tier thresholds of this configuration.
    pub fn thresholds(&self) -> Result<TierThresholds> {
        TierThresholds::new(self.near_distance, self.mid_distance)
    }
}

impl Options {
    /// Collapse the options into the core [`SceneConfig`] record.
    #[must_use]
    pub fn scene_config(&self) -> SceneConfig {
        SceneConfig {
            count: self.population.count,
            radius: self.population.radius,
            near_distance: self.tiers.near_distance,
            mid_distance: self.tiers.mid_distance,
            highlight_color: self.picking.highlight_color,
        }
    }

    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from a TOML string. Missing fields use defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| LodError::OptionsParse(e.to_string()))
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(LodError::Io)?;
        let options = Self::from_toml_str(&content)?;
        log::info!("loaded options from {}", path.display());
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| LodError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(LodError::Io)?;
        }
        std::fs::write(path, content).map_err(LodError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}
