use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How the far tier is represented.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum FarTierMode {
    /// Camera-facing shaded point sprites.
    #[default]
    Impostor,
    /// Low-detail instanced spheres.
    Instanced,
}

/// Tier distance thresholds and per-tier mesh detail.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Tiers", inline)]
#[serde(default)]
pub struct TierOptions {
    /// Elements closer than this are in the near tier.
    #[schemars(title = "Near Distance", range(min = 0.0, max = 1000.0), extend("step" = 5.0))]
    pub near_distance: f32,
    /// Elements closer than this (and not near) are in the mid tier.
    #[schemars(title = "Mid Distance", range(min = 0.0, max = 2000.0), extend("step" = 5.0))]
    pub mid_distance: f32,
    /// Far-tier representation.
    #[schemars(title = "Far Tier")]
    pub far_mode: FarTierMode,
    /// Sphere segments for near-tier meshes.
    #[schemars(skip)]
    pub near_segments: u32,
    /// Sphere segments for mid-tier meshes.
    #[schemars(skip)]
    pub mid_segments: u32,
    /// Sphere segments for far-tier meshes in instanced mode.
    #[schemars(skip)]
    pub far_segments: u32,
}

impl Default for TierOptions {
    fn default() -> Self {
        Self {
            near_distance: 50.0,
            mid_distance: 100.0,
            far_mode: FarTierMode::Impostor,
            near_segments: 10,
            mid_segments: 8,
            far_segments: 4,
        }
    }
}
