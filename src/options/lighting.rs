use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Hemisphere light and impostor sprite sizing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Lighting", inline)]
#[serde(default)]
pub struct LightingOptions {
    /// Light color from above (normal.y = 1).
    #[schemars(skip)]
    pub sky_color: [f32; 3],
    /// Light color from below (normal.y = -1).
    #[schemars(skip)]
    pub ground_color: [f32; 3],
    /// Hemisphere light intensity for the instanced tiers.
    #[schemars(title = "Intensity", range(min = 0.0, max = 3.0), extend("step" = 0.05))]
    pub intensity: f32,
    /// Base impostor size in pixels, before distance attenuation.
    #[schemars(title = "Impostor Size", range(min = 0.5, max = 20.0), extend("step" = 0.5))]
    pub impostor_point_size: f32,
    /// View depth at which an impostor is drawn at its base size.
    #[schemars(skip)]
    pub impostor_size_attenuation: f32,
}

impl Default for LightingOptions {
    fn default() -> Self {
        Self {
            sky_color: [1.0, 1.0, 1.0],
            ground_color: [0.266_666_68, 0.266_666_68, 0.266_666_68],
            intensity: 1.0,
            impostor_point_size: 5.0,
            impostor_size_attenuation: 200.0,
        }
    }
}
