use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// What a pick that hits nothing does to the current highlight.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum PickMode {
    /// Restore the highlighted element and return to idle.
    #[default]
    ClearOnMiss,
    /// Leave the highlight unchanged.
    KeepOnMiss,
}

/// Picking and highlight parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Picking", inline)]
#[serde(default)]
pub struct PickingOptions {
    /// Color written over the selected element.
    #[schemars(skip)]
    pub highlight_color: [f32; 3],
    /// Unscaled radius of the instanced sphere mesh.
    #[schemars(skip)]
    pub sphere_radius: f32,
    /// Max ray-to-point distance at which an impostor counts as hit.
    #[schemars(title = "Impostor Hit Radius", range(min = 0.1, max = 10.0), extend("step" = 0.1))]
    pub impostor_threshold: f32,
    /// Behavior when a pick hits nothing.
    #[schemars(title = "Miss Behavior")]
    pub mode: PickMode,
    /// Seconds a hit marker stays visible after a selection.
    #[schemars(title = "Marker Lifetime", range(min = 0.0, max = 5.0), extend("step" = 0.1))]
    pub marker_lifetime_secs: f32,
}

impl Default for PickingOptions {
    fn default() -> Self {
        Self {
            highlight_color: [1.0, 1.0, 0.0],
            sphere_radius: 0.5,
            impostor_threshold: 1.0,
            mode: PickMode::ClearOnMiss,
            marker_lifetime_secs: 1.0,
        }
    }
}
