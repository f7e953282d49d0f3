use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Display", inline)]
#[serde(default)]
/// Viewport size and frame pacing.
pub struct DisplayOptions {
    /// Viewport width in physical pixels.
    #[schemars(skip)]
    pub width: u32,
    /// Viewport height in physical pixels.
    #[schemars(skip)]
    pub height: u32,
    /// Frame cap (0 = unlimited).
    #[schemars(title = "Target FPS", range(min = 0, max = 240))]
    pub target_fps: u32,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            target_fps: 0,
        }
    }
}
