use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Size and shape of the generated point population.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Population", inline)]
#[serde(default)]
pub struct PopulationOptions {
    /// Number of elements generated at scene initialization.
    #[schemars(title = "Count", range(min = 0, max = 2_000_000))]
    pub count: usize,
    /// Radius of the generation sphere, centered at the origin.
    #[schemars(title = "Radius", range(min = 1.0, max = 2000.0), extend("step" = 10.0))]
    pub radius: f32,
    /// RNG seed. `None` seeds from OS entropy.
    #[schemars(skip)]
    pub seed: Option<u64>,
}

impl Default for PopulationOptions {
    fn default() -> Self {
        Self {
            count: 1_000_000,
            radius: 300.0,
            seed: None,
        }
    }
}
