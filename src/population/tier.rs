use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{LodError, Result};

/// Detail tier an element is rendered at, chosen by distance from the
/// origin.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Closest band, full-detail instanced spheres.
    Near,
    /// Middle band, reduced-detail instanced spheres.
    Mid,
    /// Everything beyond the mid threshold.
    Far,
}

impl Tier {
    /// All tiers, nearest first.
    pub const ALL: [Self; 3] = [Self::Near, Self::Mid, Self::Far];

    /// Position in [`Tier::ALL`].
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Near => 0,
            Self::Mid => 1,
            Self::Far => 2,
        }
    }

    /// Lowercase name used in logs and error messages.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Near => "near",
            Self::Mid => "mid",
            Self::Far => "far",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Validated pair of tier distance thresholds.
///
/// Bands are `[0, near)`, `[near, mid)` and `[mid, inf)`, so every distance
/// falls into exactly one of them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierThresholds {
    near: f32,
    mid: f32,
}

impl TierThresholds {
    /// Build thresholds, rejecting values that would make the bands overlap
    /// or leave a gap.
    pub fn new(near: f32, mid: f32) -> Result<Self> {
        let valid = near.is_finite() && mid.is_finite() && near >= 0.0;
        if !valid || near > mid {
            return Err(LodError::InvalidThresholds { near, mid });
        }
        Ok(Self { near, mid })
    }

    /// Upper (exclusive) bound of the near band.
    #[must_use]
    pub fn near(&self) -> f32 {
        self.near
    }

    /// Upper (exclusive) bound of the mid band.
    #[must_use]
    pub fn mid(&self) -> f32 {
        self.mid
    }

    /// Classify a distance from the origin.
    #[inline]
    #[must_use]
    pub fn classify(&self, distance: f32) -> Tier {
        if distance < self.near {
            Tier::Near
        } else if distance < self.mid {
            Tier::Mid
        } else {
            Tier::Far
        }
    }
}
