//! Per-tier record storage.
//!
//! The near and mid tiers (and the far tier in [`FarTierMode::Instanced`])
//! live in [`InstancedTierStore`]s: one transform and one color per element,
//! drawn as instanced sphere meshes. The far tier normally lives in an
//! [`ImpostorTierStore`]: position and color only, drawn as shaded point
//! sprites.
//!
//! Every store has a capacity fixed at construction and tracks which color
//! indices changed since the renderer last uploaded them.

mod impostor;
mod instanced;

use std::ops::Range;

use glam::{Mat4, Vec3};

pub use impostor::ImpostorTierStore;
pub use instanced::InstancedTierStore;

use crate::error::Result;
use crate::options::{FarTierMode, TierOptions};
use crate::population::Tier;
use crate::util::color::Rgb;

// ---------------------------------------------------------------------------
// Dirty tracking
// ---------------------------------------------------------------------------

/// Union of record indices whose color changed since the last upload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirtyRange {
    range: Option<Range<usize>>,
}

impl DirtyRange {
    /// Extend the dirty span to include `index`.
    pub fn mark(&mut self, index: usize) {
        self.range = Some(match self.range.take() {
            Some(r) => r.start.min(index)..r.end.max(index + 1),
            None => index..index + 1,
        });
    }

    /// Whether anything needs re-uploading.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.range.is_some()
    }

    /// Current dirty span without clearing it.
    #[must_use]
    pub fn peek(&self) -> Option<Range<usize>> {
        self.range.clone()
    }

    /// Return the dirty span and clear it.
    pub fn take(&mut self) -> Option<Range<usize>> {
        self.range.take()
    }
}

// ---------------------------------------------------------------------------
// Color access shared by both store kinds
// ---------------------------------------------------------------------------

/// Color read/write access the picking resolver needs for highlight and
/// restore, independent of how a tier is represented.
pub trait ColorStore {
    /// Tier this store holds.
    fn tier(&self) -> Tier;
    /// Number of active (rendered, pickable) records.
    fn active_count(&self) -> usize;
    /// Color of an active record.
    fn color(&self, index: usize) -> Result<Rgb>;
    /// Overwrite the color of an active record and flag it for re-upload.
    fn set_color(&mut self, index: usize, color: Rgb) -> Result<()>;
}

// ---------------------------------------------------------------------------
// Tier store bundle
// ---------------------------------------------------------------------------

/// Storage for the far tier, selected by [`FarTierMode`].
#[derive(Debug)]
pub enum FarStore {
    /// Camera-facing point sprites.
    Impostor(ImpostorTierStore),
    /// Low-detail instanced spheres.
    Instanced(InstancedTierStore),
}

/// Record counts per tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TierCounts {
    /// Active near-tier records.
    pub near: usize,
    /// Active mid-tier records.
    pub mid: usize,
    /// Active far-tier records.
    pub far: usize,
}

impl TierCounts {
    /// Sum over all tiers.
    #[must_use]
    pub fn total(&self) -> usize {
        self.near + self.mid + self.far
    }
}

/// All tier stores of one scene.
#[derive(Debug)]
pub struct TierStores {
    /// Near-tier instances.
    pub near: InstancedTierStore,
    /// Mid-tier instances.
    pub mid: InstancedTierStore,
    /// Far-tier storage.
    pub far: FarStore,
}

impl TierStores {
    /// Allocate empty stores, each able to hold `capacity` records.
    ///
    /// Sizing every store to the full population bounds the worst possible
    /// tier skew, so classification can never overflow a store.
    #[must_use]
    pub fn with_capacity(capacity: usize, tiers: &TierOptions) -> Self {
        let far = match tiers.far_mode {
            FarTierMode::Impostor => {
                FarStore::Impostor(ImpostorTierStore::new(capacity))
            }
            FarTierMode::Instanced => {
                FarStore::Instanced(InstancedTierStore::new(
                    Tier::Far,
                    capacity,
                    tiers.far_segments,
                ))
            }
        };
        Self {
            near: InstancedTierStore::new(
                Tier::Near,
                capacity,
                tiers.near_segments,
            ),
            mid: InstancedTierStore::new(
                Tier::Mid,
                capacity,
                tiers.mid_segments,
            ),
            far,
        }
    }

    /// Append an element at `position` to the store for `tier`. Returns the
    /// assigned index.
    pub fn append(
        &mut self,
        tier: Tier,
        position: Vec3,
        color: Rgb,
    ) -> Result<usize> {
        let transform = Mat4::from_translation(position);
        match (tier, &mut self.far) {
            (Tier::Near, _) => self.near.append(transform, color),
            (Tier::Mid, _) => self.mid.append(transform, color),
            (Tier::Far, FarStore::Impostor(store)) => {
                store.append(position, color)
            }
            (Tier::Far, FarStore::Instanced(store)) => {
                store.append(transform, color)
            }
        }
    }

    /// Active record count of every tier.
    #[must_use]
    pub fn counts(&self) -> TierCounts {
        TierCounts {
            near: self.near.active_count(),
            mid: self.mid.active_count(),
            far: self.far_colors().active_count(),
        }
    }

    /// Instanced stores in tier order (two or three, depending on mode).
    pub fn instanced(&self) -> impl Iterator<Item = &InstancedTierStore> {
        let far = match &self.far {
            FarStore::Instanced(store) => Some(store),
            FarStore::Impostor(_) => None,
        };
        [&self.near, &self.mid].into_iter().chain(far)
    }

    /// The impostor store, when the far tier uses point sprites.
    #[must_use]
    pub fn impostors(&self) -> Option<&ImpostorTierStore> {
        match &self.far {
            FarStore::Impostor(store) => Some(store),
            FarStore::Instanced(_) => None,
        }
    }

    /// Drain one tier's dirty color range.
    pub fn take_dirty_colors(&mut self, tier: Tier) -> Option<Range<usize>> {
        match tier {
            Tier::Near => self.near.take_dirty_colors(),
            Tier::Mid => self.mid.take_dirty_colors(),
            Tier::Far => match &mut self.far {
                FarStore::Impostor(store) => store.take_dirty_colors(),
                FarStore::Instanced(store) => store.take_dirty_colors(),
            },
        }
    }

    /// Color access for one tier.
    #[must_use]
    pub fn colors(&self, tier: Tier) -> &dyn ColorStore {
        match tier {
            Tier::Near => &self.near,
            Tier::Mid => &self.mid,
            Tier::Far => self.far_colors(),
        }
    }

    /// Mutable color access for one tier.
    pub fn colors_mut(&mut self, tier: Tier) -> &mut dyn ColorStore {
        match tier {
            Tier::Near => &mut self.near,
            Tier::Mid => &mut self.mid,
            Tier::Far => match &mut self.far {
                FarStore::Impostor(store) => store,
                FarStore::Instanced(store) => store,
            },
        }
    }

    fn far_colors(&self) -> &dyn ColorStore {
        match &self.far {
            FarStore::Impostor(store) => store,
            FarStore::Instanced(store) => store,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dirty_range_unions_marks() {
        let mut dirty = DirtyRange::default();
        assert!(!dirty.is_dirty());
        dirty.mark(7);
        dirty.mark(3);
        dirty.mark(5);
        assert_eq!(dirty.peek(), Some(3..8));
        assert_eq!(dirty.take(), Some(3..8));
        assert_eq!(dirty.take(), None);
    }

    #[test]
    fn append_routes_by_tier() {
        let mut stores = TierStores::with_capacity(4, &TierOptions::default());
        let _ = stores.append(Tier::Near, Vec3::X, [1.0, 0.0, 0.0]).unwrap();
        let _ = stores.append(Tier::Far, Vec3::Y, [0.0, 1.0, 0.0]).unwrap();
        let _ = stores.append(Tier::Far, Vec3::Z, [0.0, 0.0, 1.0]).unwrap();
        let counts = stores.counts();
        assert_eq!(counts, TierCounts { near: 1, mid: 0, far: 2 });
        assert_eq!(stores.instanced().count(), 2);
        assert_eq!(stores.impostors().unwrap().position(1).unwrap(), Vec3::Z);
    }

    #[test]
    fn instanced_far_mode_has_three_instanced_stores() {
        let tiers = TierOptions {
            far_mode: FarTierMode::Instanced,
            ..TierOptions::default()
        };
        let mut stores = TierStores::with_capacity(2, &tiers);
        let idx = stores.append(Tier::Far, Vec3::ONE, [0.5; 3]).unwrap();
        assert_eq!(idx, 0);
        assert!(stores.impostors().is_none());
        let tiers_seen: Vec<Tier> =
            stores.instanced().map(InstancedTierStore::tier).collect();
        assert_eq!(tiers_seen, vec![Tier::Near, Tier::Mid, Tier::Far]);
        assert_eq!(stores.colors(Tier::Far).color(0).unwrap(), [0.5; 3]);
    }

    #[test]
    fn colors_mut_writes_through_to_the_tier() {
        let mut stores = TierStores::with_capacity(1, &TierOptions::default());
        let _ = stores.append(Tier::Mid, Vec3::ZERO, [0.1; 3]).unwrap();
        stores.colors_mut(Tier::Mid).set_color(0, [0.9; 3]).unwrap();
        assert_eq!(stores.mid.color(0).unwrap(), [0.9; 3]);
    }

    #[test]
    fn take_dirty_colors_drains_one_tier() {
        let mut stores = TierStores::with_capacity(2, &TierOptions::default());
        let _ = stores.append(Tier::Near, Vec3::ZERO, [0.1; 3]).unwrap();
        let _ = stores.append(Tier::Far, Vec3::X, [0.2; 3]).unwrap();
        assert_eq!(stores.take_dirty_colors(Tier::Near), Some(0..1));
        assert_eq!(stores.take_dirty_colors(Tier::Near), None);
        assert_eq!(stores.take_dirty_colors(Tier::Mid), None);

        stores.colors_mut(Tier::Far).set_color(0, [0.7; 3]).unwrap();
        assert_eq!(stores.take_dirty_colors(Tier::Far), Some(0..1));
    }
}
