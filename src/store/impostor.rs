use std::ops::Range;

use glam::Vec3;

use super::{ColorStore, DirtyRange};
use crate::error::{LodError, Result};
use crate::population::Tier;
use crate::util::color::Rgb;

/// Far-tier storage: positions and colors in parallel flat arrays.
///
/// Records carry no transform; the shading stage orients each sprite toward
/// the viewer. Positions are written once during population and never
/// change afterwards.
#[derive(Debug)]
pub struct ImpostorTierStore {
    capacity: usize,
    positions: Vec<[f32; 3]>,
    colors: Vec<Rgb>,
    dirty: DirtyRange,
}

impl ImpostorTierStore {
    /// Create an empty store for at most `capacity` impostors.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            positions: Vec::with_capacity(capacity),
            colors: Vec::with_capacity(capacity),
            dirty: DirtyRange::default(),
        }
    }

    /// Append an impostor. Returns its index.
    pub fn append(&mut self, position: Vec3, color: Rgb) -> Result<usize> {
        let index = self.positions.len();
        if index == self.capacity {
            return Err(LodError::CapacityExceeded {
                tier: Tier::Far,
                capacity: self.capacity,
            });
        }
        self.positions.push(position.to_array());
        self.colors.push(color);
        self.dirty.mark(index);
        Ok(index)
    }

    /// Fixed capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of stored impostors.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.positions.len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Position of a stored impostor.
    pub fn position(&self, index: usize) -> Result<Vec3> {
        self.positions
            .get(index)
            .map(|p| Vec3::from_array(*p))
            .ok_or_else(|| self.out_of_range(index))
    }

    /// Color of a stored impostor.
    pub fn color(&self, index: usize) -> Result<Rgb> {
        self.colors
            .get(index)
            .copied()
            .ok_or_else(|| self.out_of_range(index))
    }

    /// Overwrite an impostor's color and flag it for re-upload.
    pub fn set_color(&mut self, index: usize, color: Rgb) -> Result<()> {
        let err = self.out_of_range(index);
        let slot = self.colors.get_mut(index).ok_or(err)?;
        *slot = color;
        self.dirty.mark(index);
        Ok(())
    }

    /// Positions as `[x, y, z]` triples.
    #[must_use]
    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    /// Positions as one flat `x0 y0 z0 x1 ...` array, ready for a vertex
    /// buffer.
    #[must_use]
    pub fn positions_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Colors as `[r, g, b]` triples.
    #[must_use]
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// Colors as one flat `r0 g0 b0 r1 ...` array.
    #[must_use]
    pub fn colors_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.colors)
    }

    /// Index range whose colors changed since the last
    /// [`take_dirty_colors`](Self::take_dirty_colors).
    #[must_use]
    pub fn dirty_colors(&self) -> Option<Range<usize>> {
        self.dirty.peek()
    }

    /// Hand the dirty color range to the renderer and clear the flag.
    pub fn take_dirty_colors(&mut self) -> Option<Range<usize>> {
        self.dirty.take()
    }

    fn out_of_range(&self, index: usize) -> LodError {
        LodError::IndexOutOfRange {
            tier: Tier::Far,
            index,
            active_count: self.active_count(),
        }
    }
}

impl ColorStore for ImpostorTierStore {
    fn tier(&self) -> Tier {
        Tier::Far
    }

    fn active_count(&self) -> usize {
        self.positions.len()
    }

    fn color(&self, index: usize) -> Result<Rgb> {
        Self::color(self, index)
    }

    fn set_color(&mut self, index: usize, color: Rgb) -> Result<()> {
        Self::set_color(self, index, color)
    }
}
