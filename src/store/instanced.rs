use std::ops::Range;

use glam::{Mat4, Vec3};

use super::{ColorStore, DirtyRange};
use crate::error::{LodError, Result};
use crate::population::Tier;
use crate::util::color::Rgb;

/// Fixed-capacity store of transform + color records for one instanced
/// tier.
///
/// Indices `0..active_count` are live. Capacity is reserved once at
/// construction and the backing arrays never grow past it, so indices stay
/// stable for the lifetime of the store.
#[derive(Debug)]
pub struct InstancedTierStore {
    tier: Tier,
    /// Sphere mesh segment count the renderer should use for this tier.
    segments: u32,
    capacity: usize,
    transforms: Vec<Mat4>,
    colors: Vec<Rgb>,
    dirty: DirtyRange,
}

impl InstancedTierStore {
    /// Create an empty store for `tier` holding at most `capacity` records.
    #[must_use]
    pub fn new(tier: Tier, capacity: usize, segments: u32) -> Self {
        Self {
            tier,
            segments,
            capacity,
            transforms: Vec::with_capacity(capacity),
            colors: Vec::with_capacity(capacity),
            dirty: DirtyRange::default(),
        }
    }

    /// Append a record. Returns its index.
    pub fn append(&mut self, transform: Mat4, color: Rgb) -> Result<usize> {
        let index = self.transforms.len();
        if index == self.capacity {
            return Err(LodError::CapacityExceeded {
                tier: self.tier,
                capacity: self.capacity,
            });
        }
        self.transforms.push(transform);
        self.colors.push(color);
        self.dirty.mark(index);
        Ok(index)
    }

    /// Tier this store holds.
    #[must_use]
    pub fn tier(&self) -> Tier {
        self.tier
    }

    /// Sphere segment count for this tier's mesh.
    #[must_use]
    pub fn segments(&self) -> u32 {
        self.segments
    }

    /// Fixed capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of live records.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.transforms.len()
    }

    /// Whether no records are live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    /// World transform of a live record.
    pub fn transform(&self, index: usize) -> Result<Mat4> {
        self.transforms
            .get(index)
            .copied()
            .ok_or_else(|| self.out_of_range(index))
    }

    /// Color of a live record.
    pub fn color(&self, index: usize) -> Result<Rgb> {
        self.colors
            .get(index)
            .copied()
            .ok_or_else(|| self.out_of_range(index))
    }

    /// Overwrite a live record's color and flag it for re-upload.
    pub fn set_color(&mut self, index: usize, color: Rgb) -> Result<()> {
        let err = self.out_of_range(index);
        let slot = self.colors.get_mut(index).ok_or(err)?;
        *slot = color;
        self.dirty.mark(index);
        Ok(())
    }

    /// World-space center and bounding radius of a live record's sphere.
    ///
    /// The radius is `base_radius` scaled by the largest axis scale of the
    /// transform.
    pub fn bounding_sphere(
        &self,
        index: usize,
        base_radius: f32,
    ) -> Result<(Vec3, f32)> {
        let (scale, _rotation, center) =
            self.transform(index)?.to_scale_rotation_translation();
        Ok((center, base_radius * scale.abs().max_element()))
    }

    /// Live transforms, in index order.
    #[must_use]
    pub fn transforms(&self) -> &[Mat4] {
        &self.transforms
    }

    /// Live colors, in index order.
    #[must_use]
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
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
            tier: self.tier,
            index,
            active_count: self.active_count(),
        }
    }
}

impl ColorStore for InstancedTierStore {
    fn tier(&self) -> Tier {
        self.tier
    }

    fn active_count(&self) -> usize {
        self.transforms.len()
    }

    fn color(&self, index: usize) -> Result<Rgb> {
        Self::color(self, index)
    }

    fn set_color(&mut self, index: usize, color: Rgb) -> Result<()> {
        Self::set_color(self, index, color)
    }
}

#[cfg(test)]
mod tests {
    use glam::Quat;

    use super::*;

    fn store(capacity: usize) -> InstancedTierStore {
        InstancedTierStore::new(Tier::Near, capacity, 10)
    }

    #[test]
    fn append_one_under_capacity_then_overflow() {
        let mut s = store(2);
        assert_eq!(s.append(Mat4::IDENTITY, [0.0; 3]).unwrap(), 0);
        assert_eq!(s.active_count(), 1);
        assert_eq!(s.append(Mat4::IDENTITY, [0.0; 3]).unwrap(), 1);
        assert_eq!(s.active_count(), 2);

        let err = s.append(Mat4::IDENTITY, [0.0; 3]).unwrap_err();
        assert!(matches!(
            err,
            LodError::CapacityExceeded {
                tier: Tier::Near,
                capacity: 2
            }
        ));
        assert_eq!(s.active_count(), 2);
    }

    #[test]
    fn zero_capacity_rejects_first_append() {
        let mut s = store(0);
        assert!(s.append(Mat4::IDENTITY, [1.0; 3]).is_err());
        assert!(s.is_empty());
    }

    #[test]
    fn inert_indices_are_out_of_range() {
        let mut s = store(8);
        let _ = s.append(Mat4::IDENTITY, [0.2; 3]).unwrap();
        assert!(matches!(
            s.color(1),
            Err(LodError::IndexOutOfRange {
                index: 1,
                active_count: 1,
                ..
            })
        ));
        assert!(s.transform(5).is_err());
        assert!(s.set_color(1, [1.0; 3]).is_err());
        assert_eq!(s.colors().len(), 1);
    }

    #[test]
    fn set_color_marks_only_the_touched_index() {
        let mut s = store(8);
        for _ in 0..4 {
            let _ = s.append(Mat4::IDENTITY, [0.0; 3]).unwrap();
        }
        assert_eq!(s.take_dirty_colors(), Some(0..4));
        s.set_color(2, [1.0, 1.0, 0.0]).unwrap();
        assert_eq!(s.dirty_colors(), Some(2..3));
        assert_eq!(s.color(2).unwrap(), [1.0, 1.0, 0.0]);
        assert_eq!(s.take_dirty_colors(), Some(2..3));
        assert_eq!(s.dirty_colors(), None);
    }

    #[test]
    fn bounding_sphere_uses_translation_and_max_scale() {
        let mut s = store(1);
        let transform = Mat4::from_scale_rotation_translation(
            Vec3::new(2.0, 3.0, 1.0),
            Quat::from_rotation_y(0.7),
            Vec3::new(4.0, -1.0, 9.0),
        );
        let _ = s.append(transform, [0.0; 3]).unwrap();
        let (center, radius) = s.bounding_sphere(0, 0.5).unwrap();
        assert!((center - Vec3::new(4.0, -1.0, 9.0)).length() < 1e-4);
        assert!((radius - 1.5).abs() < 1e-4);
    }
}
