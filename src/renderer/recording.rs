use std::ops::Range;

use super::{uv_sphere, FrameRenderer, FrameSnapshot, SphereMesh};
use crate::camera::CameraUniform;
use crate::error::{LodError, Result};
use crate::population::Tier;
use crate::util::color::Rgb;

/// Headless [`FrameRenderer`] that mirrors uploaded color data and counts
/// the work a GPU backend would do.
///
/// A tier's colors are uploaded in full the first time it is seen (or when
/// its active count changes) and afterwards only across the dirty range
/// each snapshot reports. The mirror therefore shows exactly what a GPU
/// buffer would contain.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    mirrors: [Vec<Rgb>; 3],
    meshes: Vec<(u32, SphereMesh)>,
    frames: u64,
    draw_calls: u64,
    uploads: u64,
    uploaded_elements: u64,
    last_camera: Option<CameraUniform>,
    last_marker_count: usize,
}

impl RecordingRenderer {
    /// Empty renderer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames rendered.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Draw calls issued across all frames.
    #[must_use]
    pub fn draw_calls(&self) -> u64 {
        self.draw_calls
    }

    /// Color upload operations across all frames.
    #[must_use]
    pub fn uploads(&self) -> u64 {
        self.uploads
    }

    /// Colors uploaded across all frames.
    #[must_use]
    pub fn uploaded_elements(&self) -> u64 {
        self.uploaded_elements
    }

    /// Camera of the most recent frame.
    #[must_use]
    pub fn last_camera(&self) -> Option<&CameraUniform> {
        self.last_camera.as_ref()
    }

    /// Hit markers drawn in the most recent frame.
    #[must_use]
    pub fn last_marker_count(&self) -> usize {
        self.last_marker_count
    }

    /// Color the backend holds for an element.
    #[must_use]
    pub fn mirror_color(&self, tier: Tier, index: usize) -> Option<Rgb> {
        self.mirrors[tier.index()].get(index).copied()
    }

    /// Cached sphere mesh for a segment count, if one was built.
    #[must_use]
    pub fn mesh(&self, segments: u32) -> Option<&SphereMesh> {
        self.meshes
            .iter()
            .find(|(s, _)| *s == segments)
            .map(|(_, mesh)| mesh)
    }

    fn ensure_mesh(&mut self, segments: u32) {
        if self.mesh(segments).is_none() {
            let mesh = uv_sphere(0.5, segments, segments);
            log::debug!(
                "built {segments}-segment sphere mesh ({} vertices)",
                mesh.vertex_count()
            );
            self.meshes.push((segments, mesh));
        }
    }

    fn sync_colors(
        &mut self,
        tier: Tier,
        colors: &[Rgb],
        dirty: Option<Range<usize>>,
    ) -> Result<()> {
        let mirror = &mut self.mirrors[tier.index()];
        let range = if mirror.len() == colors.len() {
            match dirty {
                Some(range) => range,
                None => return Ok(()),
            }
        } else {
            mirror.clear();
            mirror.extend_from_slice(colors);
            0..colors.len()
        };
        let src = colors.get(range.clone()).ok_or_else(|| {
            LodError::Render(format!(
                "{tier} dirty range {range:?} exceeds {} colors",
                colors.len()
            ))
        })?;
        mirror[range.clone()].copy_from_slice(src);
        self.uploads += 1;
        self.uploaded_elements += range.len() as u64;
        log::trace!("uploaded {tier} colors {range:?}");
        Ok(())
    }
}

impl FrameRenderer for RecordingRenderer {
    fn render(&mut self, frame: &FrameSnapshot<'_>) -> Result<()> {
        for view in &frame.instanced {
            if view.colors.len() != view.active_count
                || view.transforms.len() != view.active_count
            {
                return Err(LodError::Render(format!(
                    "{} view holds {} colors for {} instances",
                    view.tier,
                    view.colors.len(),
                    view.active_count
                )));
            }
            self.sync_colors(view.tier, view.colors, view.dirty.clone())?;
            if view.active_count > 0 {
                self.ensure_mesh(view.segments);
                self.draw_calls += 1;
            }
        }
        if let Some(view) = &frame.impostors {
            self.sync_colors(Tier::Far, view.colors, view.dirty.clone())?;
            if !view.positions.is_empty() {
                self.draw_calls += 1;
            }
        }
        self.draw_calls += frame.markers.len() as u64;
        self.last_marker_count = frame.markers.len();
        self.last_camera = Some(frame.camera);
        self.frames += 1;
        Ok(())
    }
}
