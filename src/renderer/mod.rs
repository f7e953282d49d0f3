//! Rendering collaborator interface.
//!
//! The core never talks to a GPU. Once per frame it hands a
//! [`FrameSnapshot`] to a [`FrameRenderer`]: camera uniform, hemisphere
//! light, one view per instanced tier, the impostor view, and live hit
//! markers. Each view carries the dirty color range that changed since the
//! previous frame, so a backend re-uploads only that span.
//!
//! This module also holds what a backend needs to honor the snapshot:
//! `bytemuck` upload records, UV-sphere tier meshes, the impostor shading
//! contract (CPU reference and WGSL), and a headless
//! [`RecordingRenderer`].

pub mod impostor;
/// `bytemuck` upload records.
pub mod instance;
/// UV-sphere tier meshes.
pub mod mesh;
/// Headless renderer that mirrors uploads.
pub mod recording;

use std::ops::Range;

use glam::{Mat4, Vec3};
pub use impostor::{
    impostor_point_size, shade_impostor_fragment, ImpostorShading,
    ImpostorUniform, IMPOSTOR_WGSL,
};
pub use instance::{ImpostorVertex, InstanceRaw};
pub use mesh::{uv_sphere, SphereMesh};
pub use recording::RecordingRenderer;

use crate::camera::CameraUniform;
use crate::error::Result;
use crate::options::LightingOptions;
use crate::population::Tier;
use crate::scene::HitMarker;
use crate::util::color::{lerp_rgb, Rgb};

/// Two-term sky/ground light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HemisphereLight {
    /// Color for normals pointing straight up.
    pub sky: Rgb,
    /// Color for normals pointing straight down.
    pub ground: Rgb,
    /// Overall multiplier.
    pub intensity: f32,
}

impl HemisphereLight {
    /// Light described by `options`.
    #[must_use]
    pub fn from_options(options: &LightingOptions) -> Self {
        Self {
            sky: options.sky_color,
            ground: options.ground_color,
            intensity: options.intensity,
        }
    }

    /// Incoming light for a unit `normal`.
    #[must_use]
    pub fn irradiance(&self, normal: Vec3) -> Rgb {
        let t = (normal.y + 1.0) * 0.5;
        lerp_rgb(self.ground, self.sky, t).map(|c| c * self.intensity)
    }
}

/// Per-frame view of one instanced tier.
#[derive(Debug, Clone)]
pub struct InstancedTierView<'a> {
    /// Tier these instances belong to.
    pub tier: Tier,
    /// Sphere segment count for the tier mesh.
    pub segments: u32,
    /// Live instance count; nothing at or past it is drawn.
    pub active_count: usize,
    /// World transforms of live instances.
    pub transforms: &'a [Mat4],
    /// Colors of live instances.
    pub colors: &'a [Rgb],
    /// Color span changed since the previous frame.
    pub dirty: Option<Range<usize>>,
}

/// Per-frame view of the impostor tier.
#[derive(Debug, Clone)]
pub struct ImpostorView<'a> {
    /// Impostor centers.
    pub positions: &'a [[f32; 3]],
    /// Impostor colors.
    pub colors: &'a [Rgb],
    /// Color span changed since the previous frame.
    pub dirty: Option<Range<usize>>,
    /// Sprite sizing.
    pub shading: ImpostorShading,
}

/// Everything a backend needs to draw one frame.
#[derive(Debug, Clone)]
pub struct FrameSnapshot<'a> {
    /// Frame number, starting at 0.
    pub frame: u64,
    /// Camera for this frame.
    pub camera: CameraUniform,
    /// Scene light.
    pub light: HemisphereLight,
    /// Instanced tiers, nearest first.
    pub instanced: Vec<InstancedTierView<'a>>,
    /// Impostor tier, absent when the far tier is instanced.
    pub impostors: Option<ImpostorView<'a>>,
    /// Live hit markers.
    pub markers: &'a [HitMarker],
}

/// A backend that turns snapshots into displayed frames.
pub trait FrameRenderer {
    /// Draw one frame.
    fn render(&mut self, frame: &FrameSnapshot<'_>) -> Result<()>;
}
