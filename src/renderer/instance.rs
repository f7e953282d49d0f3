use glam::Mat4;

use crate::util::color::Rgb;

/// Per-instance data for an instanced sphere tier.
/// Must match the WGSL instance input layout.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceRaw {
    /// Column-major model matrix.
    pub model: [[f32; 4]; 4],
    /// xyz = RGB color, w = 1
    pub color: [f32; 4],
}

impl InstanceRaw {
    /// Pack one transform and color.
    #[must_use]
    pub fn new(model: Mat4, color: Rgb) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            color: [color[0], color[1], color[2], 1.0],
        }
    }

    /// Pack parallel transform and color slices.
    #[must_use]
    pub fn pack(models: &[Mat4], colors: &[Rgb]) -> Vec<Self> {
        models
            .iter()
            .zip(colors)
            .map(|(m, c)| Self::new(*m, *c))
            .collect()
    }
}

/// Per-point data for the impostor tier.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ImpostorVertex {
    /// World-space center.
    pub position: [f32; 3],
    /// RGB color.
    pub color: [f32; 3],
}

impl ImpostorVertex {
    /// Pack parallel position and color slices.
    #[must_use]
    pub fn pack(positions: &[[f32; 3]], colors: &[Rgb]) -> Vec<Self> {
        positions
            .iter()
            .zip(colors)
            .map(|(&position, &color)| Self { position, color })
            .collect()
    }
}
