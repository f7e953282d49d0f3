//! Far-tier impostor shading contract.
//!
//! Each impostor is a camera-facing disc sized in pixels by
//! `point_size * (size_attenuation / view_depth)`. Fragments outside the
//! unit disc are discarded and the rest are lit as if they were a
//! hemisphere facing the viewer. [`shade_impostor_fragment`] is the CPU
//! reference; [`IMPOSTOR_WGSL`] is the same contract for a GPU backend.

use glam::{Vec2, Vec3};

use super::HemisphereLight;
use crate::options::LightingOptions;
use crate::util::color::Rgb;

/// Sprite sizing parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpostorShading {
    /// Base point size in pixels.
    pub point_size: f32,
    /// Depth at which a sprite is drawn at exactly `point_size`.
    pub size_attenuation: f32,
}

impl ImpostorShading {
    /// Sizing from lighting options.
    #[must_use]
    pub fn from_options(options: &LightingOptions) -> Self {
        Self {
            point_size: options.impostor_point_size,
            size_attenuation: options.impostor_size_attenuation,
        }
    }
}

/// On-screen diameter in pixels of an impostor at `view_depth`.
///
/// Points at or behind the eye get size 0.
#[must_use]
pub fn impostor_point_size(shading: &ImpostorShading, view_depth: f32) -> f32 {
    if view_depth <= 0.0 {
        return 0.0;
    }
    shading.point_size * (shading.size_attenuation / view_depth)
}

/// Shade one impostor fragment.
///
/// `offset` is the fragment's position inside the sprite mapped to
/// `[-1, 1]^2` (y up). Returns `None` for fragments outside the unit disc.
#[must_use]
pub fn shade_impostor_fragment(
    offset: Vec2,
    color: Rgb,
    light: &HemisphereLight,
) -> Option<Rgb> {
    let r2 = offset.length_squared();
    if r2 > 1.0 {
        return None;
    }
    let normal = Vec3::new(offset.x, offset.y, (1.0 - r2).sqrt()).normalize();
    let irradiance = light.irradiance(normal);
    Some([
        irradiance[0] * color[0],
        irradiance[1] * color[1],
        irradiance[2] * color[2],
    ])
}

/// Uniform block for [`IMPOSTOR_WGSL`] binding 1.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ImpostorUniform {
    /// xyz = sky color, w = intensity
    pub sky_intensity: [f32; 4],
    /// xyz = ground color, w unused
    pub ground: [f32; 4],
    /// x = point size, y = size attenuation, zw unused
    pub sizing: [f32; 4],
}

impl ImpostorUniform {
    /// Pack light and sizing.
    #[must_use]
    pub fn new(light: &HemisphereLight, shading: &ImpostorShading) -> Self {
        let [sr, sg, sb] = light.sky;
        let [gr, gg, gb] = light.ground;
        Self {
            sky_intensity: [sr, sg, sb, light.intensity],
            ground: [gr, gg, gb, 0.0],
            sizing: [shading.point_size, shading.size_attenuation, 0.0, 0.0],
        }
    }
}

/// WGSL source for drawing impostors as instanced quads.
///
/// Bind group 0: binding 0 is [`CameraUniform`](crate::camera::CameraUniform),
/// binding 1 is [`ImpostorUniform`]. One instance per
/// [`ImpostorVertex`](super::ImpostorVertex), four vertices per instance
/// drawn as a triangle strip.
pub const IMPOSTOR_WGSL: &str = r"
struct Camera {
    view_proj: mat4x4<f32>,
    position: vec3<f32>,
    aspect: f32,
    viewport_height: f32,
    _pad0: f32,
    _pad1: f32,
    _pad2: f32,
};

struct Shading {
    sky_intensity: vec4<f32>,
    ground: vec4<f32>,
    sizing: vec4<f32>,
};

@group(0) @binding(0) var<uniform> camera: Camera;
@group(0) @binding(1) var<uniform> shading: Shading;

struct VertexOut {
    @builtin(position) clip: vec4<f32>,
    @location(0) offset: vec2<f32>,
    @location(1) color: vec3<f32>,
};

@vertex
fn vs_main(
    @builtin(vertex_index) corner: u32,
    @location(0) center: vec3<f32>,
    @location(1) color: vec3<f32>,
) -> VertexOut {
    var corners = array<vec2<f32>, 4>(
        vec2<f32>(-1.0, -1.0),
        vec2<f32>(1.0, -1.0),
        vec2<f32>(-1.0, 1.0),
        vec2<f32>(1.0, 1.0),
    );
    let offset = corners[corner];
    let clip = camera.view_proj * vec4<f32>(center, 1.0);
    let depth = max(clip.w, 1e-4);
    let size_px = shading.sizing.x * (shading.sizing.y / depth);
    let half_ndc = size_px / camera.viewport_height;

    var out: VertexOut;
    out.clip = clip + vec4<f32>(
        offset.x * half_ndc / camera.aspect,
        offset.y * half_ndc,
        0.0,
        0.0,
    ) * clip.w;
    out.offset = offset;
    out.color = color;
    return out;
}

@fragment
fn fs_main(in: VertexOut) -> @location(0) vec4<f32> {
    let r2 = dot(in.offset, in.offset);
    if (r2 > 1.0) {
        discard;
    }
    let normal = normalize(vec3<f32>(in.offset, sqrt(1.0 - r2)));
    let t = (normal.y + 1.0) * 0.5;
    let light = mix(shading.ground.xyz, shading.sky_intensity.xyz, t)
        * shading.sky_intensity.w;
    return vec4<f32>(light * in.color, 1.0);
}
";

#[cfg(test)]
mod tests {
    use super::*;

    fn light() -> HemisphereLight {
        HemisphereLight::from_options(&LightingOptions::default())
    }

    #[test]
    fn outside_unit_disc_is_discarded() {
        let c = [0.2, 0.4, 0.6];
        assert!(shade_impostor_fragment(Vec2::new(0.8, 0.8), c, &light()).is_none());
        assert!(shade_impostor_fragment(Vec2::new(1.0, 0.0), c, &light()).is_some());
    }

    #[test]
    fn top_of_disc_is_sky_times_color() {
        let c = [0.2, 0.4, 0.6];
        let shaded = shade_impostor_fragment(Vec2::new(0.0, 1.0), c, &light())
            .unwrap();
        for (s, e) in shaded.iter().zip(c) {
            assert!((s - e).abs() < 1e-6);
        }
    }

    #[test]
    fn disc_center_faces_viewer() {
        let c = [1.0; 3];
        let shaded =
            shade_impostor_fragment(Vec2::ZERO, c, &light()).unwrap();
        let mid = (1.0 + 0x44 as f32 / 255.0) / 2.0;
        assert!((shaded[0] - mid).abs() < 1e-6);
    }

    #[test]
    fn point_size_attenuates_with_depth() {
        let shading = ImpostorShading::from_options(&LightingOptions::default());
        assert_eq!(impostor_point_size(&shading, 200.0), 5.0);
        assert_eq!(impostor_point_size(&shading, 400.0), 2.5);
        assert_eq!(impostor_point_size(&shading, 0.0), 0.0);
        assert_eq!(impostor_point_size(&shading, -3.0), 0.0);
    }

    #[test]
    fn uniform_packs_light_and_sizing() {
        let shading = ImpostorShading::from_options(&LightingOptions::default());
        let u = ImpostorUniform::new(&light(), &shading);
        assert_eq!(u.sky_intensity, [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(u.sizing[..2], [5.0, 200.0]);
        assert_eq!(size_of::<ImpostorUniform>(), 48);
    }

    #[test]
    fn wgsl_declares_both_stages() {
        assert!(IMPOSTOR_WGSL.contains("@vertex"));
        assert!(IMPOSTOR_WGSL.contains("fn fs_main"));
        assert!(IMPOSTOR_WGSL.contains("discard"));
    }
}
