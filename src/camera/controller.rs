use glam::{Quat, Vec2, Vec3};

use crate::camera::core::{Camera, CameraUniform, Viewport};
use crate::options::CameraOptions;

/// Velocities below this are snapped to zero.
const REST_EPSILON: f32 = 1e-5;

/// Orbits a focus point with quaternion orientation and distance.
///
/// Input deltas accumulate into velocities. Each [`update`](Self::update)
/// applies the `damping` fraction of every velocity and decays it by the
/// same fraction, so motion eases out over several frames. A damping of 0
/// applies input immediately.
#[derive(Debug, Clone)]
pub struct OrbitController {
    orientation: Quat,
    distance: f32,
    focus_point: Vec3,

    /// Camera kept in sync with orientation, distance and focus.
    pub camera: Camera,
    viewport: Viewport,

    rotate_velocity: Vec2,
    pan_velocity: Vec2,
    zoom_velocity: f32,

    rotate_speed: f32,
    pan_speed: f32,
    zoom_speed: f32,
    damping: f32,
    min_distance: f32,
    max_distance: f32,
}

impl OrbitController {
    /// Controller looking at the origin from `options.distance` on +Z.
    #[must_use]
    pub fn new(options: &CameraOptions, viewport: Viewport) -> Self {
        let camera = Camera::from_options(options, viewport.aspect());
        let mut controller = Self {
            orientation: Quat::IDENTITY,
            distance: options.distance,
            focus_point: Vec3::ZERO,
            camera,
            viewport,
            rotate_velocity: Vec2::ZERO,
            pan_velocity: Vec2::ZERO,
            zoom_velocity: 0.0,
            rotate_speed: options.rotate_speed,
            pan_speed: options.pan_speed,
            zoom_speed: options.zoom_speed,
            damping: options.damping.clamp(0.0, 1.0),
            min_distance: options.znear.max(1.0),
            max_distance: options.zfar,
        };
        controller.update_camera_pos();
        controller
    }

    fn update_camera_pos(&mut self) {
        let dir = self.orientation * Vec3::Z;

        self.camera.eye = self.focus_point + (dir * self.distance);
        self.camera.target = self.focus_point;
        self.camera.up = self.orientation * Vec3::Y;
    }

    /// Current viewport.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Distance from eye to focus point.
    #[must_use]
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Point the camera orbits.
    #[must_use]
    pub fn focus_point(&self) -> Vec3 {
        self.focus_point
    }

    /// Uniform for the current camera and viewport.
    #[must_use]
    pub fn uniform(&self) -> CameraUniform {
        CameraUniform::from_camera(&self.camera, self.viewport)
    }

    /// Track a new surface size.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport = Viewport::new(width, height);
        self.camera.aspect = self.viewport.aspect();
    }

    /// Queue an orbit by a pointer delta in pixels.
    pub fn rotate(&mut self, delta: Vec2) {
        self.rotate_velocity += delta * self.rotate_speed;
    }

    /// Queue a pan by a pointer delta in pixels.
    pub fn pan(&mut self, delta: Vec2) {
        self.pan_velocity += delta * self.pan_speed;
    }

    /// Queue a zoom (positive moves closer).
    pub fn zoom(&mut self, delta: f32) {
        self.zoom_velocity += delta * self.zoom_speed;
    }

    /// Whether any queued motion remains.
    #[must_use]
    pub fn is_moving(&self) -> bool {
        self.rotate_velocity != Vec2::ZERO
            || self.pan_velocity != Vec2::ZERO
            || self.zoom_velocity != 0.0
    }

    /// Apply one frame of queued motion. Returns whether the camera moved.
    pub fn update(&mut self) -> bool {
        if !self.is_moving() {
            return false;
        }
        let step = if self.damping > 0.0 { self.damping } else { 1.0 };

        self.apply_rotation(self.rotate_velocity * step);
        self.apply_pan(self.pan_velocity * step);
        self.apply_zoom(self.zoom_velocity * step);

        let keep = 1.0 - step;
        self.rotate_velocity *= keep;
        self.pan_velocity *= keep;
        self.zoom_velocity *= keep;
        if self.rotate_velocity.length_squared() < REST_EPSILON * REST_EPSILON
        {
            self.rotate_velocity = Vec2::ZERO;
        }
        if self.pan_velocity.length_squared() < REST_EPSILON * REST_EPSILON {
            self.pan_velocity = Vec2::ZERO;
        }
        if self.zoom_velocity.abs() < REST_EPSILON {
            self.zoom_velocity = 0.0;
        }

        self.update_camera_pos();
        true
    }

    fn apply_rotation(&mut self, angles: Vec2) {
        // Horizontal rotation around camera's up vector
        let up = self.orientation * Vec3::Y;
        self.orientation =
            Quat::from_axis_angle(up, -angles.x) * self.orientation;

        // Vertical rotation around camera's right vector
        let right = self.orientation * Vec3::X;
        self.orientation =
            (Quat::from_axis_angle(right, -angles.y) * self.orientation)
                .normalize();
    }

    fn apply_pan(&mut self, offset: Vec2) {
        let right = self.orientation * Vec3::X;
        let up = self.orientation * Vec3::Y;
        self.focus_point += right * -offset.x + up * offset.y;
    }

    fn apply_zoom(&mut self, amount: f32) {
        self.distance = (self.distance * (1.0 - amount))
            .clamp(self.min_distance, self.max_distance);
    }
}
