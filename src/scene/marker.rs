use glam::Vec3;

/// World-space radius of a hit marker.
pub const MARKER_RADIUS: f32 = 1.0;

/// Short-lived wireframe sphere drawn where a pick landed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitMarker {
    /// Center of the marker.
    pub position: Vec3,
    /// Marker radius.
    pub radius: f32,
    age: f32,
    lifetime: f32,
}

impl HitMarker {
    /// Marker at `position` that lives for `lifetime` seconds.
    #[must_use]
    pub fn new(position: Vec3, lifetime: f32) -> Self {
        Self {
            position,
            radius: MARKER_RADIUS,
            age: 0.0,
            lifetime: lifetime.max(0.0),
        }
    }

    /// Advance by `dt` seconds. Returns whether the marker is still alive.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.age += dt.max(0.0);
        !self.is_expired()
    }

    /// Seconds until expiry.
    #[must_use]
    pub fn remaining(&self) -> f32 {
        (self.lifetime - self.age).max(0.0)
    }

    /// Whether the lifetime has elapsed.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.age >= self.lifetime
    }
}
