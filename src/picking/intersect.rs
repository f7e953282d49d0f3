use glam::Vec3;

/// Half-line from `origin` along a unit `direction`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Start point.
    pub origin: Vec3,
    /// Unit direction.
    pub direction: Vec3,
}

impl Ray {
    /// Build a ray, normalizing `direction`.
    #[must_use]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or(Vec3::NEG_Z),
        }
    }

    /// Point at parameter `t`.
    #[inline]
    #[must_use]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Ray parameter of the point closest to `point` (may be negative).
    #[inline]
    #[must_use]
    pub fn closest_t(&self, point: Vec3) -> f32 {
        (point - self.origin).dot(self.direction)
    }

    /// Perpendicular distance from `point` to the infinite line of the ray.
    #[inline]
    #[must_use]
    pub fn line_distance(&self, point: Vec3) -> f32 {
        self.at(self.closest_t(point)).distance(point)
    }
}

/// Slab-method ray / axis-aligned box test.
///
/// Returns the entry and exit parameters `(t_enter, t_exit)` of the ray's
/// overlap with the box. `t_enter` is negative when the ray starts inside.
/// `None` when the ray misses or the box lies entirely behind the origin.
#[must_use]
pub fn ray_aabb(ray: &Ray, min: Vec3, max: Vec3) -> Option<(f32, f32)> {
    let mut t_enter = f32::NEG_INFINITY;
    let mut t_exit = f32::INFINITY;

    for axis in 0..3 {
        let origin = ray.origin[axis];
        let dir = ray.direction[axis];
        if dir == 0.0 {
            // Parallel to this slab: inside it for every t, or never.
            if origin < min[axis] || origin > max[axis] {
                return None;
            }
            continue;
        }
        let inv = 1.0 / dir;
        let mut t0 = (min[axis] - origin) * inv;
        let mut t1 = (max[axis] - origin) * inv;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        t_enter = t_enter.max(t0);
        t_exit = t_exit.min(t1);
        if t_enter > t_exit {
            return None;
        }
    }

    (t_exit >= 0.0).then_some((t_enter, t_exit))
}

/// Ray / sphere test returning the parameter of the nearest surface point.
///
/// A ray starting inside the sphere hits at `t = 0`. `None` when the ray
/// misses or the sphere lies entirely behind the origin.
#[must_use]
pub fn ray_sphere(ray: &Ray, center: Vec3, radius: f32) -> Option<f32> {
    let t_center = ray.closest_t(center);
    let d_sq = ray.at(t_center).distance_squared(center);
    let r_sq = radius * radius;
    if d_sq > r_sq {
        return None;
    }
    let half_chord = (r_sq - d_sq).sqrt();
    if t_center + half_chord < 0.0 {
        return None;
    }
    Some((t_center - half_chord).max(0.0))
}
