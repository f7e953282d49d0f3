//! Perspective camera, viewport mapping, and the damped orbit controller.

/// Orbit controller with damped rotate, pan, and zoom.
pub mod controller;
/// Core camera struct, GPU uniform, and viewport.
pub mod core;

pub use self::controller::OrbitController;
pub use self::core::{Camera, CameraUniform, Viewport};
