//! Shared utilities: color conversion and frame timing.

pub mod color;
/// Frame pacing and FPS smoothing.
pub mod frame_timing;
