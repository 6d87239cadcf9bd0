//! Glint math - geometry kernel for the ray tracer.
//!
//! Rays, t-intervals, homogeneous transforms with a cached inverse,
//! axis-aligned bounding boxes and the view-plane camera.

// Re-export glam for convenience
pub use glam::*;

mod aabb;
mod camera;
mod interval;
mod ray;
mod transform;

pub use aabb::{Aabb, BoxHit};
pub use camera::Camera;
pub use interval::Interval;
pub use ray::Ray;
pub use transform::Transform;
