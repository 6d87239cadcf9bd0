//! A shape placed in the world with a material.

use glint_core::{Material, Object};
use glint_math::{Aabb, Interval, Ray, Transform};

use crate::{Shape, SurfaceHit};

/// Renderable scene element.
///
/// The shape lives in its own frame; `transform` maps it to world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Element {
    pub shape: Shape,
    pub transform: Transform,
    pub material: Material,
}

impl Element {
    pub fn new(shape: impl Into<Shape>, transform: Transform, material: Material) -> Self {
        Self {
            shape: shape.into(),
            transform,
            material,
        }
    }

    /// Intersect a world-space ray.
    ///
    /// The ray is moved into the shape's frame, where distances are scaled by
    /// the transform; `ray_t` is scaled to match and the hit is mapped back,
    /// so `t` is a world-space distance and the normal a world-space unit
    /// vector.
    pub fn intersects(&self, ray: &Ray, ray_t: Interval) -> Option<SurfaceHit> {
        let (local, scale) = self.transform.apply_inverse_ray(ray);
        if scale == 0.0 || !scale.is_finite() {
            return None;
        }

        let hit = self.shape.intersects(&local, ray_t.scaled(scale))?;
        Some(SurfaceHit {
            t: hit.t / scale,
            normal: self.transform.apply_normal(hit.normal),
        })
    }

    /// Conservative world-space bounds.
    pub fn world_bounds(&self) -> Aabb {
        self.shape.bounds().transformed(&self.transform)
    }
}

impl From<&Object> for Element {
    fn from(object: &Object) -> Self {
        Element::new(Shape::from(&object.primitive), object.transform, object.material)
    }
}
