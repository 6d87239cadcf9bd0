//! Sphere primitive for ray tracing.

use glint_math::{Aabb, Interval, Ray, Vec3};

use crate::SurfaceHit;

/// A sphere primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
}

impl Sphere {
    /// Create a new sphere. Negative radii are clamped to zero.
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Nearest intersection within `ray_t`.
    ///
    /// Takes the smaller root when it lies in range and falls back to the
    /// larger one, so rays starting inside the sphere hit its far side.
    /// A tangent ray (zero discriminant) counts as a hit.
    pub fn intersects(&self, ray: &Ray, ray_t: Interval) -> Option<SurfaceHit> {
        if self.radius <= 0.0 || ray.is_degenerate() {
            return None;
        }

        let oc = self.center - ray.origin();
        let a = ray.direction().length_squared();
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (h - sqrtd) / a;
        if !ray_t.contains(root) {
            root = (h + sqrtd) / a;
            if !ray_t.contains(root) {
                return None;
            }
        }

        let normal = (ray.at(root) - self.center) / self.radius;
        Some(SurfaceHit { t: root, normal })
    }

    pub fn bounds(&self) -> Aabb {
        let rvec = Vec3::splat(self.radius);
        Aabb::from_points(self.center - rvec, self.center + rvec)
    }
}
