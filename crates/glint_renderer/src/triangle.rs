//! Triangle primitive for ray tracing.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection.

use glint_math::{Aabb, Interval, Ray, Vec3};

use crate::SurfaceHit;

/// A triangle primitive with cached edges and face normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// Vertices
    v0: Vec3,
    v1: Vec3,
    v2: Vec3,
    /// `v1 - v0` and `v2 - v0`
    edge1: Vec3,
    edge2: Vec3,
    /// Pre-computed face normal (unit length, zero if degenerate)
    normal: Vec3,
}

impl Triangle {
    /// Create a new triangle from three vertices.
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3) -> Self {
        let edge1 = v1 - v0;
        let edge2 = v2 - v0;

        Self {
            v0,
            v1,
            v2,
            edge1,
            edge2,
            normal: edge1.cross(edge2).normalize_or_zero(),
        }
    }

    pub fn vertices(&self) -> [Vec3; 3] {
        [self.v0, self.v1, self.v2]
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Möller-Trumbore intersection returning `(t, u, v, normal)`.
    ///
    /// `u` and `v` are the barycentric weights of `v1` and `v2`. The triangle
    /// is closed: hits on edges and corners count. The normal faces the ray
    /// (flipped when the ray arrives from behind).
    pub fn hit_barycentric(&self, ray: &Ray, ray_t: Interval) -> Option<(f32, f32, f32, Vec3)> {
        let h = ray.direction().cross(self.edge2);
        let det = self.edge1.dot(h);

        // Ray is parallel to triangle (or has no direction)
        if det == 0.0 {
            return None;
        }

        let f = 1.0 / det;
        let s = ray.origin() - self.v0;
        let u = f * s.dot(h);
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(self.edge1);
        let v = f * ray.direction().dot(q);
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = f * self.edge2.dot(q);
        if !ray_t.contains(t) {
            return None;
        }

        let normal = if det < 0.0 { -self.normal } else { self.normal };
        Some((t, u, v, normal))
    }

    pub fn intersects(&self, ray: &Ray, ray_t: Interval) -> Option<SurfaceHit> {
        self.hit_barycentric(ray, ray_t)
            .map(|(t, _, _, normal)| SurfaceHit { t, normal })
    }

    pub fn bounds(&self) -> Aabb {
        let mut bounds = Aabb::from_points(self.v0, self.v1);
        bounds.expand_to_point(self.v2);
        bounds
    }
}
