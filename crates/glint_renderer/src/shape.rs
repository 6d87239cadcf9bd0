//! Closed set of intersectable surfaces.

use glint_core::Primitive;
use glint_math::{Aabb, Interval, Ray, Vec3};

use crate::{Sphere, Triangle};

/// Where a ray meets a surface, in the surface's own frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    /// Ray parameter of the hit
    pub t: f32,
    /// Unit surface normal
    pub normal: Vec3,
}

/// A surface in its local frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Sphere(Sphere),
    Triangle(Triangle),
    /// Solid axis-aligned box
    Box(Aabb),
}

impl Shape {
    /// Nearest intersection within `ray_t`.
    pub fn intersects(&self, ray: &Ray, ray_t: Interval) -> Option<SurfaceHit> {
        match self {
            Shape::Sphere(sphere) => sphere.intersects(ray, ray_t),
            Shape::Triangle(triangle) => triangle.intersects(ray, ray_t),
            Shape::Box(aabb) => aabb.intersects(ray, ray_t).map(|hit| SurfaceHit {
                t: hit.t,
                normal: hit.normal,
            }),
        }
    }

    /// Local-space bounds.
    pub fn bounds(&self) -> Aabb {
        match self {
            Shape::Sphere(sphere) => sphere.bounds(),
            Shape::Triangle(triangle) => triangle.bounds(),
            Shape::Box(aabb) => *aabb,
        }
    }
}

impl From<Sphere> for Shape {
    fn from(sphere: Sphere) -> Self {
        Shape::Sphere(sphere)
    }
}

impl From<Triangle> for Shape {
    fn from(triangle: Triangle) -> Self {
        Shape::Triangle(triangle)
    }
}

impl From<Aabb> for Shape {
    fn from(aabb: Aabb) -> Self {
        Shape::Box(aabb)
    }
}

impl From<&Primitive> for Shape {
    fn from(primitive: &Primitive) -> Self {
        match *primitive {
            Primitive::Sphere { center, radius } => Sphere::new(center, radius).into(),
            Primitive::Triangle { a, b, c } => Triangle::new(a, b, c).into(),
        }
    }
}
