use crate::{Interval, Ray, Transform, Vec3};

/// Axis-Aligned Bounding Box for spatial acceleration structures (BVH).
///
/// A box is valid when `min[i] <= max[i]` on every axis. The named
/// [`Aabb::INVALID`] sentinel (`min = +inf`, `max = -inf`) means "no bounds
/// yet": it never intersects a ray, and the first `expand_to_*` call on it
/// produces exactly the expanded-to geometry.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

/// Where a ray meets a box, and the normal of the face it meets.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BoxHit {
    pub t: f32,
    pub normal: Vec3,
}

impl Aabb {
    /// The "no bounds yet" sentinel.
    pub const INVALID: Aabb = Aabb {
        min: Vec3::splat(f32::INFINITY),
        max: Vec3::splat(f32::NEG_INFINITY),
    };

    /// Create the invalid (empty) sentinel box.
    pub fn invalid() -> Self {
        Self::INVALID
    }

    /// Create an AABB from two corner points (in any order).
    pub fn from_points(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// True iff `min[i] <= max[i]` on every axis.
    pub fn is_valid(&self) -> bool {
        self.min.cmple(self.max).all()
    }

    /// Grow the box to contain `p`.
    pub fn expand_to_point(&mut self, p: Vec3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    /// Grow the box to contain `other`. Invalid boxes add nothing.
    pub fn expand_to_box(&mut self, other: &Aabb) {
        if !other.is_valid() {
            return;
        }
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    /// Create an AABB that surrounds two other AABBs.
    pub fn surrounding(box0: &Aabb, box1: &Aabb) -> Self {
        let mut b = *box0;
        b.expand_to_box(box1);
        b
    }

    /// Returns the center point of the box.
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Center of the box along one axis (0=X, 1=Y, 2=Z).
    pub fn center_axis(&self, axis: usize) -> f32 {
        (self.min[axis] + self.max[axis]) * 0.5
    }

    /// Extent along each axis.
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Index of the axis with the largest span. Ties keep the lower axis.
    pub fn largest_axis(&self) -> usize {
        let size = self.size();
        let mut axis = 0;
        let mut best = 0.0;
        for i in 0..3 {
            if size[i] > best {
                best = size[i];
                axis = i;
            }
        }
        axis
    }

    /// Grow every side by `delta`. Invalid boxes are returned unchanged.
    pub fn padded(&self, delta: f32) -> Aabb {
        if !self.is_valid() {
            return *self;
        }
        Aabb {
            min: self.min - Vec3::splat(delta),
            max: self.max + Vec3::splat(delta),
        }
    }

    /// The eight corners of the box.
    pub fn corners(&self) -> [Vec3; 8] {
        let mut corners = [Vec3::ZERO; 8];
        for (i, corner) in corners.iter_mut().enumerate() {
            *corner = Vec3::new(
                if i & 1 == 0 { self.min.x } else { self.max.x },
                if i & 2 == 0 { self.min.y } else { self.max.y },
                if i & 4 == 0 { self.min.z } else { self.max.z },
            );
        }
        corners
    }

    /// Re-fit a box around the 8 transformed corners.
    ///
    /// Conservative rather than tight when the transform rotates.
    pub fn transformed(&self, transform: &Transform) -> Aabb {
        if !self.is_valid() {
            return *self;
        }
        let mut result = Aabb::INVALID;
        for corner in self.corners() {
            result.expand_to_point(transform.apply_point(corner));
        }
        result
    }

    /// Test if a ray intersects this box within `ray_t`.
    ///
    /// Slab method. Reports the entry distance and the normal of the entry
    /// face. When the ray starts inside the box (entry before `ray_t.min`)
    /// the box is treated as solid: `t` is clamped to `ray_t.min` and the
    /// normal comes from the exit face.
    pub fn intersects(&self, ray: &Ray, ray_t: Interval) -> Option<BoxHit> {
        if !self.is_valid() || ray.is_degenerate() {
            return None;
        }

        let origin = ray.origin();
        let dir = ray.direction();

        let mut t_enter = f32::NEG_INFINITY;
        let mut t_exit = f32::INFINITY;
        let mut enter_axis = 0;
        let mut exit_axis = 0;

        for axis in 0..3 {
            let d = dir[axis];
            if d == 0.0 {
                // Parallel to this slab: either always inside it or never.
                if origin[axis] < self.min[axis] || origin[axis] > self.max[axis] {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / d;
            let (near, far) = if inv < 0.0 {
                (self.max[axis], self.min[axis])
            } else {
                (self.min[axis], self.max[axis])
            };
            let t0 = (near - origin[axis]) * inv;
            let t1 = (far - origin[axis]) * inv;

            if t0 > t_enter {
                t_enter = t0;
                enter_axis = axis;
            }
            if t1 < t_exit {
                t_exit = t1;
                exit_axis = axis;
            }

            if t_enter > t_exit || t_exit < ray_t.min || t_enter > ray_t.max {
                return None;
            }
        }

        let (t, axis) = if t_enter < ray_t.min {
            (ray_t.min, exit_axis)
        } else {
            (t_enter, enter_axis)
        };

        let mut normal = Vec3::ZERO;
        normal[axis] = if dir[axis] < 0.0 { 1.0 } else { -1.0 };

        Some(BoxHit { t, normal })
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::INVALID
    }
}
