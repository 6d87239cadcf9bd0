use crate::{Ray, Vec3};

/// Pinhole camera defined by an eye point and the four corners of a view
/// plane.
///
/// Image coordinates `(u, v)` run across the plane with `(0, 0)` at the
/// lower-left corner and `(1, 1)` at the upper-right corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub lower_left: Vec3,
    pub lower_right: Vec3,
    pub upper_left: Vec3,
    pub upper_right: Vec3,
}

impl Camera {
    /// Create a camera from an eye point and view-plane corners.
    pub fn new(
        eye: Vec3,
        lower_left: Vec3,
        lower_right: Vec3,
        upper_left: Vec3,
        upper_right: Vec3,
    ) -> Self {
        Self {
            eye,
            lower_left,
            lower_right,
            upper_left,
            upper_right,
        }
    }

    /// Point on the view plane at image coordinates `(u, v)`.
    ///
    /// Bilinear blend of the four corners, so non-rectangular planes work.
    pub fn plane_point(&self, u: f32, v: f32) -> Vec3 {
        let left = self.lower_left.lerp(self.upper_left, v);
        let right = self.lower_right.lerp(self.upper_right, v);
        left.lerp(right, u)
    }

    /// Primary ray from the eye through the view plane at `(u, v)`.
    pub fn get_ray(&self, u: f32, v: f32) -> Ray {
        Ray::through(self.eye, self.plane_point(u, v))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 1.0),
            lower_left: Vec3::new(-1.0, -1.0, 0.0),
            lower_right: Vec3::new(1.0, -1.0, 0.0),
            upper_left: Vec3::new(-1.0, 1.0, 0.0),
            upper_right: Vec3::new(1.0, 1.0, 0.0),
        }
    }
}
