// Homogeneous transforms with a cached inverse.
//
// Wraps a glam::Mat4 together with its inverse so object/world conversions of
// points, normals and rays never need to invert on the hot path.

use glam::{Mat4, Vec3};

use crate::Ray;

/// A 4x4 homogeneous transform (object -> world) with a cached inverse.
///
/// The inverse is recomputed on every mutation, so `inverse == forward⁻¹`
/// always holds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    forward: Mat4,
    inverse: Mat4,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        forward: Mat4::IDENTITY,
        inverse: Mat4::IDENTITY,
    };

    /// Create a transform from a forward matrix.
    ///
    /// The matrix must be invertible.
    pub fn from_matrix(forward: Mat4) -> Self {
        Self {
            forward,
            inverse: forward.inverse(),
        }
    }

    /// A pure translation.
    pub fn translation(offset: Vec3) -> Self {
        Self {
            forward: Mat4::from_translation(offset),
            inverse: Mat4::from_translation(-offset),
        }
    }

    /// A (possibly non-uniform) scale about the origin.
    pub fn scale(factors: Vec3) -> Self {
        Self::from_matrix(Mat4::from_scale(factors))
    }

    /// A rotation given as an exponential map in degrees.
    ///
    /// The rotation axis is `r / |r|` and the angle is `|r|` degrees.
    pub fn rotation(r_degrees: Vec3) -> Self {
        let angle = r_degrees.length();
        if angle == 0.0 {
            return Self::IDENTITY;
        }
        Self::from_matrix(Mat4::from_axis_angle(r_degrees / angle, angle.to_radians()))
    }

    /// Reset to identity.
    pub fn reset(&mut self) {
        *self = Self::IDENTITY;
    }

    /// The forward (object -> world) matrix.
    pub fn forward(&self) -> Mat4 {
        self.forward
    }

    /// The cached inverse (world -> object) matrix.
    pub fn inverse(&self) -> Mat4 {
        self.inverse
    }

    /// Concatenate `next` onto this transform in place.
    ///
    /// Applying the result is equivalent to applying `self` and then `next`:
    /// `a2b.cat(&b2c)` turns `a2b` into the transform from A to C.
    pub fn cat(&mut self, next: &Transform) {
        self.forward = next.forward * self.forward;
        self.inverse = self.forward.inverse();
    }

    /// Consuming form of [`Transform::cat`].
    pub fn then(mut self, next: &Transform) -> Self {
        self.cat(next);
        self
    }

    /// Transform a point (w = 1).
    pub fn apply_point(&self, p: Vec3) -> Vec3 {
        self.forward.project_point3(p)
    }

    /// Transform a point by the inverse (w = 1).
    pub fn apply_inverse_point(&self, p: Vec3) -> Vec3 {
        self.inverse.project_point3(p)
    }

    /// Transform a direction (w = 0). Translation does not affect it.
    pub fn apply_vector(&self, v: Vec3) -> Vec3 {
        self.forward.transform_vector3(v)
    }

    /// Transform a direction by the inverse (w = 0).
    pub fn apply_inverse_vector(&self, v: Vec3) -> Vec3 {
        self.inverse.transform_vector3(v)
    }

    /// Transform a surface normal and renormalize it.
    ///
    /// Normals are carried by the transpose of the inverse, which keeps them
    /// perpendicular to the surface under non-uniform scale.
    pub fn apply_normal(&self, n: Vec3) -> Vec3 {
        self.inverse
            .transpose()
            .transform_vector3(n)
            .normalize_or_zero()
    }

    /// Transform a ray.
    ///
    /// Returns the transformed ray and the distance scale from the original
    /// space to the new one: a distance `t` along the input ray corresponds to
    /// `t * scale` along the output ray.
    pub fn apply_ray(&self, ray: &Ray) -> (Ray, f32) {
        map_ray(&self.forward, ray)
    }

    /// Transform a ray by the inverse. See [`Transform::apply_ray`].
    pub fn apply_inverse_ray(&self, ray: &Ray) -> (Ray, f32) {
        map_ray(&self.inverse, ray)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

fn map_ray(m: &Mat4, ray: &Ray) -> (Ray, f32) {
    let origin = m.project_point3(ray.origin());
    let target = m.project_point3(ray.origin() + ray.direction());
    let direction = target - origin;
    (Ray::new(origin, direction), direction.length())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Vec3, b: Vec3) {
        assert!((a - b).length() < 1e-4, "{a:?} != {b:?}");
    }

    #[test]
    fn test_identity() {
        let point = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(Transform::IDENTITY.apply_point(point), point);
        assert_eq!(Transform::default().apply_inverse_point(point), point);
    }

    #[test]
    fn test_translation_point_and_vector() {
        let t = Transform::translation(Vec3::new(10.0, 20.0, 30.0));

        assert_close(t.apply_point(Vec3::new(1.0, 2.0, 3.0)), Vec3::new(11.0, 22.0, 33.0));

        // Translation should NOT affect vectors (w=0)
        assert_close(t.apply_vector(Vec3::X), Vec3::X);
    }

    #[test]
    fn test_rotation_exponential_map() {
        // 90 degrees about Z
        let t = Transform::rotation(Vec3::new(0.0, 0.0, 90.0));
        assert_close(t.apply_point(Vec3::X), Vec3::Y);

        // zero vector means no rotation
        assert_eq!(Transform::rotation(Vec3::ZERO), Transform::IDENTITY);
    }

    #[test]
    fn test_round_trip() {
        let transforms = [
            Transform::translation(Vec3::new(10.0, -20.0, 30.0)),
            Transform::rotation(Vec3::new(30.0, 45.0, -60.0)),
            Transform::scale(Vec3::new(2.0, 0.5, 3.0)),
            Transform::scale(Vec3::new(2.0, 0.5, 3.0))
                .then(&Transform::rotation(Vec3::new(0.0, 45.0, 0.0)))
                .then(&Transform::translation(Vec3::new(1.0, 2.0, 3.0))),
        ];
        let points = [
            Vec3::ZERO,
            Vec3::new(5.0, 3.0, 2.0),
            Vec3::new(-1.5, 7.25, -0.5),
        ];

        for t in &transforms {
            for &p in &points {
                assert_close(t.apply_inverse_point(t.apply_point(p)), p);
                assert_close(t.apply_point(t.apply_inverse_point(p)), p);
            }
        }
    }

    #[test]
    fn test_inverse_stays_in_sync() {
        let mut t = Transform::translation(Vec3::new(1.0, 2.0, 3.0));
        t.cat(&Transform::scale(Vec3::splat(2.0)));
        t.cat(&Transform::rotation(Vec3::new(10.0, 0.0, 0.0)));

        let product = t.forward() * t.inverse();
        assert!(product.abs_diff_eq(Mat4::IDENTITY, 1e-5));
    }

    #[test]
    fn test_cat_applies_self_then_argument() {
        // Translate first, then scale: origin -> (1,0,0) -> (2,0,0)
        let t = Transform::translation(Vec3::X).then(&Transform::scale(Vec3::splat(2.0)));
        assert_close(t.apply_point(Vec3::ZERO), Vec3::new(2.0, 0.0, 0.0));

        // Scale first, then translate: origin -> origin -> (1,0,0)
        let t = Transform::scale(Vec3::splat(2.0)).then(&Transform::translation(Vec3::X));
        assert_close(t.apply_point(Vec3::ZERO), Vec3::X);
    }

    #[test]
    fn test_reset() {
        let mut t = Transform::scale(Vec3::splat(4.0));
        t.reset();
        assert_eq!(t, Transform::IDENTITY);
    }

    #[test]
    fn test_normal_under_non_uniform_scale() {
        // Plane x + y = 0, scaled by 2 along x, becomes x + 2y = 0
        let t = Transform::scale(Vec3::new(2.0, 1.0, 1.0));
        let n = t.apply_normal(Vec3::new(1.0, 1.0, 0.0).normalize());

        assert_close(n, Vec3::new(1.0, 2.0, 0.0).normalize());
        assert!((n.length() - 1.0).abs() < 1e-6);

        // the forward matrix would give the wrong answer
        let wrong = t.apply_vector(Vec3::new(1.0, 1.0, 0.0)).normalize();
        assert!((wrong - n).length() > 0.1);
    }

    #[test]
    fn test_ray_scale_factor() {
        let t = Transform::scale(Vec3::splat(2.0));
        let ray = Ray::new(Vec3::new(1.0, 0.0, 0.0), Vec3::Y);

        let (world, s) = t.apply_ray(&ray);
        assert!((s - 2.0).abs() < 1e-6);
        assert_close(world.origin(), Vec3::new(2.0, 0.0, 0.0));
        assert_close(world.direction(), Vec3::Y);

        let (local, s) = t.apply_inverse_ray(&world);
        assert!((s - 0.5).abs() < 1e-6);
        assert_close(local.origin(), ray.origin());

        // a distance of 3 along `ray` is 6 along `world`
        assert_close(world.at(3.0 * 2.0), t.apply_point(ray.at(3.0)));
    }

    #[test]
    fn test_ray_non_uniform_scale_factor() {
        let t = Transform::scale(Vec3::new(1.0, 3.0, 1.0));
        let ray = Ray::new(Vec3::ZERO, Vec3::new(1.0, 1.0, 0.0));

        let (mapped, s) = t.apply_ray(&ray);
        let expected = Vec3::new(1.0, 3.0, 0.0) / 2.0_f32.sqrt();
        assert!((s - expected.length()).abs() < 1e-5);
        assert_close(mapped.direction(), expected.normalize());
        assert_close(mapped.at(5.0 * s), t.apply_point(ray.at(5.0)));
    }
}
