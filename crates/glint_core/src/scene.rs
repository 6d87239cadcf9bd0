//! Renderer-agnostic scene records.
//!
//! A [`SceneDescription`] is what the loaders produce and what the renderer
//! turns into intersectable elements.

use glint_math::{Aabb, Camera, Transform, Vec3};

use crate::{Light, Material};

/// Geometry of one object, in its own local frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Primitive {
    Sphere { center: Vec3, radius: f32 },
    Triangle { a: Vec3, b: Vec3, c: Vec3 },
}

impl Primitive {
    /// Local-space bounds.
    pub fn bounds(&self) -> Aabb {
        match *self {
            Primitive::Sphere { center, radius } => {
                let r = Vec3::splat(radius.abs());
                Aabb::from_points(center - r, center + r)
            }
            Primitive::Triangle { a, b, c } => {
                let mut bounds = Aabb::from_points(a, b);
                bounds.expand_to_point(c);
                bounds
            }
        }
    }
}

/// A primitive placed in the world with a material.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Object {
    pub primitive: Primitive,

    /// Object-to-world transform
    pub transform: Transform,

    pub material: Material,
}

impl Object {
    pub fn new(primitive: Primitive, transform: Transform, material: Material) -> Self {
        Self {
            primitive,
            transform,
            material,
        }
    }

    /// World-space bounds (re-fit around the transformed local box).
    pub fn world_bounds(&self) -> Aabb {
        self.primitive.bounds().transformed(&self.transform)
    }
}

/// Everything a scene file defines.
#[derive(Clone, Debug, Default)]
pub struct SceneDescription {
    /// Camera, if one was given
    pub camera: Option<Camera>,

    pub lights: Vec<Light>,

    pub objects: Vec<Object>,
}

impl SceneDescription {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the camera.
    pub fn with_camera(mut self, camera: Camera) -> Self {
        self.camera = Some(camera);
        self
    }

    pub fn add_object(&mut self, object: Object) {
        self.objects.push(object);
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn light_count(&self) -> usize {
        self.lights.len()
    }

    /// The configured camera, or [`Camera::default`] if none was given.
    pub fn camera_or_default(&self) -> Camera {
        self.camera.unwrap_or_default()
    }

    /// Get world-space bounding box of all objects.
    pub fn world_bounds(&self) -> Aabb {
        let mut bounds = Aabb::INVALID;
        for object in &self.objects {
            bounds.expand_to_box(&object.world_bounds());
        }
        bounds
    }
}
