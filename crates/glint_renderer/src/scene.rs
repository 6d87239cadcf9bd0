//! Scene ownership and the recursive trace.
//!
//! Implements Whitted-style shading with:
//! - Phong direct lighting from ambient, directional and point lights
//! - Shadow rays for every non-ambient light
//! - Mirror reflection bounces down to a configurable depth

use glint_core::{Color, Light, LightKind, SceneDescription};
use glint_math::{Camera, Interval, Ray};

use crate::{Bvh, Element, Hit};

/// Trace configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceSettings {
    /// Reflection bounces after the primary hit; negative renders black
    pub recursion_depth: i32,
    /// Shade by surface normal instead of lighting
    pub debug_normals: bool,
    /// Use the BVH (otherwise a linear scan over every element)
    pub use_bvh: bool,
    /// Offset along secondary rays to avoid self-intersection
    pub epsilon: f32,
}

impl Default for TraceSettings {
    fn default() -> Self {
        Self {
            recursion_depth: 2,
            debug_normals: false,
            use_bvh: true,
            epsilon: 1e-3,
        }
    }
}

impl TraceSettings {
    pub fn with_recursion_depth(mut self, depth: i32) -> Self {
        self.recursion_depth = depth;
        self
    }

    pub fn with_debug_normals(mut self, enabled: bool) -> Self {
        self.debug_normals = enabled;
        self
    }

    pub fn with_bvh(mut self, enabled: bool) -> Self {
        self.use_bvh = enabled;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f32) -> Self {
        self.epsilon = epsilon;
        self
    }
}

/// A renderable scene. Immutable once built, so it can be shared across
/// render threads.
#[derive(Debug, Clone)]
pub struct Scene {
    elements: Vec<Element>,
    lights: Vec<Light>,
    camera: Camera,
    bvh: Bvh,
    settings: TraceSettings,
}

impl Scene {
    /// Build a scene. The BVH is constructed here, once.
    pub fn new(
        elements: Vec<Element>,
        lights: Vec<Light>,
        camera: Camera,
        settings: TraceSettings,
    ) -> Self {
        let bvh = if settings.use_bvh {
            Bvh::build(&elements)
        } else {
            Bvh::default()
        };

        log::info!(
            "Scene ready: {} elements, {} lights, {} BVH nodes",
            elements.len(),
            lights.len(),
            bvh.node_count()
        );

        Self {
            elements,
            lights,
            camera,
            bvh,
            settings,
        }
    }

    /// Build a scene from parsed records.
    pub fn from_description(description: SceneDescription, settings: TraceSettings) -> Self {
        if description.camera.is_none() {
            log::warn!("No camera defined, using the default camera");
        }
        let camera = description.camera_or_default();
        let elements = description.objects.iter().map(Element::from).collect();

        Self::new(elements, description.lights, camera, settings)
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn bvh(&self) -> &Bvh {
        &self.bvh
    }

    pub fn settings(&self) -> &TraceSettings {
        &self.settings
    }

    /// Nearest element hit with `t` in `ray_t` (strictly below `ray_t.max`).
    ///
    /// With `shortcircuit` any hit is returned as soon as it is found.
    pub fn intersect(&self, ray: &Ray, shortcircuit: bool, ray_t: Interval) -> Option<Hit> {
        if self.settings.use_bvh {
            self.bvh.trace(ray, shortcircuit, ray_t, &self.elements)
        } else {
            self.intersect_linear(ray, shortcircuit, ray_t)
        }
    }

    fn intersect_linear(&self, ray: &Ray, shortcircuit: bool, ray_t: Interval) -> Option<Hit> {
        let mut best: Option<Hit> = None;

        for (index, element) in self.elements.iter().enumerate() {
            let t_best = best.map_or(ray_t.max, |hit| hit.t);
            if let Some(hit) = element.intersects(ray, ray_t.with_max(t_best)) {
                if hit.t < t_best {
                    best = Some(Hit {
                        index,
                        t: hit.t,
                        normal: hit.normal,
                    });
                    if shortcircuit {
                        break;
                    }
                }
            }
        }
        best
    }

    /// True if anything blocks `ray` within `ray_t`.
    pub fn occluded(&self, ray: &Ray, ray_t: Interval) -> bool {
        self.intersect(ray, true, ray_t).is_some()
    }

    /// Color seen along `ray`, with `depth` reflection bounces left.
    pub fn trace(&self, ray: &Ray, depth: i32) -> Color {
        if depth < 0 {
            return Color::ZERO;
        }

        let eps = self.settings.epsilon;
        let Some(hit) = self.intersect(ray, false, Interval::from_min(eps)) else {
            return Color::ZERO;
        };

        let n = hit.normal;
        if self.settings.debug_normals {
            return 0.5 * (n + Color::ONE);
        }

        let p = ray.at(hit.t);
        let v = -ray.direction();
        let material = &self.elements[hit.index].material;
        let mut color = Color::ZERO;

        for light in &self.lights {
            if let LightKind::Ambient = light.kind {
                color += material.ka * light.color;
                continue;
            }

            let l = light.direction_at(p);
            let shadow = Ray::new(p, -l);
            if self.occluded(&shadow, Interval::new(eps, light.distance_to(p))) {
                continue;
            }
            color += material.phong(n, v, l, light.intensity_at(p));
        }

        if material.is_reflective() {
            let bounce = Ray::new(p, -v + 2.0 * v.dot(n) * n);
            color += material.kr * self.trace(&bounce, depth - 1);
        }

        color
    }

    /// Trace the camera ray through image coordinates `(u, v)`.
    pub fn trace_uv(&self, u: f32, v: f32) -> Color {
        let ray = self.camera.get_ray(u, v);
        self.trace(&ray, self.settings.recursion_depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Sphere, Triangle};
    use glint_core::{Falloff, Material};
    use glint_math::{Aabb, Transform, Vec3};

    fn assert_close(a: Color, b: Color) {
        assert!((a - b).length() < 1e-4, "{a:?} != {b:?}");
    }

    fn floor(material: Material) -> Vec<Element> {
        // two triangles covering [-10, 10]^2 at y = 0, facing up
        let a = Vec3::new(-10.0, 0.0, -10.0);
        let b = Vec3::new(10.0, 0.0, -10.0);
        let c = Vec3::new(10.0, 0.0, 10.0);
        let d = Vec3::new(-10.0, 0.0, 10.0);
        vec![
            Element::new(Triangle::new(a, d, c), Transform::IDENTITY, material),
            Element::new(Triangle::new(a, c, b), Transform::IDENTITY, material),
        ]
    }

    fn diffuse() -> Material {
        Material::default()
            .with_ambient(Color::splat(0.1))
            .with_diffuse(Color::splat(0.5))
    }

    #[test]
    fn test_depth_below_zero_is_black() {
        let scene = Scene::new(
            floor(diffuse()),
            vec![Light::ambient(Color::ONE)],
            Camera::default(),
            TraceSettings::default(),
        );
        let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), -Vec3::Y);

        assert_close(scene.trace(&ray, 0), Color::splat(0.1));
        assert_eq!(scene.trace(&ray, -1), Color::ZERO);
    }

    #[test]
    fn test_miss_is_black() {
        let scene = Scene::new(
            floor(diffuse()),
            vec![Light::ambient(Color::ONE)],
            Camera::default(),
            TraceSettings::default(),
        );
        let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::Y);
        assert_eq!(scene.trace(&ray, 3), Color::ZERO);
    }

    #[test]
    fn test_shadow_removes_direct_light_only() {
        let mut elements = floor(diffuse());
        // occluder between the light and the floor at the origin
        elements.push(Element::new(
            Sphere::new(Vec3::new(0.0, 2.0, 0.0), 0.5),
            Transform::IDENTITY,
            diffuse(),
        ));
        let lights = vec![
            Light::ambient(Color::splat(0.5)),
            Light::point(Vec3::new(0.0, 4.0, 0.0), Falloff::None, Color::ONE),
        ];
        let scene = Scene::new(elements, lights, Camera::default(), TraceSettings::default());

        // viewer looking at the shadowed point from the side
        let shadowed = Ray::through(Vec3::new(5.0, 5.0, 0.0), Vec3::ZERO);
        assert_close(scene.trace(&shadowed, 0), Color::splat(0.05));

        // a lit point further out gets ambient + Phong
        let lit = Ray::through(Vec3::new(5.0, 5.0, 0.0), Vec3::new(3.0, 0.0, 0.0));
        let color = scene.trace(&lit, 0);
        let l = Vec3::new(3.0, -4.0, 0.0).normalize();
        let expected = 0.05 + 0.1 + 0.5 * (-l.dot(Vec3::Y));
        assert_close(color, Color::splat(expected));
    }

    #[test]
    fn test_directional_light_and_debug_normals() {
        let elements = floor(diffuse());
        let lights = vec![Light::directional(-Vec3::Y, Color::ONE)];
        let ray = Ray::new(Vec3::new(1.0, 5.0, 1.0), -Vec3::Y);

        let scene = Scene::new(elements.clone(), lights.clone(), Camera::default(), TraceSettings::default());
        assert_close(scene.trace(&ray, 0), Color::splat(0.6));

        let debug = Scene::new(
            elements,
            lights,
            Camera::default(),
            TraceSettings::default().with_debug_normals(true),
        );
        assert_close(debug.trace(&ray, 0), Color::new(0.5, 1.0, 0.5));
    }

    #[test]
    fn test_reflection_bounce() {
        let mirror = Material::default().with_reflectance(Color::splat(0.5));
        let mut elements = floor(mirror);
        // a glowing (ambient only) box straight above
        elements.push(Element::new(
            Aabb::from_points(Vec3::new(-1.0, 8.0, -1.0), Vec3::new(1.0, 9.0, 1.0)),
            Transform::IDENTITY,
            Material::default().with_ambient(Color::ONE),
        ));
        let scene = Scene::new(
            elements,
            vec![Light::ambient(Color::ONE)],
            Camera::default(),
            TraceSettings::default(),
        );

        let ray = Ray::through(Vec3::new(0.0, 5.0, 0.0), Vec3::new(0.0, 0.0, 0.0));
        // mirror sees the box once per bounce of budget
        assert_close(scene.trace(&ray, 0), Color::ZERO);
        assert_close(scene.trace(&ray, 1), Color::splat(0.5));
    }

    #[test]
    fn test_trace_is_deterministic() {
        let mirror = Material::default()
            .with_ambient(Color::splat(0.1))
            .with_diffuse(Color::splat(0.4))
            .with_specular(Color::splat(0.3), 20.0)
            .with_reflectance(Color::splat(0.3));
        let mut elements = floor(mirror);
        for i in 0..5 {
            elements.push(Element::new(
                Sphere::new(Vec3::new(i as f32 * 2.0 - 4.0, 1.0, 0.0), 0.8),
                Transform::IDENTITY,
                mirror,
            ));
        }
        let lights = vec![
            Light::ambient(Color::splat(0.2)),
            Light::point(Vec3::new(0.0, 10.0, 5.0), Falloff::Linear, Color::splat(10.0)),
            Light::directional(Vec3::new(-1.0, -1.0, -1.0), Color::splat(0.5)),
        ];
        let scene = Scene::new(elements, lights, Camera::default(), TraceSettings::default());

        let ray = Ray::through(Vec3::new(0.0, 3.0, 8.0), Vec3::new(0.3, 1.0, 0.0));
        let first = scene.trace(&ray, 4);
        for _ in 0..10 {
            let again = scene.trace(&ray, 4);
            assert_eq!(first.to_array().map(f32::to_bits), again.to_array().map(f32::to_bits));
        }
        assert!(first.length() > 0.0);
    }

    #[test]
    fn test_linear_scan_matches_bvh() {
        let mut elements = floor(diffuse());
        for i in 0..10 {
            elements.push(Element::new(
                Sphere::new(Vec3::new(i as f32 - 5.0, 1.0, (i % 3) as f32), 0.6),
                Transform::IDENTITY,
                diffuse(),
            ));
        }
        let lights = vec![
            Light::ambient(Color::splat(0.1)),
            Light::point(Vec3::new(2.0, 6.0, 4.0), Falloff::Quadratic, Color::splat(30.0)),
        ];

        let with_bvh = Scene::new(elements.clone(), lights.clone(), Camera::default(), TraceSettings::default());
        let linear = Scene::new(elements, lights, Camera::default(), TraceSettings::default().with_bvh(false));
        assert!(linear.bvh().is_empty());

        for i in 0..50 {
            let x = i as f32 * 0.2 - 5.0;
            let ray = Ray::through(Vec3::new(0.0, 6.0, 8.0), Vec3::new(x, 0.5, 0.0));
            assert_close(with_bvh.trace(&ray, 2), linear.trace(&ray, 2));
        }
    }

    #[test]
    fn test_from_description() {
        let mut description = SceneDescription::new();
        description.add_object(glint_core::Object::new(
            glint_core::Primitive::Sphere {
                center: Vec3::ZERO,
                radius: 0.5,
            },
            Transform::translation(Vec3::new(0.0, 0.0, -2.0)),
            Material::default().with_ambient(Color::new(1.0, 0.0, 0.0)),
        ));
        description.add_light(Light::ambient(Color::ONE));

        let scene = Scene::from_description(description, TraceSettings::default());
        assert_eq!(scene.elements().len(), 1);
        assert_eq!(*scene.camera(), Camera::default());

        assert_close(scene.trace_uv(0.5, 0.5), Color::new(1.0, 0.0, 0.0));
        assert_eq!(scene.trace_uv(0.0, 0.0), Color::ZERO);
    }

    #[test]
    fn test_from_description_keeps_camera() {
        let camera = Camera::new(
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::new(-2.0, -1.0, 3.0),
            Vec3::new(2.0, -1.0, 3.0),
            Vec3::new(-2.0, 1.0, 3.0),
            Vec3::new(2.0, 1.0, 3.0),
        );
        let description = SceneDescription::new().with_camera(camera);

        let scene = Scene::from_description(description, TraceSettings::default());
        assert_eq!(*scene.camera(), camera);
        assert!(scene.elements().is_empty());
    }
}
