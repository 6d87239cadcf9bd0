//! Simple ray tracer example.
//!
//! Builds a small scene in code (mirror floor, a ring of spheres, a box) and
//! saves it as PNG.

use glint_core::Falloff;
use glint_renderer::{
    render, Aabb, Camera, Color, Element, Light, Material, RenderConfig, Scene, Sphere,
    TraceSettings, Transform, Triangle, Vec3,
};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("Glint - Simple Example");
    println!("======================");

    let start = std::time::Instant::now();
    let scene = build_scene();
    println!("Scene built in {:?}", start.elapsed());

    let config = RenderConfig::default()
        .with_resolution(640, 480)
        .with_samples(2);

    let start = std::time::Instant::now();
    let image = render(&scene, &config);
    println!("Rendered in {:?}", start.elapsed());

    let filename = "simple_render.png";
    match image.save_png(filename) {
        Ok(()) => println!("Saved to {}", filename),
        Err(err) => eprintln!("Failed to save {}: {}", filename, err),
    }
}

fn build_scene() -> Scene {
    let mut elements = Vec::new();

    // Mirror floor
    let floor = Material::default()
        .with_ambient(Color::splat(0.05))
        .with_diffuse(Color::splat(0.3))
        .with_reflectance(Color::splat(0.4));
    let (a, b, c, d) = (
        Vec3::new(-20.0, -1.0, -20.0),
        Vec3::new(20.0, -1.0, -20.0),
        Vec3::new(20.0, -1.0, 20.0),
        Vec3::new(-20.0, -1.0, 20.0),
    );
    elements.push(Element::new(Triangle::new(a, d, c), Transform::IDENTITY, floor));
    elements.push(Element::new(Triangle::new(a, c, b), Transform::IDENTITY, floor));

    // Ring of spheres
    for i in 0..8 {
        let angle = i as f32 / 8.0 * std::f32::consts::TAU;
        let hue = Color::new(angle.cos() * 0.5 + 0.5, angle.sin() * 0.5 + 0.5, 0.6);
        let material = Material::default()
            .with_ambient(hue * 0.1)
            .with_diffuse(hue * 0.7)
            .with_specular(Color::splat(0.5), 40.0);
        elements.push(Element::new(
            Sphere::new(Vec3::ZERO, 0.6),
            Transform::translation(Vec3::new(angle.cos() * 3.0, -0.4, angle.sin() * 3.0 - 6.0)),
            material,
        ));
    }

    // A rotated box in the middle
    elements.push(Element::new(
        Aabb::from_points(Vec3::splat(-0.7), Vec3::splat(0.7)),
        Transform::rotation(Vec3::new(0.0, 30.0, 0.0))
            .then(&Transform::translation(Vec3::new(0.0, -0.3, -6.0))),
        Material::default()
            .with_diffuse(Color::new(0.8, 0.8, 0.2))
            .with_reflectance(Color::splat(0.2)),
    ));

    let lights = vec![
        Light::ambient(Color::splat(0.3)),
        Light::point(Vec3::new(2.0, 6.0, -2.0), Falloff::Linear, Color::splat(6.0)),
        Light::directional(Vec3::new(-1.0, -2.0, -1.0), Color::splat(0.3)),
    ];

    let camera = Camera::new(
        Vec3::new(0.0, 1.5, 2.0),
        Vec3::new(-1.333, -0.5, 0.0),
        Vec3::new(1.333, -0.5, 0.0),
        Vec3::new(-1.333, 1.5, 0.0),
        Vec3::new(1.333, 1.5, 0.0),
    );

    Scene::new(elements, lights, camera, TraceSettings::default().with_recursion_depth(3))
}
